//! Private keys and the Wallet Import Format codec.
//!
//! A Steem private key is a secp256k1 scalar. Its textual form is WIF:
//! `base58(0x80 ‖ scalar ‖ checksum)` where the checksum is the first four
//! bytes of a double SHA-256 over the version-tagged scalar. Some wallets
//! append a `0x01` compressed-pubkey marker before the checksum; decoding
//! tolerates it, encoding never emits it (public keys are always handled
//! compressed in this crate).

use std::fmt;
use std::str::FromStr;

use k256::ecdsa::SigningKey;
use zeroize::Zeroizing;

use super::KeyError;
use super::public_key::PublicKey;

/// WIF version byte shared with Bitcoin mainnet.
const WIF_VERSION: u8 = 0x80;

/// A secp256k1 private key.
///
/// Immutable once constructed. The inner scalar is zeroized on drop, and
/// the `Debug` form never prints key material.
///
/// # Example
///
/// ```
/// use steem_rs::crypto::PrivateKey;
///
/// let key: PrivateKey = "5JWHY5DxTF6qN5grTtChDCYBmWHfY9zaSsw4CxEKN5eZpH9iBma"
///     .parse()
///     .unwrap();
/// assert_eq!(
///     key.public_key().to_string(),
///     "STM7jNh5ejQoqHqWcGWFJ1v4F5CzsG3EiBuz1VooCng1cH5QpJD27"
/// );
/// ```
#[derive(Clone)]
pub struct PrivateKey {
    pub(crate) key: SigningKey,
}

impl PrivateKey {
    /// Decodes a WIF string, verifying the version byte and checksum.
    pub fn from_wif(wif: &str) -> Result<Self, KeyError> {
        let payload = Zeroizing::new(
            bs58::decode(wif)
                .with_check(Some(WIF_VERSION))
                .into_vec()
                .map_err(|err| match err {
                    bs58::decode::Error::InvalidChecksum { .. } => KeyError::BadChecksum,
                    bs58::decode::Error::InvalidVersion { .. } => {
                        KeyError::BadKey("unexpected WIF version byte".to_owned())
                    }
                    other => KeyError::BadEncoding(other.to_string()),
                })?,
        );

        // payload = version ‖ scalar [‖ 0x01 compressed marker]
        match payload.len() {
            33 => {}
            34 if payload[33] == 0x01 => {}
            _ => return Err(KeyError::BadKey("unexpected WIF payload length".to_owned())),
        }
        Self::from_bytes(&payload[1..33])
    }

    /// Builds a key from a raw 32-byte scalar in `[1, n-1]`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let key =
            SigningKey::from_slice(bytes).map_err(|err| KeyError::BadKey(err.to_string()))?;
        Ok(Self { key })
    }

    /// The raw 32-byte scalar, big-endian.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.key.to_bytes().into()
    }

    /// Encodes the key as WIF.
    pub fn to_wif(&self) -> String {
        let scalar = Zeroizing::new(self.to_bytes());
        bs58::encode(&scalar[..])
            .with_check_version(WIF_VERSION)
            .into_string()
    }

    /// Derives the compressed public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from(self.key.verifying_key().to_owned())
    }
}

impl FromStr for PrivateKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wif(s)
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.key.to_bytes() == other.key.to_bytes()
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(…)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // WIF / raw scalar / public string triples cross-checked against
    // steem-js output.
    pub(crate) const KEY_DATA: &[(&str, &str, &str)] = &[
        (
            "5JWHY5DxTF6qN5grTtChDCYBmWHfY9zaSsw4CxEKN5eZpH9iBma",
            "5ad2b8df2c255d4a2996ee7d065e013e1bbb35c075ee6e5208aca44adc9a9d4c",
            "STM7jNh5ejQoqHqWcGWFJ1v4F5CzsG3EiBuz1VooCng1cH5QpJD27",
        ),
        (
            "5KPipdRzoxrp6dDqsBfMD6oFZG356trVHV5QBGx3rABs1zzWWs8",
            "cf9d6121ed458f24ea456ad7ff700da39e86688988cfe5c6ed6558642cf1e32f",
            "STM7W7ACQDZJZ6rZGKeT9auipnSiSxFxJ4k71QXmrhY9HbvYsNnQ2",
        ),
    ];

    #[test]
    fn wif_decodes_to_known_scalar() {
        for (wif, scalar_hex, _) in KEY_DATA {
            let key = PrivateKey::from_wif(wif).unwrap();
            assert_eq!(hex::encode(key.to_bytes()), *scalar_hex);
        }
    }

    #[test]
    fn wif_round_trips() {
        for (wif, _, _) in KEY_DATA {
            let key = PrivateKey::from_wif(wif).unwrap();
            assert_eq!(key.to_wif(), *wif);
        }
    }

    #[test]
    fn raw_bytes_round_trip() {
        for (wif, scalar_hex, _) in KEY_DATA {
            let scalar = hex::decode(scalar_hex).unwrap();
            let key = PrivateKey::from_bytes(&scalar).unwrap();
            assert_eq!(key.to_wif(), *wif);
        }
    }

    #[test]
    fn derives_expected_public_key() {
        for (wif, _, public) in KEY_DATA {
            let key = PrivateKey::from_wif(wif).unwrap();
            assert_eq!(key.public_key().to_string(), *public);
        }
    }

    #[test]
    fn corrupted_checksum_is_rejected() {
        let mut wif = KEY_DATA[0].0.to_owned();
        wif.pop();
        wif.push('t');
        assert!(matches!(
            PrivateKey::from_wif(&wif),
            Err(KeyError::BadChecksum) | Err(KeyError::BadEncoding(_))
        ));
    }

    #[test]
    fn zero_scalar_is_rejected() {
        assert!(PrivateKey::from_bytes(&[0u8; 32]).is_err());
    }

    #[test]
    fn debug_redacts_key_material() {
        let key = PrivateKey::from_wif(KEY_DATA[0].0).unwrap();
        assert_eq!(format!("{key:?}"), "PrivateKey(…)");
    }
}
