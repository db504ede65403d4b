//! Public keys and the prefixed base58 string codec.
//!
//! A Steem public key is a 33-byte compressed secp256k1 point. The string
//! form is the chain's address prefix followed by
//! `base58(point ‖ ripemd160(point)[..4])`; note the RIPEMD-160 checksum,
//! a graphene-era quirk distinct from the double-SHA-256 used by WIF.

use std::fmt;
use std::io;
use std::str::FromStr;

use k256::ecdsa::VerifyingKey;
use ripemd::{Digest, Ripemd160};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::KeyError;
use crate::chain::DEFAULT_ADDRESS_PREFIX;
use crate::encoder::{BinaryEncoder, BinarySerialize};

/// A compressed secp256k1 public key.
///
/// # Serialization
///
/// JSON uses the prefixed string form with the default `STM` prefix; use
/// [`to_prefixed_string`](Self::to_prefixed_string) /
/// [`from_prefixed_str`](Self::from_prefixed_str) for other networks. The
/// wire form is the raw 33 compressed bytes.
///
/// # Example
///
/// ```
/// use steem_rs::crypto::PublicKey;
///
/// let key: PublicKey = "STM7jNh5ejQoqHqWcGWFJ1v4F5CzsG3EiBuz1VooCng1cH5QpJD27"
///     .parse()
///     .unwrap();
/// assert_eq!(key.to_bytes().len(), 33);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub(crate) key: VerifyingKey,
}

impl PublicKey {
    /// Parses a 33-byte compressed SEC1 point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let key =
            VerifyingKey::from_sec1_bytes(bytes).map_err(|err| KeyError::BadKey(err.to_string()))?;
        Ok(Self { key })
    }

    /// The compressed SEC1 encoding.
    pub fn to_bytes(&self) -> [u8; 33] {
        self.key
            .to_encoded_point(true)
            .as_bytes()
            .try_into()
            .expect("compressed secp256k1 point is 33 bytes")
    }

    /// Renders the prefixed string form, e.g. `STM7jNh…`.
    pub fn to_prefixed_string(&self, prefix: &str) -> String {
        let point = self.to_bytes();
        let tag = Ripemd160::digest(point);
        let mut payload = Vec::with_capacity(point.len() + 4);
        payload.extend_from_slice(&point);
        payload.extend_from_slice(&tag[..4]);
        format!("{prefix}{}", bs58::encode(payload).into_string())
    }

    /// Parses a prefixed string, verifying prefix and RIPEMD-160 checksum.
    pub fn from_prefixed_str(prefix: &str, s: &str) -> Result<Self, KeyError> {
        let body = s.strip_prefix(prefix).ok_or_else(|| KeyError::BadPrefix {
            expected: prefix.to_owned(),
            key: s.to_owned(),
        })?;
        let payload = bs58::decode(body)
            .into_vec()
            .map_err(|err| KeyError::BadEncoding(err.to_string()))?;
        if payload.len() <= 4 {
            return Err(KeyError::BadEncoding("public key payload too short".to_owned()));
        }
        let (point, tag) = payload.split_at(payload.len() - 4);
        if Ripemd160::digest(point)[..4] != *tag {
            return Err(KeyError::BadChecksum);
        }
        Self::from_bytes(point)
    }
}

impl From<VerifyingKey> for PublicKey {
    fn from(key: VerifyingKey) -> Self {
        Self { key }
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_prefixed_string(DEFAULT_ADDRESS_PREFIX))
    }
}

impl FromStr for PublicKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_prefixed_str(DEFAULT_ADDRESS_PREFIX, s)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl BinarySerialize for PublicKey {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.bytes(&self.to_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN: &str = "STM7jNh5ejQoqHqWcGWFJ1v4F5CzsG3EiBuz1VooCng1cH5QpJD27";

    #[test]
    fn string_round_trips() {
        let key: PublicKey = KNOWN.parse().unwrap();
        assert_eq!(key.to_string(), KNOWN);
    }

    #[test]
    fn bytes_round_trip() {
        let key: PublicKey = KNOWN.parse().unwrap();
        let again = PublicKey::from_bytes(&key.to_bytes()).unwrap();
        assert_eq!(key, again);
    }

    #[test]
    fn wrong_prefix_is_rejected() {
        let err = PublicKey::from_prefixed_str("TST", KNOWN).unwrap_err();
        assert!(matches!(err, KeyError::BadPrefix { .. }));
    }

    #[test]
    fn corrupted_checksum_is_rejected() {
        let mut s = KNOWN.to_owned();
        // Swap two distinct base58 characters near the end.
        s.pop();
        s.push('3');
        assert!(matches!(
            s.parse::<PublicKey>(),
            Err(KeyError::BadChecksum) | Err(KeyError::BadEncoding(_)) | Err(KeyError::BadKey(_))
        ));
    }

    #[test]
    fn custom_prefix_round_trips() {
        let key: PublicKey = KNOWN.parse().unwrap();
        let testnet = key.to_prefixed_string("TST");
        assert!(testnet.starts_with("TST"));
        let parsed = PublicKey::from_prefixed_str("TST", &testnet).unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn json_form_is_prefixed_string() {
        let key: PublicKey = KNOWN.parse().unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"{KNOWN}\""));
        let back: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
