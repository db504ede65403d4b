//! Canonical compact ECDSA signatures with public-key recovery.
//!
//! Steem consumes 65-byte compact signatures:
//! `recovery_byte ‖ R (32, big-endian) ‖ S (32, big-endian)` with
//! `recovery_byte = 27 + 4 + recovery_id` (the `+ 4` marks a
//! compressed-key recovery). The chain additionally refuses any signature
//! failing its canonicality predicate, so the signer retries with a
//! deterministic counter folded into the RFC 6979 nonce input until the
//! predicate holds. Given the same key and digest the output is therefore
//! reproducible across runs and implementations.

use std::fmt;
use std::str::FromStr;

use k256::FieldBytes;
use k256::ecdsa::hazmat::SignPrimitive;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::Sha256;

use super::private_key::PrivateKey;
use super::public_key::PublicKey;

/// Offset of the recovery byte for compressed-key signatures: 27 + 4.
const COMPRESSED_RECOVERY_OFFSET: u8 = 31;

/// Bound on nonce retries; in practice one or two attempts suffice.
const MAX_SIGNING_ATTEMPTS: u32 = 256;

/// Errors from signing, parsing, or verifying compact signatures.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    /// Input was not exactly 65 bytes.
    #[error("compact signature must be 65 bytes, got {0}")]
    BadLength(usize),
    /// Recovery byte outside the compressed-key range `31..=34`.
    #[error("unsupported recovery byte {0}")]
    BadRecoveryFlag(u8),
    /// No canonical signature was found within the retry bound. Indicates
    /// a programming error rather than bad input.
    #[error("exhausted nonce retries without a canonical signature")]
    NonCanonical,
    /// Public-key recovery failed for this digest/signature pair.
    #[error("public key recovery failed")]
    RecoveryFailed,
    /// The recovered key differs from the expected key.
    #[error("signature does not match the expected public key")]
    KeyMismatch,
}

/// A 65-byte compact signature: `recovery_byte ‖ R ‖ S`.
///
/// # Serialization
///
/// JSON uses the 130-character hex form, matching the `signatures` array
/// of a broadcast transaction.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CompactSignature([u8; 65]);

impl CompactSignature {
    pub fn from_bytes(bytes: [u8; 65]) -> Result<Self, SignatureError> {
        let flag = bytes[0];
        if !(COMPRESSED_RECOVERY_OFFSET..=COMPRESSED_RECOVERY_OFFSET + 3).contains(&flag) {
            return Err(SignatureError::BadRecoveryFlag(flag));
        }
        Ok(Self(bytes))
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, SignatureError> {
        let arr: [u8; 65] = bytes
            .try_into()
            .map_err(|_| SignatureError::BadLength(bytes.len()))?;
        Self::from_bytes(arr)
    }

    pub fn as_bytes(&self) -> &[u8; 65] {
        &self.0
    }

    /// The recovery id in `0..=3`.
    pub fn recovery_id(&self) -> u8 {
        self.0[0] - COMPRESSED_RECOVERY_OFFSET
    }

    /// Whether `R` and `S` satisfy the chain's canonicality predicate.
    pub fn is_canonical(&self) -> bool {
        canonical(self.0[1..].try_into().expect("64-byte r‖s tail"))
    }

    /// Recovers the signing public key from this signature over `digest`.
    pub fn recover(&self, digest: &[u8; 32]) -> Result<PublicKey, SignatureError> {
        let recid = RecoveryId::from_byte(self.recovery_id())
            .ok_or(SignatureError::BadRecoveryFlag(self.0[0]))?;
        let signature =
            Signature::from_slice(&self.0[1..]).map_err(|_| SignatureError::RecoveryFailed)?;
        let key = VerifyingKey::recover_from_prehash(digest, &signature, recid)
            .map_err(|_| SignatureError::RecoveryFailed)?;
        Ok(PublicKey::from(key))
    }
}

/// The fc canonicality predicate over the 64-byte `R ‖ S` tail: the high
/// bit of each component must be clear and neither component may carry a
/// redundant leading zero byte.
fn canonical(rs: &[u8; 64]) -> bool {
    rs[0] & 0x80 == 0
        && !(rs[0] == 0 && rs[1] & 0x80 == 0)
        && rs[32] & 0x80 == 0
        && !(rs[32] == 0 && rs[33] & 0x80 == 0)
}

impl PrivateKey {
    /// Signs a 32-byte digest, producing a canonical compact signature.
    ///
    /// Deterministic: RFC 6979 nonces with a retry counter appended to the
    /// extra input, so the same `(key, digest)` always yields the same
    /// bytes.
    pub fn sign_digest(&self, digest: &[u8; 32]) -> Result<CompactSignature, SignatureError> {
        let z = FieldBytes::from(*digest);
        for attempt in 0..MAX_SIGNING_ATTEMPTS {
            let counter = attempt.to_le_bytes();
            let extra: &[u8] = if attempt == 0 { &[] } else { &counter };

            let Ok((signature, recid)) = self
                .key
                .as_nonzero_scalar()
                .try_sign_prehashed_rfc6979::<Sha256>(&z, extra)
            else {
                // Degenerate nonce for this counter; try the next one.
                continue;
            };
            let Some(mut recid) = recid else {
                continue;
            };

            let mut signature = signature;
            if let Some(low_s) = signature.normalize_s() {
                // Negating S flips the parity of the recovered point.
                signature = low_s;
                recid = RecoveryId::from_byte(recid.to_byte() ^ 1)
                    .expect("recovery id stays in range");
            }

            let rs: [u8; 64] = signature
                .to_bytes()
                .as_slice()
                .try_into()
                .expect("r ‖ s is 64 bytes");
            if !canonical(&rs) {
                continue;
            }

            let mut out = [0u8; 65];
            out[0] = COMPRESSED_RECOVERY_OFFSET + recid.to_byte();
            out[1..].copy_from_slice(&rs);
            return CompactSignature::from_bytes(out);
        }
        Err(SignatureError::NonCanonical)
    }
}

impl PublicKey {
    /// Verifies a compact signature over `digest` against this key.
    ///
    /// Returns `false` for non-canonical signatures even when the
    /// recovered key would match.
    pub fn verify_digest(&self, digest: &[u8; 32], signature: &CompactSignature) -> bool {
        if !signature.is_canonical() {
            return false;
        }
        match signature.recover(digest) {
            Ok(recovered) => recovered == *self,
            Err(_) => false,
        }
    }
}

impl fmt::Display for CompactSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for CompactSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompactSignature({})", hex::encode(self.0))
    }
}

impl FromStr for CompactSignature {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 65];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|_| SignatureError::BadLength(s.len() / 2))?;
        Self::from_bytes(bytes)
    }
}

impl Serialize for CompactSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for CompactSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> PrivateKey {
        PrivateKey::from_wif("5JWHY5DxTF6qN5grTtChDCYBmWHfY9zaSsw4CxEKN5eZpH9iBma").unwrap()
    }

    fn test_digest() -> [u8; 32] {
        let mut digest = [0u8; 32];
        for (i, byte) in digest.iter_mut().enumerate() {
            *byte = i as u8;
        }
        digest
    }

    #[test]
    fn signature_is_canonical() {
        let sig = test_key().sign_digest(&test_digest()).unwrap();
        assert!(sig.is_canonical());
        assert!(sig.recovery_id() <= 3);
    }

    #[test]
    fn signing_is_deterministic() {
        let key = test_key();
        let a = key.sign_digest(&test_digest()).unwrap();
        let b = key.sign_digest(&test_digest()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn verify_of_sign_holds() {
        let key = test_key();
        let digest = test_digest();
        let sig = key.sign_digest(&digest).unwrap();
        assert!(key.public_key().verify_digest(&digest, &sig));
    }

    #[test]
    fn recover_equals_derive() {
        let key = test_key();
        let digest = test_digest();
        let sig = key.sign_digest(&digest).unwrap();
        assert_eq!(sig.recover(&digest).unwrap(), key.public_key());
    }

    #[test]
    fn wrong_key_does_not_verify() {
        let digest = test_digest();
        let sig = test_key().sign_digest(&digest).unwrap();
        let other = PrivateKey::from_wif("5KPipdRzoxrp6dDqsBfMD6oFZG356trVHV5QBGx3rABs1zzWWs8")
            .unwrap();
        assert!(!other.public_key().verify_digest(&digest, &sig));
    }

    #[test]
    fn tampered_digest_does_not_verify() {
        let key = test_key();
        let digest = test_digest();
        let sig = key.sign_digest(&digest).unwrap();
        let mut other = digest;
        other[0] ^= 1;
        assert!(!key.public_key().verify_digest(&other, &sig));
    }

    #[test]
    fn hex_round_trip() {
        let sig = test_key().sign_digest(&test_digest()).unwrap();
        let parsed: CompactSignature = sig.to_string().parse().unwrap();
        assert_eq!(parsed, sig);
        assert_eq!(sig.to_string().len(), 130);
    }

    #[test]
    fn bad_lengths_are_rejected() {
        assert!(matches!(
            CompactSignature::from_slice(&[0u8; 64]),
            Err(SignatureError::BadLength(64))
        ));
    }

    #[test]
    fn uncompressed_recovery_flag_is_rejected() {
        let mut bytes = [0u8; 65];
        bytes[0] = 27; // uncompressed range
        assert!(matches!(
            CompactSignature::from_bytes(bytes),
            Err(SignatureError::BadRecoveryFlag(27))
        ));
    }

    #[test]
    fn canonical_predicate_flags_high_bits() {
        let mut rs = [1u8; 64];
        assert!(canonical(&rs));
        rs[0] = 0x80;
        assert!(!canonical(&rs));
        rs[0] = 0;
        assert!(!canonical(&rs)); // leading zero with low next byte
        rs[1] = 0x80;
        assert!(canonical(&rs));
    }
}
