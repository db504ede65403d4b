//! Keys, signatures, and the private-message cipher.
//!
//! - [`private_key`] / [`public_key`] - the WIF and prefixed-base58 codecs
//!   around secp256k1 key material
//! - [`signature`] - canonical 65-byte compact ECDSA with public-key
//!   recovery
//! - [`brain_key`] - deterministic key derivation from account credentials
//! - [`memo`] - encrypted `#`-prefixed memos (ECDH + AES-256-CBC)

pub mod brain_key;
pub mod memo;
pub mod private_key;
pub mod public_key;
pub mod signature;

pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use signature::CompactSignature;

/// Errors from decoding or constructing key material.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum KeyError {
    /// WIF or public-key checksum did not match its payload.
    #[error("key checksum mismatch")]
    BadChecksum,
    /// Public-key string does not start with the expected address prefix.
    #[error("expected address prefix `{expected}` on `{key}`")]
    BadPrefix {
        expected: String,
        key: String,
    },
    /// Scalar out of range, point not on the curve, or a malformed payload.
    #[error("invalid key material: {0}")]
    BadKey(String),
    /// Input was not valid base58 or had an impossible length.
    #[error("undecodable key string: {0}")]
    BadEncoding(String),
}
