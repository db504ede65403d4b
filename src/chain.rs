//! Chain identity: the 32-byte chain ID and the public-key address prefix.
//!
//! Every signature this crate produces commits to a chain via the digest
//! preimage `SHA256(chain_id ‖ serialized_tx)`, and every public-key string
//! carries the chain's address prefix (`STM` on Steem mainnet). The pair is
//! captured by [`ChainConfig`]; well-known configurations live in
//! [`crate::networks`].

use std::fmt;
use std::str::FromStr;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Address prefix used when none is configured explicitly.
pub const DEFAULT_ADDRESS_PREFIX: &str = "STM";

/// A 32-byte chain identifier.
///
/// Mixed into every digest preimage to domain-separate signatures across
/// forks and test networks. Steem mainnet famously uses the all-zero ID.
///
/// # Serialization
///
/// Serializes to and from the 64-character lowercase hex form.
///
/// # Example
///
/// ```
/// use steem_rs::chain::ChainId;
///
/// let id: ChainId = "beeab0de00000000000000000000000000000000000000000000000000000000"
///     .parse()
///     .unwrap();
/// assert_eq!(id.as_bytes()[0], 0xbe);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId([u8; 32]);

impl ChainId {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl AsRef<[u8]> for ChainId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Error returned when a chain ID string is not 64 hex characters.
#[derive(Debug, thiserror::Error)]
#[error("invalid chain id `{0}`: expected 64 hex characters")]
pub struct ChainIdParseError(String);

impl FromStr for ChainId {
    type Err = ChainIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| ChainIdParseError(s.to_owned()))?;
        Ok(Self(bytes))
    }
}

impl Serialize for ChainId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ChainId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// The constants a signer needs about its target network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// 32-byte chain identifier, the digest preimage prefix.
    pub id: ChainId,
    /// ASCII tag prepended to public-key strings, e.g. `STM`.
    pub address_prefix: String,
}

impl ChainConfig {
    /// Builds a configuration from a hex chain ID and an address prefix.
    pub fn new(id_hex: &str, address_prefix: &str) -> Result<Self, ChainIdParseError> {
        Ok(Self {
            id: id_hex.parse()?,
            address_prefix: address_prefix.to_owned(),
        })
    }
}
