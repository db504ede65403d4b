//! Transaction assembly, digesting, signing, and verification.
//!
//! A transaction pins itself to a recent block through
//! `ref_block_num`/`ref_block_prefix`, expires at `expiration`, and carries
//! an ordered list of operations. The signing digest is
//! `SHA256(chain_id ‖ serialized_tx)` over the *unsigned* serialization;
//! the `signatures` array lives only in the JSON broadcast envelope and
//! never feeds back into the digest.

use sha2::{Digest, Sha256};

use serde::{Deserialize, Serialize};

use super::operations::Operation;
use crate::chain::ChainConfig;
use crate::crypto::signature::SignatureError;
use crate::crypto::{CompactSignature, PrivateKey, PublicKey};
use crate::encoder::{BinaryEncoder, BinarySerialize, EncodeError};
use crate::scalar::{UInt16, UInt32};
use crate::timestamp::TimePointSec;

/// Lifetime given to a transaction when the caller sets no expiration.
pub const DEFAULT_EXPIRATION_SECS: i64 = 600;

/// Errors from serializing or signing a transaction.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Signing or serializing a transaction with no operations.
    #[error("transaction has no operations")]
    NoOperations,
    /// Serializing before an expiration was set or defaulted.
    #[error("transaction has no expiration")]
    NoExpiration,
    /// A block ID that is not hex or is shorter than eight bytes.
    #[error("invalid block id `{0}`")]
    BadBlockId(String),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Signature(#[from] SignatureError),
}

/// A Steem transaction under construction or received from a node.
///
/// # Example
///
/// ```
/// use steem_rs::chain::ChainConfig;
/// use steem_rs::protocol::{Transaction, VoteOperation};
/// use steem_rs::scalar::Int16;
///
/// let mut tx = Transaction::new(36029u16.into(), 1164960351u32.into());
/// tx.expiration = Some("2016-08-08T12:24:17".parse().unwrap());
/// tx.push_operation(VoteOperation {
///     voter: "xeroc".into(),
///     author: "xeroc".into(),
///     permlink: "piston".into(),
///     weight: Int16(10000),
/// });
///
/// let key = "5JLw5dgQAx6rhZEgNN5C2ds1V47RweGshynFSWFbaMohsYsBvE8".parse().unwrap();
/// tx.sign(&[key], &ChainConfig::steem()).unwrap();
/// assert_eq!(tx.signatures.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub ref_block_num: UInt16,
    pub ref_block_prefix: UInt32,
    /// Defaults to "now + 600 s" at signing time when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<TimePointSec>,
    pub operations: Vec<Operation>,
    /// Protocol extension slots; always empty today.
    #[serde(default)]
    pub extensions: Vec<serde_json::Value>,
    /// Hex compact signatures, in the order of the signing keys.
    #[serde(default)]
    pub signatures: Vec<CompactSignature>,
}

impl Transaction {
    /// An empty transaction pinned to a reference block.
    pub fn new(ref_block_num: UInt16, ref_block_prefix: UInt32) -> Self {
        Self {
            ref_block_num,
            ref_block_prefix,
            expiration: None,
            operations: Vec::new(),
            extensions: Vec::new(),
            signatures: Vec::new(),
        }
    }

    /// Appends an operation, preserving insertion order.
    pub fn push_operation(&mut self, op: impl Into<Operation>) {
        self.operations.push(op.into());
    }

    /// The unsigned wire serialization (the digest preimage minus the
    /// chain ID). Signatures are deliberately not part of this form.
    pub fn serialize(&self) -> Result<Vec<u8>, TransactionError> {
        if self.operations.is_empty() {
            return Err(TransactionError::NoOperations);
        }
        let expiration = self.expiration.ok_or(TransactionError::NoExpiration)?;

        let mut enc = BinaryEncoder::new(Vec::new());
        self.ref_block_num.binary_serialize(enc.field("ref_block_num"));
        self.ref_block_prefix
            .binary_serialize(enc.field("ref_block_prefix"));
        expiration.binary_serialize(enc.field("expiration"));
        enc.field("operations").sequence(&self.operations);
        if self.extensions.is_empty() {
            enc.field("extensions").uvarint(0);
        } else {
            enc.fail(EncodeError::UnsupportedExtensions("transaction extensions"));
        }
        Ok(enc.finish()?)
    }

    /// The signing digest: `SHA256(chain_id ‖ serialized_tx)`.
    pub fn digest(&self, chain: &ChainConfig) -> Result<[u8; 32], TransactionError> {
        let mut hasher = Sha256::new();
        hasher.update(chain.id.as_bytes());
        hasher.update(self.serialize()?);
        Ok(hasher.finalize().into())
    }

    /// Signs with each key in order, replacing `signatures`.
    ///
    /// Applies the default expiration when none is set. On any failure the
    /// signature list is left untouched.
    pub fn sign(
        &mut self,
        keys: &[PrivateKey],
        chain: &ChainConfig,
    ) -> Result<(), TransactionError> {
        if self.operations.is_empty() {
            return Err(TransactionError::NoOperations);
        }
        if self.expiration.is_none() {
            self.expiration = Some(TimePointSec::now().plus_seconds(DEFAULT_EXPIRATION_SECS));
        }

        let digest = self.digest(chain)?;
        let signatures = keys
            .iter()
            .map(|key| key.sign_digest(&digest))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            operations = self.operations.len(),
            signatures = signatures.len(),
            "signed transaction"
        );
        self.signatures = signatures;
        Ok(())
    }

    /// Verifies every held signature against the expected keys, pairwise
    /// and in order. Empty or mismatched signature lists verify as
    /// `false`.
    pub fn verify(
        &self,
        keys: &[PublicKey],
        chain: &ChainConfig,
    ) -> Result<bool, TransactionError> {
        if self.signatures.is_empty() || self.signatures.len() != keys.len() {
            return Ok(false);
        }
        let digest = self.digest(chain)?;
        Ok(self
            .signatures
            .iter()
            .zip(keys)
            .all(|(signature, key)| key.verify_digest(&digest, signature)))
    }
}

/// The low 16 bits of a block number, as carried in `ref_block_num`.
pub fn ref_block_num(block_number: u32) -> UInt16 {
    UInt16(block_number as u16)
}

/// Bytes `[4..8)` of a hex block ID, read little-endian.
pub fn ref_block_prefix(block_id: &str) -> Result<UInt32, TransactionError> {
    let raw = hex::decode(block_id).map_err(|_| TransactionError::BadBlockId(block_id.to_owned()))?;
    let prefix = raw
        .get(4..8)
        .ok_or_else(|| TransactionError::BadBlockId(block_id.to_owned()))?;
    Ok(UInt32(u32::from_le_bytes(
        prefix.try_into().expect("four-byte slice"),
    )))
}
