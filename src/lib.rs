#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Client-side Steem transactions in Rust.
//!
//! This crate builds, serializes, signs, and verifies transactions for
//! Steem-family delegated-proof-of-stake chains entirely offline: it
//! produces bytes and signatures a node will accept and decodes what a
//! node returns, but never talks to one. Pair it with any HTTP client
//! that can POST the JSON-RPC envelopes from [`rpc`].
//!
//! # Overview
//!
//! The canonical signing path runs through four layers:
//!
//! 1. operations ([`protocol::operations`]) are serialized by the wire
//!    codec ([`encoder`]) into the unsigned transaction bytes,
//! 2. the digest is `SHA256(chain_id ‖ tx_bytes)`
//!    ([`protocol::transaction`], [`chain`]),
//! 3. each private key produces a canonical 65-byte compact signature
//!    with recovery parameter ([`crypto::signature`]),
//! 4. the transaction plus hex signatures form the JSON broadcast
//!    envelope.
//!
//! # Modules
//!
//! - [`chain`] / [`networks`] - chain IDs, address prefixes, and the
//!   registry of known networks
//! - [`encoder`] - the deterministic binary serializer
//! - [`scalar`] / [`timestamp`] / [`asset`] - domain scalar codecs
//! - [`crypto`] - WIF and public-key codecs, canonical signing,
//!   brain-key derivation, and the encrypted-memo cipher
//! - [`protocol`] - the operation union, authorities, and transactions
//! - [`rpc`] - JSON-RPC envelopes, authenticated requests, and the
//!   static method/role catalogs
//! - [`reputation`] - display form of raw reputation values
//!
//! # Example
//!
//! ```
//! use steem_rs::chain::ChainConfig;
//! use steem_rs::crypto::PrivateKey;
//! use steem_rs::protocol::{Transaction, VoteOperation};
//! use steem_rs::scalar::Int16;
//!
//! let mut tx = Transaction::new(36029u16.into(), 1164960351u32.into());
//! tx.expiration = Some("2016-08-08T12:24:17".parse().unwrap());
//! tx.push_operation(VoteOperation {
//!     voter: "xeroc".into(),
//!     author: "xeroc".into(),
//!     permlink: "piston".into(),
//!     weight: Int16(10000),
//! });
//!
//! let key: PrivateKey = "5JLw5dgQAx6rhZEgNN5C2ds1V47RweGshynFSWFbaMohsYsBvE8"
//!     .parse()
//!     .unwrap();
//! tx.sign(&[key], &ChainConfig::steem()).unwrap();
//!
//! let broadcast = serde_json::to_string(&tx).unwrap();
//! assert!(broadcast.contains("\"signatures\""));
//! ```

pub mod asset;
pub mod chain;
pub mod crypto;
pub mod encoder;
pub mod networks;
pub mod protocol;
pub mod reputation;
pub mod rpc;
pub mod scalar;
pub mod timestamp;

pub use asset::Asset;
pub use chain::{ChainConfig, ChainId};
pub use crypto::{CompactSignature, PrivateKey, PublicKey};
pub use protocol::{Operation, OpType, Transaction};
pub use timestamp::TimePointSec;
