//! JSON-RPC surface: envelopes, authenticated requests, and the static
//! method and role catalogs.
//!
//! The transport itself (HTTP POST of one envelope, decode of one
//! response) belongs to the caller; this module defines what goes over
//! that wire.

pub mod auth;
pub mod broadcast;
pub mod envelope;
pub mod methods;

pub use auth::{K, RpcAuthError, SignedParams, SignedRpcRequest, sign_request, validate_request};
pub use broadcast::{BROADCAST_OPERATIONS, BroadcastOperation, lowest_role, roles_for};
pub use envelope::{JSONRPC_VERSION, RpcErrorObject, RpcRequest, RpcResponse};
pub use methods::{API_METHODS, ApiMethod, find_method};
