//! Plain JSON-RPC 2.0 request and response envelopes.
//!
//! Transport is out of scope for this crate: these types only pin down the
//! wire shape that a caller's HTTP client POSTs and decodes.

use serde::{Deserialize, Serialize};

/// The protocol version string every envelope carries.
pub const JSONRPC_VERSION: &str = "2.0";

/// An unsigned JSON-RPC 2.0 request.
///
/// # Example
///
/// ```
/// use steem_rs::rpc::RpcRequest;
///
/// let request = RpcRequest::new(
///     1,
///     "condenser_api.get_block",
///     serde_json::json!([8675309]),
/// );
/// assert_eq!(
///     serde_json::to_string(&request).unwrap(),
///     r#"{"jsonrpc":"2.0","id":1,"method":"condenser_api.get_block","params":[8675309]}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub id: u32,
    pub method: String,
    pub params: serde_json::Value,
}

impl RpcRequest {
    pub fn new(id: u32, method: &str, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_owned(),
            id,
            method: method.to_owned(),
            params,
        }
    }
}

/// A JSON-RPC 2.0 response: exactly one of `result` / `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErrorObject>,
}

/// The `error` member of a failed JSON-RPC response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_decodes_result_or_error() {
        let ok: RpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":{"head_block_number":5}}"#)
                .unwrap();
        assert!(ok.error.is_none());
        assert_eq!(ok.result.unwrap()["head_block_number"], 5);

        let err: RpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"boom"}}"#,
        )
        .unwrap();
        assert_eq!(err.error.unwrap().code, -32000);
    }
}
