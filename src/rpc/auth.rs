//! Authenticated JSON-RPC requests.
//!
//! A signed request replaces the original `params` with a `__signed`
//! object: the account name, an 8-byte random nonce, an RFC 3339
//! nanosecond timestamp, the original params as base64-encoded JSON, and
//! one compact signature per key. The signed message is
//!
//! ```text
//! SHA256(K ‖ SHA256(timestamp ‖ account ‖ method ‖ params_b64 ‖ nonce))
//! ```
//!
//! with `K = SHA256("steem_jsonrpc_auth")` domain-separating these
//! signatures from everything else signed by the same keys. Validation
//! enforces a 60-second freshness window and releases the decoded params
//! only after the caller-supplied key check passes (key lookup for an
//! account happens out-of-band).

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::envelope::{JSONRPC_VERSION, RpcRequest};
use crate::crypto::{CompactSignature, PrivateKey};

/// Domain-separation constant: `SHA256("steem_jsonrpc_auth")`.
pub const K: [u8; 32] = [
    0x3b, 0x3b, 0x08, 0x1e, 0x46, 0xea, 0x80, 0x8d, 0x5a, 0x96, 0xb0, 0x8c, 0x4b, 0xc5, 0x00,
    0x3f, 0x5e, 0x15, 0x76, 0x70, 0x90, 0xf3, 0x44, 0xfa, 0xab, 0x53, 0x1e, 0xc5, 0x75, 0x65,
    0x13, 0x6b,
];

/// How long a signed request stays valid after its timestamp.
pub const FRESHNESS_WINDOW_SECS: i64 = 60;

/// Errors from signing or validating an authenticated request.
#[derive(Debug, thiserror::Error)]
pub enum RpcAuthError {
    /// Envelope is not JSON-RPC 2.0 or the method is empty.
    #[error("invalid JSON-RPC request")]
    InvalidRequest,
    /// Signing a request whose params are absent.
    #[error("unable to sign a request without params")]
    MissingParams,
    /// The `__signed` object is missing its account.
    #[error("missing account")]
    MissingAccount,
    /// Nonce is not exactly eight hex-encoded bytes.
    #[error("invalid nonce")]
    BadNonce,
    /// Timestamp failed to parse as RFC 3339.
    #[error("invalid timestamp `{0}`")]
    BadTimestamp(String),
    /// Timestamp is outside the freshness window.
    #[error("signature expired")]
    Expired,
    /// A signature is not a valid hex compact signature.
    #[error("undecodable signature: {0}")]
    BadSignature(String),
    /// The caller-supplied key check rejected the signatures.
    #[error("signature verification failed")]
    VerificationFailed,
    /// Params were not valid base64-encoded JSON.
    #[error("invalid encoded params: {0}")]
    BadParams(String),
}

/// The `__signed` payload of an authenticated request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedParams {
    pub account: String,
    /// 8 random bytes, hex-encoded.
    pub nonce: String,
    /// The original params as base64-encoded JSON.
    pub params: String,
    /// Hex compact signatures, one per signing key.
    pub signatures: Vec<String>,
    /// RFC 3339 timestamp with nanosecond precision, UTC.
    pub timestamp: String,
}

/// `params` wrapper that puts the payload under the `__signed` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedParamsWrapper {
    #[serde(rename = "__signed")]
    pub signed: SignedParams,
}

/// A JSON-RPC request whose params carry a [`SignedParams`] payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub id: u32,
    pub params: SignedParamsWrapper,
}

/// `SHA256(K ‖ SHA256(timestamp ‖ account ‖ method ‖ params_b64 ‖ nonce))`
fn auth_digest(
    timestamp: &str,
    account: &str,
    method: &str,
    params_b64: &str,
    nonce: &[u8],
) -> [u8; 32] {
    let mut inner = Sha256::new();
    inner.update(timestamp.as_bytes());
    inner.update(account.as_bytes());
    inner.update(method.as_bytes());
    inner.update(params_b64.as_bytes());
    inner.update(nonce);

    let mut outer = Sha256::new();
    outer.update(K);
    outer.update(inner.finalize());
    outer.finalize().into()
}

/// Signs `request` for `account`, drawing nonce and timestamp from the
/// environment. One signature is produced per key, in key order.
pub fn sign_request(
    request: &RpcRequest,
    account: &str,
    keys: &[PrivateKey],
) -> Result<SignedRpcRequest, RpcAuthError> {
    sign_request_at(request, account, keys, rand::random(), Utc::now())
}

/// [`sign_request`] with a pinned nonce and clock, for reproducible
/// output.
pub fn sign_request_at(
    request: &RpcRequest,
    account: &str,
    keys: &[PrivateKey],
    nonce: [u8; 8],
    now: DateTime<Utc>,
) -> Result<SignedRpcRequest, RpcAuthError> {
    if request.params.is_null() {
        return Err(RpcAuthError::MissingParams);
    }
    let params_json =
        serde_json::to_vec(&request.params).map_err(|err| RpcAuthError::BadParams(err.to_string()))?;
    let params_b64 = BASE64.encode(params_json);
    let timestamp = now.to_rfc3339_opts(SecondsFormat::Nanos, true);

    let digest = auth_digest(&timestamp, account, &request.method, &params_b64, &nonce);
    let signatures = keys
        .iter()
        .map(|key| {
            key.sign_digest(&digest)
                .map(|signature| signature.to_string())
                .map_err(|err| RpcAuthError::BadSignature(err.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SignedRpcRequest {
        jsonrpc: JSONRPC_VERSION.to_owned(),
        method: request.method.clone(),
        id: request.id,
        params: SignedParamsWrapper {
            signed: SignedParams {
                account: account.to_owned(),
                nonce: hex::encode(nonce),
                params: params_b64,
                signatures,
                timestamp,
            },
        },
    })
}

/// Validates a signed request against the current clock; see
/// [`validate_request_at`].
pub fn validate_request<F>(
    request: &SignedRpcRequest,
    verify: F,
) -> Result<serde_json::Value, RpcAuthError>
where
    F: FnOnce(&[u8; 32], &[CompactSignature], &str) -> bool,
{
    validate_request_at(request, Utc::now(), verify)
}

/// Validates envelope shape, nonce, timestamp freshness, and signatures,
/// returning the decoded original params only if everything holds.
///
/// `verify` receives the signed digest, the parsed signatures, and the
/// account name; it decides whether the signatures satisfy the account's
/// on-chain authority (this crate has no key lookup of its own).
pub fn validate_request_at<F>(
    request: &SignedRpcRequest,
    now: DateTime<Utc>,
    verify: F,
) -> Result<serde_json::Value, RpcAuthError>
where
    F: FnOnce(&[u8; 32], &[CompactSignature], &str) -> bool,
{
    if request.jsonrpc != JSONRPC_VERSION || request.method.is_empty() {
        return Err(RpcAuthError::InvalidRequest);
    }
    let signed = &request.params.signed;
    if signed.account.is_empty() {
        return Err(RpcAuthError::MissingAccount);
    }

    let params_json = BASE64
        .decode(&signed.params)
        .map_err(|err| RpcAuthError::BadParams(err.to_string()))?;
    let params: serde_json::Value = serde_json::from_slice(&params_json)
        .map_err(|err| RpcAuthError::BadParams(err.to_string()))?;

    let nonce = hex::decode(&signed.nonce).map_err(|_| RpcAuthError::BadNonce)?;
    if nonce.len() != 8 {
        return Err(RpcAuthError::BadNonce);
    }

    let timestamp = DateTime::parse_from_rfc3339(&signed.timestamp)
        .map_err(|_| RpcAuthError::BadTimestamp(signed.timestamp.clone()))?
        .with_timezone(&Utc);
    let age = (now - timestamp).num_seconds().abs();
    if age > FRESHNESS_WINDOW_SECS {
        tracing::warn!(age_secs = age, "stale signed request");
        return Err(RpcAuthError::Expired);
    }

    let signatures = signed
        .signatures
        .iter()
        .map(|hex_sig| {
            hex_sig
                .parse::<CompactSignature>()
                .map_err(|err| RpcAuthError::BadSignature(err.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let digest = auth_digest(
        &signed.timestamp,
        &signed.account,
        &request.method,
        &signed.params,
        &nonce,
    );
    if !verify(&digest, &signatures, &signed.account) {
        return Err(RpcAuthError::VerificationFailed);
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::PublicKey;
    use chrono::TimeZone;

    const TEST_WIF: &str = "5JWHY5DxTF6qN5grTtChDCYBmWHfY9zaSsw4CxEKN5eZpH9iBma";

    fn test_key() -> PrivateKey {
        TEST_WIF.parse().unwrap()
    }

    fn test_request() -> RpcRequest {
        RpcRequest::new(
            1,
            "condenser_api.get_account_history",
            serde_json::json!(["alice", -1, 100]),
        )
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn signed_fixture() -> SignedRpcRequest {
        sign_request_at(&test_request(), "alice", &[test_key()], [7u8; 8], fixed_now()).unwrap()
    }

    #[test]
    fn k_constant_is_sha256_of_the_tag() {
        let expected = Sha256::digest(b"steem_jsonrpc_auth");
        assert_eq!(K[..], expected[..]);
        assert_eq!(
            hex::encode(K),
            "3b3b081e46ea808d5a96b08c4bc5003f5e15767090f344faab531ec57565136b"
        );
    }

    #[test]
    fn signed_request_shape() {
        let signed = signed_fixture();
        assert_eq!(signed.jsonrpc, "2.0");
        assert_eq!(signed.method, "condenser_api.get_account_history");
        let params = &signed.params.signed;
        assert_eq!(params.account, "alice");
        assert_eq!(params.nonce.len(), 16);
        assert_eq!(params.signatures.len(), 1);
        assert_eq!(params.signatures[0].len(), 130);
        // The original params survive the base64 round trip.
        let decoded = BASE64.decode(&params.params).unwrap();
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(&decoded).unwrap(),
            serde_json::json!(["alice", -1, 100])
        );
    }

    #[test]
    fn json_envelope_nests_under_dunder_signed() {
        let value = serde_json::to_value(signed_fixture()).unwrap();
        assert!(value["params"]["__signed"]["account"].is_string());
        assert!(value["params"]["__signed"]["timestamp"]
            .as_str()
            .unwrap()
            .ends_with('Z'));
    }

    #[test]
    fn validate_accepts_a_fresh_request_and_returns_params() {
        let signed = signed_fixture();
        let public = test_key().public_key();
        let params = validate_request_at(&signed, fixed_now(), |digest, sigs, account| {
            assert_eq!(account, "alice");
            sigs.iter().all(|sig| public.verify_digest(digest, sig))
        })
        .unwrap();
        assert_eq!(params, serde_json::json!(["alice", -1, 100]));
    }

    #[test]
    fn validate_rejects_stale_requests() {
        let signed = signed_fixture();
        let later = fixed_now() + chrono::Duration::seconds(FRESHNESS_WINDOW_SECS + 1);
        let result = validate_request_at(&signed, later, |_, _, _| true);
        assert!(matches!(result, Err(RpcAuthError::Expired)));
    }

    #[test]
    fn validate_rejects_a_failed_key_check() {
        let signed = signed_fixture();
        let result = validate_request_at(&signed, fixed_now(), |_, _, _| false);
        assert!(matches!(result, Err(RpcAuthError::VerificationFailed)));
    }

    #[test]
    fn validate_rejects_tampered_params() {
        let mut signed = signed_fixture();
        signed.params.signed.params = BASE64.encode(br#"["mallory",-1,100]"#);
        let public = test_key().public_key();
        let result = validate_request_at(&signed, fixed_now(), |digest, sigs, _| {
            sigs.iter().all(|sig| public.verify_digest(digest, sig))
        });
        assert!(matches!(result, Err(RpcAuthError::VerificationFailed)));
    }

    #[test]
    fn validate_rejects_bad_nonce_and_timestamp() {
        let mut bad_nonce = signed_fixture();
        bad_nonce.params.signed.nonce = "abcd".to_owned();
        assert!(matches!(
            validate_request_at(&bad_nonce, fixed_now(), |_, _, _| true),
            Err(RpcAuthError::BadNonce)
        ));

        let mut bad_ts = signed_fixture();
        bad_ts.params.signed.timestamp = "yesterday".to_owned();
        assert!(matches!(
            validate_request_at(&bad_ts, fixed_now(), |_, _, _| true),
            Err(RpcAuthError::BadTimestamp(_))
        ));
    }

    #[test]
    fn signing_without_params_fails() {
        let request = RpcRequest::new(1, "m", serde_json::Value::Null);
        assert!(matches!(
            sign_request_at(&request, "alice", &[test_key()], [0u8; 8], fixed_now()),
            Err(RpcAuthError::MissingParams)
        ));
    }

    #[test]
    fn pinned_inputs_sign_deterministically() {
        let one = signed_fixture();
        let two = signed_fixture();
        assert_eq!(one, two);
    }
}
