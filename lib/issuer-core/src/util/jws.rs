//! Compact JWS helpers shared by the signDoc verification and signHash flows.

use thiserror::Error;

use crate::util::hash::{HashError, encode_base64url};

#[derive(Debug, Error)]
pub enum JwsError {
    #[error("malformed compact JWS")]
    Malformed,
    #[error(transparent)]
    Encoding(#[from] HashError),
    #[error("payload is not valid UTF-8")]
    InvalidUtf8,
}

/// Builds the JWS signing input `base64url(header).base64url(payload)`.
pub fn signing_input(header_json: &str, payload: &str) -> Result<String, JwsError> {
    let header = encode_base64url(header_json.as_bytes())?;
    let payload = encode_base64url(payload.as_bytes())?;
    Ok(format!("{header}.{payload}"))
}

/// Decodes the payload segment of a compact JWS.
pub fn decode_payload(jws: &str) -> Result<String, JwsError> {
    let payload = jws.split('.').nth(1).ok_or(JwsError::Malformed)?;
    if payload.is_empty() {
        return Err(JwsError::Malformed);
    }
    let bytes = crate::util::hash::decode_base64url(payload)?;
    String::from_utf8(bytes).map_err(|_| JwsError::InvalidUtf8)
}

/// Structural JSON equality, ignoring member order and whitespace.
pub fn json_equal(left: &str, right: &str) -> bool {
    match (
        serde_json::from_str::<serde_json::Value>(left),
        serde_json::from_str::<serde_json::Value>(right),
    ) {
        (Ok(left), Ok(right)) => left == right,
        _ => false,
    }
}
