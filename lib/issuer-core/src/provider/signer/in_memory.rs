//! Local signing stub for environments without a QTSP connection. Produces
//! unsigned artifacts that keep the issuance pipeline runnable end to end.

use super::SigningProvider;
use super::error::SigningError;
use super::model::{SigningRequest, SigningResult, SigningType};
use super::validator::validate_request;
use crate::util::hash::{decode_base64, encode_base64, encode_base64url};

#[derive(Default)]
pub struct InMemorySigner;

#[async_trait::async_trait]
impl SigningProvider for InMemorySigner {
    async fn sign(&self, request: SigningRequest) -> Result<SigningResult, SigningError> {
        validate_request(&request)?;

        let data = match request.r#type {
            SigningType::Jades => unsigned_jws(&request.data)?,
            SigningType::Cose => normalized_base64(&request.data)?,
        };

        Ok(SigningResult {
            r#type: request.r#type,
            data,
        })
    }
}

/// Compact JWS with `alg: none` and an empty signature segment.
fn unsigned_jws(payload: &str) -> Result<String, SigningError> {
    let header = encode_base64url(br#"{"alg":"none","typ":"JWT"}"#)?;
    let payload = encode_base64url(payload.as_bytes())?;
    Ok(format!("{header}.{payload}."))
}

/// Passes base64 input through unchanged; anything else is wrapped as base64
/// so downstream consumers always receive a decodable artifact.
fn normalized_base64(data: &str) -> Result<String, SigningError> {
    if decode_base64(data).is_ok() {
        return Ok(data.to_string());
    }
    tracing::warn!("COSE payload is not base64, encoding raw bytes");
    Ok(encode_base64(data.as_bytes())?)
}
