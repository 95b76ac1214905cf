//! JAdES (JWS) protected-header construction from QTSP certificate metadata.

use serde_json::{Map, Value, json};
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::model::certificate::CertificateInfo;
use crate::provider::signer::model::JadesProfile;

pub const SIGN_ALGO_OID_ES256: &str = "1.2.840.10045.4.3.2";
const SIGN_ALGO_OID_ES384: &str = "1.2.840.10045.4.3.3";
const SIGN_ALGO_OID_ES512: &str = "1.2.840.10045.4.3.4";

#[derive(Debug, Error)]
pub enum JadesError {
    #[error("no signing algorithm found in certificate info")]
    MissingAlgorithm,
    #[error("unsupported signature algorithm OID `{0}`")]
    UnsupportedAlgorithm(String),
    #[error("JAdES profile `{0}` not supported")]
    UnsupportedProfile(JadesProfile),
    #[error("failed to serialize JAdES header: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("failed to format signing timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}

/// Builds the JWS protected header for the given baseline profile as a JSON
/// string ready for base64url encoding. `alg` is derived from the first
/// signature algorithm OID of the certificate info, `x5c` carries the full
/// chain, and `B-T` additionally stamps the `sigT` signing time.
pub fn build_jades_header(
    cert_info: &CertificateInfo,
    profile: JadesProfile,
) -> Result<String, JadesError> {
    let mut header = Map::new();
    header.insert("alg".to_string(), json!(jws_alg(&cert_info.key_algorithms)?));
    header.insert("typ".to_string(), json!("JWT"));
    header.insert("x5c".to_string(), json!(cert_info.certificates));

    match profile {
        JadesProfile::BB => {}
        JadesProfile::BT => {
            let signing_time = OffsetDateTime::now_utc().format(&Rfc3339)?;
            header.insert("sigT".to_string(), json!(signing_time));
        }
        JadesProfile::BLt | JadesProfile::BLta => {
            return Err(JadesError::UnsupportedProfile(profile));
        }
    }

    Ok(serde_json::to_string(&Value::Object(header))?)
}

fn jws_alg(key_algorithms: &[String]) -> Result<&'static str, JadesError> {
    let oid = key_algorithms.first().ok_or(JadesError::MissingAlgorithm)?;
    match oid.as_str() {
        SIGN_ALGO_OID_ES256 => Ok("ES256"),
        SIGN_ALGO_OID_ES384 => Ok("ES384"),
        SIGN_ALGO_OID_ES512 => Ok("ES512"),
        other => Err(JadesError::UnsupportedAlgorithm(other.to_string())),
    }
}
