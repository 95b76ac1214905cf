use ct_codecs::{Base64, Base64UrlSafeNoPadding, Decoder, Encoder};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// OID of SHA-256, the only digest the CSC endpoints are fed with.
pub const SHA256_OID: &str = "2.16.840.1.101.3.4.2.1";

#[derive(Debug, Error)]
pub enum HashError {
    #[error("unsupported hash algorithm OID `{0}`")]
    UnsupportedAlgorithm(String),
    #[error("encoding error: {0}")]
    Encoding(String),
}

pub fn sha256(input: &[u8]) -> Vec<u8> {
    Sha256::digest(input).to_vec()
}

/// Base64 digest of a document under the given hash algorithm OID.
pub fn hash_for_oid(document: &str, algorithm_oid: &str) -> Result<String, HashError> {
    if algorithm_oid != SHA256_OID {
        return Err(HashError::UnsupportedAlgorithm(algorithm_oid.to_string()));
    }
    if document.is_empty() {
        return Err(HashError::Encoding("document must not be empty".to_string()));
    }
    encode_base64(&sha256(document.as_bytes()))
}

pub fn encode_base64(bytes: &[u8]) -> Result<String, HashError> {
    Base64::encode_to_string(bytes).map_err(|e| HashError::Encoding(e.to_string()))
}

pub fn decode_base64(value: &str) -> Result<Vec<u8>, HashError> {
    Base64::decode_to_vec(value, None).map_err(|e| HashError::Encoding(e.to_string()))
}

pub fn encode_base64url(bytes: &[u8]) -> Result<String, HashError> {
    Base64UrlSafeNoPadding::encode_to_string(bytes).map_err(|e| HashError::Encoding(e.to_string()))
}

pub fn decode_base64url(value: &str) -> Result<Vec<u8>, HashError> {
    Base64UrlSafeNoPadding::decode_to_vec(value, None).map_err(|e| HashError::Encoding(e.to_string()))
}
