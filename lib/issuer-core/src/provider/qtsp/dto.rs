//! Wire DTOs for the CSC v2 protocol. Field casing follows the QTSP contract,
//! including its mixed conventions on the signDoc documents entry.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct TokenRequest {
    pub grant_type: String,
    pub scope: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_details: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponse {
    pub access_token: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct AuthorizationDetail {
    pub r#type: String,
    #[serde(rename = "credentialID")]
    pub credential_id: String,
    #[serde(rename = "credentialPassword")]
    pub credential_password: String,
    #[serde(rename = "documentDigests")]
    pub document_digests: Vec<DocumentDigest>,
    #[serde(rename = "hashAlgorithmOID")]
    pub hash_algorithm_oid: String,
}

#[derive(Debug, Serialize)]
pub(super) struct DocumentDigest {
    pub hash: String,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub(super) struct AuthorizeRequest {
    #[serde(rename = "credentialID")]
    pub credential_id: String,
    #[serde(rename = "numSignatures")]
    pub num_signatures: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<Vec<String>>,
    #[serde(rename = "hashAlgo", skip_serializing_if = "Option::is_none")]
    pub hash_algo: Option<String>,
    #[serde(rename = "authData")]
    pub auth_data: Vec<AuthData>,
}

#[derive(Debug, Serialize)]
pub(super) struct AuthData {
    pub id: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthorizeResponse {
    #[serde(rename = "SAD")]
    pub sad: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct SignHashRequest {
    #[serde(rename = "credentialID")]
    pub credential_id: String,
    #[serde(rename = "SAD")]
    pub sad: String,
    pub hash: Vec<String>,
    #[serde(rename = "hashAlgo")]
    pub hash_algo: String,
    #[serde(rename = "signAlgo")]
    pub sign_algo: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct SignHashResponse {
    pub signatures: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub(super) struct SignDocRequest {
    #[serde(rename = "credentialID")]
    pub credential_id: String,
    #[serde(rename = "SAD")]
    pub sad: String,
    #[serde(rename = "signatureQualifier")]
    pub signature_qualifier: String,
    pub documents: Vec<SignDocDocument>,
}

#[derive(Debug, Serialize)]
pub(super) struct SignDocDocument {
    pub document: String,
    pub signature_format: String,
    pub conformance_level: String,
    #[serde(rename = "signAlgo")]
    pub sign_algo: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct SignDocResponse {
    #[serde(rename = "DocumentWithSignature")]
    pub document_with_signature: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub(super) struct CredentialsListRequest {
    #[serde(rename = "credentialInfo")]
    pub credential_info: bool,
    pub certificates: String,
    #[serde(rename = "certInfo")]
    pub cert_info: bool,
    #[serde(rename = "authInfo")]
    pub auth_info: bool,
    #[serde(rename = "onlyValid")]
    pub only_valid: bool,
    pub lang: u32,
    #[serde(rename = "clientData")]
    pub client_data: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct CredentialsListResponse {
    #[serde(rename = "credentialIDs")]
    pub credential_ids: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub(super) struct CredentialsInfoRequest {
    #[serde(rename = "credentialID")]
    pub credential_id: String,
    pub certificates: String,
    #[serde(rename = "certInfo")]
    pub cert_info: bool,
    #[serde(rename = "authInfo")]
    pub auth_info: bool,
}

#[derive(Debug, Deserialize)]
pub struct CredentialsInfoResponse {
    pub key: Option<KeyInfo>,
    pub cert: Option<CertInfo>,
}

#[derive(Debug, Deserialize)]
pub struct KeyInfo {
    pub status: Option<String>,
    pub algo: Option<Vec<String>>,
    pub len: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct CertInfo {
    pub status: Option<String>,
    pub certificates: Option<Vec<String>>,
    #[serde(rename = "issuerDN")]
    pub issuer_dn: Option<String>,
    #[serde(rename = "subjectDN")]
    pub subject_dn: Option<String>,
    #[serde(rename = "serialNumber")]
    pub serial_number: Option<String>,
    #[serde(rename = "validFrom")]
    pub valid_from: Option<String>,
    #[serde(rename = "validTo")]
    pub valid_to: Option<String>,
}
