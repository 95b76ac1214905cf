use super::dto::{
    AuthData, AuthorizationDetail, AuthorizeRequest, CredentialsInfoRequest,
    CredentialsInfoResponse, CredentialsListRequest, DocumentDigest, SignDocDocument,
    SignDocRequest, SignHashRequest, TokenRequest,
};
use super::{QtspError, QtspParams, TokenScope};
use crate::model::certificate::CertificateInfo;
use crate::util::hash::{SHA256_OID, encode_base64, hash_for_oid};

const GRANT_TYPE_CLIENT_CREDENTIALS: &str = "client_credentials";
const SIGNATURE_QUALIFIER: &str = "eu_eidas_aesealqc";
const SIGNATURE_FORMAT_JADES: &str = "J";
const CONFORMANCE_LEVEL_ADES_B: &str = "Ades-B";
const SIGN_ALGO_PLACEHOLDER: &str = "OID_sign_algorithm";
const DOCUMENT_DIGEST_LABEL: &str = "Issued Credential";
const CERTIFICATES_CHAIN: &str = "chain";

pub(super) fn token_request(
    params: &QtspParams,
    scope: TokenScope,
    document: Option<&str>,
) -> Result<TokenRequest, QtspError> {
    let authorization_details = match (scope, document) {
        (TokenScope::Credential, Some(document)) => Some(authorization_details(params, document)?),
        _ => None,
    };

    Ok(TokenRequest {
        grant_type: GRANT_TYPE_CLIENT_CREDENTIALS.to_string(),
        scope: scope.to_string(),
        authorization_details,
    })
}

/// The per-credential authorization detail binding the credential, its
/// password and a SHA-256 digest of the document to the token grant.
fn authorization_details(params: &QtspParams, document: &str) -> Result<String, QtspError> {
    let digest = hash_for_oid(document, SHA256_OID)
        .map_err(|e| QtspError::InvalidResponse(format!("cannot digest document: {e}")))?;

    let detail = AuthorizationDetail {
        r#type: TokenScope::Credential.to_string(),
        credential_id: params.credential_id.clone(),
        credential_password: params.credential_password.clone(),
        document_digests: vec![DocumentDigest {
            hash: digest,
            label: DOCUMENT_DIGEST_LABEL.to_string(),
        }],
        hash_algorithm_oid: SHA256_OID.to_string(),
    };

    serde_json::to_string(&vec![detail])
        .map_err(|e| QtspError::InvalidResponse(format!("cannot serialize authorization details: {e}")))
}

pub(super) fn sad_request(params: &QtspParams) -> AuthorizeRequest {
    AuthorizeRequest {
        credential_id: params.credential_id.clone(),
        num_signatures: 1,
        hash: None,
        hash_algo: None,
        auth_data: password_auth_data(params),
    }
}

pub(super) fn authorize_for_hash_request(
    params: &QtspParams,
    hash_b64url: &str,
    hash_algo_oid: &str,
) -> AuthorizeRequest {
    AuthorizeRequest {
        credential_id: params.credential_id.clone(),
        num_signatures: 1,
        hash: Some(vec![hash_b64url.to_string()]),
        hash_algo: Some(hash_algo_oid.to_string()),
        auth_data: password_auth_data(params),
    }
}

fn password_auth_data(params: &QtspParams) -> Vec<AuthData> {
    vec![AuthData {
        id: "password".to_string(),
        value: params.credential_password.clone(),
    }]
}

pub(super) fn sign_hash_request(
    params: &QtspParams,
    sad: &str,
    hash_b64url: &str,
    hash_algo_oid: &str,
    sign_algo_oid: &str,
) -> SignHashRequest {
    SignHashRequest {
        credential_id: params.credential_id.clone(),
        sad: sad.to_string(),
        hash: vec![hash_b64url.to_string()],
        hash_algo: hash_algo_oid.to_string(),
        sign_algo: sign_algo_oid.to_string(),
    }
}

pub(super) fn sign_doc_request(
    params: &QtspParams,
    sad: &str,
    document: &str,
) -> Result<SignDocRequest, QtspError> {
    let base64_document = encode_base64(document.as_bytes())
        .map_err(|e| QtspError::InvalidResponse(format!("cannot encode document: {e}")))?;

    Ok(SignDocRequest {
        credential_id: params.credential_id.clone(),
        sad: sad.to_string(),
        signature_qualifier: SIGNATURE_QUALIFIER.to_string(),
        documents: vec![SignDocDocument {
            document: base64_document,
            signature_format: SIGNATURE_FORMAT_JADES.to_string(),
            conformance_level: CONFORMANCE_LEVEL_ADES_B.to_string(),
            sign_algo: SIGN_ALGO_PLACEHOLDER.to_string(),
        }],
    })
}

pub(super) fn credentials_list_request() -> CredentialsListRequest {
    CredentialsListRequest {
        credential_info: true,
        certificates: CERTIFICATES_CHAIN.to_string(),
        cert_info: true,
        auth_info: true,
        only_valid: true,
        lang: 0,
        client_data: "string".to_string(),
    }
}

pub(super) fn credentials_info_request(credential_id: &str) -> CredentialsInfoRequest {
    CredentialsInfoRequest {
        credential_id: credential_id.to_string(),
        certificates: CERTIFICATES_CHAIN.to_string(),
        cert_info: true,
        auth_info: true,
    }
}

/// Validates and maps a `credentials/info` response. The signing key must be
/// enabled and the certificate valid before any metadata is handed out.
pub fn credentials_info_to_certificate_info(
    response: CredentialsInfoResponse,
) -> Result<CertificateInfo, QtspError> {
    let key = response
        .key
        .ok_or_else(|| QtspError::InvalidResponse("missing `key` section".to_string()))?;

    let key_status = key.status.unwrap_or_default();
    if !key_status.eq_ignore_ascii_case("enabled") {
        return Err(QtspError::InvalidResponse(format!(
            "signing key is not enabled: `{key_status}`"
        )));
    }

    let key_algorithms = key.algo.unwrap_or_default();
    if key_algorithms.is_empty() {
        return Err(QtspError::InvalidResponse(
            "no signing algorithm returned by QTSP".to_string(),
        ));
    }

    let cert = response
        .cert
        .ok_or_else(|| QtspError::InvalidResponse("missing `cert` section".to_string()))?;

    let cert_status = cert.status.unwrap_or_default();
    if !cert_status.eq_ignore_ascii_case("valid") {
        return Err(QtspError::InvalidResponse(format!(
            "certificate is not valid: `{cert_status}`"
        )));
    }

    let certificates = cert.certificates.unwrap_or_default();
    if certificates.is_empty() {
        return Err(QtspError::InvalidResponse(
            "no certificate chain returned by QTSP".to_string(),
        ));
    }

    Ok(CertificateInfo {
        certificates,
        issuer_dn: cert.issuer_dn.unwrap_or_default(),
        subject_dn: cert.subject_dn.unwrap_or_default(),
        serial_number: cert.serial_number.unwrap_or_default(),
        valid_from: cert.valid_from.unwrap_or_default(),
        valid_to: cert.valid_to.unwrap_or_default(),
        key_algorithms,
        key_length: key.len,
    })
}
