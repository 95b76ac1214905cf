//! CSC v2 client for the remote signature service of a QTSP.
//!
//! All operations authenticate with the OAuth2 client-credentials grant and
//! surface protocol violations (missing token, SAD or signature fields) as
//! dedicated errors so callers can distinguish them from transport failures.

use std::sync::Arc;

use url::Url;

use crate::config::core_config::RemoteSignatureConfig;
use crate::provider::http_client::HttpClient;
use crate::util::hash::decode_base64;

pub mod dto;
mod error;
pub mod mapper;

pub use error::QtspError;
pub(crate) use error::transport_error;

use dto::{
    AuthorizeResponse, CredentialsInfoResponse, CredentialsListResponse, SignDocResponse,
    SignHashResponse, TokenResponse,
};

const OAUTH2_TOKEN_PATH: &str = "/oauth2/token";
const CREDENTIALS_LIST_PATH: &str = "/csc/v2/credentials/list";
const CREDENTIALS_INFO_PATH: &str = "/csc/v2/credentials/info";
const CREDENTIALS_AUTHORIZE_PATH: &str = "/csc/v2/credentials/authorize";
const SIGNATURES_SIGN_HASH_PATH: &str = "/csc/v2/signatures/signHash";
const SIGNATURES_SIGN_DOC_PATH: &str = "/csc/v2/signatures/signDoc";

#[derive(Copy, Clone, Debug, Eq, PartialEq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum TokenScope {
    Service,
    Credential,
}

/// Connection parameters of one QTSP credential.
#[derive(Clone, Debug)]
pub struct QtspParams {
    pub domain: Url,
    pub credential_id: String,
    pub credential_password: String,
    pub client_id: String,
    pub client_secret: String,
}

impl From<&RemoteSignatureConfig> for QtspParams {
    fn from(config: &RemoteSignatureConfig) -> Self {
        Self {
            domain: config.domain.clone(),
            credential_id: config.credential_id.clone(),
            credential_password: config.credential_password.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        }
    }
}

pub struct QtspClient {
    client: Arc<dyn HttpClient>,
    params: QtspParams,
}

impl QtspClient {
    pub fn new(client: Arc<dyn HttpClient>, params: QtspParams) -> Self {
        Self { client, params }
    }

    pub fn credential_id(&self) -> &str {
        &self.params.credential_id
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.params.domain.as_str().trim_end_matches('/'))
    }

    /// Requests an OAuth2 access token via the client-credentials grant.
    /// A credential-scoped token additionally carries the authorization
    /// details binding the grant to a digest of the given document.
    pub async fn request_access_token(
        &self,
        scope: TokenScope,
        document: Option<&str>,
    ) -> Result<String, QtspError> {
        let request = mapper::token_request(&self.params, scope, document)?;

        let response: TokenResponse = self
            .client
            .post(&self.endpoint(OAUTH2_TOKEN_PATH))
            .basic_auth(&self.params.client_id, &self.params.client_secret)
            .map_err(transport_error)?
            .form(&request)
            .map_err(transport_error)?
            .send()
            .await
            .map_err(transport_error)?
            .error_for_status()
            .map_err(transport_error)?
            .json()
            .map_err(transport_error)?;

        response.access_token.ok_or(QtspError::AccessTokenMissing)
    }

    /// Obtains a signature activation data (SAD) token for one signature.
    pub async fn request_sad(&self, access_token: &str) -> Result<String, QtspError> {
        let request = mapper::sad_request(&self.params);
        let response: AuthorizeResponse = self
            .post_json(CREDENTIALS_AUTHORIZE_PATH, access_token, &request)
            .await?;

        response.sad.ok_or(QtspError::SadMissing)
    }

    /// SAD variant carrying the digest to be signed, as required before
    /// `signHash`.
    pub async fn authorize_for_hash(
        &self,
        access_token: &str,
        hash_b64url: &str,
        hash_algo_oid: &str,
    ) -> Result<String, QtspError> {
        let request = mapper::authorize_for_hash_request(&self.params, hash_b64url, hash_algo_oid);
        let response: AuthorizeResponse = self
            .post_json(CREDENTIALS_AUTHORIZE_PATH, access_token, &request)
            .await?;

        response.sad.ok_or(QtspError::SadMissing)
    }

    /// Signs a single digest, returning the raw signature value.
    pub async fn sign_hash(
        &self,
        access_token: &str,
        sad: &str,
        hash_b64url: &str,
        hash_algo_oid: &str,
        sign_algo_oid: &str,
    ) -> Result<String, QtspError> {
        let request =
            mapper::sign_hash_request(&self.params, sad, hash_b64url, hash_algo_oid, sign_algo_oid);
        let response: SignHashResponse = self
            .post_json(SIGNATURES_SIGN_HASH_PATH, access_token, &request)
            .await?;

        response
            .signatures
            .and_then(|mut signatures| {
                if signatures.is_empty() {
                    None
                } else {
                    Some(signatures.remove(0))
                }
            })
            .ok_or(QtspError::SignaturesMissing)
    }

    /// Signs a whole document server-side, returning the signed document
    /// still base64-encoded as received on the wire.
    pub async fn sign_doc(
        &self,
        access_token: &str,
        sad: &str,
        document: &str,
    ) -> Result<String, QtspError> {
        let request = mapper::sign_doc_request(&self.params, sad, document)?;
        let response: SignDocResponse = self
            .post_json(SIGNATURES_SIGN_DOC_PATH, access_token, &request)
            .await?;

        response
            .document_with_signature
            .and_then(|mut documents| {
                if documents.is_empty() {
                    None
                } else {
                    Some(documents.remove(0))
                }
            })
            .ok_or(QtspError::DocumentWithSignatureMissing)
    }

    /// Decodes a `sign_doc` result into the signed document text.
    pub fn decode_signed_document(&self, document_b64: &str) -> Result<String, QtspError> {
        let bytes = decode_base64(document_b64)
            .map_err(|e| QtspError::InvalidResponse(format!("invalid signed document: {e}")))?;
        String::from_utf8(bytes)
            .map_err(|e| QtspError::InvalidResponse(format!("signed document is not UTF-8: {e}")))
    }

    /// Lists the credential identifiers available to the authenticated client.
    pub async fn list_credentials(&self, access_token: &str) -> Result<Vec<String>, QtspError> {
        let request = mapper::credentials_list_request();
        let response: CredentialsListResponse = self
            .post_json(CREDENTIALS_LIST_PATH, access_token, &request)
            .await?;

        Ok(response.credential_ids.unwrap_or_default())
    }

    pub async fn request_credentials_info(
        &self,
        access_token: &str,
    ) -> Result<CredentialsInfoResponse, QtspError> {
        let request = mapper::credentials_info_request(&self.params.credential_id);
        self.post_json(CREDENTIALS_INFO_PATH, access_token, &request)
            .await
    }

    async fn post_json<Req, Resp>(
        &self,
        path: &str,
        access_token: &str,
        request: &Req,
    ) -> Result<Resp, QtspError>
    where
        Req: serde::Serialize,
        Resp: serde::de::DeserializeOwned,
    {
        self.client
            .post(&self.endpoint(path))
            .bearer_auth(access_token)
            .json(request)
            .map_err(transport_error)?
            .send()
            .await
            .map_err(transport_error)?
            .error_for_status()
            .map_err(transport_error)?
            .json()
            .map_err(transport_error)
    }
}
