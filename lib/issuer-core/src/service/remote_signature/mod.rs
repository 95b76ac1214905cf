//! Remote signature orchestration over the configured signing backend.
//!
//! Two backends exist: `Server` posts the payload to a self-hosted signature
//! wrapper, `Cloud` drives the QTSP's CSC API directly (token, SAD, signDoc)
//! and verifies that the returned JWS carries the payload that was submitted.
//! Transient transport failures are retried with exponential backoff before
//! giving up; an issued credential that signs successfully also clears its
//! deferred tracking record.

use std::sync::Arc;

use serde::Serialize;

use crate::config::core_config::{RemoteSignatureConfig, RemoteSignatureMode};
use crate::model::credential_procedure::ProcedureId;
use crate::provider::http_client::HttpClient;
use crate::provider::qtsp::{QtspClient, QtspError, TokenScope, transport_error};
use crate::provider::signer::error::SigningError;
use crate::provider::signer::model::{SigningRequest, SigningResult, SigningType};
use crate::repository::deferred_credential_metadata_repository::DeferredCredentialMetadataRepository;
use crate::util::jws::{decode_payload, json_equal};
use crate::util::retry::retry_with_backoff;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait RemoteSignatureService: Send + Sync {
    /// Signs an issued (user-facing) credential and clears its deferred
    /// tracking record on success.
    async fn sign_issued_credential(
        &self,
        request: &SigningRequest,
        procedure_id: &str,
    ) -> Result<SigningResult, SigningError>;

    /// Signs a system credential (status lists, attestations) with no
    /// deferred lifecycle attached.
    async fn sign_system_credential(
        &self,
        request: &SigningRequest,
    ) -> Result<SigningResult, SigningError>;
}

#[derive(Serialize)]
struct ServerSignatureRequest<'a> {
    r#type: SigningType,
    data: &'a str,
}

pub struct RemoteSignatureServiceImpl {
    http_client: Arc<dyn HttpClient>,
    qtsp_client: Arc<QtspClient>,
    deferred_credential_metadata_repository: Arc<dyn DeferredCredentialMetadataRepository>,
    config: RemoteSignatureConfig,
}

impl RemoteSignatureServiceImpl {
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        qtsp_client: Arc<QtspClient>,
        deferred_credential_metadata_repository: Arc<dyn DeferredCredentialMetadataRepository>,
        config: RemoteSignatureConfig,
    ) -> Self {
        Self {
            http_client,
            qtsp_client,
            deferred_credential_metadata_repository,
            config,
        }
    }

    async fn sign_with_retry(
        &self,
        request: &SigningRequest,
    ) -> Result<SigningResult, SigningError> {
        let result = retry_with_backoff("remoteSignature", || self.sign_once(request)).await?;
        Ok(result)
    }

    async fn sign_once(&self, request: &SigningRequest) -> Result<SigningResult, QtspError> {
        match self.config.mode {
            RemoteSignatureMode::Server => self.sign_via_server(request).await,
            RemoteSignatureMode::Cloud => self.sign_via_cloud(request).await,
        }
    }

    /// Posts the payload to the self-hosted signature wrapper. The caller's
    /// token is forwarded verbatim for the wrapper to validate.
    async fn sign_via_server(&self, request: &SigningRequest) -> Result<SigningResult, QtspError> {
        let url = format!(
            "{}/api/v1{}",
            self.config.domain.as_str().trim_end_matches('/'),
            self.config.sign_path
        );
        let body = ServerSignatureRequest {
            r#type: request.r#type,
            data: &request.data,
        };

        self.http_client
            .post(&url)
            .header("Authorization", &request.context.token)
            .json(&body)
            .map_err(transport_error)?
            .send()
            .await
            .map_err(transport_error)?
            .error_for_status()
            .map_err(transport_error)?
            .json()
            .map_err(transport_error)
    }

    /// Drives the CSC flow directly: credential-scoped token, SAD, signDoc.
    /// For JADES results the payload embedded in the returned JWS must
    /// structurally match the data that was sent, otherwise the signature is
    /// discarded. COSE artifacts are opaque here and pass through unchecked.
    async fn sign_via_cloud(&self, request: &SigningRequest) -> Result<SigningResult, QtspError> {
        let token = self
            .qtsp_client
            .request_access_token(TokenScope::Credential, Some(&request.data))
            .await?;
        let sad = self.qtsp_client.request_sad(&token).await?;
        let signed_b64 = self
            .qtsp_client
            .sign_doc(&token, &sad, &request.data)
            .await?;
        let signed = self.qtsp_client.decode_signed_document(&signed_b64)?;

        if request.r#type == SigningType::Jades {
            let payload = decode_payload(&signed)
                .map_err(|e| QtspError::InvalidResponse(format!("signed document: {e}")))?;
            if !json_equal(&payload, &request.data) {
                return Err(QtspError::PayloadMismatch);
            }
        }

        Ok(SigningResult {
            r#type: request.r#type,
            data: signed,
        })
    }
}

#[async_trait::async_trait]
impl RemoteSignatureService for RemoteSignatureServiceImpl {
    async fn sign_issued_credential(
        &self,
        request: &SigningRequest,
        procedure_id: &str,
    ) -> Result<SigningResult, SigningError> {
        let procedure_id = ProcedureId::parse_str(procedure_id)
            .map_err(|_| SigningError::InvalidRequest(format!("invalid procedure id `{procedure_id}`")))?;

        let result = self.sign_with_retry(request).await?;

        self.deferred_credential_metadata_repository
            .delete_by_procedure_id(&procedure_id)
            .await?;
        tracing::info!("cleared deferred metadata for procedure {procedure_id}");

        Ok(result)
    }

    async fn sign_system_credential(
        &self,
        request: &SigningRequest,
    ) -> Result<SigningResult, SigningError> {
        self.sign_with_retry(request).await
    }
}
