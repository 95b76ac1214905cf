//! Issuer identity resolution.
//!
//! In `server` mode the identity comes from local signer configuration; in
//! `cloud` mode it is resolved from the QTSP certificate chain, after
//! checking that the configured credential is actually available there.

use std::sync::Arc;

use super::error::ServiceError;
use super::signing_recovery::SigningRecoveryService;
use crate::config::core_config::{RemoteSignatureMode, SignerConfig};
use crate::model::certificate::CertificateInfo;
use crate::model::issuer::{DID_ELSI, DetailedIssuer, SimpleIssuer};
use crate::provider::qtsp::mapper::credentials_info_to_certificate_info;
use crate::provider::qtsp::{QtspClient, QtspError, TokenScope};
use crate::provider::signer::error::SigningError;
use crate::util::retry::retry_with_backoff;
use crate::util::x509::{organization_identifier_from_chain, parse_dn_attributes};

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait QtspIssuerService: Send + Sync {
    fn is_server_mode(&self) -> bool;

    /// Checks that the configured credential is among those the QTSP lists
    /// for the authenticated client.
    async fn validate_credentials(&self) -> Result<bool, ServiceError>;

    async fn resolve_remote_detailed_issuer(&self) -> Result<DetailedIssuer, ServiceError>;
}

pub struct QtspIssuerServiceImpl {
    qtsp_client: Arc<QtspClient>,
    mode: RemoteSignatureMode,
}

impl QtspIssuerServiceImpl {
    pub fn new(qtsp_client: Arc<QtspClient>, mode: RemoteSignatureMode) -> Self {
        Self { qtsp_client, mode }
    }

    fn credential_available(&self, credentials: &[String]) -> bool {
        let configured = self.qtsp_client.credential_id().trim();
        credentials
            .iter()
            .any(|credential| credential.trim().eq_ignore_ascii_case(configured))
    }
}

#[async_trait::async_trait]
impl QtspIssuerService for QtspIssuerServiceImpl {
    fn is_server_mode(&self) -> bool {
        self.mode == RemoteSignatureMode::Server
    }

    async fn validate_credentials(&self) -> Result<bool, ServiceError> {
        let token = self
            .qtsp_client
            .request_access_token(TokenScope::Service, None)
            .await?;
        let credentials = self.qtsp_client.list_credentials(&token).await?;

        Ok(self.credential_available(&credentials))
    }

    async fn resolve_remote_detailed_issuer(&self) -> Result<DetailedIssuer, ServiceError> {
        let cert_info = retry_with_backoff("resolveRemoteIssuer", || async {
            let token = self
                .qtsp_client
                .request_access_token(TokenScope::Service, None)
                .await?;

            let credentials = self.qtsp_client.list_credentials(&token).await?;
            if !self.credential_available(&credentials) {
                return Err(QtspError::InvalidResponse(format!(
                    "credential `{}` not available at the QTSP",
                    self.qtsp_client.credential_id()
                )));
            }

            let info = self.qtsp_client.request_credentials_info(&token).await?;
            credentials_info_to_certificate_info(info)
        })
        .await
        .map_err(SigningError::from)?;

        detailed_issuer_from_certificate(&cert_info)
    }
}

fn detailed_issuer_from_certificate(
    cert_info: &CertificateInfo,
) -> Result<DetailedIssuer, ServiceError> {
    let organization_identifier = organization_identifier_from_chain(&cert_info.certificates)?;
    let attributes = parse_dn_attributes(&cert_info.subject_dn);

    Ok(DetailedIssuer {
        id: format!("{DID_ELSI}{organization_identifier}"),
        organization_identifier,
        organization: attributes.get("O").cloned(),
        country: attributes.get("C").cloned(),
        common_name: attributes.get("CN").cloned(),
        serial_number: cert_info.serial_number.clone(),
    })
}

/// Builds issuer identities for credential payloads. Failures during issued
/// credential processing are routed through signing recovery so the
/// procedure is parked instead of lost.
pub struct IssuerFactory {
    qtsp_issuer_service: Arc<dyn QtspIssuerService>,
    signing_recovery_service: Arc<dyn SigningRecoveryService>,
    signer: SignerConfig,
}

impl IssuerFactory {
    pub fn new(
        qtsp_issuer_service: Arc<dyn QtspIssuerService>,
        signing_recovery_service: Arc<dyn SigningRecoveryService>,
        signer: SignerConfig,
    ) -> Self {
        Self {
            qtsp_issuer_service,
            signing_recovery_service,
            signer,
        }
    }

    pub async fn create_detailed_issuer(&self) -> Result<DetailedIssuer, ServiceError> {
        if self.qtsp_issuer_service.is_server_mode() {
            return Ok(self.local_detailed_issuer());
        }
        self.qtsp_issuer_service.resolve_remote_detailed_issuer().await
    }

    pub async fn create_simple_issuer(&self) -> Result<SimpleIssuer, ServiceError> {
        Ok(self.create_detailed_issuer().await?.into())
    }

    /// Variant for issued-credential flows: a resolution failure parks the
    /// procedure via signing recovery and yields `Ok(None)` so the caller
    /// can finish the request without an issuer.
    pub async fn create_detailed_issuer_notify_on_error(
        &self,
        procedure_id: &str,
        email: Option<&str>,
    ) -> Result<Option<DetailedIssuer>, ServiceError> {
        match self.create_detailed_issuer().await {
            Ok(issuer) => Ok(Some(issuer)),
            Err(error) => {
                tracing::warn!(
                    "issuer resolution failed for procedure {procedure_id}, entering recovery: {error}"
                );
                self.signing_recovery_service
                    .handle_post_recover_error(procedure_id, email)
                    .await?;
                Ok(None)
            }
        }
    }

    pub async fn create_simple_issuer_notify_on_error(
        &self,
        procedure_id: &str,
        email: Option<&str>,
    ) -> Result<Option<SimpleIssuer>, ServiceError> {
        Ok(self
            .create_detailed_issuer_notify_on_error(procedure_id, email)
            .await?
            .map(Into::into))
    }

    fn local_detailed_issuer(&self) -> DetailedIssuer {
        DetailedIssuer {
            id: format!("{DID_ELSI}{}", self.signer.organization_identifier),
            organization_identifier: self.signer.organization_identifier.clone(),
            organization: self.signer.organization.clone(),
            country: self.signer.country.clone(),
            common_name: self.signer.common_name.clone(),
            serial_number: self.signer.serial_number.clone(),
        }
    }
}

#[cfg(test)]
mod test;
