//! Recovery path for issued credentials whose remote signature failed.
//!
//! The procedure is parked in the deferred flow (`ASYNC` operation mode,
//! `PEND_SIGNATURE` status), its deferred tracking record is kept in
//! lockstep, and the holder is notified by mail so issuance can complete
//! once the signature service is available again.

use std::sync::Arc;

use url::Url;

use super::error::{EntityNotFoundError, ServiceError};
use crate::model::credential_procedure::{CredentialStatus, OperationMode, ProcedureId};
use crate::provider::notification::NotificationProvider;
use crate::repository::credential_procedure_repository::CredentialProcedureRepository;
use crate::repository::deferred_credential_metadata_repository::DeferredCredentialMetadataRepository;

const PENDING_SIGNATURE_TEMPLATE: &str = "email.pending-credential-notification";

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait SigningRecoveryService: Send + Sync {
    async fn handle_post_recover_error<'a>(
        &self,
        procedure_id: &str,
        email: Option<&'a str>,
    ) -> Result<(), ServiceError>;
}

pub struct SigningRecoveryServiceImpl {
    credential_procedure_repository: Arc<dyn CredentialProcedureRepository>,
    deferred_credential_metadata_repository: Arc<dyn DeferredCredentialMetadataRepository>,
    notification_provider: Arc<dyn NotificationProvider>,
    issuer_frontend_url: Url,
}

impl SigningRecoveryServiceImpl {
    pub fn new(
        credential_procedure_repository: Arc<dyn CredentialProcedureRepository>,
        deferred_credential_metadata_repository: Arc<dyn DeferredCredentialMetadataRepository>,
        notification_provider: Arc<dyn NotificationProvider>,
        issuer_frontend_url: Url,
    ) -> Self {
        Self {
            credential_procedure_repository,
            deferred_credential_metadata_repository,
            notification_provider,
            issuer_frontend_url,
        }
    }
}

#[async_trait::async_trait]
impl SigningRecoveryService for SigningRecoveryServiceImpl {
    async fn handle_post_recover_error<'a>(
        &self,
        procedure_id: &str,
        email: Option<&'a str>,
    ) -> Result<(), ServiceError> {
        let procedure_id = ProcedureId::parse_str(procedure_id)
            .map_err(|_| ServiceError::Validation(format!("invalid procedure id `{procedure_id}`")))?;

        let mut procedure = self
            .credential_procedure_repository
            .find_by_procedure_id(&procedure_id)
            .await?
            .ok_or(EntityNotFoundError::CredentialProcedure(procedure_id))?;

        procedure.operation_mode = OperationMode::Async;
        procedure.credential_status = CredentialStatus::PendSignature;
        let updated_by = procedure.updated_by.clone();
        self.credential_procedure_repository
            .save(procedure)
            .await?;
        tracing::info!("procedure {procedure_id} parked as ASYNC / PEND_SIGNATURE");

        match self
            .deferred_credential_metadata_repository
            .find_by_procedure_id(&procedure_id)
            .await?
        {
            Some(mut metadata) => {
                metadata.operation_mode = OperationMode::Async;
                self.deferred_credential_metadata_repository
                    .save(metadata)
                    .await?;
            }
            // The record is created by the issuance flow; a missing one only
            // means the retry will re-create it, so recovery carries on.
            None => {
                tracing::warn!("no deferred metadata found for procedure {procedure_id}");
            }
        }

        let recipient = match email {
            Some(email) if !email.trim().is_empty() => email.to_string(),
            _ => updated_by,
        };
        self.notification_provider
            .send_pending_signature_notification(
                &recipient,
                PENDING_SIGNATURE_TEMPLATE,
                &procedure_id.to_string(),
                self.issuer_frontend_url.as_str(),
            )
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod test;
