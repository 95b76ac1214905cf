//! QTSP strategy delegating the whole document to the remote `signDoc`
//! endpoint. Issued credentials additionally get the deferred/recovery
//! lifecycle: a failed attempt parks the procedure for a later retry and the
//! holder is notified, while the original failure still reaches the caller.

use std::sync::Arc;

use super::SigningProvider;
use super::error::SigningError;
use super::model::{SigningRequest, SigningResult};
use super::validator::validate_request;
use crate::service::remote_signature::RemoteSignatureService;
use crate::service::signing_recovery::SigningRecoveryService;

pub struct CscSignDocProvider {
    remote_signature_service: Arc<dyn RemoteSignatureService>,
    signing_recovery_service: Arc<dyn SigningRecoveryService>,
}

impl CscSignDocProvider {
    pub fn new(
        remote_signature_service: Arc<dyn RemoteSignatureService>,
        signing_recovery_service: Arc<dyn SigningRecoveryService>,
    ) -> Self {
        Self {
            remote_signature_service,
            signing_recovery_service,
        }
    }
}

#[async_trait::async_trait]
impl SigningProvider for CscSignDocProvider {
    async fn sign(&self, request: SigningRequest) -> Result<SigningResult, SigningError> {
        validate_request(&request)?;

        let Some(procedure_id) = request.context.procedure_id.clone() else {
            return self
                .remote_signature_service
                .sign_system_credential(&request)
                .await;
        };

        match self
            .remote_signature_service
            .sign_issued_credential(&request, &procedure_id)
            .await
        {
            Ok(result) => Ok(result),
            Err(error) => {
                tracing::warn!(
                    "remote signing failed for procedure {procedure_id}, entering recovery: {error}"
                );
                if let Err(recovery_error) = self
                    .signing_recovery_service
                    .handle_post_recover_error(&procedure_id, request.context.email.as_deref())
                    .await
                {
                    tracing::error!(
                        "signing recovery failed for procedure {procedure_id}: {recovery_error}"
                    );
                }
                Err(error)
            }
        }
    }
}
