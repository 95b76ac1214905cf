use thiserror::Error;

use crate::model::credential_procedure::ProcedureId;
use crate::provider::notification::NotificationError;
use crate::provider::qtsp::QtspError;
use crate::provider::signer::error::SigningError;
use crate::repository::error::DataLayerError;
use crate::util::x509::CertificateError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("mapping error: {0}")]
    MappingError(String),
    #[error(transparent)]
    EntityNotFound(#[from] EntityNotFoundError),
    #[error(transparent)]
    Signing(#[from] SigningError),
    #[error(transparent)]
    Repository(#[from] DataLayerError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
    #[error("validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Error)]
pub enum EntityNotFoundError {
    #[error("credential procedure `{0}` not found")]
    CredentialProcedure(ProcedureId),
}

impl From<QtspError> for ServiceError {
    fn from(error: QtspError) -> Self {
        ServiceError::Signing(error.into())
    }
}

impl From<CertificateError> for ServiceError {
    fn from(error: CertificateError) -> Self {
        ServiceError::MappingError(error.to_string())
    }
}
