use thiserror::Error;

use super::model::SigningType;
use crate::provider::qtsp::QtspError;
use crate::repository::error::DataLayerError;
use crate::util::hash::HashError;
use crate::util::jades::JadesError;
use crate::util::jws::JwsError;
use crate::util::retry::{Recoverable, RetryError};

#[derive(Debug, Error)]
pub enum SigningError {
    #[error("invalid signing request: {0}")]
    InvalidRequest(String),
    #[error("signing type `{0}` not supported by this provider")]
    UnsupportedSigningType(SigningType),
    #[error(transparent)]
    Qtsp(#[from] QtspError),
    #[error("`{operation}` failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        operation: &'static str,
        attempts: u32,
        #[source]
        source: Box<SigningError>,
    },
    #[error(transparent)]
    Jades(#[from] JadesError),
    #[error(transparent)]
    Jws(#[from] JwsError),
    #[error(transparent)]
    Hash(#[from] HashError),
    #[error(transparent)]
    Repository(#[from] DataLayerError),
}

impl Recoverable for SigningError {
    fn is_recoverable(&self) -> bool {
        match self {
            SigningError::Qtsp(error) => error.is_recoverable(),
            _ => false,
        }
    }
}

impl From<RetryError<QtspError>> for SigningError {
    fn from(error: RetryError<QtspError>) -> Self {
        match error {
            RetryError::Fatal(source) => SigningError::Qtsp(source),
            RetryError::RetriesExhausted {
                operation,
                attempts,
                source,
            } => SigningError::RetriesExhausted {
                operation,
                attempts,
                source: Box::new(SigningError::Qtsp(source)),
            },
        }
    }
}

impl From<RetryError<SigningError>> for SigningError {
    fn from(error: RetryError<SigningError>) -> Self {
        match error {
            RetryError::Fatal(source) => source,
            RetryError::RetriesExhausted {
                operation,
                attempts,
                source,
            } => SigningError::RetriesExhausted {
                operation,
                attempts,
                source: Box::new(source),
            },
        }
    }
}
