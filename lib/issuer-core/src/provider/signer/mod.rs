//! Signing provider strategies.
//!
//! The active strategy is selected at startup from configuration: a local
//! stub producing unsigned artifacts, or one of two QTSP-backed strategies
//! (server-side `signDoc`, or local header assembly with remote `signHash`).

use error::SigningError;
use model::{SigningRequest, SigningResult};

pub mod csc_sign_doc;
pub mod csc_sign_hash;
pub mod error;
pub mod in_memory;
pub mod model;
pub mod provider;
mod validator;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait SigningProvider: Send + Sync {
    async fn sign(&self, request: SigningRequest) -> Result<SigningResult, SigningError>;
}
