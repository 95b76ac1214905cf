use std::sync::Arc;

use super::SigningProvider;
use super::csc_sign_doc::CscSignDocProvider;
use super::csc_sign_hash::CscSignHashProvider;
use super::in_memory::InMemorySigner;
use crate::config::core_config::{SigningConfig, SigningProviderType};
use crate::provider::qtsp::QtspClient;
use crate::service::remote_signature::RemoteSignatureService;
use crate::service::signing_recovery::SigningRecoveryService;

/// Selects the signing strategy once at startup. An unknown provider name
/// already fails during config deserialization.
pub fn signing_provider_from_config(
    config: &SigningConfig,
    qtsp_client: Arc<QtspClient>,
    remote_signature_service: Arc<dyn RemoteSignatureService>,
    signing_recovery_service: Arc<dyn SigningRecoveryService>,
) -> Arc<dyn SigningProvider> {
    tracing::info!("using signing provider `{}`", config.provider);

    match config.provider {
        SigningProviderType::InMemory => Arc::new(InMemorySigner),
        SigningProviderType::CscSignDoc => Arc::new(CscSignDocProvider::new(
            remote_signature_service,
            signing_recovery_service,
        )),
        SigningProviderType::CscSignHash => Arc::new(CscSignHashProvider::new(
            qtsp_client,
            config.signature_profile,
        )),
    }
}
