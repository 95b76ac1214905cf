//! Remote signing core for a verifiable credential issuer.
//!
//! Credentials are sealed with a qualified electronic seal obtained from a
//! QTSP over the CSC v2 API, either by shipping the whole document
//! (`signDoc`) or only a digest (`signHash`), with an in-memory stub for
//! development. Failed signatures of issued credentials are recovered into a
//! deferred flow instead of being lost. Persistence and outbound mail are
//! injected behind repository and notification traits.

use std::sync::Arc;

pub mod config;
pub mod model;
pub mod provider;
pub mod repository;
pub mod service;
pub mod util;

use config::core_config::CoreConfig;
use provider::http_client::HttpClient;
use provider::http_client::reqwest_client::ReqwestClient;
use provider::notification::NotificationProvider;
use provider::qtsp::QtspClient;
use provider::signer::SigningProvider;
use provider::signer::provider::signing_provider_from_config;
use repository::credential_procedure_repository::CredentialProcedureRepository;
use repository::deferred_credential_metadata_repository::DeferredCredentialMetadataRepository;
use service::issuer::{IssuerFactory, QtspIssuerService, QtspIssuerServiceImpl};
use service::remote_signature::{RemoteSignatureService, RemoteSignatureServiceImpl};
use service::signing_recovery::{SigningRecoveryService, SigningRecoveryServiceImpl};

/// Entry point wiring the signing services from configuration and the
/// injected persistence and notification collaborators.
pub struct IssuerCore {
    pub signing_provider: Arc<dyn SigningProvider>,
    pub remote_signature_service: Arc<dyn RemoteSignatureService>,
    pub signing_recovery_service: Arc<dyn SigningRecoveryService>,
    pub qtsp_issuer_service: Arc<dyn QtspIssuerService>,
    pub issuer_factory: IssuerFactory,
}

impl IssuerCore {
    pub fn new(
        config: CoreConfig,
        credential_procedure_repository: Arc<dyn CredentialProcedureRepository>,
        deferred_credential_metadata_repository: Arc<dyn DeferredCredentialMetadataRepository>,
        notification_provider: Arc<dyn NotificationProvider>,
    ) -> Self {
        let http_client: Arc<dyn HttpClient> = Arc::new(ReqwestClient::default());
        let qtsp_client = Arc::new(QtspClient::new(
            http_client.clone(),
            (&config.remote_signature).into(),
        ));

        let remote_signature_service: Arc<dyn RemoteSignatureService> =
            Arc::new(RemoteSignatureServiceImpl::new(
                http_client,
                qtsp_client.clone(),
                deferred_credential_metadata_repository.clone(),
                config.remote_signature.clone(),
            ));

        let signing_recovery_service: Arc<dyn SigningRecoveryService> =
            Arc::new(SigningRecoveryServiceImpl::new(
                credential_procedure_repository,
                deferred_credential_metadata_repository,
                notification_provider,
                config.issuer_frontend_url.clone(),
            ));

        let signing_provider = signing_provider_from_config(
            &config.signing,
            qtsp_client.clone(),
            remote_signature_service.clone(),
            signing_recovery_service.clone(),
        );

        let qtsp_issuer_service: Arc<dyn QtspIssuerService> = Arc::new(QtspIssuerServiceImpl::new(
            qtsp_client,
            config.remote_signature.mode,
        ));

        let issuer_factory = IssuerFactory::new(
            qtsp_issuer_service.clone(),
            signing_recovery_service.clone(),
            config.signer.clone(),
        );

        Self {
            signing_provider,
            remote_signature_service,
            signing_recovery_service,
            qtsp_issuer_service,
            issuer_factory,
        }
    }
}
