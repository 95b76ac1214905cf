use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::provider::http_client::reqwest_client::ReqwestClient;
use crate::provider::qtsp::QtspParams;
use crate::service::signing_recovery::MockSigningRecoveryService;
use crate::util::hash::encode_base64;

fn qtsp_service(server: &MockServer, mode: RemoteSignatureMode) -> QtspIssuerServiceImpl {
    let params = QtspParams {
        domain: server.uri().parse().unwrap(),
        credential_id: "credential-1".to_string(),
        credential_password: "secret".to_string(),
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
    };
    let client = QtspClient::new(Arc::new(ReqwestClient::default()), params);

    QtspIssuerServiceImpl::new(Arc::new(client), mode)
}

fn signer_config() -> SignerConfig {
    SignerConfig {
        organization_identifier: "VATES-B12345678".to_string(),
        organization: Some("Example Org".to_string()),
        country: Some("ES".to_string()),
        common_name: Some("Example Issuer".to_string()),
        serial_number: "IDCES-12345678X".to_string(),
    }
}

fn certificate_entry(identifier: &str) -> String {
    encode_base64(format!("subject: organizationIdentifier={identifier}").as_bytes()).unwrap()
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "access_token": "token-123" })),
        )
        .mount(server)
        .await;
}

async fn mount_list(server: &MockServer, credentials: &[&str]) {
    Mock::given(method("POST"))
        .and(path("/csc/v2/credentials/list"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "credentialIDs": credentials })),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_resolve_remote_detailed_issuer() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_list(&server, &[" Credential-1 ", "other"]).await;

    Mock::given(method("POST"))
        .and(path("/csc/v2/credentials/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "key": { "status": "enabled", "algo": ["1.2.840.10045.4.3.2"], "len": 256 },
            "cert": {
                "status": "valid",
                "certificates": [certificate_entry("VATES-B60645900")],
                "issuerDN": "CN=Test CA",
                "subjectDN": "CN=Seal Cert, O=Some Org, C=ES",
                "serialNumber": "01:AB",
                "validFrom": "20240101000000Z",
                "validTo": "20260101000000Z"
            }
        })))
        .mount(&server)
        .await;

    let issuer = qtsp_service(&server, RemoteSignatureMode::Cloud)
        .resolve_remote_detailed_issuer()
        .await
        .unwrap();

    assert_eq!(issuer.id, "did:elsi:VATES-B60645900");
    assert_eq!(issuer.organization_identifier, "VATES-B60645900");
    assert_eq!(issuer.organization.as_deref(), Some("Some Org"));
    assert_eq!(issuer.country.as_deref(), Some("ES"));
    assert_eq!(issuer.common_name.as_deref(), Some("Seal Cert"));
    assert_eq!(issuer.serial_number, "01:AB");
}

#[tokio::test]
async fn test_resolve_fails_when_credential_not_listed() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_list(&server, &["other-credential"]).await;

    let result = qtsp_service(&server, RemoteSignatureMode::Cloud)
        .resolve_remote_detailed_issuer()
        .await;

    assert!(matches!(
        result,
        Err(ServiceError::Signing(SigningError::Qtsp(
            QtspError::InvalidResponse(_)
        )))
    ));
}

#[tokio::test]
async fn test_validate_credentials_is_case_and_whitespace_insensitive() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_list(&server, &["  CREDENTIAL-1  "]).await;

    let valid = qtsp_service(&server, RemoteSignatureMode::Cloud)
        .validate_credentials()
        .await
        .unwrap();

    assert!(valid);
}

#[tokio::test]
async fn test_server_mode_uses_local_signer_config() {
    let mut qtsp = MockQtspIssuerService::new();
    qtsp.expect_is_server_mode().return_const(true);
    qtsp.expect_resolve_remote_detailed_issuer().never();

    let factory = IssuerFactory::new(
        Arc::new(qtsp),
        Arc::new(MockSigningRecoveryService::new()),
        signer_config(),
    );
    let issuer = factory.create_detailed_issuer().await.unwrap();

    assert_eq!(issuer.id, "did:elsi:VATES-B12345678");
    assert_eq!(issuer.organization.as_deref(), Some("Example Org"));
    assert_eq!(issuer.serial_number, "IDCES-12345678X");
}

#[tokio::test]
async fn test_simple_issuer_keeps_only_the_did() {
    let mut qtsp = MockQtspIssuerService::new();
    qtsp.expect_is_server_mode().return_const(true);

    let factory = IssuerFactory::new(
        Arc::new(qtsp),
        Arc::new(MockSigningRecoveryService::new()),
        signer_config(),
    );
    let issuer = factory.create_simple_issuer().await.unwrap();

    assert_eq!(issuer.id, "did:elsi:VATES-B12345678");
}

#[tokio::test]
async fn test_notify_on_error_parks_procedure_and_returns_none() {
    let mut qtsp = MockQtspIssuerService::new();
    qtsp.expect_is_server_mode().return_const(false);
    qtsp.expect_resolve_remote_detailed_issuer()
        .once()
        .returning(|| {
            Err(ServiceError::Signing(SigningError::Qtsp(
                QtspError::Unauthorized,
            )))
        });

    let mut recovery = MockSigningRecoveryService::new();
    recovery
        .expect_handle_post_recover_error()
        .once()
        .withf(|procedure_id, email| {
            procedure_id == "proc-1" && email == &Some("holder@example.com")
        })
        .returning(|_, _| Ok(()));

    let factory = IssuerFactory::new(Arc::new(qtsp), Arc::new(recovery), signer_config());
    let result = factory
        .create_detailed_issuer_notify_on_error("proc-1", Some("holder@example.com"))
        .await
        .unwrap();

    assert!(result.is_none());
}
