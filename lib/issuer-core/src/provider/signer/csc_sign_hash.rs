//! QTSP strategy that assembles the JAdES signature locally and only sends a
//! digest to the remote `signHash` endpoint. The protected header is built
//! from the credential's certificate chain, so the QTSP never sees the
//! payload itself.

use std::sync::Arc;

use super::SigningProvider;
use super::error::SigningError;
use super::model::{JadesProfile, SigningRequest, SigningResult, SigningType};
use super::validator::validate_request;
use crate::provider::qtsp::mapper::credentials_info_to_certificate_info;
use crate::provider::qtsp::{QtspClient, TokenScope};
use crate::util::hash::{SHA256_OID, encode_base64url, sha256};
use crate::util::jades::{SIGN_ALGO_OID_ES256, build_jades_header};
use crate::util::jws::signing_input;
use crate::util::retry::retry_with_backoff;

pub struct CscSignHashProvider {
    qtsp_client: Arc<QtspClient>,
    signature_profile: JadesProfile,
}

impl CscSignHashProvider {
    pub fn new(qtsp_client: Arc<QtspClient>, signature_profile: JadesProfile) -> Self {
        Self {
            qtsp_client,
            signature_profile,
        }
    }
}

#[async_trait::async_trait]
impl SigningProvider for CscSignHashProvider {
    async fn sign(&self, request: SigningRequest) -> Result<SigningResult, SigningError> {
        validate_request(&request)?;
        if request.r#type != SigningType::Jades {
            return Err(SigningError::UnsupportedSigningType(request.r#type));
        }

        let token = self
            .qtsp_client
            .request_access_token(TokenScope::Credential, Some(&request.data))
            .await?;

        let info = self.qtsp_client.request_credentials_info(&token).await?;
        let cert_info = credentials_info_to_certificate_info(info)?;

        let header = build_jades_header(&cert_info, self.signature_profile)?;
        let input = signing_input(&header, &request.data)?;
        let digest = encode_base64url(&sha256(input.as_bytes()))?;

        let sad = retry_with_backoff("authorizeCredential", || {
            self.qtsp_client
                .authorize_for_hash(&token, &digest, SHA256_OID)
        })
        .await?;

        let signature = retry_with_backoff("signHash", || {
            self.qtsp_client
                .sign_hash(&token, &sad, &digest, SHA256_OID, SIGN_ALGO_OID_ES256)
        })
        .await?;

        Ok(SigningResult {
            r#type: SigningType::Jades,
            data: format!("{input}.{signature}"),
        })
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::provider::http_client::reqwest_client::ReqwestClient;
    use crate::provider::qtsp::{QtspError, QtspParams};
    use crate::provider::signer::model::{JadesProfile, SigningContext};
    use crate::util::jws::decode_payload;

    fn provider(server: &MockServer, profile: JadesProfile) -> CscSignHashProvider {
        let params = QtspParams {
            domain: server.uri().parse().unwrap(),
            credential_id: "credential-1".to_string(),
            credential_password: "secret".to_string(),
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
        };
        let client = QtspClient::new(Arc::new(ReqwestClient::default()), params);

        CscSignHashProvider::new(Arc::new(client), profile)
    }

    fn request() -> SigningRequest {
        SigningRequest {
            r#type: SigningType::Jades,
            data: r#"{"vc":"data"}"#.to_string(),
            context: SigningContext {
                token: "caller-token".to_string(),
                procedure_id: None,
                email: None,
            },
        }
    }

    async fn mount_token_and_info(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "access_token": "token-123" })),
            )
            .mount(server)
            .await;

        Mock::given(method("POST"))
            .and(path("/csc/v2/credentials/info"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "key": { "status": "enabled", "algo": ["1.2.840.10045.4.3.2"], "len": 256 },
                "cert": {
                    "status": "valid",
                    "certificates": ["bGVhZg==", "cm9vdA=="],
                    "issuerDN": "CN=Test CA",
                    "subjectDN": "CN=Issuer",
                    "serialNumber": "01",
                    "validFrom": "20240101000000Z",
                    "validTo": "20260101000000Z"
                }
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_sign_hash_flow_produces_compact_jws() {
        let server = MockServer::start().await;
        mount_token_and_info(&server).await;

        Mock::given(method("POST"))
            .and(path("/csc/v2/credentials/authorize"))
            .and(body_string_contains("\"hashAlgo\":\"2.16.840.1.101.3.4.2.1\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "SAD": "sad-token" })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/csc/v2/signatures/signHash"))
            .and(body_string_contains("\"SAD\":\"sad-token\""))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "signatures": ["c2ln"] })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = provider(&server, JadesProfile::BB)
            .sign(request())
            .await
            .unwrap();

        assert_eq!(result.r#type, SigningType::Jades);
        let segments: Vec<&str> = result.data.split('.').collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[2], "c2ln");
        assert_eq!(decode_payload(&result.data).unwrap(), r#"{"vc":"data"}"#);

        let header_bytes = crate::util::hash::decode_base64url(segments[0]).unwrap();
        let header: serde_json::Value = serde_json::from_slice(&header_bytes).unwrap();
        assert_eq!(header["alg"], "ES256");
        assert_eq!(header["x5c"][0], "bGVhZg==");
    }

    #[tokio::test]
    async fn test_blank_data_makes_no_network_calls() {
        let server = MockServer::start().await;

        let mut request = request();
        request.data = "  ".to_string();

        let result = provider(&server, JadesProfile::BB).sign(request).await;

        assert!(matches!(result, Err(SigningError::InvalidRequest(_))));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_archival_profile_fails_before_any_signing_call() {
        let server = MockServer::start().await;
        mount_token_and_info(&server).await;

        let result = provider(&server, JadesProfile::BLta).sign(request()).await;

        assert!(matches!(result, Err(SigningError::Jades(_))));
    }

    #[tokio::test]
    async fn test_disabled_key_fails() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "access_token": "token-123" })),
            )
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/csc/v2/credentials/info"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "key": { "status": "disabled", "algo": ["1.2.840.10045.4.3.2"] },
                "cert": { "status": "valid", "certificates": ["bGVhZg=="] }
            })))
            .mount(&server)
            .await;

        let result = provider(&server, JadesProfile::BB).sign(request()).await;

        assert!(matches!(
            result,
            Err(SigningError::Qtsp(QtspError::InvalidResponse(_)))
        ));
    }
}
