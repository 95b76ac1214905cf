//! Core configuration, deserialized once at startup. Unknown provider or
//! mode names fail deserialization instead of being deferred to first use.

use serde::Deserialize;
use strum::Display;
use url::Url;

use crate::provider::signer::model::JadesProfile;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreConfig {
    pub remote_signature: RemoteSignatureConfig,
    pub signer: SignerConfig,
    pub signing: SigningConfig,
    /// Base URL of the issuer frontend, linked in holder notifications.
    pub issuer_frontend_url: Url,
}

/// Connection settings of the remote signature collaborator. `Server` points
/// at a self-hosted DSS wrapper, `Cloud` directly at the QTSP's CSC API.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSignatureConfig {
    pub mode: RemoteSignatureMode,
    pub domain: Url,
    #[serde(default = "default_sign_path")]
    pub sign_path: String,
    pub credential_id: String,
    pub credential_password: String,
    pub client_id: String,
    pub client_secret: String,
}

fn default_sign_path() -> String {
    "/signature".to_string()
}

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RemoteSignatureMode {
    Server,
    Cloud,
}

/// Locally configured issuer identity, used when the issuer attributes are
/// not resolved from the QTSP certificate chain.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignerConfig {
    pub organization_identifier: String,
    pub organization: Option<String>,
    pub country: Option<String>,
    pub common_name: Option<String>,
    pub serial_number: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningConfig {
    pub provider: SigningProviderType,
    #[serde(default)]
    pub signature_profile: JadesProfile,
}

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SigningProviderType {
    InMemory,
    CscSignDoc,
    CscSignHash,
}
