use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum SigningType {
    /// JSON payload, signed as a JAdES/JWS compact serialization.
    Jades,
    /// Base64 CBOR payload, signed as COSE bytes.
    Cose,
}

/// JAdES baseline profile. Only `B-B` and `B-T` are implemented; the archival
/// profiles fail fast as unsupported.
#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq, Serialize, Deserialize)]
pub enum JadesProfile {
    #[serde(rename = "B_B")]
    #[strum(serialize = "B_B")]
    BB,
    #[default]
    #[serde(rename = "B_T")]
    #[strum(serialize = "B_T")]
    BT,
    #[serde(rename = "B_LT")]
    #[strum(serialize = "B_LT")]
    BLt,
    #[serde(rename = "B_LTA")]
    #[strum(serialize = "B_LTA")]
    BLta,
}

/// One signing attempt. Built once per attempt and never mutated.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SigningRequest {
    pub r#type: SigningType,
    /// Unsigned payload: JSON for JADES, base64 CBOR for COSE.
    pub data: String,
    pub context: SigningContext,
}

/// Caller context travelling with a signing request. A present `procedure_id`
/// marks the request as belonging to an issued (user-facing) credential with
/// a deferred/recovery lifecycle; absence means a system credential.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SigningContext {
    pub token: String,
    pub procedure_id: Option<String>,
    pub email: Option<String>,
}

/// The signed artifact: a compact JWS for JADES, base64 COSE bytes for COSE.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SigningResult {
    pub r#type: SigningType,
    pub data: String,
}
