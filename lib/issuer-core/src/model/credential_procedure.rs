use serde::{Deserialize, Serialize};
use strum::Display;
use time::OffsetDateTime;
use uuid::Uuid;

pub type ProcedureId = Uuid;

/// How the issuance procedure completes its signature: `Sync` within the
/// original request, `Async` via the deferred flow. A procedure only moves to
/// `Async` through signing recovery and never back on its own.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum OperationMode {
    Sync,
    Async,
}

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CredentialStatus {
    Draft,
    Issued,
    PendDownload,
    PendSignature,
    Valid,
    Revoked,
    Expired,
}

/// Issuance procedure of a user-facing credential. Owned by the persistence
/// collaborator; this crate only transitions `operation_mode` and
/// `credential_status`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CredentialProcedure {
    pub procedure_id: ProcedureId,
    pub organization_identifier: String,
    pub credential_status: CredentialStatus,
    pub operation_mode: OperationMode,
    pub updated_by: String,
    pub updated_at: OffsetDateTime,
}

/// Tracking record for a credential whose signature is still outstanding.
/// Kept in lockstep with the owning procedure's `operation_mode`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeferredCredentialMetadata {
    pub procedure_id: ProcedureId,
    pub operation_mode: OperationMode,
    pub transaction_code: Option<String>,
}
