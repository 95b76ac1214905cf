pub mod credential_procedure_repository;
pub mod deferred_credential_metadata_repository;
pub mod error;
