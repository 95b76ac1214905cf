pub mod certificate;
pub mod credential_procedure;
pub mod issuer;
