pub mod error;
pub mod issuer;
pub mod remote_signature;
pub mod signing_recovery;
