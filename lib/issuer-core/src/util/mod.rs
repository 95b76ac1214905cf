pub mod hash;
pub mod jades;
pub mod jws;
pub mod retry;
pub mod x509;
