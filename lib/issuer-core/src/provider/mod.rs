pub mod http_client;
pub mod notification;
pub mod qtsp;
pub mod signer;
