use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("failed to send notification: {0}")]
    Send(String),
}

/// Outbound notification collaborator. The pending-signature mail sent during
/// signing recovery is the only message this crate triggers.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait NotificationProvider: Send + Sync {
    async fn send_pending_signature_notification(
        &self,
        to: &str,
        template: &str,
        procedure_id: &str,
        frontend_url: &str,
    ) -> Result<(), NotificationError>;
}
