use super::error::DataLayerError;
use crate::model::credential_procedure::{DeferredCredentialMetadata, ProcedureId};

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait DeferredCredentialMetadataRepository: Send + Sync {
    async fn find_by_procedure_id(
        &self,
        id: &ProcedureId,
    ) -> Result<Option<DeferredCredentialMetadata>, DataLayerError>;

    async fn save(&self, metadata: DeferredCredentialMetadata) -> Result<(), DataLayerError>;

    async fn delete_by_procedure_id(&self, id: &ProcedureId) -> Result<(), DataLayerError>;
}
