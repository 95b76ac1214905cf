use super::error::DataLayerError;
use crate::model::credential_procedure::{CredentialProcedure, ProcedureId};

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait CredentialProcedureRepository: Send + Sync {
    async fn find_by_procedure_id(
        &self,
        id: &ProcedureId,
    ) -> Result<Option<CredentialProcedure>, DataLayerError>;

    async fn save(&self, procedure: CredentialProcedure) -> Result<(), DataLayerError>;
}
