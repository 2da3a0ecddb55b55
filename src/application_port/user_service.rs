use crate::application_port::ApiError;
use crate::domain_model::*;

#[async_trait::async_trait]
pub trait UserAdminService: Send + Sync {
    async fn list_users(&self, query: &UserQuery) -> Result<UserPage, ApiError>;
    async fn delete_user(&self, id: &RecordId) -> Result<ApiMessage, ApiError>;
}

#[async_trait::async_trait]
pub trait AdministratorService: Send + Sync {
    async fn list_administrators(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<AdministratorPage, ApiError>;
    async fn create_administrator(&self, admin: &NewAdministrator) -> Result<ApiMessage, ApiError>;
    async fn update_administrator(
        &self,
        id: &RecordId,
        patch: &AdministratorPatch,
    ) -> Result<ApiMessage, ApiError>;
    async fn delete_administrator(&self, id: &RecordId) -> Result<ApiMessage, ApiError>;
}
