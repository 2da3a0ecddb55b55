use crate::application_port::ApiError;
use crate::domain_model::*;

#[async_trait::async_trait]
pub trait ProfileService: Send + Sync {
    async fn get_profile(&self) -> Result<Profile, ApiError>;
    /// Also refreshes the cached user snapshot in the session.
    async fn update_profile(&self, patch: &ProfilePatch) -> Result<ApiMessage, ApiError>;
    /// Account-level profile under `/auth/profile/`, shared with non-admin
    /// accounts.
    async fn get_user_profile(&self) -> Result<Profile, ApiError>;
    async fn update_user_profile(&self, patch: &ProfilePatch) -> Result<ApiMessage, ApiError>;
}

#[async_trait::async_trait]
pub trait DashboardService: Send + Sync {
    async fn stats(&self) -> Result<DashboardStats, ApiError>;
}
