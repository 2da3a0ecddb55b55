use crate::application_impl::util::{send_for_message, successful};
use crate::application_impl::validation::*;
use crate::application_port::*;
use crate::domain_model::*;
use std::sync::Arc;
use tracing::debug;

const PROFILE_PATH: &str = "/admindb/profile/";
const USER_PROFILE_PATH: &str = "/auth/profile/";

pub struct RealProfileService {
    client: Arc<dyn ApiClient>,
}

impl RealProfileService {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        RealProfileService { client }
    }

    async fn fetch(&self, path: &str) -> Result<Profile, ApiError> {
        let envelope = successful(self.client.send(&ApiRequest::get(path)).await?)?;
        Ok(envelope.decode()?)
    }

    async fn store(&self, path: &str, patch: &ProfilePatch) -> Result<ApiMessage, ApiError> {
        if let Some(email) = &patch.email {
            validate_email(email)?;
        }
        if let Some(full_name) = &patch.full_name {
            require("full_name", full_name)?;
        }
        let request = ApiRequest::put(path).with_json(patch)?;
        let message =
            send_for_message(self.client.as_ref(), request, "Profile updated successfully").await?;

        // Keep the cached identity in line with what the server accepted.
        self.client.update_user(&patch.snapshot_patch()).await?;
        debug!(path, "session user snapshot updated from profile");
        Ok(message)
    }
}

#[async_trait::async_trait]
impl ProfileService for RealProfileService {
    async fn get_profile(&self) -> Result<Profile, ApiError> {
        self.fetch(PROFILE_PATH).await
    }

    async fn update_profile(&self, patch: &ProfilePatch) -> Result<ApiMessage, ApiError> {
        self.store(PROFILE_PATH, patch).await
    }

    async fn get_user_profile(&self) -> Result<Profile, ApiError> {
        self.fetch(USER_PROFILE_PATH).await
    }

    async fn update_user_profile(&self, patch: &ProfilePatch) -> Result<ApiMessage, ApiError> {
        self.store(USER_PROFILE_PATH, patch).await
    }
}

pub struct RealDashboardService {
    client: Arc<dyn ApiClient>,
}

impl RealDashboardService {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        RealDashboardService { client }
    }
}

#[async_trait::async_trait]
impl DashboardService for RealDashboardService {
    async fn stats(&self) -> Result<DashboardStats, ApiError> {
        let request = ApiRequest::get("/admindb/dashboard/stats/");
        let envelope = successful(self.client.send(&request).await?)?;
        Ok(envelope.decode()?)
    }
}
