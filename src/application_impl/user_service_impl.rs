use crate::application_impl::util::{send_for_message, successful};
use crate::application_impl::validation::*;
use crate::application_port::*;
use crate::domain_model::*;
use std::sync::Arc;

pub struct RealUserAdminService {
    client: Arc<dyn ApiClient>,
}

impl RealUserAdminService {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        RealUserAdminService { client }
    }
}

#[async_trait::async_trait]
impl UserAdminService for RealUserAdminService {
    async fn list_users(&self, query: &UserQuery) -> Result<UserPage, ApiError> {
        validate_paging(query.page, query.page_size)?;
        let request = ApiRequest::get("/admindb/users/")
            .with_query("page", query.page)
            .with_query("page_size", query.page_size)
            .with_query("search", query.search.trim());
        let envelope = successful(self.client.send(&request).await?)?;
        Ok(envelope.decode()?)
    }

    async fn delete_user(&self, id: &RecordId) -> Result<ApiMessage, ApiError> {
        validate_record_id(id)?;
        let request = ApiRequest::delete(format!("/admindb/users/{id}/"));
        send_for_message(self.client.as_ref(), request, "User deleted successfully").await
    }
}

pub struct RealAdministratorService {
    client: Arc<dyn ApiClient>,
}

impl RealAdministratorService {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        RealAdministratorService { client }
    }
}

#[async_trait::async_trait]
impl AdministratorService for RealAdministratorService {
    async fn list_administrators(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<AdministratorPage, ApiError> {
        validate_paging(page, page_size)?;
        let request = ApiRequest::get("/admindb/administrators/")
            .with_query("page", page)
            .with_query("page_size", page_size);
        let envelope = successful(self.client.send(&request).await?)?;
        Ok(envelope.decode()?)
    }

    async fn create_administrator(&self, admin: &NewAdministrator) -> Result<ApiMessage, ApiError> {
        validate_email(&admin.email)?;
        require("full_name", &admin.full_name)?;
        validate_new_password(&admin.password)?;
        let request = ApiRequest::post("/admindb/administrators/create/").with_json(admin)?;
        send_for_message(
            self.client.as_ref(),
            request,
            "Administrator created successfully",
        )
        .await
    }

    async fn update_administrator(
        &self,
        id: &RecordId,
        patch: &AdministratorPatch,
    ) -> Result<ApiMessage, ApiError> {
        validate_record_id(id)?;
        if patch.is_empty() {
            return Err(ValidationError::EmptyUpdate.into());
        }
        if let Some(email) = &patch.email {
            validate_email(email)?;
        }
        let request = ApiRequest::put(format!("/admindb/administrators/{id}/")).with_json(patch)?;
        send_for_message(
            self.client.as_ref(),
            request,
            "Administrator updated successfully",
        )
        .await
    }

    async fn delete_administrator(&self, id: &RecordId) -> Result<ApiMessage, ApiError> {
        validate_record_id(id)?;
        let request = ApiRequest::delete(format!("/admindb/administrators/{id}/delete/"));
        send_for_message(
            self.client.as_ref(),
            request,
            "Administrator deleted successfully",
        )
        .await
    }
}
