use crate::domain_model::{Pagination, RecordId, Role};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Administrator {
    pub id: RecordId,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdministratorPage {
    pub administrators: Vec<Administrator>,
    pub pagination: Pagination,
}

/// Body of `POST /admindb/administrators/create/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewAdministrator {
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub role: Role,
    pub password: String,
}

/// Partial update; unset fields are left out of the body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdministratorPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl AdministratorPatch {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.full_name.is_none() && self.phone.is_none() && self.role.is_none()
    }
}
