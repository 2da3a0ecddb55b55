use crate::domain_model::RecordId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role string as the backend spells it.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    StaffAdmin,
    User,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::StaffAdmin => "staffadmin",
            Role::User => "user",
            Role::Other(role) => role,
        }
    }

    /// Human label used by the console screens.
    pub fn display_name(&self) -> &str {
        match self {
            Role::Admin => "Super Admin",
            Role::StaffAdmin => "Staff Admin",
            Role::User => "User",
            Role::Other(role) => role,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "admin" => Role::Admin,
            "staffadmin" => Role::StaffAdmin,
            "user" => Role::User,
            _ => Role::Other(value),
        }
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_owned()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u32,
}

/// A console end user as listed by `GET /admindb/users/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: RecordId,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPage {
    pub users: Vec<AdminUser>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserQuery {
    pub page: u32,
    pub page_size: u32,
    pub search: String,
}

impl Default for UserQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            search: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn role_round_trips_unknown_values() {
        let roles: Vec<Role> = serde_json::from_value(json!(["admin", "auditor"])).unwrap();
        assert_eq!(roles[0], Role::Admin);
        assert_eq!(roles[1], Role::Other("auditor".into()));
        assert_eq!(roles[0].display_name(), "Super Admin");
        assert_eq!(serde_json::to_value(&roles).unwrap(), json!(["admin", "auditor"]));
    }

    #[test]
    fn user_page_tolerates_missing_optional_fields() {
        let page: UserPage = serde_json::from_value(json!({
            "users": [{ "id": 3, "email": "ann@example.com" }],
            "pagination": { "page": 1, "page_size": 10, "total": 1, "total_pages": 1 }
        }))
        .unwrap();
        assert_eq!(page.users[0].id, RecordId::from(3));
        assert_eq!(page.users[0].phone, None);
        assert_eq!(page.pagination.total, 1);
    }
}
