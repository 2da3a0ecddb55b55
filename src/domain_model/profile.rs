use crate::domain_model::{Role, UserSnapshotPatch};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ProfilePatch {
    pub fn snapshot_patch(&self) -> UserSnapshotPatch {
        UserSnapshotPatch {
            email: self.email.clone(),
            full_name: self.full_name.clone(),
        }
    }
}

/// Dashboard counters. The backend's set of keys is open-ended, so they
/// are kept as a JSON map with typed accessors for the common ones.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DashboardStats(pub Map<String, Value>);

impl DashboardStats {
    pub fn count(&self, key: &str) -> Option<u64> {
        self.0.get(key).and_then(Value::as_u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_defaults_missing_fields() {
        let profile: Profile = serde_json::from_value(json!({ "email": "me@example.com" })).unwrap();
        assert_eq!(profile.full_name, "");
        assert_eq!(profile.role, None);
    }

    #[test]
    fn stats_counts() {
        let stats: DashboardStats =
            serde_json::from_value(json!({ "total_users": 12, "label": "x" })).unwrap();
        assert_eq!(stats.count("total_users"), Some(12));
        assert_eq!(stats.count("label"), None);
    }
}
