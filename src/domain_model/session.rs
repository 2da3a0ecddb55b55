use crate::domain_model::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// region tokens

/// Short-lived bearer credential. `Debug` never prints the secret.
#[derive(Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(pub String);

/// Long-lived credential, only ever sent to the refresh endpoint.
#[derive(Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefreshToken(pub String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl RefreshToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken(..{})", self.0.len())
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RefreshToken(..{})", self.0.len())
    }
}

// endregion

/// Display cache of the logged-in administrator. Not authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub id: Option<RecordId>,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
}

/// An authenticated session.
///
/// Both tokens live in the same value, so a session with an access token
/// but no refresh token cannot be built. Stores hold `Option<Session>`:
/// `None` is the unauthenticated state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
    pub user: UserSnapshot,
    pub logged_in_at: DateTime<Utc>,
    #[serde(default)]
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(access_token: AccessToken, refresh_token: RefreshToken, user: UserSnapshot) -> Self {
        Self {
            access_token,
            refresh_token,
            user,
            logged_in_at: Utc::now(),
            refreshed_at: None,
        }
    }

    /// Swaps in a freshly minted access token, and the refresh token too when
    /// the backend rotated it.
    pub fn with_tokens(mut self, access_token: AccessToken, refresh_token: Option<RefreshToken>) -> Self {
        self.access_token = access_token;
        if let Some(refresh_token) = refresh_token {
            self.refresh_token = refresh_token;
        }
        self.refreshed_at = Some(Utc::now());
        self
    }
}

/// Partial update of the cached snapshot after a profile edit.
#[derive(Debug, Clone, Default)]
pub struct UserSnapshotPatch {
    pub email: Option<String>,
    pub full_name: Option<String>,
}

impl UserSnapshot {
    pub fn apply(&mut self, patch: &UserSnapshotPatch) {
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(full_name) = &patch.full_name {
            self.full_name = full_name.clone();
        }
    }
}
