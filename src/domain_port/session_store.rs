use crate::domain_model::*;

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session storage is corrupt: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Durable home of the single process-wide [`Session`].
///
/// Every method is one atomic step: concurrent readers see either the old
/// complete session or the new one, never a mix.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Result<Option<Session>, SessionStoreError>;

    /// Replace whatever is stored (login).
    async fn save(&self, session: Session) -> Result<(), SessionStoreError>;

    /// Install refreshed tokens into the current session.
    /// Returns `false` and stores nothing when there is no session.
    async fn update_tokens(
        &self,
        access_token: AccessToken,
        refresh_token: Option<RefreshToken>,
    ) -> Result<bool, SessionStoreError>;

    /// Patch the cached user snapshot. Returns `false` when there is no session.
    async fn update_user(&self, patch: &UserSnapshotPatch) -> Result<bool, SessionStoreError>;

    /// Drop the session. Returns whether one was present.
    async fn clear(&self) -> Result<bool, SessionStoreError>;
}
