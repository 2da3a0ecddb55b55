use crate::domain_model::*;
use crate::domain_port::*;
use tokio::sync::RwLock;

/// Session kept for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        MemorySessionStore {
            slot: RwLock::new(Some(session)),
        }
    }
}

#[async_trait::async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        Ok(self.slot.read().await.clone())
    }

    async fn save(&self, session: Session) -> Result<(), SessionStoreError> {
        *self.slot.write().await = Some(session);
        Ok(())
    }

    async fn update_tokens(
        &self,
        access_token: AccessToken,
        refresh_token: Option<RefreshToken>,
    ) -> Result<bool, SessionStoreError> {
        let mut slot = self.slot.write().await;
        match slot.take() {
            Some(session) => {
                *slot = Some(session.with_tokens(access_token, refresh_token));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_user(&self, patch: &UserSnapshotPatch) -> Result<bool, SessionStoreError> {
        let mut slot = self.slot.write().await;
        match slot.as_mut() {
            Some(session) => {
                session.user.apply(patch);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn clear(&self) -> Result<bool, SessionStoreError> {
        Ok(self.slot.write().await.take().is_some())
    }
}
