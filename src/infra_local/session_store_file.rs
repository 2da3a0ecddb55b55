use crate::domain_model::*;
use crate::domain_port::*;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

/// Session persisted as a JSON file, surviving restarts.
///
/// Writes go to a sibling temp file which is then renamed over the target,
/// so a crash never leaves a half-written session behind.
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSessionStore {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read(&self) -> Result<Option<Session>, SessionStoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, session: &Session) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(session)?;
        let temp = self.temp_path();
        fs::write(&temp, bytes).await?;
        fs::rename(&temp, &self.path).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    async fn save(&self, session: Session) -> Result<(), SessionStoreError> {
        let _guard = self.lock.lock().await;
        self.write(&session).await
    }

    async fn update_tokens(
        &self,
        access_token: AccessToken,
        refresh_token: Option<RefreshToken>,
    ) -> Result<bool, SessionStoreError> {
        let _guard = self.lock.lock().await;
        let Some(session) = self.read().await? else {
            return Ok(false);
        };
        self.write(&session.with_tokens(access_token, refresh_token))
            .await?;
        Ok(true)
    }

    async fn update_user(&self, patch: &UserSnapshotPatch) -> Result<bool, SessionStoreError> {
        let _guard = self.lock.lock().await;
        let Some(mut session) = self.read().await? else {
            return Ok(false);
        };
        session.user.apply(patch);
        self.write(&session).await?;
        Ok(true)
    }

    async fn clear(&self) -> Result<bool, SessionStoreError> {
        let _guard = self.lock.lock().await;
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
