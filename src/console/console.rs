use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_local::*;
use crate::infra_reqwest::*;
use crate::logger::*;
use crate::settings::Settings;
use anyhow::anyhow;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Everything a console front end needs, wired from settings.
pub struct Console {
    pub client: Arc<dyn ApiClient>,
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserAdminService>,
    pub administrator_service: Arc<dyn AdministratorService>,
    pub profile_service: Arc<dyn ProfileService>,
    pub dashboard_service: Arc<dyn DashboardService>,
}

impl Console {
    pub fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new(
            &settings.api.base_url,
            settings.api.timeout(),
        )?);

        let session_store: Arc<dyn SessionStore> = match settings.session.backend.as_str() {
            "memory" => Arc::new(MemorySessionStore::new()),
            "file" => {
                let path = settings
                    .session
                    .path
                    .as_deref()
                    .ok_or_else(|| anyhow!("session.path is required by the file backend"))?;
                Arc::new(FileSessionStore::new(path))
            }
            other => return Err(anyhow!("Unknown session backend: {}", other)),
        };

        info!(
            base_url = %settings.api.base_url,
            session_backend = %settings.session.backend,
            "console configured"
        );
        Ok(Self::from_parts(transport, session_store))
    }

    pub fn from_parts(
        transport: Arc<dyn HttpTransport>,
        session_store: Arc<dyn SessionStore>,
    ) -> Self {
        let client: Arc<dyn ApiClient> = Arc::new(AuthenticatedApiClient::new(
            transport,
            session_store,
            SessionEvents::new(),
        ));

        Self {
            auth_service: Arc::new(RealAuthService::new(client.clone())),
            user_service: Arc::new(RealUserAdminService::new(client.clone())),
            administrator_service: Arc::new(RealAdministratorService::new(client.clone())),
            profile_service: Arc::new(RealProfileService::new(client.clone())),
            dashboard_service: Arc::new(RealDashboardService::new(client.clone())),
            client,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.client.subscribe()
    }
}
