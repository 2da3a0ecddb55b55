use crate::application_impl::SessionEvents;
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

pub const REFRESH_PATH: &str = "/auth/token/refresh/";

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access: String,
    #[serde(default)]
    refresh: Option<String>,
}

/// Bearer-token client with single-flight refresh.
///
/// A 401 on a bearer request's first attempt sends the request through the
/// refresh gate. Only one task refreshes at a time; tasks queued behind it
/// compare the token they were sent with against the stored one and retry
/// straight away when it already changed. Each request is retried at most
/// once.
pub struct AuthenticatedApiClient {
    transport: Arc<dyn HttpTransport>,
    session_store: Arc<dyn SessionStore>,
    events: SessionEvents,
    refresh_gate: Mutex<()>,
}

impl AuthenticatedApiClient {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        session_store: Arc<dyn SessionStore>,
        events: SessionEvents,
    ) -> Self {
        Self {
            transport,
            session_store,
            events,
            refresh_gate: Mutex::new(()),
        }
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        attempt: Attempt,
        request_id: Uuid,
    ) -> Result<(HttpResponse, Option<AccessToken>), ApiError> {
        let bearer = match request.auth() {
            AuthMode::Bearer => self
                .session_store
                .load()
                .await?
                .map(|session| session.access_token),
            AuthMode::Public => None,
        };
        debug!(
            %request_id,
            method = %request.method(),
            path = request.path(),
            ?attempt,
            authenticated = bearer.is_some(),
            "dispatching request"
        );

        let response = self
            .transport
            .execute(HttpRequest::from_api_request(request, bearer.clone()))
            .await
            .map_err(|e| {
                warn!(%request_id, error = %e, "no response received");
                ApiError::from(e)
            })?;
        debug!(%request_id, status = response.status, "response received");
        Ok((response, bearer))
    }

    async fn refresh_after_unauthorized(&self, stale: Option<&AccessToken>) -> Result<(), ApiError> {
        let _gate = self.refresh_gate.lock().await;

        let Some(session) = self.session_store.load().await? else {
            if stale.is_some() {
                // Ended by whoever held the gate before us; they already
                // cleared and notified.
                return Err(ApiError::SessionExpired);
            }
            info!("unauthorized without a session, nothing to refresh");
            return Err(self.expire(EndReason::RefreshFailed).await);
        };

        if stale != Some(&session.access_token) {
            debug!("credential already renewed, retrying");
            return Ok(());
        }

        info!("access token rejected, refreshing");
        match self.request_new_tokens(&session.refresh_token).await {
            Ok(tokens) => {
                let renewed = self
                    .session_store
                    .update_tokens(
                        AccessToken(tokens.access),
                        tokens.refresh.map(RefreshToken),
                    )
                    .await?;
                if !renewed {
                    // Logged out while the refresh call was in flight.
                    return Err(ApiError::SessionExpired);
                }
                info!("access token refreshed");
                self.events.emit(SessionEvent::Refreshed);
                Ok(())
            }
            Err(reason) => {
                warn!(%reason, "token refresh failed, ending session");
                Err(self.expire(EndReason::RefreshFailed).await)
            }
        }
    }

    /// Straight to the transport, never through `send`: a 401 here must not
    /// trigger another refresh.
    async fn request_new_tokens(&self, refresh: &RefreshToken) -> Result<RefreshResponse, String> {
        let request = HttpRequest {
            method: HttpMethod::Post,
            path: REFRESH_PATH.to_owned(),
            query: Vec::new(),
            body: Some(json!({ "refresh": refresh.as_str() })),
            bearer: None,
        };
        let response = self
            .transport
            .execute(request)
            .await
            .map_err(|e| e.to_string())?;
        if !response.is_success() {
            return Err(format!("refresh endpoint answered {}", response.status));
        }
        ApiEnvelope::normalize(response.body)
            .decode::<RefreshResponse>()
            .map_err(|e| format!("unreadable refresh response: {e}"))
    }

    async fn expire(&self, reason: EndReason) -> ApiError {
        let cleared = self.session_store.clear().await;
        self.events.emit(SessionEvent::Ended { reason });
        match cleared {
            Ok(_) => ApiError::SessionExpired,
            Err(e) => {
                error!(error = %e, "could not clear the session");
                e.into()
            }
        }
    }
}

#[async_trait::async_trait]
impl ApiClient for AuthenticatedApiClient {
    async fn send(&self, request: &ApiRequest) -> Result<ApiEnvelope, ApiError> {
        let request_id = Uuid::new_v4();
        let mut attempt = Attempt::First;
        loop {
            let (response, bearer) = self.dispatch(request, attempt, request_id).await?;

            if response.is_success() {
                return Ok(ApiEnvelope::from_response(response.status, response.body));
            }

            if response.is_unauthorized() && request.auth() == AuthMode::Bearer {
                match attempt {
                    Attempt::First => {
                        self.refresh_after_unauthorized(bearer.as_ref()).await?;
                        attempt = Attempt::Retry;
                        continue;
                    }
                    Attempt::Retry => {
                        warn!(%request_id, "still unauthorized after refresh, ending session");
                        return Err(self.expire(EndReason::Rejected).await);
                    }
                }
            }

            return Err(request_error(&response));
        }
    }

    async fn current_session(&self) -> Result<Option<Session>, ApiError> {
        Ok(self.session_store.load().await?)
    }

    async fn start_session(&self, session: Session) -> Result<(), ApiError> {
        let user = session.user.clone();
        self.session_store.save(session).await?;
        info!(email = %user.email, "session started");
        self.events.emit(SessionEvent::Started { user });
        Ok(())
    }

    async fn end_session(&self, reason: EndReason) -> Result<(), ApiError> {
        let cleared = self.session_store.clear().await?;
        info!(?reason, cleared, "session ended");
        self.events.emit(SessionEvent::Ended { reason });
        Ok(())
    }

    async fn update_user(&self, patch: &UserSnapshotPatch) -> Result<(), ApiError> {
        self.session_store.update_user(patch).await?;
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}

fn request_error(response: &HttpResponse) -> ApiError {
    let message = response
        .body
        .as_ref()
        .and_then(server_message)
        .unwrap_or_else(|| generic_message(response.status).to_owned());
    ApiError::Request {
        status: response.status,
        message,
    }
}

/// `message`, then `error`, then `detail`; failing those, the first field
/// error of a validation body like `{"email": ["Enter a valid email."]}`.
fn server_message(body: &Value) -> Option<String> {
    let object = body.as_object()?;
    for key in ["message", "error", "detail"] {
        if let Some(text) = object.get(key).and_then(Value::as_str) {
            return Some(text.to_owned());
        }
    }
    object.iter().find_map(|(field, value)| {
        let text = match value {
            Value::Array(items) => items.first()?.as_str()?,
            _ => return None,
        };
        Some(format!("{field}: {text}"))
    })
}

fn generic_message(status: u16) -> &'static str {
    match status {
        400 => "bad request",
        401 => "unauthorized",
        403 => "permission denied",
        404 => "not found",
        409 => "conflict",
        429 => "too many requests",
        500..=599 => "server error, please try again later",
        _ => "request failed",
    }
}
