#![allow(dead_code)]

use admin_console::application_impl::*;
use admin_console::application_port::*;
use admin_console::console::Console;
use admin_console::domain_model::*;
use admin_console::domain_port::*;
use admin_console::infra_local::MemorySessionStore;
use futures_util::future::BoxFuture;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

type Handler =
    dyn Fn(HttpRequest) -> BoxFuture<'static, Result<HttpResponse, TransportError>> + Send + Sync;

/// Scripted backend. Every request is recorded before the handler runs.
pub struct FakeBackend {
    handler: Box<Handler>,
    seen: Mutex<Vec<HttpRequest>>,
}

impl FakeBackend {
    pub fn new<F>(handler: F) -> Arc<Self>
    where
        F: Fn(HttpRequest) -> BoxFuture<'static, Result<HttpResponse, TransportError>>
            + Send
            + Sync
            + 'static,
    {
        Arc::new(Self {
            handler: Box::new(handler),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<HttpRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    pub fn refresh_calls(&self) -> usize {
        self.requests_to(REFRESH_PATH).len()
    }
}

#[async_trait::async_trait]
impl HttpTransport for FakeBackend {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.seen.lock().unwrap().push(request.clone());
        (self.handler)(request).await
    }
}

pub fn ok(body: Value) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse::new(200, Some(body)))
}

pub fn status(code: u16, body: Value) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse::new(code, Some(body)))
}

pub fn unauthorized() -> Result<HttpResponse, TransportError> {
    status(401, json!({ "detail": "Given token not valid for any token type" }))
}

pub fn bearer(request: &HttpRequest) -> Option<&str> {
    request.bearer.as_ref().map(AccessToken::as_str)
}

pub fn user() -> UserSnapshot {
    UserSnapshot {
        id: Some(RecordId::from(1)),
        email: "ops@example.com".into(),
        username: Some("ops".into()),
        full_name: "Ops Admin".into(),
        role: Some("admin".into()),
        is_verified: true,
    }
}

pub fn session(access: &str, refresh: &str) -> Session {
    Session::new(
        AccessToken(access.into()),
        RefreshToken(refresh.into()),
        user(),
    )
}

pub fn users_page() -> Value {
    json!({
        "success": true,
        "data": {
            "users": [
                { "id": 7, "email": "ann@example.com", "full_name": "Ann", "phone": null }
            ],
            "pagination": { "page": 1, "page_size": 10, "total": 1, "total_pages": 1 }
        }
    })
}

pub struct Harness {
    pub backend: Arc<FakeBackend>,
    pub store: Arc<MemorySessionStore>,
    pub console: Console,
}

impl Harness {
    pub fn new(backend: Arc<FakeBackend>, session: Option<Session>) -> Self {
        let store = Arc::new(match session {
            Some(session) => MemorySessionStore::with_session(session),
            None => MemorySessionStore::new(),
        });
        let console = Console::from_parts(backend.clone(), store.clone());
        Self {
            backend,
            store,
            console,
        }
    }

    pub async fn stored(&self) -> Option<Session> {
        self.store.load().await.unwrap()
    }
}

/// Everything currently buffered on the receiver.
pub fn drain(events: &mut tokio::sync::broadcast::Receiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event);
    }
    seen
}
