use crate::domain_model::*;
use crate::domain_port::{SessionStoreError, TransportError};
use tokio::sync::broadcast;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No response at all: timeout, refused connection, DNS failure.
    #[error("network error, please check your connection ({0})")]
    Network(String),
    #[error("{message} (status {status})")]
    Request { status: u16, message: String },
    #[error("session expired, please log in again")]
    SessionExpired,
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("session store error: {0}")]
    Store(String),
}

impl ApiError {
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(error: TransportError) -> Self {
        ApiError::Network(error.to_string())
    }
}

impl From<SessionStoreError> for ApiError {
    fn from(error: SessionStoreError) -> Self {
        ApiError::Store(error.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::Decode(error.to_string())
    }
}

/// Rejected on the caller side, before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("please enter your email and password")]
    MissingCredentials,
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("verification code must be 4 to 8 digits")]
    InvalidOtp,
    #[error("password must be at least {min} characters long")]
    PasswordTooShort { min: usize },
    #[error("{0} must be greater than zero")]
    ZeroPaging(&'static str),
    #[error("'{0}' is not a valid record id")]
    InvalidId(String),
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("nothing to update")]
    EmptyUpdate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    LoggedOut,
    /// The refresh endpoint rejected the refresh token, or could not be reached.
    RefreshFailed,
    /// A request was still unauthorized after a successful refresh.
    Rejected,
}

/// Broadcast to the presentation layer; `Ended` means "go back to login".
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Started { user: UserSnapshot },
    Refreshed,
    Ended { reason: EndReason },
}

/// The authenticated access layer every endpoint service goes through.
#[async_trait::async_trait]
pub trait ApiClient: Send + Sync {
    /// Dispatch a request, refreshing the credential once on 401 for
    /// bearer requests.
    async fn send(&self, request: &ApiRequest) -> Result<ApiEnvelope, ApiError>;

    async fn current_session(&self) -> Result<Option<Session>, ApiError>;

    async fn start_session(&self, session: Session) -> Result<(), ApiError>;

    async fn end_session(&self, reason: EndReason) -> Result<(), ApiError>;

    async fn update_user(&self, patch: &UserSnapshotPatch) -> Result<(), ApiError>;

    fn subscribe(&self) -> broadcast::Receiver<SessionEvent>;
}
