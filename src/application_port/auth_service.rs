use crate::application_port::ApiError;
use crate::domain_model::*;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub message: String,
    pub user: UserSnapshot,
}

#[derive(Debug, Clone)]
pub struct PasswordResetConfirm {
    pub email: String,
    pub otp_code: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    PasswordReset,
    Signup,
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, input: LoginInput) -> Result<LoginOutcome, ApiError>;
    /// Best-effort remote logout. The local session is gone afterwards
    /// whatever the server said.
    async fn logout(&self) -> Result<ApiMessage, ApiError>;
    async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<ApiMessage, ApiError>;
    async fn request_password_reset(&self, email: &str) -> Result<ApiMessage, ApiError>;
    async fn verify_password_reset_otp(
        &self,
        email: &str,
        otp_code: &str,
    ) -> Result<ApiMessage, ApiError>;
    async fn confirm_password_reset(
        &self,
        input: PasswordResetConfirm,
    ) -> Result<ApiMessage, ApiError>;
    async fn resend_otp(&self, email: &str, purpose: OtpPurpose) -> Result<ApiMessage, ApiError>;
    async fn check_email(&self, email: &str) -> Result<ApiEnvelope, ApiError>;
    async fn is_authenticated(&self) -> Result<bool, ApiError>;
    async fn current_user(&self) -> Result<Option<UserSnapshot>, ApiError>;
}
