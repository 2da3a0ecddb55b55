use crate::application_impl::util::{send_for_message, successful};
use crate::application_impl::validation::*;
use crate::application_port::*;
use crate::domain_model::*;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// The backend has shipped the access token both bare and wrapped.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AccessTokenField {
    Nested { access: String },
    Plain(String),
}

impl AccessTokenField {
    fn into_token(self) -> AccessToken {
        match self {
            AccessTokenField::Nested { access } => AccessToken(access),
            AccessTokenField::Plain(access) => AccessToken(access),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(alias = "access")]
    access_token: AccessTokenField,
    refresh: String,
    #[serde(default)]
    user_id: Option<RecordId>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    is_verified: bool,
}

impl LoginResponse {
    fn into_session(self, fallback_email: &str) -> Session {
        let user = UserSnapshot {
            id: self.user_id,
            email: self.email.unwrap_or_else(|| fallback_email.to_owned()),
            username: self.username,
            full_name: self.full_name.unwrap_or_default(),
            role: self.role,
            is_verified: self.is_verified,
        };
        Session::new(
            self.access_token.into_token(),
            RefreshToken(self.refresh),
            user,
        )
    }
}

pub struct RealAuthService {
    client: Arc<dyn ApiClient>,
}

impl RealAuthService {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl AuthService for RealAuthService {
    async fn login(&self, input: LoginInput) -> Result<LoginOutcome, ApiError> {
        validate_credentials(&input.email, &input.password)?;
        let email = input.email.trim();

        let request = ApiRequest::post("/auth/login/")
            .public()
            .with_body(json!({ "email": email, "password": input.password }));
        let envelope = successful(self.client.send(&request).await?)?;

        let message = envelope.message_or("Login successful");
        let session = envelope.decode::<LoginResponse>()?.into_session(email);
        let user = session.user.clone();
        self.client.start_session(session).await?;

        info!(email = %user.email, "logged in");
        Ok(LoginOutcome { message, user })
    }

    async fn logout(&self) -> Result<ApiMessage, ApiError> {
        let remote = send_for_message(
            self.client.as_ref(),
            ApiRequest::post("/auth/logout/"),
            "Logged out successfully",
        )
        .await;
        if matches!(remote, Err(ApiError::SessionExpired)) {
            // The client already cleared the session and announced it.
            return remote;
        }
        if let Err(e) = &remote {
            warn!(error = %e, "remote logout failed, clearing local session anyway");
        }
        self.client.end_session(EndReason::LoggedOut).await?;
        remote
    }

    async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<ApiMessage, ApiError> {
        require("old_password", old_password)?;
        validate_new_password(new_password)?;
        let request = ApiRequest::post("/auth/change-password/").with_body(json!({
            "old_password": old_password,
            "new_password": new_password,
        }));
        send_for_message(self.client.as_ref(), request, "Password changed successfully").await
    }

    async fn request_password_reset(&self, email: &str) -> Result<ApiMessage, ApiError> {
        validate_email(email)?;
        let request = ApiRequest::post("/auth/password-reset-request/")
            .public()
            .with_body(json!({ "email": email }));
        send_for_message(self.client.as_ref(), request, "OTP sent successfully").await
    }

    async fn verify_password_reset_otp(
        &self,
        email: &str,
        otp_code: &str,
    ) -> Result<ApiMessage, ApiError> {
        validate_email(email)?;
        validate_otp(otp_code)?;
        let request = ApiRequest::post("/auth/password-reset-verify-otp/")
            .public()
            .with_body(json!({ "email": email, "otp_code": otp_code }));
        send_for_message(self.client.as_ref(), request, "OTP verified successfully").await
    }

    async fn confirm_password_reset(
        &self,
        input: PasswordResetConfirm,
    ) -> Result<ApiMessage, ApiError> {
        validate_email(&input.email)?;
        validate_otp(&input.otp_code)?;
        validate_new_password(&input.new_password)?;
        let request = ApiRequest::post("/auth/password-reset-confirm/")
            .public()
            .with_body(json!({
                "email": input.email,
                "otp_code": input.otp_code,
                "new_password": input.new_password,
            }));
        send_for_message(self.client.as_ref(), request, "Password reset successfully").await
    }

    async fn resend_otp(&self, email: &str, purpose: OtpPurpose) -> Result<ApiMessage, ApiError> {
        validate_email(email)?;
        let request = ApiRequest::post("/auth/resend-otp/")
            .public()
            .with_body(json!({ "email": email, "purpose": purpose }));
        send_for_message(self.client.as_ref(), request, "OTP sent successfully").await
    }

    async fn check_email(&self, email: &str) -> Result<ApiEnvelope, ApiError> {
        validate_email(email)?;
        let request = ApiRequest::post("/auth/check-email/")
            .public()
            .with_body(json!({ "email": email }));
        successful(self.client.send(&request).await?)
    }

    async fn is_authenticated(&self) -> Result<bool, ApiError> {
        Ok(self.client.current_session().await?.is_some())
    }

    async fn current_user(&self) -> Result<Option<UserSnapshot>, ApiError> {
        Ok(self.client.current_session().await?.map(|session| session.user))
    }
}
