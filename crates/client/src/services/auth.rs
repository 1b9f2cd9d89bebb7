//! `/auth` endpoints and the token side effects of the auth lifecycle.

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use eventhub_auth::{SessionEvent, SessionState};

use crate::envelope::Envelope;
use crate::error::ApiResult;
use crate::guard::ProfileSource;
use crate::http::{ApiClient, Auth};
use crate::models::{
    AuthPayload, ChangePasswordRequest, EmailRequest, EmailSent, GoogleAuthRequest, LoginRequest,
    OtpResent, RegisterRequest, ResetPasswordRequest, User, VerifyEmailPayload,
    VerifyEmailRequest,
};

/// Response of a call that may move the session.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthOutcome<T> {
    pub envelope: Envelope<T>,
    pub state: SessionState,
}

#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Session state implied by the token slot.
    pub fn state(&self) -> SessionState {
        SessionState::from_token_present(self.api.tokens().exists())
    }

    /// Store a non-empty token. Returns whether one was stored.
    fn store_token(&self, token: Option<&str>) -> ApiResult<bool> {
        match token.filter(|t| !t.trim().is_empty()) {
            Some(token) => {
                self.api.tokens().set(token)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Unauthenticated POST that may issue a token.
    ///
    /// `data.token` is read from the raw body before the typed decode, so a
    /// profile shape the models do not accept never drops an issued token.
    /// Returns the envelope and whether a token was stored.
    async fn post_issuing<T, B>(&self, path: &str, body: &B) -> ApiResult<(Envelope<T>, bool)>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        let raw = self
            .api
            .call_raw(Method::POST, path, None, Some(body), Auth::None)
            .await?;
        let token = raw.pointer("/data/token").and_then(Value::as_str);
        let stored = self.store_token(token)?;
        Ok((Envelope::from_body(raw), stored))
    }

    /// Store the token of a login-like response and report the new state.
    async fn sign_in<B>(&self, path: &str, body: &B) -> ApiResult<AuthOutcome<AuthPayload>>
    where
        B: Serialize + Sync,
    {
        let prior = self.state();
        let (envelope, stored) = self.post_issuing(path, body).await?;

        let state = if stored {
            prior.apply(&SessionEvent::LoggedIn)
        } else {
            tracing::warn!(path, "sign-in succeeded without a token");
            prior
        };
        Ok(AuthOutcome { envelope, state })
    }

    /// Create an account. Without a token in the response the account awaits
    /// email verification and any previously stored session is dropped.
    pub async fn register(&self, req: &RegisterRequest) -> ApiResult<AuthOutcome<AuthPayload>> {
        let prior = self.state();
        let (envelope, token_issued) = self.post_issuing("/auth/register", req).await?;
        if !token_issued && self.api.tokens().exists() {
            self.api.tokens().remove()?;
            tracing::info!("previous session cleared; new account awaits verification");
        }

        let state = prior.apply(&SessionEvent::Registered {
            email: req.email.clone(),
            token_issued,
        });
        Ok(AuthOutcome { envelope, state })
    }

    pub async fn login(&self, req: &LoginRequest) -> ApiResult<AuthOutcome<AuthPayload>> {
        self.sign_in("/auth/login", req).await
    }

    pub async fn google(&self, req: &GoogleAuthRequest) -> ApiResult<AuthOutcome<AuthPayload>> {
        self.sign_in("/auth/google", req).await
    }

    /// Confirm the emailed OTP. A token in the response logs the user in.
    pub async fn verify_email(
        &self,
        req: &VerifyEmailRequest,
    ) -> ApiResult<AuthOutcome<VerifyEmailPayload>> {
        let prior = if self.api.tokens().exists() {
            SessionState::Authenticated
        } else {
            SessionState::PendingVerification {
                email: req.email.clone(),
            }
        };
        let (envelope, token_issued) = self.post_issuing("/auth/verify-email", req).await?;

        let state = prior.apply(&SessionEvent::EmailVerified { token_issued });
        Ok(AuthOutcome { envelope, state })
    }

    pub async fn resend_otp(&self, email: impl Into<String>) -> ApiResult<Envelope<OtpResent>> {
        let body = EmailRequest { email: email.into() };
        self.api.post("/auth/resend-otp", Some(&body), Auth::None).await
    }

    /// The authenticated profile. A 401 clears the stored token.
    pub async fn me(&self) -> ApiResult<Envelope<User>> {
        match self.api.get("/auth/me", None, Auth::Required).await {
            Err(err) if ApiClient::is_token_rejection(&err) => {
                if let Err(store_err) = self.api.tokens().remove() {
                    tracing::warn!("failed to clear rejected token: {store_err}");
                }
                tracing::info!("stored token rejected by the backend; session cleared");
                Err(err)
            }
            other => other,
        }
    }

    pub async fn change_password(&self, req: &ChangePasswordRequest) -> ApiResult<Envelope<Value>> {
        self.api
            .post("/auth/change-password", Some(req), Auth::Required)
            .await
    }

    pub async fn forgot_password(&self, email: impl Into<String>) -> ApiResult<Envelope<EmailSent>> {
        let body = EmailRequest { email: email.into() };
        self.api
            .post("/auth/forgot-password", Some(&body), Auth::None)
            .await
    }

    pub async fn reset_password(&self, req: &ResetPasswordRequest) -> ApiResult<Envelope<Value>> {
        self.api
            .post("/auth/reset-password", Some(req), Auth::None)
            .await
    }

    /// Drop the local session. No network call is made.
    pub fn logout(&self) -> ApiResult<SessionState> {
        let prior = self.state();
        self.api.tokens().remove()?;
        Ok(prior.apply(&SessionEvent::LoggedOut))
    }
}

#[async_trait]
impl ProfileSource for AuthService {
    async fn fetch_profile(&self) -> ApiResult<User> {
        self.me().await?.into_data()
    }
}
