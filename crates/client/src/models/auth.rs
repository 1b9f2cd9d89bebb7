use serde::{Deserialize, Serialize};

use super::user::User;

/// `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /auth/verify-email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyEmailRequest {
    pub email: String,
    pub otp: String,
}

/// Body of `resend-otp` and `forgot-password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailRequest {
    pub email: String,
}

/// `POST /auth/google`. One of the three Google credentials is expected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GoogleAuthRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl GoogleAuthRequest {
    pub fn has_credential(&self) -> bool {
        self.id_token.is_some() || self.access_token.is_some() || self.google_id.is_some()
    }
}

/// `POST /auth/change-password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// `POST /auth/reset-password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}

/// `data` of register / login / google.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthPayload {
    pub user: User,
    #[serde(default)]
    pub token: Option<String>,
    /// Echoed OTP (development backends only).
    #[serde(default)]
    pub otp: Option<String>,
}

/// `data` of verify-email; some backends log the user in directly.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VerifyEmailPayload {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// `data` of resend-otp.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OtpResent {
    #[serde(default)]
    pub otp: Option<String>,
    #[serde(rename = "emailSent", alias = "email_sent", default)]
    pub email_sent: bool,
}

/// `data` of forgot-password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EmailSent {
    #[serde(rename = "emailSent", alias = "email_sent", default)]
    pub email_sent: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_payloads_are_camel_case() {
        let change = ChangePasswordRequest {
            old_password: "old".to_string(),
            new_password: "new".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&change).unwrap(),
            r#"{"oldPassword":"old","newPassword":"new"}"#
        );

        let reset = ResetPasswordRequest {
            email: "a@b.c".to_string(),
            otp: "123456".to_string(),
            new_password: "pw".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&reset).unwrap()["newPassword"],
            serde_json::json!("pw")
        );
    }

    #[test]
    fn google_request_omits_missing_credentials() {
        let req = GoogleAuthRequest {
            id_token: Some("idt".to_string()),
            email: "a@b.c".to_string(),
            ..Default::default()
        };
        assert!(req.has_credential());
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"id_token":"idt","email":"a@b.c"}"#
        );
    }

    #[test]
    fn register_payload_without_token_decodes() {
        let payload: AuthPayload = serde_json::from_str(
            r#"{"user":{"uid":"u1","email":"a@b.c","role":"USER"},"otp":"424242"}"#,
        )
        .unwrap();
        assert!(payload.token.is_none());
        assert_eq!(payload.otp.as_deref(), Some("424242"));
    }
}
