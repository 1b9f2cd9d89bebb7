//! Error taxonomy for the HTTP client.
//!
//! Every call resolves through one channel, `Result<_, ApiError>`: transport
//! failures and non-2xx responses both land here.

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use eventhub_auth::TokenStoreError;

use crate::envelope::EnvelopeStatus;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response, normalized into the envelope shape.
    #[error("{}", .0.message)]
    Status(ErrorEnvelope),

    #[error("response carried no data")]
    MissingData,

    #[error("failed to encode request body: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid base url: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    TokenStore(#[from] TokenStoreError),
}

impl ApiError {
    pub fn envelope(&self) -> Option<&ErrorEnvelope> {
        match self {
            ApiError::Status(envelope) => Some(envelope),
            _ => None,
        }
    }

    /// HTTP status of a rejected response.
    pub fn status_code(&self) -> Option<u16> {
        self.envelope().map(|e| e.status_code)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Transport(_) => ErrorKind::Transport,
            ApiError::Status(envelope) => envelope.kind(),
            ApiError::MissingData
            | ApiError::Serialize(_)
            | ApiError::InvalidUrl(_)
            | ApiError::TokenStore(_) => ErrorKind::Other,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind() == ErrorKind::Unauthorized
    }
}

/// Coarse classification for call sites choosing a user-facing reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Transport,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    Validation,
    EmailNotVerified,
    Server,
    Other,
}

impl ErrorKind {
    fn from_code(code: &str) -> Option<Self> {
        let kind = match code.trim().to_ascii_uppercase().as_str() {
            "EMAIL_NOT_VERIFIED" => ErrorKind::EmailNotVerified,
            "UNAUTHORIZED" | "INVALID_TOKEN" | "TOKEN_EXPIRED" => ErrorKind::Unauthorized,
            "FORBIDDEN" => ErrorKind::Forbidden,
            "NOT_FOUND" => ErrorKind::NotFound,
            "CONFLICT" | "ALREADY_EXISTS" => ErrorKind::Conflict,
            "VALIDATION_ERROR" | "BAD_REQUEST" => ErrorKind::Validation,
            _ => return None,
        };
        Some(kind)
    }

    fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => ErrorKind::Validation,
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            500..=599 => ErrorKind::Server,
            _ => ErrorKind::Other,
        }
    }
}

/// Envelope-shaped body of a rejected request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorEnvelope {
    pub status: EnvelopeStatus,
    pub message: String,
    pub error: String,
    /// Structured error code, when the backend sends one.
    pub code: Option<String>,
    pub status_code: u16,
}

impl ErrorEnvelope {
    /// Build from a decoded error body.
    ///
    /// Message precedence: field-level `errors` (joined with `, `), `details`,
    /// `message`, `error`, then `Error <status>: <reason>`.
    pub fn from_response(status: StatusCode, body: &Value) -> Self {
        let message = field_errors(body)
            .or_else(|| non_empty_text(body.get("details")))
            .or_else(|| non_empty_str(body.get("message")))
            .or_else(|| non_empty_str(body.get("error")))
            .unwrap_or_else(|| {
                format!(
                    "Error {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown Status")
                )
            });

        let error = non_empty_str(body.get("error")).unwrap_or_else(|| message.clone());
        let code = non_empty_str(body.get("code")).or_else(|| non_empty_str(body.get("error_code")));

        Self {
            status: EnvelopeStatus::Error,
            message,
            error,
            code,
            status_code: status.as_u16(),
        }
    }

    /// Structured code first, then the status code.
    ///
    /// Backends that emit no code still signal unverified accounts only
    /// through message text, so that substring is honoured as a last resort.
    pub fn kind(&self) -> ErrorKind {
        if let Some(kind) = self.code.as_deref().and_then(ErrorKind::from_code) {
            return kind;
        }
        if self.code.is_none() && self.message.to_ascii_lowercase().contains("not verified") {
            return ErrorKind::EmailNotVerified;
        }
        ErrorKind::from_status(self.status_code)
    }
}

fn field_errors(body: &Value) -> Option<String> {
    let errors = body.get("errors")?.as_array()?;
    let parts: Vec<String> = errors
        .iter()
        .filter_map(|entry| match entry {
            Value::String(s) => Some(s.clone()),
            Value::Object(obj) => obj
                .get("message")
                .or_else(|| obj.get("msg"))
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect();

    (!parts.is_empty()).then(|| parts.join(", "))
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn non_empty_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
