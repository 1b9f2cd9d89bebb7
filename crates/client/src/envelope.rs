//! Normalized response shape: `{status, message?, data?, error?, pagination?}`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use eventhub_core::Pagination;

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// `None` when the backend body carried no recognizable status.
    #[serde(default)]
    pub status: Option<EnvelopeStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Envelope fields that do not depend on the payload type.
#[derive(Debug, Default, Deserialize)]
struct EnvelopeMeta {
    #[serde(default)]
    status: Option<EnvelopeStatus>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    pagination: Option<Pagination>,
}

impl<T> Default for Envelope<T> {
    fn default() -> Self {
        Self {
            status: None,
            message: None,
            data: None,
            error: None,
            pagination: None,
        }
    }
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Interpret a decoded 2xx body.
    ///
    /// A body whose `data` does not match `T` (or that is not an object at
    /// all) still resolves, with `data: None`. The mismatch is logged.
    pub fn from_body(body: Value) -> Self {
        match Envelope::<T>::deserialize(&body) {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::warn!(
                    target_type = std::any::type_name::<T>(),
                    "response body does not match the expected envelope: {err}"
                );
                let meta = EnvelopeMeta::deserialize(&body).unwrap_or_default();
                Envelope {
                    status: meta.status,
                    message: meta.message,
                    data: None,
                    error: meta.error,
                    pagination: meta.pagination,
                }
            }
        }
    }
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: Some(EnvelopeStatus::Success),
            data: Some(data),
            ..Self::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Some(EnvelopeStatus::Success)
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> ApiResult<T> {
        self.data.ok_or(ApiError::MissingData)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            status: self.status,
            message: self.message,
            data: self.data.map(f),
            error: self.error,
            pagination: self.pagination,
        }
    }
}
