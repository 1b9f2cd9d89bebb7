use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use eventhub_core::{EventUid, TransactionUid, UserUid};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Completed => "COMPLETED",
            TransactionStatus::Failed => "FAILED",
            TransactionStatus::Refunded => "REFUNDED",
            TransactionStatus::Cancelled => "CANCELLED",
            TransactionStatus::Unknown => "UNKNOWN",
        }
    }

    /// Terminal statuses no longer change.
    pub fn is_final(&self) -> bool {
        !matches!(self, TransactionStatus::Pending | TransactionStatus::Unknown)
    }
}

impl core::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub uid: TransactionUid,
    #[serde(default)]
    pub user_uid: Option<UserUid>,
    #[serde(default)]
    pub event_uid: Option<EventUid>,
    pub amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
    pub status: TransactionStatus,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// `POST /transactions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTransactionRequest {
    pub event_uid: EventUid,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

/// `PUT /transactions/:uid/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateTransactionStatusRequest {
    pub status: TransactionStatus,
}
