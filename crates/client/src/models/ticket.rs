use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use eventhub_core::{EventUid, TicketUid, UserUid};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TicketStatus {
    Valid,
    Used,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Valid => "VALID",
            TicketStatus::Used => "USED",
            TicketStatus::Cancelled => "CANCELLED",
            TicketStatus::Unknown => "UNKNOWN",
        }
    }
}

impl core::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub uid: TicketUid,
    #[serde(default)]
    pub event_uid: Option<EventUid>,
    #[serde(default)]
    pub user_uid: Option<UserUid>,
    #[serde(default)]
    pub ticket_code: Option<String>,
    #[serde(default)]
    pub status: Option<TicketStatus>,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub validated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Ticket {
    pub fn is_used(&self) -> bool {
        self.status == Some(TicketStatus::Used) || self.validated_at.is_some()
    }
}

/// `POST /tickets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateTicketRequest {
    pub event_uid: EventUid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_uid: Option<String>,
}
