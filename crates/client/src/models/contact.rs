use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use eventhub_core::MessageUid;

/// Message left through the public contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub uid: MessageUid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub reply_message: Option<String>,
    #[serde(default)]
    pub replied_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ContactMessage {
    pub fn is_replied(&self) -> bool {
        self.reply_message.is_some()
    }
}

/// `POST /contact` (public).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
}

/// `POST /contact/:uid/reply`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyRequest {
    pub reply_message: String,
}
