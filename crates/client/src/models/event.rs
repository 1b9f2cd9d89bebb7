use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use eventhub_core::{CategoryUid, EventUid};

use super::category::Category;
use super::user::User;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub uid: EventUid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category_uid: Option<CategoryUid>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub registered_count: Option<u32>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub is_free: Option<bool>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Event {
    /// Explicit `is_free`, otherwise a missing or zero price.
    pub fn is_free(&self) -> bool {
        self.is_free
            .unwrap_or_else(|| self.price.is_none_or(|p| p <= 0.0))
    }

    pub fn seats_left(&self) -> Option<u32> {
        let capacity = self.capacity?;
        Some(capacity.saturating_sub(self.registered_count.unwrap_or(0)))
    }
}

/// Create / update payload. Only present fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_uid: Option<CategoryUid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RegistrationStatus {
    Registered,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Registered => "REGISTERED",
            RegistrationStatus::Cancelled => "CANCELLED",
            RegistrationStatus::Unknown => "UNKNOWN",
        }
    }
}

impl core::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One attendee's registration to a free event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub uid: String,
    pub status: RegistrationStatus,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub registered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cancelled_at: Option<DateTime<Utc>>,
}

/// `data` of `GET /events/:uid/registrations`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventRegistrations {
    pub event: Event,
    #[serde(default)]
    pub registrations: Vec<Registration>,
}

/// `data` of `GET /events/:uid/register-free/check`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegistrationCheck {
    #[serde(alias = "isRegistered", alias = "is_registered")]
    pub registered: bool,
    #[serde(default)]
    pub registration: Option<Registration>,
}

/// `data` of `GET /events/:uid/favorite/check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FavoriteCheck {
    #[serde(alias = "isFavorite", alias = "favorited", alias = "is_favorite")]
    pub favorite: bool,
}
