//! Fixed role enumeration carried by tokens and user profiles.

use serde::{Deserialize, Serialize};

/// Account role as issued by the backend.
///
/// The wire form is the upper-case literal (`"ADMIN"`). Tokens carry the role
/// as a raw string; use [`Role::parse`] to normalise it before comparing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
    Moderator,
    Organizer,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::User, Role::Admin, Role::Moderator, Role::Organizer];

    /// Normalise a role string (trimmed, case-insensitive).
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(raw))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
            Role::Moderator => "MODERATOR",
            Role::Organizer => "ORGANIZER",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
