//! Strongly-typed identifiers for backend resources.
//!
//! The backend addresses every resource by an opaque string `uid`. Identifiers
//! are embedded verbatim in request paths, so parsing rejects anything that
//! would change the path shape.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Identifier of an event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventUid(String);

/// Identifier of an event category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryUid(String);

/// Identifier of a user account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserUid(String);

/// Identifier of an issued ticket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketUid(String);

/// Identifier of a payment transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionUid(String);

/// Identifier of a contact message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageUid(String);

/// Returns `true` when `raw` can be used as a single path segment.
fn is_path_safe(raw: &str) -> bool {
    !raw.is_empty()
        && !raw
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '%'))
}

macro_rules! impl_uid_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Parse and validate an identifier.
            pub fn parse(raw: impl AsRef<str>) -> Result<Self, CoreError> {
                raw.as_ref().parse()
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if !is_path_safe(s) {
                    return Err(CoreError::invalid_id(format!(
                        "{}: {:?} is not a valid path segment",
                        $name, s
                    )));
                }
                Ok(Self(s.to_string()))
            }
        }
    };
}

impl_uid_newtype!(EventUid, "EventUid");
impl_uid_newtype!(CategoryUid, "CategoryUid");
impl_uid_newtype!(UserUid, "UserUid");
impl_uid_newtype!(TicketUid, "TicketUid");
impl_uid_newtype!(TransactionUid, "TransactionUid");
impl_uid_newtype!(MessageUid, "MessageUid");
