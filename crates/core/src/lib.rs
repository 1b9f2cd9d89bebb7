//! Identifiers and pagination shared by the EventHub crates.
//!
//! This crate contains **wire-independent** building blocks (no HTTP, no storage).

pub mod error;
pub mod id;
pub mod pagination;

pub use error::{CoreError, CoreResult};
pub use id::{CategoryUid, EventUid, MessageUid, TicketUid, TransactionUid, UserUid};
pub use pagination::{PageRequest, Pagination};
