//! Typed HTTP client for the EventHub REST backend.
//!
//! [`ApiClient`] owns the transport, configuration and token slot; the
//! per-resource services in [`services`] are thin views over it.

pub mod config;
pub mod envelope;
pub mod error;
pub mod guard;
pub mod http;
pub mod models;
pub mod query;
pub mod resource;
pub mod services;

pub use config::{API_PREFIX, BASE_URL_ENV, ClientConfig, DEFAULT_BASE_URL};
pub use envelope::{Envelope, EnvelopeStatus};
pub use error::{ApiError, ApiResult, ErrorEnvelope, ErrorKind};
pub use guard::{GuardHandle, ProfileSource, RouteGuard};
pub use http::{ApiClient, Auth};
pub use query::Query;
pub use resource::ResourceClient;

pub use eventhub_auth::{
    GateDecision, GateState, Redirect, Role, SessionState, TokenStore, UnverifiedClaims,
};
pub use eventhub_core::{PageRequest, Pagination};
