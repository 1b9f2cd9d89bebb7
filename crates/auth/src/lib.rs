//! Client-side authentication state for EventHub.
//!
//! Owns the bearer token slot and the unverified claims view over it, plus
//! the session and route-gate state machines. Nothing here performs I/O
//! beyond the token file.

pub mod claims;
pub mod gate;
pub mod roles;
pub mod session;
pub mod token;

pub use claims::{UnverifiedClaims, decode, role_of, subject_of};
pub use gate::{AuthorizationGate, DenyReason, GateDecision, GateState, Redirect};
pub use roles::Role;
pub use session::{SessionEvent, SessionState};
pub use token::{
    FileTokenRepository, InMemoryTokenRepository, TOKEN_KEY, TokenRepository, TokenStore,
    TokenStoreError, authorization_value, strip_bearer,
};
