//! Client-observed authentication lifecycle.
//!
//! ```text
//! ANONYMOUS --login / register(token)--> AUTHENTICATED
//! ANONYMOUS --register(no token)-------> PENDING_VERIFICATION
//! PENDING_VERIFICATION --verify-email--> ANONYMOUS | AUTHENTICATED (token returned)
//! AUTHENTICATED --logout / token rejected--> ANONYMOUS
//! ```

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    Anonymous,
    /// Registered but waiting for the emailed OTP.
    PendingVerification { email: String },
    Authenticated,
}

/// Outcome of an auth call, as seen by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn,
    Registered { email: String, token_issued: bool },
    EmailVerified { token_issued: bool },
    LoggedOut,
    /// The backend refused the stored token (401 / expired).
    TokenRejected,
}

impl SessionState {
    /// Initial state for a client whose slot does (or does not) hold a token.
    pub fn from_token_present(present: bool) -> Self {
        if present {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    pub fn apply(self, event: &SessionEvent) -> SessionState {
        let next = match (self, event) {
            (_, SessionEvent::LoggedIn) => SessionState::Authenticated,
            (_, SessionEvent::Registered { token_issued: true, .. }) => SessionState::Authenticated,
            (_, SessionEvent::Registered { email, token_issued: false }) => {
                SessionState::PendingVerification {
                    email: email.clone(),
                }
            }
            (_, SessionEvent::EmailVerified { token_issued: true }) => SessionState::Authenticated,
            (SessionState::PendingVerification { .. }, SessionEvent::EmailVerified { .. }) => {
                SessionState::Anonymous
            }
            (state, SessionEvent::EmailVerified { .. }) => state,
            (_, SessionEvent::LoggedOut | SessionEvent::TokenRejected) => SessionState::Anonymous,
        };
        tracing::info!(?event, state = ?next, "session transition");
        next
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated)
    }
}
