//! Optimistic, two-phase route gate for privileged views.
//!
//! ```text
//! PENDING_TOKEN_CHECK --no/expired token--> DENIED (redirect to login)
//! PENDING_TOKEN_CHECK --claim != required--> DENIED (redirect away)
//! PENDING_TOKEN_CHECK --claim == required--> OPTIMISTIC_ALLOW (render)
//! OPTIMISTIC_ALLOW --profile role == required--> CONFIRMED
//! OPTIMISTIC_ALLOW --profile role != required / fetch failed--> REVOKED (redirect away)
//! ```
//!
//! Only the profile-confirmation step uses trusted input. The token claim just
//! decides whether the privileged view may paint before the profile arrives.

use chrono::{DateTime, Utc};
use serde::Serialize;
use url::form_urlencoded;

use crate::claims::UnverifiedClaims;
use crate::roles::Role;

/// Login entry point used for unauthenticated redirects.
pub const LOGIN_PATH: &str = "/login";
/// Landing page for authenticated users without the privileged role.
pub const HOME_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    MissingToken,
    ExpiredToken,
    RoleMismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateState {
    PendingTokenCheck,
    OptimisticAllow,
    Confirmed,
    Revoked,
    Denied(DenyReason),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Redirect {
    /// Send the user to log in, then back to `return_to`.
    Login { return_to: String },
    /// Leave the privileged area.
    Away { to: String },
}

impl Redirect {
    pub fn login(return_to: impl Into<String>) -> Self {
        Redirect::Login {
            return_to: return_to.into(),
        }
    }

    pub fn home() -> Self {
        Redirect::Away {
            to: HOME_PATH.to_string(),
        }
    }

    /// The path the router should navigate to.
    pub fn target(&self) -> String {
        match self {
            Redirect::Login { return_to } => {
                let encoded: String = form_urlencoded::byte_serialize(return_to.as_bytes()).collect();
                format!("{LOGIN_PATH}?redirect={encoded}")
            }
            Redirect::Away { to } => to.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GateDecision {
    Render,
    Redirect(Redirect),
}

impl GateDecision {
    pub fn is_render(&self) -> bool {
        matches!(self, GateDecision::Render)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationGate {
    required: Role,
    destination: String,
    state: GateState,
}

impl AuthorizationGate {
    pub fn new(required: Role, destination: impl Into<String>) -> Self {
        Self {
            required,
            destination: destination.into(),
            state: GateState::PendingTokenCheck,
        }
    }

    pub fn required(&self) -> Role {
        self.required
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Whether a profile fetch is still owed before the decision is final.
    pub fn awaiting_confirmation(&self) -> bool {
        self.state == GateState::OptimisticAllow
    }

    /// Phase one: synchronous decision from unverified token claims.
    ///
    /// Calling this outside `PENDING_TOKEN_CHECK` leaves the state untouched.
    pub fn check_token(
        &mut self,
        claims: Option<&UnverifiedClaims>,
        now: DateTime<Utc>,
    ) -> GateDecision {
        if self.state != GateState::PendingTokenCheck {
            return self.decision();
        }

        self.state = match claims {
            None => GateState::Denied(DenyReason::MissingToken),
            Some(claims) if claims.is_expired(now) => GateState::Denied(DenyReason::ExpiredToken),
            Some(claims) if claims.normalized_role() == Some(self.required) => {
                GateState::OptimisticAllow
            }
            Some(_) => GateState::Denied(DenyReason::RoleMismatch),
        };
        tracing::debug!(destination = %self.destination, state = ?self.state, "gate token check");
        self.decision()
    }

    /// Phase two: the canonical profile role, or `None` if it could not be
    /// fetched. Only meaningful after an optimistic allow.
    pub fn confirm(&mut self, canonical_role: Option<Role>) -> GateDecision {
        if self.state != GateState::OptimisticAllow {
            return self.decision();
        }

        self.state = if canonical_role == Some(self.required) {
            GateState::Confirmed
        } else {
            tracing::warn!(
                destination = %self.destination,
                required = %self.required,
                canonical = ?canonical_role,
                "privileged access revoked after profile check"
            );
            GateState::Revoked
        };
        self.decision()
    }

    /// Decision implied by the current state.
    pub fn decision(&self) -> GateDecision {
        match self.state {
            GateState::PendingTokenCheck
            | GateState::Denied(DenyReason::MissingToken | DenyReason::ExpiredToken) => {
                GateDecision::Redirect(Redirect::login(self.destination.clone()))
            }
            GateState::OptimisticAllow | GateState::Confirmed => GateDecision::Render,
            GateState::Revoked | GateState::Denied(DenyReason::RoleMismatch) => {
                GateDecision::Redirect(Redirect::home())
            }
        }
    }
}
