//! Async driver for [`AuthorizationGate`].
//!
//! The token check answers immediately; the profile check runs on a spawned
//! task and may later replace an optimistic `Render` with a redirect.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use eventhub_auth::{AuthorizationGate, GateDecision, GateState, Redirect, Role, TokenStore};

use crate::error::ApiResult;
use crate::models::User;

/// Source of the canonical (server-side) user profile.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_profile(&self) -> ApiResult<User>;
}

/// Guards the routes that need `required`.
pub struct RouteGuard<P> {
    tokens: TokenStore,
    profiles: Arc<P>,
    required: Role,
}

impl<P> Clone for RouteGuard<P> {
    fn clone(&self) -> Self {
        Self {
            tokens: self.tokens.clone(),
            profiles: Arc::clone(&self.profiles),
            required: self.required,
        }
    }
}

impl<P> RouteGuard<P>
where
    P: ProfileSource + 'static,
{
    pub fn new(tokens: TokenStore, profiles: Arc<P>, required: Role) -> Self {
        Self {
            tokens,
            profiles,
            required,
        }
    }

    pub fn admin(tokens: TokenStore, profiles: Arc<P>) -> Self {
        Self::new(tokens, profiles, Role::Admin)
    }

    pub fn required(&self) -> Role {
        self.required
    }

    /// Evaluate navigation to `destination`.
    ///
    /// Must be called inside a Tokio runtime. The profile is fetched only
    /// after an optimistic allow.
    pub fn enter(&self, destination: impl Into<String>) -> GuardHandle {
        let mut gate = AuthorizationGate::new(self.required, destination);
        let claims = self.tokens.claims();
        let initial = gate.check_token(claims.as_ref(), Utc::now());
        let (tx, rx) = watch::channel(initial.clone());

        if !gate.awaiting_confirmation() {
            return GuardHandle {
                initial,
                rx,
                state: gate.state(),
                task: None,
            };
        }

        let profiles = Arc::clone(&self.profiles);
        let task = tokio::spawn(async move {
            let mut publisher = FailClosed::new(tx);
            let canonical = match profiles.fetch_profile().await {
                Ok(user) => user.role(),
                Err(err) => {
                    tracing::warn!("profile check failed: {err}");
                    None
                }
            };
            publisher.publish(gate.confirm(canonical));
            gate.state()
        });

        GuardHandle {
            initial,
            rx,
            state: GateState::OptimisticAllow,
            task: Some(task),
        }
    }
}

/// Sender for the confirmation task.
///
/// Dropped without a published decision (the check panicked or was
/// cancelled), it publishes a redirect away so observers never keep a
/// stale `Render`.
struct FailClosed {
    tx: watch::Sender<GateDecision>,
    published: bool,
}

impl FailClosed {
    fn new(tx: watch::Sender<GateDecision>) -> Self {
        Self {
            tx,
            published: false,
        }
    }

    fn publish(&mut self, decision: GateDecision) {
        self.published = true;
        self.tx.send_if_modified(|current| {
            let changed = *current != decision;
            *current = decision;
            changed
        });
    }
}

impl Drop for FailClosed {
    fn drop(&mut self) {
        if !self.published {
            tracing::warn!("profile check aborted; revoking optimistic render");
            self.tx.send_replace(GateDecision::Redirect(Redirect::home()));
        }
    }
}

/// Result of one [`RouteGuard::enter`].
#[derive(Debug)]
pub struct GuardHandle {
    initial: GateDecision,
    rx: watch::Receiver<GateDecision>,
    state: GateState,
    task: Option<JoinHandle<GateState>>,
}

impl GuardHandle {
    /// Decision from the token alone.
    pub fn initial(&self) -> &GateDecision {
        &self.initial
    }

    /// Latest decision published so far.
    pub fn current(&self) -> GateDecision {
        self.rx.borrow().clone()
    }

    /// Receiver that observes a later revocation.
    pub fn subscribe(&self) -> watch::Receiver<GateDecision> {
        self.rx.clone()
    }

    /// Wait for the profile check, if any, and return the final state.
    ///
    /// A panicked or cancelled check counts as revoked.
    pub async fn settled(self) -> (GateState, GateDecision) {
        let state = match self.task {
            None => self.state,
            Some(task) => task.await.unwrap_or_else(|err| {
                tracing::warn!("profile check task did not complete: {err}");
                GateState::Revoked
            }),
        };
        let decision = match state {
            GateState::Revoked => GateDecision::Redirect(Redirect::home()),
            _ => self.rx.borrow().clone(),
        };
        (state, decision)
    }
}
