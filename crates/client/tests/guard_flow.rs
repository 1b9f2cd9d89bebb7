mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Duration as ChronoDuration;
use serde_json::json;

use common::{TestServer, forged_jwt, mint_jwt};
use eventhub_auth::DenyReason;
use eventhub_client::models::User;
use eventhub_client::{
    ApiResult, GateDecision, GateState, ProfileSource, Redirect, RouteGuard, TokenStore,
};

/// Profile source that counts calls and never touches the network.
struct FixedProfile {
    role: &'static str,
    calls: AtomicUsize,
}

impl FixedProfile {
    fn new(role: &'static str) -> Arc<Self> {
        Arc::new(Self {
            role,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl ProfileSource for FixedProfile {
    async fn fetch_profile(&self) -> ApiResult<User> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(serde_json::from_value(json!({ "uid": "u1", "email": "a@b.c", "role": self.role })).unwrap())
    }
}

/// Profile source whose check never completes normally.
struct PanickingProfile;

#[async_trait]
impl ProfileSource for PanickingProfile {
    async fn fetch_profile(&self) -> ApiResult<User> {
        panic!("profile lookup crashed")
    }
}

fn store_with(role: &str, ttl: ChronoDuration) -> TokenStore {
    let tokens = TokenStore::in_memory();
    tokens.set(mint_jwt("u1", role, ttl)).unwrap();
    tokens
}

#[tokio::test]
async fn no_token_redirects_to_login_without_fetching() {
    let profile = FixedProfile::new("ADMIN");
    let guard = RouteGuard::admin(TokenStore::in_memory(), Arc::clone(&profile));

    let handle = guard.enter("/admin/events");
    assert_eq!(
        handle.initial(),
        &GateDecision::Redirect(Redirect::login("/admin/events"))
    );

    let (state, decision) = handle.settled().await;
    assert_eq!(state, GateState::Denied(DenyReason::MissingToken));
    assert!(!decision.is_render());
    assert_eq!(profile.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn expired_token_redirects_to_login() {
    let profile = FixedProfile::new("ADMIN");
    let guard = RouteGuard::admin(store_with("ADMIN", ChronoDuration::minutes(-5)), Arc::clone(&profile));

    let (state, _) = guard.enter("/admin").settled().await;
    assert_eq!(state, GateState::Denied(DenyReason::ExpiredToken));
    assert_eq!(profile.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn non_admin_token_is_sent_home() {
    let profile = FixedProfile::new("ADMIN");
    let guard = RouteGuard::admin(store_with("user", ChronoDuration::minutes(5)), Arc::clone(&profile));

    let handle = guard.enter("/admin");
    assert_eq!(handle.initial(), &GateDecision::Redirect(Redirect::home()));
    assert_eq!(handle.settled().await.0, GateState::Denied(DenyReason::RoleMismatch));
    assert_eq!(profile.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn matching_profile_confirms_optimistic_render() {
    let profile = FixedProfile::new("admin");
    let guard = RouteGuard::admin(store_with("ADMIN", ChronoDuration::minutes(5)), Arc::clone(&profile));

    let handle = guard.enter("/admin");
    assert!(handle.initial().is_render());

    let (state, decision) = handle.settled().await;
    assert_eq!(state, GateState::Confirmed);
    assert_eq!(decision, GateDecision::Render);
    assert_eq!(profile.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn demoted_profile_revokes_after_render() {
    let profile = FixedProfile::new("USER");
    let guard = RouteGuard::admin(store_with("ADMIN", ChronoDuration::minutes(5)), Arc::clone(&profile));

    let handle = guard.enter("/admin");
    assert!(handle.initial().is_render());
    let mut rx = handle.subscribe();

    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow(), GateDecision::Redirect(Redirect::home()));

    let (state, decision) = handle.settled().await;
    assert_eq!(state, GateState::Revoked);
    assert_eq!(decision, GateDecision::Redirect(Redirect::home()));
}

#[tokio::test]
async fn guard_over_live_backend_revokes_on_profile_role() {
    let srv = TestServer::spawn().await;
    srv.set_profile_role("USER");
    let client = srv.client(store_with("ADMIN", ChronoDuration::minutes(5)));
    let guard = RouteGuard::admin(client.tokens().clone(), Arc::new(client.auth()));

    let handle = guard.enter("/admin/users");
    assert!(handle.initial().is_render());
    assert_eq!(handle.settled().await.0, GateState::Revoked);
    assert_eq!(srv.hits("/api/auth/me"), 1);
}

#[tokio::test]
async fn failed_profile_fetch_fails_closed() {
    let srv = TestServer::spawn().await;
    let tokens = store_with("ADMIN", ChronoDuration::minutes(5));
    let client = srv.client(tokens.clone());
    let guard = RouteGuard::admin(tokens, Arc::new(client.auth()));

    srv.set_profile_role("ADMIN");
    let (state, _) = guard.enter("/admin").settled().await;
    assert_eq!(state, GateState::Confirmed);

    // Claims still say ADMIN, but the backend refuses the signature.
    client
        .tokens()
        .set(forged_jwt("u1", "ADMIN", ChronoDuration::minutes(5)))
        .unwrap();
    let handle = guard.enter("/admin");
    assert!(handle.initial().is_render());
    assert_eq!(handle.settled().await.0, GateState::Revoked);
    assert!(!client.tokens().exists());
}

#[tokio::test]
async fn crashed_profile_check_revokes_for_every_observer() {
    let guard = RouteGuard::admin(
        store_with("ADMIN", ChronoDuration::minutes(5)),
        Arc::new(PanickingProfile),
    );

    let handle = guard.enter("/admin");
    assert!(handle.initial().is_render());
    let mut rx = handle.subscribe();

    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow(), GateDecision::Redirect(Redirect::home()));
    assert_eq!(handle.current(), GateDecision::Redirect(Redirect::home()));

    let (state, decision) = handle.settled().await;
    assert_eq!(state, GateState::Revoked);
    assert_eq!(decision, GateDecision::Redirect(Redirect::home()));
}
