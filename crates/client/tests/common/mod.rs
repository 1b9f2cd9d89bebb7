//! Scripted backend for black-box client tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::{Path, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Value, json};

use eventhub_client::{ApiClient, ClientConfig, TokenStore};

pub const JWT_SECRET: &str = "test-secret";

/// One request as the backend saw it.
#[derive(Debug, Clone)]
pub struct Seen {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Debug, Default)]
struct Backend {
    seen: Mutex<Vec<Seen>>,
    profile_role: Mutex<String>,
}

pub struct TestServer {
    pub base_url: String,
    backend: Arc<Backend>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn() -> Self {
        let backend = Arc::new(Backend {
            profile_role: Mutex::new("ADMIN".to_string()),
            ..Backend::default()
        });
        let app = router(Arc::clone(&backend));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{addr}");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            backend,
            handle,
        }
    }

    pub fn client(&self, tokens: TokenStore) -> ApiClient {
        ApiClient::new(ClientConfig::new(&self.base_url).unwrap(), tokens).unwrap()
    }

    /// Role the `/auth/me` profile reports from now on.
    pub fn set_profile_role(&self, role: &str) {
        *self.backend.profile_role.lock().unwrap() = role.to_string();
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.backend.seen.lock().unwrap().clone()
    }

    pub fn last(&self) -> Seen {
        self.seen().pop().expect("no request reached the backend")
    }

    pub fn hits(&self, path: &str) -> usize {
        self.seen().iter().filter(|s| s.path == path).count()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn mint_jwt(subject: &str, role: &str, ttl: ChronoDuration) -> String {
    sign_jwt(JWT_SECRET, subject, role, ttl)
}

/// Well-formed token the backend will refuse.
pub fn forged_jwt(subject: &str, role: &str, ttl: ChronoDuration) -> String {
    sign_jwt("not-the-secret", subject, role, ttl)
}

fn sign_jwt(secret: &str, subject: &str, role: &str, ttl: ChronoDuration) -> String {
    let now = Utc::now();
    let claims = json!({
        "sub": subject,
        "role": role,
        "iat": now.timestamp(),
        "exp": (now + ttl).timestamp(),
    });
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("failed to encode jwt")
}

/// A port that refuses connections.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn router(backend: Arc<Backend>) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
        .route("/api/events", get(list_events))
        .route("/api/events/:uid", get(get_event).delete(delete_event))
        .route(
            "/api/events/:uid/favorite",
            post(|| async { Json(json!({ "status": "success", "message": "added" })) }),
        )
        .route("/api/events/:uid/favorite/check", get(check_favorite))
        .route("/api/categories", post(reject_category))
        .route("/api/dashboard", get(broken_dashboard))
        .route("/api/contact", post(submit_contact))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/google", post(google))
        .route("/api/auth/verify-email", post(verify_email))
        .route("/api/auth/me", get(me))
        .layer(middleware::from_fn_with_state(Arc::clone(&backend), record))
        .with_state(backend)
}

async fn record(State(backend): State<Arc<Backend>>, req: Request, next: Next) -> Response {
    let seen = {
        let headers = req.headers();
        let header_str = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        Seen {
            method: req.method().to_string(),
            path: req.uri().path().to_string(),
            query: req.uri().query().map(str::to_string),
            authorization: header_str(header::AUTHORIZATION),
            content_type: header_str(header::CONTENT_TYPE),
        }
    };
    backend.seen.lock().unwrap().push(seen);
    next.run(req).await
}

async fn list_events() -> Json<Value> {
    Json(json!({
        "status": "success",
        "data": [
            { "uid": "e1", "title": "Jazz night", "price": 0 },
            { "uid": "e2", "title": "Rust meetup", "price": 12.5 },
        ],
        "pagination": { "page": 2, "limit": 2, "total": 5, "totalPages": 3 },
    }))
}

async fn get_event(Path(uid): Path<String>) -> Response {
    if uid == "missing" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "status": "error", "message": "Event not found" })),
        )
            .into_response();
    }
    Json(json!({ "status": "success", "data": { "uid": uid, "title": "Jazz night" } }))
        .into_response()
}

async fn delete_event() -> Json<Value> {
    Json(json!({ "status": "success", "message": "deleted" }))
}

async fn check_favorite(Path(uid): Path<String>) -> Json<Value> {
    Json(json!({ "status": "success", "data": { "isFavorite": uid.starts_with("fav") } }))
}

async fn reject_category() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "status": "error",
            "errors": [{ "message": "a" }, { "message": "b" }],
            "message": "ignored",
        })),
    )
        .into_response()
}

async fn broken_dashboard() -> Response {
    ([(header::CONTENT_TYPE, "application/json")], "{not json").into_response()
}

async fn submit_contact() -> Json<Value> {
    Json(json!({
        "status": "success",
        "data": { "uid": "m1", "name": "Ada", "email": "ada@example.com", "message": "hi" },
    }))
}

async fn register(Json(body): Json<Value>) -> Json<Value> {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    let user = json!({ "uid": "u1", "email": email, "role": "USER" });
    if email.starts_with("instant") {
        let token = mint_jwt("u1", "USER", ChronoDuration::minutes(10));
        Json(json!({ "status": "success", "data": { "user": user, "token": token } }))
    } else {
        Json(json!({ "status": "success", "message": "check your inbox", "data": { "user": user, "otp": "123456" } }))
    }
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] != "hunter22" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "status": "error", "message": "Invalid credentials" })),
        )
            .into_response();
    }
    let role = if body["email"] == "admin@example.com" { "ADMIN" } else { "USER" };
    let token = mint_jwt("u1", role, ChronoDuration::minutes(10));
    Json(json!({
        "status": "success",
        "data": { "token": token, "user": { "uid": "u1", "email": body["email"], "role": role } },
    }))
    .into_response()
}

/// Issues a token alongside a profile whose `is_verified` is `null`.
async fn google() -> Json<Value> {
    let token = mint_jwt("g1", "USER", ChronoDuration::minutes(10));
    Json(json!({
        "status": "success",
        "data": {
            "token": token,
            "user": { "uid": "g1", "email": "g@example.com", "role": "USER", "is_verified": null },
        },
    }))
}

/// OTP `000000` logs the user in directly; `123456` only verifies.
async fn verify_email(Json(body): Json<Value>) -> Response {
    match body["otp"].as_str() {
        Some("123456") => Json(json!({ "status": "success", "message": "Email verified" })).into_response(),
        Some("000000") => {
            let token = mint_jwt("u1", "USER", ChronoDuration::minutes(10));
            Json(json!({ "status": "success", "data": { "token": token } })).into_response()
        }
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "status": "error", "message": "Invalid OTP", "code": "INVALID_OTP" })),
        )
            .into_response(),
    }
}

async fn me(State(backend): State<Arc<Backend>>, headers: HeaderMap) -> Response {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|token| {
            jsonwebtoken::decode::<Value>(
                token,
                &DecodingKey::from_secret(JWT_SECRET.as_bytes()),
                &Validation::default(),
            )
            .is_ok()
        });
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "status": "error", "message": "Unauthorized" })),
        )
            .into_response();
    }
    let role = backend.profile_role.lock().unwrap().clone();
    Json(json!({
        "status": "success",
        "data": { "uid": "u1", "email": "ada@example.com", "role": role },
    }))
    .into_response()
}
