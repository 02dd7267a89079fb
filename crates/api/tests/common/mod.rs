#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use enroll_api::config::ServerConfig;
use enroll_api::router::build_app_router;
use enroll_api::state::AppState;
use enroll_db::models::registration::{CreateRegistration, Registration};
use enroll_db::RegistrationStore;

// ---------------------------------------------------------------------------
// Stores
// ---------------------------------------------------------------------------

/// Keeps inserted registrations in memory and hands out sequential ids.
#[derive(Default)]
pub struct MemoryStore {
    next_id: AtomicI64,
    rows: Mutex<Vec<Registration>>,
}

impl MemoryStore {
    pub fn rows(&self) -> Vec<Registration> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl RegistrationStore for MemoryStore {
    async fn insert(&self, input: &CreateRegistration) -> Result<Registration, sqlx::Error> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let row = Registration::from_insert(id, chrono::Utc::now(), input);
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }
}

/// Rejects every insert, simulating an unreachable database.
#[derive(Default)]
pub struct FailingStore {
    attempts: AtomicI64,
}

impl FailingStore {
    pub fn attempts(&self) -> i64 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl RegistrationStore for FailingStore {
    async fn insert(&self, _input: &CreateRegistration) -> Result<Registration, sqlx::Error> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(sqlx::Error::Protocol(
            "connection to server at 10.0.0.5 refused".into(),
        ))
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }
}

/// Stores like [`MemoryStore`] but only answers after `delay`.
pub struct SlowStore {
    delay: Duration,
    inner: MemoryStore,
}

impl SlowStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            inner: MemoryStore::default(),
        }
    }

    pub fn rows(&self) -> Vec<Registration> {
        self.inner.rows()
    }
}

#[async_trait::async_trait]
impl RegistrationStore for SlowStore {
    async fn insert(&self, input: &CreateRegistration) -> Result<Registration, sqlx::Error> {
        let row = self.inner.insert(input).await?;
        tokio::time::sleep(self.delay).await;
        Ok(row)
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
    }
}

/// Build the full application router (same middleware as `main.rs`) over
/// the given store.
pub fn build_test_app(store: Arc<dyn RegistrationStore>) -> Router {
    build_app_router(AppState { store }, &test_config()).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: impl Into<String>) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a body with no `Content-Type` header at all.
pub async fn post_unlabelled(app: Router, uri: &str, body: impl Into<String>) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::from(body.into()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The smallest payload the intake handler accepts.
pub fn minimal_payload() -> serde_json::Value {
    serde_json::json!({
        "parentName": "A",
        "parentPhone": "555",
        "parentEmail": "a@b.com",
        "participantLegalName": "B",
        "participantDOB": "2010-01-01",
        "participantZip": "98001",
    })
}
