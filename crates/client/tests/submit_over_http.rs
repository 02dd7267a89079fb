//! End-to-end tests: `RegistrationForm` submitting through
//! `HttpRegistrationApi` to a live intake server on a loopback port.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use axum::routing::post;
use axum::Router;
use enroll_api::config::ServerConfig;
use enroll_api::router::build_app_router;
use enroll_api::state::AppState;
use enroll_client::form::SUCCESS_MESSAGE;
use enroll_client::{
    HttpRegistrationApi, Notification, RegistrationForm, SubmitError, SubmitOutcome,
};
use enroll_core::registration::{DraftField, RegistrationDraft};
use enroll_db::models::registration::{CreateRegistration, Registration};
use enroll_db::RegistrationStore;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MemoryStore {
    next_id: AtomicI64,
    rows: Mutex<Vec<Registration>>,
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

struct BrokenStore;

#[async_trait::async_trait]
impl RegistrationStore for BrokenStore {
    async fn insert(&self, _input: &CreateRegistration) -> Result<Registration, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }
}

/// Serve the intake router on an ephemeral loopback port; returns its base URL.
async fn spawn_server(store: Arc<dyn RegistrationStore>) -> String {
    let config = ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".into()],
    };
    serve(build_app_router(AppState { store }, &config).unwrap()).await
}

/// A stand-in intake endpoint that answers 200 with a plain-text body.
async fn spawn_plain_text_server() -> String {
    let app = Router::new().route("/api/register", post(|| async { "OK" }));
    serve(app).await
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn fill_required(form: &mut RegistrationForm) {
    form.set_field(DraftField::ParentName, "A");
    form.set_field(DraftField::ParentPhone, "555");
    form.set_field(DraftField::ParentEmail, "a@b.com");
    form.set_field(DraftField::ParticipantLegalName, "B");
    form.set_field(DraftField::ParticipantDob, "2010-01-01");
    form.set_field(DraftField::ParticipantZip, "98001");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn accepted_submission_resets_form() {
    let store = Arc::new(MemoryStore::default());
    let api = HttpRegistrationApi::new(&spawn_server(store.clone()).await);

    let mut form = RegistrationForm::new();
    fill_required(&mut form);
    form.set_terms_accepted(true);

    let outcome = form.submit(&api).await;
    let receipt = assert_matches!(outcome, SubmitOutcome::Accepted(r) => r);
    assert_eq!(receipt.registration_id, Some(1));
    assert_eq!(receipt.message, "Registration submitted successfully");

    assert_eq!(form.draft(), &RegistrationDraft::default());
    assert!(!form.terms_accepted());
    assert_eq!(
        form.notification(),
        Some(&Notification::Success(SUCCESS_MESSAGE.to_string()))
    );

    let rows = store.rows.lock().unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].parent_second_phone.is_none());
}

#[tokio::test]
async fn missing_field_message_reaches_the_notification() {
    let store = Arc::new(MemoryStore::default());
    let api = HttpRegistrationApi::new(&spawn_server(store.clone()).await);

    let mut form = RegistrationForm::new();
    fill_required(&mut form);
    form.set_field(DraftField::ParentEmail, "");
    form.set_terms_accepted(true);

    let outcome = form.submit(&api).await;
    assert_matches!(
        outcome,
        SubmitOutcome::Failed(SubmitError::Rejected { status: 400, .. })
    );
    assert_eq!(
        form.notification().map(Notification::message),
        Some("There was an error submitting your registration: Missing required field: parentEmail")
    );
    assert!(form.terms_accepted());
    assert!(store.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn storage_failure_keeps_draft_and_terms() {
    let api = HttpRegistrationApi::new(&spawn_server(Arc::new(BrokenStore)).await);

    let mut form = RegistrationForm::new();
    fill_required(&mut form);
    form.set_terms_accepted(true);
    let before = form.draft().clone();

    let outcome = form.submit(&api).await;
    assert_matches!(
        outcome,
        SubmitOutcome::Failed(SubmitError::Rejected { status: 500, .. })
    );
    assert_eq!(form.draft(), &before);
    assert!(form.terms_accepted());
    assert_eq!(
        form.notification().map(Notification::message),
        Some("There was an error submitting your registration: Failed to save registration")
    );
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // Bind then drop a listener so the port is known to be closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = HttpRegistrationApi::new(&format!("http://{addr}"));
    let mut form = RegistrationForm::new();
    fill_required(&mut form);
    form.set_terms_accepted(true);
    let before = form.draft().clone();

    let outcome = form.submit(&api).await;
    assert_matches!(outcome, SubmitOutcome::Failed(SubmitError::Transport(_)));
    assert_eq!(form.draft(), &before);
    assert_eq!(
        form.notification().map(Notification::message),
        Some("There was an error submitting your registration: Please try again.")
    );
}

#[tokio::test]
async fn unreadable_success_response_is_a_failure() {
    let api = HttpRegistrationApi::new(&spawn_plain_text_server().await);

    let mut form = RegistrationForm::new();
    fill_required(&mut form);
    form.set_terms_accepted(true);
    let before = form.draft().clone();

    let outcome = form.submit(&api).await;
    assert_matches!(
        outcome,
        SubmitOutcome::Failed(SubmitError::UnexpectedBody { status: 200 })
    );
    assert_eq!(form.draft(), &before);
    assert!(form.terms_accepted());
    assert_eq!(
        form.notification().map(Notification::message),
        Some("There was an error submitting your registration: Failed to submit registration")
    );
}

#[tokio::test]
async fn class_preferences_are_filtered_server_side() {
    let store = Arc::new(MemoryStore::default());
    let api = HttpRegistrationApi::new(&spawn_server(store.clone()).await);

    let mut form = RegistrationForm::with_class_preferences();
    fill_required(&mut form);
    form.add_preference();
    form.set_preference(0, "2024-01-01", "");
    form.set_preference(1, "2024-02-01", "10:00");
    form.set_terms_accepted(true);

    assert_matches!(form.submit(&api).await, SubmitOutcome::Accepted(_));

    let rows = store.rows.lock().unwrap();
    let prefs = &rows[0].class_preferences.as_ref().unwrap().0;
    assert_eq!(prefs.len(), 1);
    assert_eq!(prefs[0].date, "2024-02-01");
    assert_eq!(prefs[0].time, "10:00");
}
