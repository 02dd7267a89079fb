//! Handler for registration intake.
//!
//! The single trust boundary: check required keys, map the draft to its
//! stored shape, insert once, respond. Every failure leaves through
//! [`AppError`] so callers never see storage internals.

use axum::body::Bytes;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use enroll_core::registration::{check_required, RegistrationDraft};
use enroll_db::models::registration::CreateRegistration;

use crate::error::{AppError, AppResult};
use crate::response::SubmissionResponse;
use crate::state::AppState;

/// Message returned with a successfully stored registration.
pub const SUBMITTED_MESSAGE: &str = "Registration submitted successfully";

// ---------------------------------------------------------------------------
// POST /api/register
// ---------------------------------------------------------------------------

/// Validate and persist one registration draft.
///
/// The body is decoded as JSON regardless of its `Content-Type`. An
/// unreadable body is reported as an internal error, not a validation
/// error. No deduplication: identical drafts produce distinct records.
pub async fn submit_registration(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let draft: RegistrationDraft = serde_json::from_slice(&body).map_err(|e| {
        AppError::Internal(format!("Unreadable registration payload: {e}"))
    })?;

    if let Err(err) = check_required(&draft) {
        tracing::warn!(error = %err, "Registration rejected");
        return Err(err.into());
    }

    let input = CreateRegistration::from(&draft);
    let record = state.store.insert(&input).await?;

    tracing::info!(
        registration_id = record.id,
        class_preferences = input.class_preferences.as_ref().map_or(0, Vec::len),
        "Registration submitted",
    );

    Ok(Json(SubmissionResponse::ok(SUBMITTED_MESSAGE, record)))
}
