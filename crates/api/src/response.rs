//! Response envelope for successful submissions.
//!
//! Errors use the `{ "error", "code" }` body produced by
//! [`AppError`](crate::error::AppError); successes use [`SubmissionResponse`].

use serde::Serialize;

/// `{ "success": true, "message": ..., "data": T }` envelope.
///
/// `data` is omitted from the JSON when `None`.
#[derive(Debug, Serialize)]
pub struct SubmissionResponse<T: Serialize> {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> SubmissionResponse<T> {
    pub fn ok(message: &'static str, data: T) -> Self {
        Self {
            success: true,
            message,
            data: Some(data),
        }
    }
}
