//! Route definitions for registration intake.
//!
//! Merged into the `/api` tree by `api_routes()`.

use axum::routing::post;
use axum::Router;

use crate::handlers::registration;
use crate::state::AppState;

/// Registration routes.
///
/// ```text
/// POST   /register          -> submit_registration
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/register", post(registration::submit_registration))
}
