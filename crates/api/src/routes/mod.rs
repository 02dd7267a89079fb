pub mod health;
pub mod registration;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /register                                        submit a registration (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(registration::router())
}
