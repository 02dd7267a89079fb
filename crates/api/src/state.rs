use std::sync::Arc;

use enroll_db::RegistrationStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; the store is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Where accepted registrations are written.
    pub store: Arc<dyn RegistrationStore>,
}
