/// Domain-level errors raised while checking a registration draft.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A required draft key was absent or empty. Carries the wire key.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}
