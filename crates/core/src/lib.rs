//! Domain types and rules for class registration intake.
//!
//! Shared by the intake server (`enroll-api`), the persistence layer
//! (`enroll-db`) and the form state manager (`enroll-client`):
//!
//! - [`registration::RegistrationDraft`] is the wire shape of a submission.
//! - [`registration::check_required`] is the server-side presence check.
//! - [`registration::optional`] and [`registration::complete_preferences`]
//!   normalize a draft into its persisted form.

pub mod error;
pub mod registration;
pub mod types;
