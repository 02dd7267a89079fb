//! Form state manager for the class registration page.
//!
//! [`RegistrationForm`] owns the draft and the terms gate; [`RegistrationApi`]
//! is the transport it submits through, with [`HttpRegistrationApi`] talking
//! to `POST /api/register`.

pub mod api;
pub mod form;

pub use api::{HttpRegistrationApi, RegistrationApi, SubmitError, SubmitReceipt};
pub use form::{BlockReason, Notification, RegistrationForm, SubmitOutcome};
