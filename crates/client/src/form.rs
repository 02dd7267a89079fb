//! Client-held registration form state.
//!
//! The draft is mutated field by field with no validation beyond the ZIP
//! edit-control limit. Submission is gated on the terms flag and on there
//! being no request already in flight. A successful submit resets the form;
//! a failed one leaves it untouched so the user can correct and resend.

use enroll_core::registration::{
    truncate_zip, ClassPreference, DraftField, RegistrationDraft, MAX_CLASS_PREFERENCES,
    MIN_CLASS_PREFERENCES,
};

use crate::api::{RegistrationApi, SubmitError, SubmitReceipt};

/// Shown after the server stores the registration.
pub const SUCCESS_MESSAGE: &str = "Registration submitted successfully! We will contact you soon.";

/// Detail used when the server rejected the draft without saying why, or
/// answered with a body the form cannot read.
pub const REJECTED_FALLBACK: &str = "Failed to submit registration";

/// Detail used when the request itself failed.
pub const TRANSPORT_FALLBACK: &str = "Please try again.";

const ERROR_PREFIX: &str = "There was an error submitting your registration";

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

/// User-facing result of the last submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

impl Notification {
    fn for_error(err: &SubmitError) -> Self {
        let detail = err.server_message().unwrap_or(match err {
            SubmitError::Transport(_) => TRANSPORT_FALLBACK,
            _ => REJECTED_FALLBACK,
        });
        Notification::Error(format!("{ERROR_PREFIX}: {detail}"))
    }

    pub fn message(&self) -> &str {
        match self {
            Notification::Success(m) | Notification::Error(m) => m,
        }
    }
}

/// Why a submit request was refused before any request was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    InFlight,
    TermsNotAccepted,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Nothing was sent.
    Blocked(BlockReason),
    /// The server stored the draft; the form has been reset.
    Accepted(SubmitReceipt),
    /// The request failed; the draft is unchanged.
    Failed(SubmitError),
}

// ---------------------------------------------------------------------------
// RegistrationForm
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RegistrationForm {
    draft: RegistrationDraft,
    preferences_enabled: bool,
    terms_accepted: bool,
    in_flight: bool,
    notification: Option<Notification>,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationForm {
    /// An empty form without class-time preferences.
    pub fn new() -> Self {
        Self::build(false)
    }

    /// An empty form that also collects 1 to 5 class-time preferences,
    /// starting with one blank slot.
    pub fn with_class_preferences() -> Self {
        Self::build(true)
    }

    fn build(preferences_enabled: bool) -> Self {
        Self {
            draft: initial_draft(preferences_enabled),
            preferences_enabled,
            terms_accepted: false,
            in_flight: false,
            notification: None,
        }
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    pub fn preferences_enabled(&self) -> bool {
        self.preferences_enabled
    }

    pub fn terms_accepted(&self) -> bool {
        self.terms_accepted
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    // --- Edits -------------------------------------------------------------

    /// Replace one scalar attribute.
    ///
    /// The ZIP is cut to five characters here, mirroring the input's
    /// `maxlength`; nothing else is checked until the server sees the draft.
    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        *self.draft.get_mut(field) = match field {
            DraftField::ParticipantZip => truncate_zip(&value),
            _ => value,
        };
    }

    pub fn set_terms_accepted(&mut self, accepted: bool) {
        self.terms_accepted = accepted;
    }

    /// Edit one preference slot. Returns `false` if the slot does not exist.
    pub fn set_preference(
        &mut self,
        index: usize,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> bool {
        match self.draft.class_preferences.get_mut(index) {
            Some(slot) => {
                *slot = ClassPreference::new(date, time);
                true
            }
            None => false,
        }
    }

    /// Append a blank preference slot. No-op at the maximum or when the form
    /// has no preferences.
    pub fn add_preference(&mut self) -> bool {
        if !self.preferences_enabled || self.draft.class_preferences.len() >= MAX_CLASS_PREFERENCES
        {
            return false;
        }
        self.draft.class_preferences.push(ClassPreference::default());
        true
    }

    /// Remove a preference slot. No-op at the minimum, for an out-of-range
    /// index, or when the form has no preferences.
    pub fn remove_preference(&mut self, index: usize) -> bool {
        let prefs = &mut self.draft.class_preferences;
        if !self.preferences_enabled || prefs.len() <= MIN_CLASS_PREFERENCES || index >= prefs.len()
        {
            return false;
        }
        prefs.remove(index);
        true
    }

    // --- Submission --------------------------------------------------------

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        self.terms_accepted && !self.in_flight
    }

    /// Guard and start a submission, returning the snapshot to send.
    ///
    /// Marks the form as in flight; pair with [`finish_submit`](Self::finish_submit).
    pub fn begin_submit(&mut self) -> Result<RegistrationDraft, BlockReason> {
        if self.in_flight {
            return Err(BlockReason::InFlight);
        }
        if !self.terms_accepted {
            return Err(BlockReason::TermsNotAccepted);
        }
        self.in_flight = true;
        self.notification = None;
        Ok(self.draft.clone())
    }

    /// Apply the result of the request started by [`begin_submit`](Self::begin_submit).
    pub fn finish_submit(&mut self, result: Result<SubmitReceipt, SubmitError>) -> SubmitOutcome {
        if !self.in_flight {
            tracing::warn!("finish_submit called with no submission in flight");
        }
        self.in_flight = false;

        match result {
            Ok(receipt) => {
                tracing::info!(
                    registration_id = ?receipt.registration_id,
                    "Registration accepted"
                );
                self.notification = Some(Notification::Success(SUCCESS_MESSAGE.to_string()));
                self.draft = initial_draft(self.preferences_enabled);
                self.terms_accepted = false;
                SubmitOutcome::Accepted(receipt)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Registration submission failed");
                self.notification = Some(Notification::for_error(&err));
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Send the whole draft once through `api` and record the outcome.
    ///
    /// No retry: a failed submission waits for the user to submit again.
    pub async fn submit<A: RegistrationApi>(&mut self, api: &A) -> SubmitOutcome {
        let draft = match self.begin_submit() {
            Ok(draft) => draft,
            Err(reason) => return SubmitOutcome::Blocked(reason),
        };
        let result = api.submit(&draft).await;
        self.finish_submit(result)
    }
}

fn initial_draft(preferences_enabled: bool) -> RegistrationDraft {
    let mut draft = RegistrationDraft::default();
    if preferences_enabled {
        draft.class_preferences = vec![ClassPreference::default(); MIN_CLASS_PREFERENCES];
    }
    draft
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
