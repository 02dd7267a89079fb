//! Registration draft shape, wire keys and intake rules.
//!
//! The draft is what the form holds and what `POST /api/register` receives.
//! Keys on the wire are camelCase (with the historical `participantDOB`
//! spelling); columns in storage are snake_case.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum ZIP length accepted by the form's edit control.
///
/// Only the client enforces this; the intake handler stores whatever it is
/// given.
pub const MAX_ZIP_LENGTH: usize = 5;

/// Fewest class-time preference slots a form with preferences may show.
pub const MIN_CLASS_PREFERENCES: usize = 1;

/// Most class-time preference slots a form with preferences may show.
pub const MAX_CLASS_PREFERENCES: usize = 5;

// ---------------------------------------------------------------------------
// Field keys
// ---------------------------------------------------------------------------

/// Scalar attributes of a [`RegistrationDraft`], addressable by wire key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    ParentName,
    ParentPhone,
    ParentSecondPhone,
    ParentEmail,
    ParticipantLegalName,
    ParticipantPreferredName,
    ParticipantDob,
    ParticipantZip,
    CaseManagerName,
    CaseManagerPhone,
    CaseManagerEmail,
    Allergies,
    SocialBehaviorDescription,
    AdditionalNotes,
}

/// Required keys in the order the intake handler checks them.
pub const REQUIRED_FIELDS: [DraftField; 6] = [
    DraftField::ParentName,
    DraftField::ParentPhone,
    DraftField::ParentEmail,
    DraftField::ParticipantLegalName,
    DraftField::ParticipantDob,
    DraftField::ParticipantZip,
];

impl DraftField {
    pub const ALL: [DraftField; 14] = [
        DraftField::ParentName,
        DraftField::ParentPhone,
        DraftField::ParentSecondPhone,
        DraftField::ParentEmail,
        DraftField::ParticipantLegalName,
        DraftField::ParticipantPreferredName,
        DraftField::ParticipantDob,
        DraftField::ParticipantZip,
        DraftField::CaseManagerName,
        DraftField::CaseManagerPhone,
        DraftField::CaseManagerEmail,
        DraftField::Allergies,
        DraftField::SocialBehaviorDescription,
        DraftField::AdditionalNotes,
    ];

    /// The JSON key this field travels under.
    pub const fn key(self) -> &'static str {
        match self {
            DraftField::ParentName => "parentName",
            DraftField::ParentPhone => "parentPhone",
            DraftField::ParentSecondPhone => "parentSecondPhone",
            DraftField::ParentEmail => "parentEmail",
            DraftField::ParticipantLegalName => "participantLegalName",
            DraftField::ParticipantPreferredName => "participantPreferredName",
            DraftField::ParticipantDob => "participantDOB",
            DraftField::ParticipantZip => "participantZip",
            DraftField::CaseManagerName => "caseManagerName",
            DraftField::CaseManagerPhone => "caseManagerPhone",
            DraftField::CaseManagerEmail => "caseManagerEmail",
            DraftField::Allergies => "allergies",
            DraftField::SocialBehaviorDescription => "socialBehaviorDescription",
            DraftField::AdditionalNotes => "additionalNotes",
        }
    }
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// One preferred class slot. Either half may be blank while the user edits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassPreference {
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub time: String,
}

impl ClassPreference {
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
        }
    }

    /// A preference is kept only when both the date and the time are set.
    pub fn is_complete(&self) -> bool {
        !self.date.is_empty() && !self.time.is_empty()
    }
}

/// The full registration payload as held by the form and sent to the server.
///
/// Absent keys and JSON `null` both decode to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationDraft {
    #[serde(deserialize_with = "null_as_default")]
    pub parent_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub parent_phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub parent_second_phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub parent_email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub participant_legal_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub participant_preferred_name: String,
    #[serde(rename = "participantDOB", deserialize_with = "null_as_default")]
    pub participant_dob: String,
    #[serde(deserialize_with = "null_as_default")]
    pub participant_zip: String,
    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub class_preferences: Vec<ClassPreference>,
    #[serde(deserialize_with = "null_as_default")]
    pub case_manager_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub case_manager_phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub case_manager_email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub allergies: String,
    #[serde(deserialize_with = "null_as_default")]
    pub social_behavior_description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub additional_notes: String,
}

impl RegistrationDraft {
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::ParentName => &self.parent_name,
            DraftField::ParentPhone => &self.parent_phone,
            DraftField::ParentSecondPhone => &self.parent_second_phone,
            DraftField::ParentEmail => &self.parent_email,
            DraftField::ParticipantLegalName => &self.participant_legal_name,
            DraftField::ParticipantPreferredName => &self.participant_preferred_name,
            DraftField::ParticipantDob => &self.participant_dob,
            DraftField::ParticipantZip => &self.participant_zip,
            DraftField::CaseManagerName => &self.case_manager_name,
            DraftField::CaseManagerPhone => &self.case_manager_phone,
            DraftField::CaseManagerEmail => &self.case_manager_email,
            DraftField::Allergies => &self.allergies,
            DraftField::SocialBehaviorDescription => &self.social_behavior_description,
            DraftField::AdditionalNotes => &self.additional_notes,
        }
    }

    pub fn get_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::ParentName => &mut self.parent_name,
            DraftField::ParentPhone => &mut self.parent_phone,
            DraftField::ParentSecondPhone => &mut self.parent_second_phone,
            DraftField::ParentEmail => &mut self.parent_email,
            DraftField::ParticipantLegalName => &mut self.participant_legal_name,
            DraftField::ParticipantPreferredName => &mut self.participant_preferred_name,
            DraftField::ParticipantDob => &mut self.participant_dob,
            DraftField::ParticipantZip => &mut self.participant_zip,
            DraftField::CaseManagerName => &mut self.case_manager_name,
            DraftField::CaseManagerPhone => &mut self.case_manager_phone,
            DraftField::CaseManagerEmail => &mut self.case_manager_email,
            DraftField::Allergies => &mut self.allergies,
            DraftField::SocialBehaviorDescription => &mut self.social_behavior_description,
            DraftField::AdditionalNotes => &mut self.additional_notes,
        }
    }
}

// ---------------------------------------------------------------------------
// Intake rules
// ---------------------------------------------------------------------------

/// Check the required keys in [`REQUIRED_FIELDS`] order.
///
/// Stops at the first empty key; missing fields are never aggregated.
pub fn check_required(draft: &RegistrationDraft) -> Result<(), CoreError> {
    match REQUIRED_FIELDS.iter().find(|f| draft.get(**f).is_empty()) {
        Some(field) => Err(CoreError::MissingField(field.key())),
        None => Ok(()),
    }
}

/// Map an optional free-text value to its stored form: `None` when empty.
pub fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Keep only the preferences with both a date and a time.
///
/// Returns `None` when nothing survives, so an unused list is stored as
/// `NULL` rather than `[]`.
pub fn complete_preferences(preferences: &[ClassPreference]) -> Option<Vec<ClassPreference>> {
    let kept: Vec<ClassPreference> = preferences
        .iter()
        .filter(|p| p.is_complete())
        .cloned()
        .collect();
    if kept.is_empty() {
        None
    } else {
        Some(kept)
    }
}

/// Apply the ZIP edit-control limit of [`MAX_ZIP_LENGTH`] characters.
pub fn truncate_zip(value: &str) -> String {
    value.chars().take(MAX_ZIP_LENGTH).collect()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
