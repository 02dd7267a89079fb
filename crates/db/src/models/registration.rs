//! Registration entity model and insert DTO.

use enroll_core::registration::{complete_preferences, optional, ClassPreference, RegistrationDraft};
use enroll_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `registrations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Registration {
    pub id: DbId,
    pub parent_name: String,
    pub parent_phone: String,
    pub parent_second_phone: Option<String>,
    pub parent_email: String,
    pub participant_legal_name: String,
    pub participant_preferred_name: Option<String>,
    pub participant_dob: String,
    pub participant_zip: String,
    pub class_preferences: Option<Json<Vec<ClassPreference>>>,
    pub case_manager_name: Option<String>,
    pub case_manager_phone: Option<String>,
    pub case_manager_email: Option<String>,
    pub allergies: Option<String>,
    pub social_behavior_description: Option<String>,
    pub additional_notes: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting a registration.
///
/// Built from a draft that already passed the required-field check; optional
/// fields that were empty become `None` and are stored as `NULL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRegistration {
    pub parent_name: String,
    pub parent_phone: String,
    pub parent_second_phone: Option<String>,
    pub parent_email: String,
    pub participant_legal_name: String,
    pub participant_preferred_name: Option<String>,
    pub participant_dob: String,
    pub participant_zip: String,
    pub class_preferences: Option<Vec<ClassPreference>>,
    pub case_manager_name: Option<String>,
    pub case_manager_phone: Option<String>,
    pub case_manager_email: Option<String>,
    pub allergies: Option<String>,
    pub social_behavior_description: Option<String>,
    pub additional_notes: Option<String>,
}

impl From<&RegistrationDraft> for CreateRegistration {
    fn from(draft: &RegistrationDraft) -> Self {
        Self {
            parent_name: draft.parent_name.clone(),
            parent_phone: draft.parent_phone.clone(),
            parent_second_phone: optional(&draft.parent_second_phone),
            parent_email: draft.parent_email.clone(),
            participant_legal_name: draft.participant_legal_name.clone(),
            participant_preferred_name: optional(&draft.participant_preferred_name),
            participant_dob: draft.participant_dob.clone(),
            participant_zip: draft.participant_zip.clone(),
            class_preferences: complete_preferences(&draft.class_preferences),
            case_manager_name: optional(&draft.case_manager_name),
            case_manager_phone: optional(&draft.case_manager_phone),
            case_manager_email: optional(&draft.case_manager_email),
            allergies: optional(&draft.allergies),
            social_behavior_description: optional(&draft.social_behavior_description),
            additional_notes: optional(&draft.additional_notes),
        }
    }
}

impl Registration {
    /// Assemble a row from an insert DTO plus the database-generated values.
    ///
    /// Used by stores that do not round-trip through PostgreSQL.
    pub fn from_insert(id: DbId, created_at: Timestamp, input: &CreateRegistration) -> Self {
        Self {
            id,
            parent_name: input.parent_name.clone(),
            parent_phone: input.parent_phone.clone(),
            parent_second_phone: input.parent_second_phone.clone(),
            parent_email: input.parent_email.clone(),
            participant_legal_name: input.participant_legal_name.clone(),
            participant_preferred_name: input.participant_preferred_name.clone(),
            participant_dob: input.participant_dob.clone(),
            participant_zip: input.participant_zip.clone(),
            class_preferences: input.class_preferences.clone().map(Json),
            case_manager_name: input.case_manager_name.clone(),
            case_manager_phone: input.case_manager_phone.clone(),
            case_manager_email: input.case_manager_email.clone(),
            allergies: input.allergies.clone(),
            social_behavior_description: input.social_behavior_description.clone(),
            additional_notes: input.additional_notes.clone(),
            created_at,
        }
    }
}
