//! Repository for the `registrations` table.

use enroll_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::registration::{CreateRegistration, Registration};

/// Column list for `registrations` queries.
const COLUMNS: &str = "\
    id, parent_name, parent_phone, parent_second_phone, parent_email, \
    participant_legal_name, participant_preferred_name, participant_dob, \
    participant_zip, class_preferences, case_manager_name, case_manager_phone, \
    case_manager_email, allergies, social_behavior_description, \
    additional_notes, created_at";

/// Insert and lookup operations for registrations. There is no update or
/// delete path.
pub struct RegistrationRepo;

impl RegistrationRepo {
    /// Insert one registration, returning the full row.
    ///
    /// No deduplication: the same input inserted twice yields two rows.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRegistration,
    ) -> Result<Registration, sqlx::Error> {
        let query = format!(
            "INSERT INTO registrations \
                (parent_name, parent_phone, parent_second_phone, parent_email, \
                 participant_legal_name, participant_preferred_name, participant_dob, \
                 participant_zip, class_preferences, case_manager_name, \
                 case_manager_phone, case_manager_email, allergies, \
                 social_behavior_description, additional_notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(&input.parent_name)
            .bind(&input.parent_phone)
            .bind(&input.parent_second_phone)
            .bind(&input.parent_email)
            .bind(&input.participant_legal_name)
            .bind(&input.participant_preferred_name)
            .bind(&input.participant_dob)
            .bind(&input.participant_zip)
            .bind(input.class_preferences.as_ref().map(Json))
            .bind(&input.case_manager_name)
            .bind(&input.case_manager_phone)
            .bind(&input.case_manager_email)
            .bind(&input.allergies)
            .bind(&input.social_behavior_description)
            .bind(&input.additional_notes)
            .fetch_one(pool)
            .await
    }

    /// Find a registration by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Registration>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM registrations WHERE id = $1");
        sqlx::query_as::<_, Registration>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Count all stored registrations.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM registrations")
            .fetch_one(pool)
            .await
    }
}
