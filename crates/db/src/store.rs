//! The write seam between the intake handler and storage.
//!
//! The handler only ever needs "insert one registration" and "is storage
//! reachable". [`PgRegistrationStore`] is the production implementation;
//! integration tests substitute in-memory or failing stores.

use async_trait::async_trait;

use crate::models::registration::{CreateRegistration, Registration};
use crate::repositories::RegistrationRepo;
use crate::DbPool;

/// Storage used by the intake handler.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Persist exactly one registration.
    async fn insert(&self, input: &CreateRegistration) -> Result<Registration, sqlx::Error>;

    /// Check that storage is reachable.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

/// [`RegistrationStore`] backed by the PostgreSQL pool.
#[derive(Clone)]
pub struct PgRegistrationStore {
    pool: DbPool,
}

impl PgRegistrationStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl RegistrationStore for PgRegistrationStore {
    async fn insert(&self, input: &CreateRegistration) -> Result<Registration, sqlx::Error> {
        RegistrationRepo::create(&self.pool, input).await
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }
}
