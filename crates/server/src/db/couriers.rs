//! Courier repository.

use sqlx::PgPool;

use mealtrain_core::CourierId;

use super::RepositoryError;
use crate::models::{Courier, CourierInput};

const COLUMNS: &str = "id, name, email, phone, locations, active, created_at";

/// Repository for courier database operations.
pub struct CourierRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CourierRepository<'a> {
    /// Create a new courier repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every courier, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Courier>, RepositoryError> {
        let rows = sqlx::query_as::<_, Courier>(&format!(
            "SELECT {COLUMNS} FROM couriers ORDER BY name ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Active couriers, ordered by name. Hub matching happens in Rust via
    /// [`Courier::covers`](crate::models::Courier::covers); the table holds
    /// a handful of rows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active(&self) -> Result<Vec<Courier>, RepositoryError> {
        let rows = sqlx::query_as::<_, Courier>(&format!(
            "SELECT {COLUMNS} FROM couriers WHERE active = TRUE ORDER BY name ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Create a courier. Input validation happens in the admin surface.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &CourierInput) -> Result<Courier, RepositoryError> {
        let row = sqlx::query_as::<_, Courier>(&format!(
            "INSERT INTO couriers (name, email, phone, locations, active) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        ))
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.locations)
        .bind(input.active)
        .fetch_one(self.pool)
        .await?;

        Ok(row)
    }

    /// Replace every field of a courier.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the row doesn't exist,
    /// `RepositoryError::Database` for other failures.
    pub async fn update(
        &self,
        id: CourierId,
        input: &CourierInput,
    ) -> Result<Courier, RepositoryError> {
        let row = sqlx::query_as::<_, Courier>(&format!(
            "UPDATE couriers \
             SET name = $1, email = $2, phone = $3, locations = $4, active = $5 \
             WHERE id = $6 \
             RETURNING {COLUMNS}"
        ))
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.locations)
        .bind(input.active)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)
    }

    /// Hard delete a courier. Signups never reference couriers, so no
    /// referential guard is needed.
    ///
    /// # Returns
    ///
    /// Returns `true` if the row was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: CourierId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM couriers WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
