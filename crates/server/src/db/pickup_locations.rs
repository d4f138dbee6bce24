//! Pickup location repository.

use chrono::NaiveDate;
use sqlx::PgPool;

use mealtrain_core::{Hub, PickupLocationId};

use super::RepositoryError;
use crate::models::PickupLocation;

const COLUMNS: &str = "id, pickup_date, location, active, created_at";

/// Repository for pickup location database operations.
pub struct PickupLocationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PickupLocationRepository<'a> {
    /// Create a new pickup location repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a location by id, restricted to active rows whose date has not
    /// passed. Used by the public signup path, which deliberately does not
    /// distinguish missing, inactive, and past locations.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_active_future(
        &self,
        id: PickupLocationId,
    ) -> Result<Option<PickupLocation>, RepositoryError> {
        let row = sqlx::query_as::<_, PickupLocation>(&format!(
            "SELECT {COLUMNS} FROM pickup_locations \
             WHERE id = $1 AND active = TRUE AND pickup_date >= CURRENT_DATE"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// List active, future-dated locations for the public site, ordered by
    /// date then location name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_public(&self) -> Result<Vec<PickupLocation>, RepositoryError> {
        let rows = sqlx::query_as::<_, PickupLocation>(&format!(
            "SELECT {COLUMNS} FROM pickup_locations \
             WHERE active = TRUE AND pickup_date >= CURRENT_DATE \
             ORDER BY pickup_date ASC, location ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// List every location for the admin dashboard, newest date first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<PickupLocation>, RepositoryError> {
        let rows = sqlx::query_as::<_, PickupLocation>(&format!(
            "SELECT {COLUMNS} FROM pickup_locations \
             ORDER BY pickup_date DESC, location ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// List active locations scheduled for a specific date (reminder sweep).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active_on(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<PickupLocation>, RepositoryError> {
        let rows = sqlx::query_as::<_, PickupLocation>(&format!(
            "SELECT {COLUMNS} FROM pickup_locations \
             WHERE pickup_date = $1 AND active = TRUE"
        ))
        .bind(date)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Create a location.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the (date, location) pair
    /// already exists, `RepositoryError::Database` for other failures.
    pub async fn create(
        &self,
        pickup_date: NaiveDate,
        location: Hub,
    ) -> Result<PickupLocation, RepositoryError> {
        let row = sqlx::query_as::<_, PickupLocation>(&format!(
            "INSERT INTO pickup_locations (pickup_date, location, active) \
             VALUES ($1, $2, TRUE) \
             ON CONFLICT (pickup_date, location) DO NOTHING \
             RETURNING {COLUMNS}"
        ))
        .bind(pickup_date)
        .bind(location)
        .fetch_optional(self.pool)
        .await?;

        row.ok_or_else(|| {
            RepositoryError::Conflict(format!(
                "A pickup location for {location} on {pickup_date} already exists"
            ))
        })
    }

    /// Whether a *different* row already occupies the (date, location) pair.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists_other(
        &self,
        pickup_date: NaiveDate,
        location: Hub,
        id: PickupLocationId,
    ) -> Result<bool, RepositoryError> {
        let existing: Option<i32> = sqlx::query_scalar(
            "SELECT id FROM pickup_locations \
             WHERE pickup_date = $1 AND location = $2 AND id != $3",
        )
        .bind(pickup_date)
        .bind(location)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(existing.is_some())
    }

    /// Replace the date, location, and active flag of a row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the row doesn't exist,
    /// `RepositoryError::Database` for other failures.
    pub async fn update(
        &self,
        id: PickupLocationId,
        pickup_date: NaiveDate,
        location: Hub,
        active: bool,
    ) -> Result<PickupLocation, RepositoryError> {
        let row = sqlx::query_as::<_, PickupLocation>(&format!(
            "UPDATE pickup_locations \
             SET pickup_date = $1, location = $2, active = $3 \
             WHERE id = $4 \
             RETURNING {COLUMNS}"
        ))
        .bind(pickup_date)
        .bind(location)
        .bind(active)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)
    }

    /// Soft-deactivate a location (used when signups reference it).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the row doesn't exist,
    /// `RepositoryError::Database` for other failures.
    pub async fn deactivate(&self, id: PickupLocationId) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE pickup_locations SET active = FALSE WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Hard delete a location.
    ///
    /// # Returns
    ///
    /// Returns `true` if the row was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: PickupLocationId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM pickup_locations WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Whether the (date, location) pair already exists (seeding check).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(
        &self,
        pickup_date: NaiveDate,
        location: Hub,
    ) -> Result<bool, RepositoryError> {
        let existing: Option<i32> = sqlx::query_scalar(
            "SELECT id FROM pickup_locations WHERE pickup_date = $1 AND location = $2",
        )
        .bind(pickup_date)
        .bind(location)
        .fetch_optional(self.pool)
        .await?;

        Ok(existing.is_some())
    }

    /// Delete every location no signup references. Destructive; callers must
    /// gate this behind an explicit confirmation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_unreferenced(&self) -> Result<Vec<PickupLocation>, RepositoryError> {
        let rows = sqlx::query_as::<_, PickupLocation>(&format!(
            "DELETE FROM pickup_locations \
             WHERE id NOT IN (SELECT DISTINCT pickup_location_id FROM meal_signups) \
             RETURNING {COLUMNS}"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
