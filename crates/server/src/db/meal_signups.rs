//! Meal signup repository.

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use mealtrain_core::{Hub, MealSignupId, PickupLocationId, StatusFilter};

use super::RepositoryError;
use crate::models::{MealSignup, MealWithPickup, NewMealSignup};

const JOINED_COLUMNS: &str = "ms.id, ms.pickup_location_id, ms.name, ms.phone, ms.email, \
     ms.meal_description, ms.freezer_friendly, ms.note_to_courier, ms.can_bring_to_salem, \
     ms.cancellation_token, ms.cancelled_at, ms.created_at, pl.pickup_date, pl.location";

/// Repository for meal signup database operations.
pub struct MealSignupRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MealSignupRepository<'a> {
    /// Create a new meal signup repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a signup. The cancellation token is generated by the database
    /// at insert time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        new: &NewMealSignup,
    ) -> Result<(MealSignupId, Uuid), RepositoryError> {
        let (id, token) = sqlx::query_as::<_, (MealSignupId, Uuid)>(
            "INSERT INTO meal_signups (pickup_location_id, name, phone, email, \
                 meal_description, freezer_friendly, note_to_courier, can_bring_to_salem) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id, cancellation_token",
        )
        .bind(new.pickup_location_id)
        .bind(&new.name)
        .bind(&new.phone)
        .bind(&new.email)
        .bind(&new.meal_description)
        .bind(new.freezer_friendly)
        .bind(&new.note_to_courier)
        .bind(new.can_bring_to_salem)
        .fetch_one(self.pool)
        .await?;

        Ok((id, token))
    }

    /// Resolve a cancellation token to a signup joined with its pickup slot.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_token(
        &self,
        token: Uuid,
    ) -> Result<Option<MealWithPickup>, RepositoryError> {
        let row = sqlx::query_as::<_, MealWithPickup>(&format!(
            "SELECT {JOINED_COLUMNS} FROM meal_signups ms \
             JOIN pickup_locations pl ON ms.pickup_location_id = pl.id \
             WHERE ms.cancellation_token = $1"
        ))
        .bind(token)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Set the cancellation timestamp on a signup. The guard against
    /// double-cancellation lives in the workflow; this only writes.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the row doesn't exist,
    /// `RepositoryError::Database` for other failures.
    pub async fn cancel(&self, id: MealSignupId) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE meal_signups SET cancelled_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Count non-cancelled signups bound to a pickup slot.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn active_count(&self, id: PickupLocationId) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM meal_signups \
             WHERE pickup_location_id = $1 AND cancelled_at IS NULL",
        )
        .bind(id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Count every signup (cancelled included) bound to a pickup slot. Used
    /// by the delete-guard on pickup locations.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_for_location(
        &self,
        id: PickupLocationId,
    ) -> Result<i64, RepositoryError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM meal_signups WHERE pickup_location_id = $1")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }

    /// Non-cancelled signups for a pickup slot, oldest first (reminder
    /// sweep and courier summaries).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active_for_location(
        &self,
        id: PickupLocationId,
    ) -> Result<Vec<MealSignup>, RepositoryError> {
        let rows = sqlx::query_as::<_, MealSignup>(
            "SELECT id, pickup_location_id, name, phone, email, meal_description, \
                 freezer_friendly, note_to_courier, can_bring_to_salem, \
                 cancellation_token, cancelled_at, created_at \
             FROM meal_signups \
             WHERE pickup_location_id = $1 AND cancelled_at IS NULL \
             ORDER BY created_at ASC",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// All non-past signups joined with their slots, for the public grouped
    /// listing. Ordered by pickup date then creation time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_public(&self) -> Result<Vec<MealWithPickup>, RepositoryError> {
        let rows = sqlx::query_as::<_, MealWithPickup>(&format!(
            "SELECT {JOINED_COLUMNS} FROM meal_signups ms \
             JOIN pickup_locations pl ON ms.pickup_location_id = pl.id \
             WHERE pl.pickup_date >= CURRENT_DATE \
             ORDER BY pl.pickup_date ASC, ms.created_at ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Admin listing with optional hub and status filters, newest pickup
    /// date first, then newest signup first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_filtered(
        &self,
        location: Option<Hub>,
        status: StatusFilter,
    ) -> Result<Vec<MealWithPickup>, RepositoryError> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {JOINED_COLUMNS} FROM meal_signups ms \
             JOIN pickup_locations pl ON ms.pickup_location_id = pl.id \
             WHERE TRUE"
        ));

        if let Some(hub) = location {
            query.push(" AND pl.location = ");
            query.push_bind(hub);
        }

        match status {
            StatusFilter::Active => {
                query.push(" AND ms.cancelled_at IS NULL");
            }
            StatusFilter::Cancelled => {
                query.push(" AND ms.cancelled_at IS NOT NULL");
            }
            StatusFilter::All => {}
        }

        query.push(" ORDER BY pl.pickup_date DESC, ms.created_at DESC");

        let rows = query
            .build_query_as::<MealWithPickup>()
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    /// Hard delete a signup (admin only; the public path soft-deletes).
    ///
    /// # Returns
    ///
    /// Returns `true` if the row was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: MealSignupId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM meal_signups WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
