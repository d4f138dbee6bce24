//! Database operations for `PostgreSQL`.
//!
//! ## Tables
//!
//! - `pickup_locations` - Scheduled (date, hub) drop-off slots
//! - `meal_signups` - Provider signups, soft-deleted via `cancelled_at`
//! - `couriers` - Volunteers covering one or more hubs
//! - `session` - Admin session storage (tower-sessions)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p mealtrain-cli -- migrate
//! ```
//!
//! Queries use runtime binding (`query_as`/`QueryBuilder`) rather than the
//! sqlx compile-time macros so the workspace builds without a live database.

pub mod couriers;
pub mod meal_signups;
pub mod pickup_locations;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use couriers::CourierRepository;
pub use meal_signups::MealSignupRepository;
pub use pickup_locations::PickupLocationRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate date + location).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
