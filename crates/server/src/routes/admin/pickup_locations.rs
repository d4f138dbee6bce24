//! Admin pickup location management.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use mealtrain_core::PickupLocationId;

use crate::db::{MealSignupRepository, PickupLocationRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{PickupLocation, PickupLocationInput};
use crate::state::AppState;

/// List every pickup location, newest date first.
///
/// GET /api/admin/pickup-locations
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<PickupLocation>>> {
    let locations = PickupLocationRepository::new(state.pool()).list_all().await?;
    Ok(Json(locations))
}

/// Create a pickup location. Duplicate (date, location) pairs are a
/// conflict.
///
/// POST /api/admin/pickup-locations
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<PickupLocationInput>,
) -> Result<Json<Value>> {
    let location = PickupLocationRepository::new(state.pool())
        .create(input.pickup_date, input.location)
        .await?;
    tracing::info!(pickup_location_id = %location.id, "Pickup location created");

    Ok(Json(json!({
        "success": true,
        "pickupLocation": location,
    })))
}

/// Update a pickup location; rejects a (date, location) collision with a
/// different row.
///
/// PUT /api/admin/pickup-locations/{id}
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<PickupLocationId>,
    Json(input): Json<PickupLocationInput>,
) -> Result<Json<Value>> {
    let locations = PickupLocationRepository::new(state.pool());

    if locations
        .exists_other(input.pickup_date, input.location, id)
        .await?
    {
        return Err(AppError::Conflict(format!(
            "A pickup location for {} on {} already exists",
            input.location, input.pickup_date
        )));
    }

    let location = locations
        .update(id, input.pickup_date, input.location, input.active)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => {
                AppError::NotFound("Pickup location not found".to_string())
            }
            other => other.into(),
        })?;

    Ok(Json(json!({
        "success": true,
        "pickupLocation": location,
    })))
}

/// Delete a pickup location, or deactivate it when signups reference it.
///
/// DELETE /api/admin/pickup-locations/{id}
pub async fn remove(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<PickupLocationId>,
) -> Result<Json<Value>> {
    let signup_count = MealSignupRepository::new(state.pool())
        .count_for_location(id)
        .await?;

    let locations = PickupLocationRepository::new(state.pool());

    if signup_count > 0 {
        locations.deactivate(id).await.map_err(|e| match e {
            RepositoryError::NotFound => {
                AppError::NotFound("Pickup location not found".to_string())
            }
            other => other.into(),
        })?;
        tracing::info!(pickup_location_id = %id, "Pickup location deactivated");

        return Ok(Json(json!({
            "success": true,
            "message": "Pickup location deactivated (has existing signups)",
        })));
    }

    let deleted = locations.delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound("Pickup location not found".to_string()));
    }
    tracing::info!(pickup_location_id = %id, "Pickup location deleted");

    Ok(Json(json!({
        "success": true,
        "message": "Pickup location deleted",
    })))
}
