//! Admin courier management.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use mealtrain_core::{CourierId, Email, Phone};

use crate::db::{CourierRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{Courier, CourierInput};
use crate::state::AppState;

/// Validate a courier payload: all fields required, hub set non-empty.
fn validate(input: &CourierInput) -> Result<()> {
    if input.name.trim().is_empty()
        || input.email.trim().is_empty()
        || input.phone.trim().is_empty()
        || input.locations.is_empty()
    {
        return Err(AppError::Validation(
            "Name, email, phone, and at least one location are required".to_string(),
        ));
    }

    Email::parse(input.email.trim())
        .map_err(|_| AppError::Validation("Invalid email format".to_string()))?;
    Phone::parse(input.phone.trim())
        .map_err(|_| AppError::Validation("Invalid phone number".to_string()))?;

    Ok(())
}

/// List every courier, ordered by name.
///
/// GET /api/admin/couriers
pub async fn list(_admin: RequireAdmin, State(state): State<AppState>) -> Result<Json<Vec<Courier>>> {
    let couriers = CourierRepository::new(state.pool()).list_all().await?;
    Ok(Json(couriers))
}

/// Create a courier.
///
/// POST /api/admin/couriers
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CourierInput>,
) -> Result<Json<Value>> {
    validate(&input)?;

    let courier = CourierRepository::new(state.pool()).create(&input).await?;
    tracing::info!(courier_id = %courier.id, "Courier created");

    Ok(Json(json!({
        "success": true,
        "courier": courier,
    })))
}

/// Replace every field of a courier.
///
/// PUT /api/admin/couriers/{id}
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<CourierId>,
    Json(input): Json<CourierInput>,
) -> Result<Json<Value>> {
    validate(&input)?;

    let courier = CourierRepository::new(state.pool())
        .update(id, &input)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Courier not found".to_string()),
            other => other.into(),
        })?;

    Ok(Json(json!({
        "success": true,
        "courier": courier,
    })))
}

/// Hard delete a courier.
///
/// DELETE /api/admin/couriers/{id}
pub async fn remove(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<CourierId>,
) -> Result<Json<Value>> {
    let deleted = CourierRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound("Courier not found".to_string()));
    }
    tracing::info!(courier_id = %id, "Courier deleted");

    Ok(Json(json!({
        "success": true,
        "message": "Courier deleted",
    })))
}
