//! Admin signup listing and hard delete.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

use mealtrain_core::{Hub, MealSignupId, StatusFilter};

use crate::db::MealSignupRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::MealWithPickup;
use crate::state::AppState;

/// Listing filters. Absent status means "all".
#[derive(Debug, Deserialize)]
pub struct MealListQuery {
    pub location: Option<String>,
    pub status: Option<String>,
}

/// Filtered signup listing, newest pickup date first.
///
/// GET /api/admin/meals?location=Salem&status=active
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<MealListQuery>,
) -> Result<Json<Vec<MealWithPickup>>> {
    let location = query
        .location
        .as_deref()
        .map(str::parse::<Hub>)
        .transpose()
        .map_err(AppError::Validation)?;
    let status = query
        .status
        .as_deref()
        .map(str::parse::<StatusFilter>)
        .transpose()
        .map_err(AppError::Validation)?
        .unwrap_or_default();

    let meals = MealSignupRepository::new(state.pool())
        .list_filtered(location, status)
        .await?;

    Ok(Json(meals))
}

/// Hard delete a signup. The public path only soft-deletes; this is the
/// admin-only escape hatch.
///
/// DELETE /api/admin/meals/{id}
pub async fn remove(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<MealSignupId>,
) -> Result<Json<Value>> {
    let deleted = MealSignupRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound("Meal signup not found".to_string()));
    }
    tracing::info!(meal_id = %id, "Meal signup deleted");

    Ok(Json(json!({
        "success": true,
        "message": "Meal signup deleted",
    })))
}
