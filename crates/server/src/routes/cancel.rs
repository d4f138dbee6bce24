//! Cancellation workflow: token lookup and the one-way cancel.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::instrument;
use uuid::Uuid;

use mealtrain_core::{Hub, MealSignupId};

use crate::db::{CourierRepository, MealSignupRepository};
use crate::error::{AppError, Result};
use crate::models::MealWithPickup;
use crate::services::notify::{self, CancellationNotification};
use crate::state::AppState;

/// Build the cancellation router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/cancel/{token}", get(lookup).post(cancel))
}

/// Summary returned by the read-only token lookup.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CancellationSummary {
    id: MealSignupId,
    name: String,
    meal_description: String,
    pickup_date: NaiveDate,
    location: Hub,
    already_cancelled: bool,
}

/// Resolve the token to a signup. A malformed token is indistinguishable
/// from an unknown one: both are "not found".
async fn resolve_token(state: &AppState, token: &str) -> Result<MealWithPickup> {
    let token = Uuid::parse_str(token)
        .map_err(|_| AppError::NotFound("Invalid cancellation link".to_string()))?;

    MealSignupRepository::new(state.pool())
        .get_by_token(token)
        .await?
        .ok_or_else(|| AppError::NotFound("Invalid cancellation link".to_string()))
}

/// Look up the signup behind a cancellation token.
///
/// GET /api/cancel/{token}
async fn lookup(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<CancellationSummary>> {
    let meal = resolve_token(&state, &token).await?;

    Ok(Json(CancellationSummary {
        id: meal.id,
        name: meal.name.clone(),
        meal_description: meal.meal_description.clone(),
        pickup_date: meal.pickup_date,
        location: meal.location,
        already_cancelled: meal.cancelled_at.is_some(),
    }))
}

/// Cancel the signup behind a token.
///
/// POST /api/cancel/{token}
///
/// A second cancel attempt is an explicit error, not a no-op. Courier and
/// provider notifications fire after the soft-delete commits and never
/// affect the response.
#[instrument(skip(state, token))]
async fn cancel(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<Value>> {
    let meal = resolve_token(&state, &token).await?;

    if meal.cancelled_at.is_some() {
        return Err(AppError::Validation(
            "This meal has already been cancelled".to_string(),
        ));
    }

    let signups = MealSignupRepository::new(state.pool());
    signups.cancel(meal.id).await?;
    tracing::info!(meal_id = %meal.id, location = %meal.location, "Meal signup cancelled");

    // Post-commit fan-out; a failed context load is logged and skipped.
    match load_notification_context(&state, &meal).await {
        Ok((couriers, remaining_count)) => {
            notify::spawn_cancellation_emails(
                state.email().clone(),
                CancellationNotification {
                    provider_name: meal.name.clone(),
                    provider_email: meal.email.as_str().to_string(),
                    meal_description: meal.meal_description.clone(),
                    pickup_date: meal.pickup_date,
                    hub: meal.location,
                    remaining_count,
                    couriers,
                },
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load notification context; skipping cancellation emails");
        }
    }

    Ok(Json(json!({
        "success": true,
        "message": "Meal cancelled successfully",
    })))
}

/// Couriers covering the slot's hub, and the count of signups still active
/// after the cancellation.
async fn load_notification_context(
    state: &AppState,
    meal: &MealWithPickup,
) -> Result<(Vec<crate::models::Courier>, i64)> {
    let couriers = CourierRepository::new(state.pool())
        .list_active()
        .await?
        .into_iter()
        .filter(|c| c.covers(meal.location))
        .collect();
    let remaining_count = MealSignupRepository::new(state.pool())
        .active_count(meal.pickup_location_id)
        .await?;

    Ok((couriers, remaining_count))
}
