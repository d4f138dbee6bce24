//! Public meal listing and the signup workflow.

use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use serde_json::{Value, json};
use tracing::instrument;

use mealtrain_core::{Email, Phone};

use crate::db::{CourierRepository, MealSignupRepository, PickupLocationRepository};
use crate::error::{AppError, Result};
use crate::models::{MealSignupInput, MealsByHub, NewMealSignup, PickupLocation};
use crate::services::notify::{self, SignupNotification};
use crate::state::AppState;

/// Build the public meals router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/meals", get(list).post(create))
}

/// List all non-past signups grouped by hub key.
///
/// GET /api/meals
async fn list(State(state): State<AppState>) -> Result<Json<MealsByHub>> {
    let meals = MealSignupRepository::new(state.pool())
        .list_public()
        .await?;

    Ok(Json(MealsByHub::group(&meals)))
}

/// Create a meal signup.
///
/// POST /api/meals
///
/// Validates the submission, binds it to an active future-dated pickup
/// slot, persists it, and fires confirmation/notification emails after the
/// commit. Email problems never fail the request; the signup stands once
/// the insert commits.
#[instrument(skip(state, input), fields(pickup_location_id = tracing::field::Empty))]
async fn create(
    State(state): State<AppState>,
    Json(input): Json<MealSignupInput>,
) -> Result<Json<Value>> {
    let name = input.name.trim();
    let phone = input.phone.trim();
    let email = input.email.trim();
    let meal_description = input.meal_description.trim();

    let Some(pickup_location_id) = input.pickup_location_id else {
        return Err(AppError::Validation("Missing required fields".to_string()));
    };
    if name.is_empty() || phone.is_empty() || email.is_empty() || meal_description.is_empty() {
        return Err(AppError::Validation("Missing required fields".to_string()));
    }

    let email = Email::parse(email)
        .map_err(|_| AppError::Validation("Invalid email format".to_string()))?;
    let phone = Phone::parse(phone)
        .map_err(|_| AppError::Validation("Invalid phone number".to_string()))?;

    tracing::Span::current().record("pickup_location_id", pickup_location_id.as_i32());

    // One merged error for missing, inactive, and past locations.
    let pickup: PickupLocation = PickupLocationRepository::new(state.pool())
        .get_active_future(pickup_location_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("Invalid or inactive pickup location".to_string())
        })?;

    let new = NewMealSignup {
        pickup_location_id: pickup.id,
        name: name.to_string(),
        phone: phone.as_str().to_string(),
        email: email.as_str().to_string(),
        meal_description: meal_description.to_string(),
        freezer_friendly: input.freezer_friendly,
        note_to_courier: input
            .note_to_courier
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(ToString::to_string),
        can_bring_to_salem: input.can_bring_to_salem,
    };

    let (meal_id, token) = MealSignupRepository::new(state.pool()).create(&new).await?;
    tracing::info!(meal_id = %meal_id, location = %pickup.location, "Meal signup created");

    // Post-commit: load the notification context and fan out emails. A
    // failure here is logged and skipped; the persisted signup stands.
    match load_notification_context(&state, &pickup).await {
        Ok((couriers, total_meals)) => {
            notify::spawn_signup_emails(
                state.email().clone(),
                SignupNotification {
                    provider_name: new.name.clone(),
                    provider_phone: new.phone.clone(),
                    provider_email: new.email.clone(),
                    meal_description: new.meal_description.clone(),
                    freezer_friendly: new.freezer_friendly,
                    can_bring_to_salem: new.can_bring_to_salem,
                    note_to_courier: new.note_to_courier.clone(),
                    pickup_date: pickup.pickup_date,
                    hub: pickup.location,
                    cancellation_url: state.config().cancellation_url(&token),
                    couriers,
                    total_meals,
                },
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load notification context; skipping signup emails");
        }
    }

    Ok(Json(json!({
        "success": true,
        "mealId": meal_id,
        "message": "Meal signup successful! Check your email for confirmation.",
    })))
}

/// Couriers covering the slot's hub, and the active signup count for the
/// slot (including the row just inserted).
async fn load_notification_context(
    state: &AppState,
    pickup: &PickupLocation,
) -> Result<(Vec<crate::models::Courier>, i64)> {
    let couriers = CourierRepository::new(state.pool())
        .list_active()
        .await?
        .into_iter()
        .filter(|c| c.covers(pickup.location))
        .collect();
    let total_meals = MealSignupRepository::new(state.pool())
        .active_count(pickup.id)
        .await?;

    Ok((couriers, total_meals))
}
