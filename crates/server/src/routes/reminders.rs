//! Scheduled reminder sweep.
//!
//! Triggered externally (platform cron). Sends day-before reminders to
//! providers and pickup summaries to couriers. Re-invocation on the same
//! day resends everything: there is deliberately no dedup guard, so the
//! scheduler owns the cadence.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, header::AUTHORIZATION},
    routing::get,
};
use secrecy::ExposeSecret;
use serde_json::{Value, json};
use tracing::instrument;

use crate::db::{CourierRepository, MealSignupRepository, PickupLocationRepository};
use crate::dates;
use crate::error::{AppError, Result};
use crate::models::CourierContact;
use crate::services::email::{CourierSummary, Reminder};
use crate::state::AppState;

/// Build the scheduled-trigger router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/cron/send-reminders", get(send_reminders))
}

/// Send reminders for tomorrow's pickups.
///
/// GET /api/cron/send-reminders
///
/// Gated by `Authorization: Bearer {CRON_SECRET}` when the secret is
/// configured. Individual send failures are logged and excluded from the
/// returned counts; the sweep always runs to completion.
#[instrument(skip(state, headers))]
async fn send_reminders(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>> {
    if let Some(secret) = &state.config().cron_secret {
        let expected = format!("Bearer {}", secret.expose_secret());
        let presented = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
        if presented != Some(expected.as_str()) {
            return Err(AppError::Unauthorized);
        }
    }

    let tomorrow = dates::tomorrow();
    tracing::info!(date = %tomorrow, "Sending reminders");

    let locations = PickupLocationRepository::new(state.pool())
        .list_active_on(tomorrow)
        .await?;

    if locations.is_empty() {
        return Ok(Json(json!({
            "success": true,
            "message": "No pickups scheduled for tomorrow",
            "date": tomorrow,
        })));
    }

    let signups = MealSignupRepository::new(state.pool());
    let active_couriers = CourierRepository::new(state.pool()).list_active().await?;
    let email = state.email();

    let mut reminders_sent: u32 = 0;
    let mut courier_summaries_sent: u32 = 0;

    for location in &locations {
        let meals = signups.list_active_for_location(location.id).await?;
        if meals.is_empty() {
            tracing::info!(location = %location.location, date = %tomorrow, "No meals for location");
            continue;
        }

        let couriers: Vec<_> = active_couriers
            .iter()
            .filter(|c| c.covers(location.location))
            .collect();
        let contacts: Vec<CourierContact> =
            couriers.iter().map(|c| CourierContact::from(&**c)).collect();

        for meal in &meals {
            match email
                .send_reminder(Reminder {
                    to: meal.email.as_str(),
                    provider_name: &meal.name,
                    pickup_date: location.pickup_date,
                    hub: location.location,
                    meal_description: &meal.meal_description,
                    couriers: &contacts,
                })
                .await
            {
                Ok(()) => reminders_sent += 1,
                Err(e) => {
                    tracing::error!(to = %meal.email, error = %e, "Failed to send reminder");
                }
            }
        }

        for courier in &couriers {
            match email
                .send_courier_summary(CourierSummary {
                    to: courier.email.as_str(),
                    pickup_date: location.pickup_date,
                    hub: location.location,
                    meals: &meals,
                })
                .await
            {
                Ok(()) => courier_summaries_sent += 1,
                Err(e) => {
                    tracing::error!(to = %courier.email, error = %e, "Failed to send courier summary");
                }
            }
        }
    }

    Ok(Json(json!({
        "success": true,
        "message": "Reminders sent successfully",
        "date": tomorrow,
        "stats": {
            "pickupLocations": locations.len(),
            "remindersSent": reminders_sent,
            "courierSummariesSent": courier_summaries_sent,
        },
    })))
}
