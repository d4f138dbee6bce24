//! Public pickup location listing.

use axum::{Json, Router, extract::State, routing::get};

use crate::db::PickupLocationRepository;
use crate::error::Result;
use crate::models::PickupLocation;
use crate::state::AppState;

/// Build the public pickup location router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/pickup-locations", get(list))
}

/// List active, future-dated pickup locations, ordered by date then
/// location name.
///
/// GET /api/pickup-locations
async fn list(State(state): State<AppState>) -> Result<Json<Vec<PickupLocation>>> {
    let locations = PickupLocationRepository::new(state.pool())
        .list_public()
        .await?;

    Ok(Json(locations))
}
