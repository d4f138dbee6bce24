//! Admin CRUD surface.
//!
//! Every handler takes the [`RequireAdmin`](crate::middleware::RequireAdmin)
//! extractor, so the session requirement is explicit in each signature.

pub mod couriers;
pub mod meals;
pub mod pickup_locations;

use axum::{
    Router,
    routing::{delete, get, put},
};

use crate::state::AppState;

/// Build the admin CRUD router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/couriers",
            get(couriers::list).post(couriers::create),
        )
        .route(
            "/api/admin/couriers/{id}",
            put(couriers::update).delete(couriers::remove),
        )
        .route(
            "/api/admin/pickup-locations",
            get(pickup_locations::list).post(pickup_locations::create),
        )
        .route(
            "/api/admin/pickup-locations/{id}",
            put(pickup_locations::update).delete(pickup_locations::remove),
        )
        .route("/api/admin/meals", get(meals::list))
        .route("/api/admin/meals/{id}", delete(meals::remove))
}
