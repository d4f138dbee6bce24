//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (database ping)
//!
//! # Public
//! GET  /api/pickup-locations            - Active, future-dated pickup slots
//! GET  /api/meals                       - Non-past signups grouped by hub
//! POST /api/meals                       - Create a signup
//! GET  /api/cancel/{token}              - Resolve a cancellation token
//! POST /api/cancel/{token}              - Cancel a signup
//!
//! # Scheduled
//! GET  /api/cron/send-reminders         - Day-before reminder sweep
//!
//! # Admin auth (shared password, session cookie)
//! POST /api/admin/login                 - Log in
//! POST /api/admin/logout                - Log out
//!
//! # Admin CRUD (session required)
//! GET    /api/admin/couriers            - List couriers
//! POST   /api/admin/couriers            - Create courier
//! PUT    /api/admin/couriers/{id}       - Update courier
//! DELETE /api/admin/couriers/{id}       - Delete courier
//! GET    /api/admin/pickup-locations    - List pickup slots
//! POST   /api/admin/pickup-locations    - Create pickup slot
//! PUT    /api/admin/pickup-locations/{id}    - Update pickup slot
//! DELETE /api/admin/pickup-locations/{id}    - Delete or deactivate pickup slot
//! GET    /api/admin/meals               - Filtered signup listing
//! DELETE /api/admin/meals/{id}          - Hard delete a signup
//! ```

pub mod admin;
pub mod auth;
pub mod cancel;
pub mod meals;
pub mod pickup_locations;
pub mod reminders;

use axum::Router;

use crate::state::AppState;

/// Build the application router (health endpoints are mounted in `main`).
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(pickup_locations::router())
        .merge(meals::router())
        .merge(cancel::router())
        .merge(reminders::router())
        .merge(auth::router())
        .merge(admin::router())
}
