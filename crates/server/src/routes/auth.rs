//! Admin authentication route handlers.
//!
//! A single shared password guards the admin surface. Login stores an
//! authenticated marker in the Postgres-backed session; every failure is
//! surfaced as the same uniform 401.

use axum::{Json, Router, extract::State, routing::post};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_sessions::Session;

use crate::error::{AppError, Result};
use crate::middleware::{clear_admin_session, set_admin_session};
use crate::state::AppState;

/// Login form payload.
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub password: String,
}

/// Build the admin auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/login", post(login))
        .route("/api/admin/logout", post(logout))
}

/// Log in with the admin password.
///
/// POST /api/admin/login
async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(input): Json<LoginInput>,
) -> Result<Json<Value>> {
    if input.password.is_empty() {
        return Err(AppError::Validation("Password is required".to_string()));
    }

    if input.password != state.config().admin_password.expose_secret() {
        return Err(AppError::Unauthorized);
    }

    set_admin_session(&session)
        .await
        .map_err(|e| AppError::Internal(format!("failed to write session: {e}")))?;

    Ok(Json(json!({
        "success": true,
        "message": "Login successful",
    })))
}

/// Log out and clear the session marker.
///
/// POST /api/admin/logout
async fn logout(session: Session) -> Result<Json<Value>> {
    clear_admin_session(&session)
        .await
        .map_err(|e| AppError::Internal(format!("failed to clear session: {e}")))?;

    Ok(Json(json!({
        "success": true,
        "message": "Logged out successfully",
    })))
}
