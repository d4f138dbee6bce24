//! Authentication middleware and extractors for the admin surface.
//!
//! The admin credential is a single shared password; a successful login
//! stores an authenticated marker in the session. Handlers take the
//! [`RequireAdmin`] extractor as an explicit argument, which keeps the
//! auth requirement visible in every admin signature.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_sessions::Session;

use crate::models::session::keys;

/// Extractor that requires an authenticated admin session.
///
/// Rejects with a uniform 401 body; callers learn nothing about whether the
/// session was absent, expired, or never authenticated.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(_admin: RequireAdmin) -> impl IntoResponse {
///     // only reachable with a valid admin session
/// }
/// ```
pub struct RequireAdmin;

/// Error returned when admin authentication is required but missing.
pub struct AdminAuthRejection;

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Unauthorized" }))).into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminAuthRejection)?;

        let authenticated: bool = session
            .get(keys::ADMIN_AUTHENTICATED)
            .await
            .ok()
            .flatten()
            .unwrap_or(false);

        if !authenticated {
            return Err(AdminAuthRejection);
        }

        Ok(Self)
    }
}

/// Mark the session as an authenticated admin (login).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_admin_session(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::ADMIN_AUTHENTICATED, true).await
}

/// Clear the authenticated marker from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_admin_session(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<bool>(keys::ADMIN_AUTHENTICATED).await?;
    Ok(())
}
