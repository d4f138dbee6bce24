//! Request middleware: session layer and admin auth extractor.

pub mod auth;
pub mod session;

pub use auth::{RequireAdmin, clear_admin_session, set_admin_session};
pub use session::create_session_layer;
