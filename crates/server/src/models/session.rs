//! Session-related types for admin authentication.
//!
//! The admin surface stores a single authenticated marker in the session;
//! there is one shared password and no per-admin identity.

/// Session keys for admin authentication data.
pub mod keys {
    /// Key for the authenticated-admin marker (a `bool`).
    pub const ADMIN_AUTHENTICATED: &str = "admin_authenticated";
}
