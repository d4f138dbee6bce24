//! Integration tests for Meal Train.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations
//! cargo run -p mealtrain-cli -- migrate
//! cargo run -p mealtrain-cli -- seed locations
//!
//! # Start the server, then run the suite
//! cargo run -p mealtrain-server &
//! cargo test -p mealtrain-integration-tests -- --ignored
//! ```
//!
//! Every test is `#[ignore]`-gated because it needs a running server and a
//! seeded database. `BASE_URL` and `ADMIN_PASSWORD` configure the target.

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::Client;
use serde_json::json;

/// Base URL of the server under test (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A client with a cookie store, for admin session flows.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Log the client in as admin using `ADMIN_PASSWORD` from the environment.
///
/// # Panics
///
/// Panics if the login request fails or is rejected.
pub async fn login_as_admin(client: &Client) {
    let password =
        std::env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD must be set for admin tests");

    let resp = client
        .post(format!("{}/api/admin/login", base_url()))
        .json(&json!({ "password": password }))
        .send()
        .await
        .expect("Failed to send login request");

    assert!(
        resp.status().is_success(),
        "admin login rejected: {}",
        resp.status()
    );
}

/// Fetch the id of some active, future-dated pickup location, preferring
/// the given hub. Returns `None` when the calendar is empty.
///
/// # Panics
///
/// Panics if the listing request fails.
pub async fn any_pickup_location_id(client: &Client, hub: &str) -> Option<i64> {
    let resp = client
        .get(format!("{}/api/pickup-locations", base_url()))
        .send()
        .await
        .expect("Failed to list pickup locations");

    let locations: Vec<serde_json::Value> = resp.json().await.expect("Invalid listing body");

    locations
        .iter()
        .find(|l| l["location"] == hub)
        .or_else(|| locations.first())
        .and_then(|l| l["id"].as_i64())
}

/// A well-formed signup body targeting the given pickup location.
#[must_use]
pub fn signup_body(pickup_location_id: i64, email: &str) -> serde_json::Value {
    json!({
        "name": "Integration Test",
        "phone": "503-555-0142",
        "email": email,
        "pickupLocationId": pickup_location_id,
        "mealDescription": "Test casserole",
        "freezerFriendly": true,
        "noteToCourier": "Test note",
        "canBringToSalem": false,
    })
}
