//! End-to-end tests for the public signup workflow.
//!
//! Requires a running server and a seeded database; see the crate docs.

use reqwest::StatusCode;
use serde_json::Value;

use mealtrain_integration_tests::{any_pickup_location_id, base_url, client, signup_body};

/// Count active Salem entries in the public grouped listing.
async fn active_salem_count(client: &reqwest::Client) -> usize {
    let resp = client
        .get(format!("{}/api/meals", base_url()))
        .send()
        .await
        .expect("Failed to list meals");
    let grouped: Value = resp.json().await.expect("Invalid meals body");

    grouped["Salem"]
        .as_array()
        .map(|meals| {
            meals
                .iter()
                .filter(|m| m["status"] == "active")
                .count()
        })
        .unwrap_or(0)
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn signup_returns_meal_id_and_increments_listing() {
    let client = client();
    let Some(location_id) = any_pickup_location_id(&client, "Salem").await else {
        panic!("No pickup locations seeded");
    };

    let before = active_salem_count(&client).await;

    let resp = client
        .post(format!("{}/api/meals", base_url()))
        .json(&signup_body(location_id, "signup-test@example.com"))
        .send()
        .await
        .expect("Failed to create signup");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Invalid signup response");
    assert_eq!(body["success"], true);
    assert!(body["mealId"].is_i64(), "mealId missing: {body}");

    let after = active_salem_count(&client).await;
    assert_eq!(after, before + 1);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn signup_missing_field_is_rejected() {
    let client = client();
    let Some(location_id) = any_pickup_location_id(&client, "Salem").await else {
        panic!("No pickup locations seeded");
    };

    let before = active_salem_count(&client).await;

    let mut body = signup_body(location_id, "missing-field@example.com");
    body["mealDescription"] = Value::String(String::new());

    let resp = client
        .post(format!("{}/api/meals", base_url()))
        .json(&body)
        .send()
        .await
        .expect("Failed to send signup");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Invalid error body");
    assert_eq!(body["error"], "Missing required fields");

    // Nothing persisted
    assert_eq!(active_salem_count(&client).await, before);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn signup_malformed_email_is_rejected() {
    let client = client();
    let Some(location_id) = any_pickup_location_id(&client, "Salem").await else {
        panic!("No pickup locations seeded");
    };

    let resp = client
        .post(format!("{}/api/meals", base_url()))
        .json(&signup_body(location_id, "not-an-email"))
        .send()
        .await
        .expect("Failed to send signup");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Invalid error body");
    assert_eq!(body["error"], "Invalid email format");
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn signup_malformed_phone_is_rejected() {
    let client = client();
    let Some(location_id) = any_pickup_location_id(&client, "Salem").await else {
        panic!("No pickup locations seeded");
    };

    let mut body = signup_body(location_id, "phone-test@example.com");
    body["phone"] = Value::String("555".to_string());

    let resp = client
        .post(format!("{}/api/meals", base_url()))
        .json(&body)
        .send()
        .await
        .expect("Failed to send signup");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Invalid error body");
    assert_eq!(body["error"], "Invalid phone number");
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn signup_unknown_location_is_rejected() {
    let client = client();

    let resp = client
        .post(format!("{}/api/meals", base_url()))
        .json(&signup_body(999_999, "unknown-location@example.com"))
        .send()
        .await
        .expect("Failed to send signup");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn public_listing_groups_by_hub() {
    let client = client();

    let resp = client
        .get(format!("{}/api/meals", base_url()))
        .send()
        .await
        .expect("Failed to list meals");
    assert_eq!(resp.status(), StatusCode::OK);

    let grouped: Value = resp.json().await.expect("Invalid meals body");
    for key in ["Salem", "Portland", "Eugene", "I5 Corridor"] {
        assert!(grouped[key].is_array(), "missing hub key {key}");
    }

    // Public entries carry no contact details
    if let Some(meal) = grouped["Salem"].as_array().and_then(|m| m.first()) {
        assert!(meal.get("phone").is_none());
        assert!(meal.get("email").is_none());
    }
}
