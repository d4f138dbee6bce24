//! Meal signup models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mealtrain_core::{Email, Hub, MealSignupId, Phone, PickupLocationId, SignupStatus};

/// A provider's commitment to deliver one meal to a pickup slot.
///
/// `cancelled_at` is the soft-delete marker: once set, the row is excluded
/// from every active view but retained for audit.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MealSignup {
    pub id: MealSignupId,
    pub pickup_location_id: PickupLocationId,
    pub name: String,
    pub phone: Phone,
    pub email: Email,
    pub meal_description: String,
    pub freezer_friendly: bool,
    pub note_to_courier: Option<String>,
    pub can_bring_to_salem: bool,
    pub cancellation_token: Uuid,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl MealSignup {
    /// Lifecycle state derived from the soft-delete marker.
    #[must_use]
    pub const fn status(&self) -> SignupStatus {
        SignupStatus::from_cancelled(self.cancelled_at.is_some())
    }
}

/// A signup joined with its pickup slot's date and hub. Serialized only on
/// the admin surface, so the token stays in.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MealWithPickup {
    pub id: MealSignupId,
    pub pickup_location_id: PickupLocationId,
    pub name: String,
    pub phone: Phone,
    pub email: Email,
    pub meal_description: String,
    pub freezer_friendly: bool,
    pub note_to_courier: Option<String>,
    pub can_bring_to_salem: bool,
    pub cancellation_token: Uuid,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub pickup_date: NaiveDate,
    pub location: Hub,
}

impl MealWithPickup {
    /// Lifecycle state derived from the soft-delete marker.
    #[must_use]
    pub const fn status(&self) -> SignupStatus {
        SignupStatus::from_cancelled(self.cancelled_at.is_some())
    }
}

/// Public signup form payload (camelCase wire format).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSignupInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub pickup_location_id: Option<PickupLocationId>,
    #[serde(default)]
    pub meal_description: String,
    #[serde(default)]
    pub freezer_friendly: bool,
    #[serde(default)]
    pub note_to_courier: Option<String>,
    #[serde(default)]
    pub can_bring_to_salem: bool,
}

/// A validated signup ready for insertion. Construction happens in the
/// signup workflow after field, email, and phone validation pass.
#[derive(Debug, Clone)]
pub struct NewMealSignup {
    pub pickup_location_id: PickupLocationId,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub meal_description: String,
    pub freezer_friendly: bool,
    pub note_to_courier: Option<String>,
    pub can_bring_to_salem: bool,
}

/// The public listing shape: no phone, email, or token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicMeal {
    pub name: String,
    pub meal_description: String,
    pub freezer_friendly: bool,
    pub can_bring_to_salem: bool,
    pub pickup_date: NaiveDate,
    pub status: SignupStatus,
}

impl From<&MealWithPickup> for PublicMeal {
    fn from(meal: &MealWithPickup) -> Self {
        Self {
            name: meal.name.clone(),
            meal_description: meal.meal_description.clone(),
            freezer_friendly: meal.freezer_friendly,
            can_bring_to_salem: meal.can_bring_to_salem,
            pickup_date: meal.pickup_date,
            status: meal.status(),
        }
    }
}

/// Public meals grouped by hub key.
#[derive(Debug, Clone, Serialize, Default)]
pub struct MealsByHub {
    #[serde(rename = "Salem")]
    pub salem: Vec<PublicMeal>,
    #[serde(rename = "Portland")]
    pub portland: Vec<PublicMeal>,
    #[serde(rename = "Eugene")]
    pub eugene: Vec<PublicMeal>,
    #[serde(rename = "I5 Corridor")]
    pub i5_corridor: Vec<PublicMeal>,
}

impl MealsByHub {
    /// Group joined signups under their hub keys, preserving query order.
    #[must_use]
    pub fn group(meals: &[MealWithPickup]) -> Self {
        let mut grouped = Self::default();
        for meal in meals {
            let bucket = match meal.location {
                Hub::Salem => &mut grouped.salem,
                Hub::Portland => &mut grouped.portland,
                Hub::Eugene => &mut grouped.eugene,
                Hub::I5Corridor => &mut grouped.i5_corridor,
            };
            bucket.push(PublicMeal::from(meal));
        }
        grouped
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_meal(location: Hub, cancelled: bool) -> MealWithPickup {
        MealWithPickup {
            id: MealSignupId::new(1),
            pickup_location_id: PickupLocationId::new(1),
            name: "Dana".to_string(),
            phone: Phone::parse("503-555-0142").unwrap(),
            email: Email::parse("dana@example.com").unwrap(),
            meal_description: "Lentil soup".to_string(),
            freezer_friendly: true,
            note_to_courier: None,
            can_bring_to_salem: false,
            cancellation_token: Uuid::nil(),
            cancelled_at: cancelled.then(Utc::now),
            created_at: Utc::now(),
            pickup_date: NaiveDate::from_ymd_opt(2025, 12, 6).unwrap(),
            location,
        }
    }

    #[test]
    fn test_signup_input_camel_case() {
        let input: MealSignupInput = serde_json::from_str(
            r#"{
                "name": "Dana",
                "phone": "503-555-0142",
                "email": "dana@example.com",
                "pickupLocationId": 3,
                "mealDescription": "Lentil soup",
                "freezerFriendly": true,
                "noteToCourier": "Gate code 1234",
                "canBringToSalem": false
            }"#,
        )
        .unwrap();
        assert_eq!(input.pickup_location_id, Some(PickupLocationId::new(3)));
        assert_eq!(input.meal_description, "Lentil soup");
        assert!(input.freezer_friendly);
        assert_eq!(input.note_to_courier.as_deref(), Some("Gate code 1234"));
    }

    #[test]
    fn test_signup_input_defaults() {
        let input: MealSignupInput = serde_json::from_str("{}").unwrap();
        assert!(input.name.is_empty());
        assert!(input.pickup_location_id.is_none());
        assert!(!input.freezer_friendly);
    }

    #[test]
    fn test_status_from_marker() {
        assert_eq!(
            sample_meal(Hub::Salem, false).status(),
            mealtrain_core::SignupStatus::Active
        );
        assert_eq!(
            sample_meal(Hub::Salem, true).status(),
            mealtrain_core::SignupStatus::Cancelled
        );
    }

    #[test]
    fn test_group_by_hub() {
        let meals = vec![
            sample_meal(Hub::Salem, false),
            sample_meal(Hub::I5Corridor, false),
            sample_meal(Hub::Salem, true),
        ];
        let grouped = MealsByHub::group(&meals);
        assert_eq!(grouped.salem.len(), 2);
        assert_eq!(grouped.i5_corridor.len(), 1);
        assert!(grouped.portland.is_empty());
        assert!(grouped.eugene.is_empty());
    }

    #[test]
    fn test_grouped_keys_match_hub_names() {
        let grouped = MealsByHub::group(&[sample_meal(Hub::I5Corridor, false)]);
        let json = serde_json::to_value(&grouped).unwrap();
        assert!(json.get("I5 Corridor").is_some());
        assert!(json.get("Salem").is_some());
    }

    #[test]
    fn test_public_meal_omits_contact_details() {
        let meal = sample_meal(Hub::Portland, false);
        let json = serde_json::to_value(PublicMeal::from(&meal)).unwrap();
        assert!(json.get("phone").is_none());
        assert!(json.get("email").is_none());
        assert_eq!(json["name"], "Dana");
        assert_eq!(json["status"], "active");
    }
}
