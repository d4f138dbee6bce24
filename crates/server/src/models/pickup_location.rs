//! Pickup location model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use mealtrain_core::{Hub, PickupLocationId};

/// A scheduled (date, hub) drop-off slot.
///
/// The `(pickup_date, location)` pair is unique while active. Once any
/// signup references a slot it is deactivated instead of deleted.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PickupLocation {
    pub id: PickupLocationId,
    pub pickup_date: NaiveDate,
    pub location: Hub,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Admin create/update payload for a pickup location.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupLocationInput {
    pub pickup_date: NaiveDate,
    pub location: Hub,
    /// Defaults to true on both create and update.
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_input_deserializes_camel_case() {
        let input: PickupLocationInput =
            serde_json::from_str(r#"{"pickupDate":"2025-12-06","location":"Salem"}"#).unwrap();
        assert_eq!(input.location, Hub::Salem);
        assert_eq!(
            input.pickup_date,
            NaiveDate::from_ymd_opt(2025, 12, 6).unwrap()
        );
        assert!(input.active);
    }

    #[test]
    fn test_input_explicit_active() {
        let input: PickupLocationInput = serde_json::from_str(
            r#"{"pickupDate":"2025-12-06","location":"I5 Corridor","active":false}"#,
        )
        .unwrap();
        assert_eq!(input.location, Hub::I5Corridor);
        assert!(!input.active);
    }
}
