//! Courier models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mealtrain_core::{CourierId, Email, Hub, Phone};

/// A volunteer covering one or more hubs.
///
/// The hub set is denormalized onto the row; association with signups is
/// computed per-request by matching hub keys.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Courier {
    pub id: CourierId,
    pub name: String,
    pub email: Email,
    pub phone: Phone,
    pub locations: Vec<Hub>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Courier {
    /// Whether this courier's coverage set contains the hub.
    ///
    /// Courier-to-signup association is never stored; it is computed
    /// per-request with this predicate.
    #[must_use]
    pub fn covers(&self, hub: Hub) -> bool {
        self.locations.contains(&hub)
    }
}

/// Contact details included in provider-facing emails.
#[derive(Debug, Clone, Serialize)]
pub struct CourierContact {
    pub name: String,
    pub phone: Phone,
    pub email: Email,
}

impl From<&Courier> for CourierContact {
    fn from(courier: &Courier) -> Self {
        Self {
            name: courier.name.clone(),
            phone: courier.phone.clone(),
            email: courier.email.clone(),
        }
    }
}

/// Admin create/update payload for a courier.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourierInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub locations: Vec<Hub>,
    /// Defaults to true on both create and update.
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}
