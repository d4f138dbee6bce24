//! Signup lifecycle states and listing filters.

use serde::{Deserialize, Serialize};

/// Visibility state of a meal signup.
///
/// The only transition is `Active -> Cancelled`, triggered by the token
/// holder through the cancellation workflow. Cancelled signups are retained
/// for audit but excluded from active views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SignupStatus {
    #[default]
    Active,
    Cancelled,
}

impl SignupStatus {
    /// Derive the status from the soft-delete marker.
    #[must_use]
    pub const fn from_cancelled(cancelled: bool) -> Self {
        if cancelled { Self::Cancelled } else { Self::Active }
    }
}

/// Status filter for admin signup listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    Active,
    Cancelled,
    #[default]
    All,
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "cancelled" => Ok(Self::Cancelled),
            "all" => Ok(Self::All),
            _ => Err(format!("invalid status filter: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cancelled() {
        assert_eq!(SignupStatus::from_cancelled(false), SignupStatus::Active);
        assert_eq!(SignupStatus::from_cancelled(true), SignupStatus::Cancelled);
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(
            serde_json::to_string(&SignupStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
    }

    #[test]
    fn test_filter_from_str() {
        assert_eq!("active".parse::<StatusFilter>().unwrap(), StatusFilter::Active);
        assert_eq!(
            "cancelled".parse::<StatusFilter>().unwrap(),
            StatusFilter::Cancelled
        );
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert!("pending".parse::<StatusFilter>().is_err());
    }
}
