//! The fixed pickup-hub registry.
//!
//! Hubs are a closed enumeration: four named drop-off points with static
//! address metadata, plus the allow-list of valid pickup dates. There is no
//! runtime mutation path; the registry is data compiled into the binary.

use core::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A named pickup hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hub {
    Portland,
    #[serde(rename = "I5 Corridor")]
    I5Corridor,
    Salem,
    Eugene,
}

/// Static address metadata for a hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HubInfo {
    /// Display name of the drop-off point.
    pub name: &'static str,
    /// Street address, or a description when there is no fixed address.
    pub address: &'static str,
    /// City line; empty when not applicable.
    pub city: &'static str,
    /// Multi-line address block for emails.
    pub full_address: &'static str,
    /// Extra instruction shown alongside the address.
    pub note: Option<&'static str>,
}

/// Dates on which pickups may be scheduled (December 2025 weekends).
pub static ALLOWED_DATES: LazyLock<[NaiveDate; 6]> = LazyLock::new(|| {
    [
        date(2025, 12, 6),  // Saturday
        date(2025, 12, 7),  // Sunday
        date(2025, 12, 13), // Saturday
        date(2025, 12, 14), // Sunday
        date(2025, 12, 20), // Saturday
        date(2025, 12, 21), // Sunday
    ]
});

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

impl Hub {
    /// All hubs, in seeding order.
    pub const ALL: [Self; 4] = [Self::Portland, Self::I5Corridor, Self::Salem, Self::Eugene];

    /// The hub key as stored in the database and shown in the UI.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Portland => "Portland",
            Self::I5Corridor => "I5 Corridor",
            Self::Salem => "Salem",
            Self::Eugene => "Eugene",
        }
    }

    /// Address metadata for this hub.
    #[must_use]
    pub const fn info(self) -> &'static HubInfo {
        const PORTLAND: HubInfo = HubInfo {
            name: "Jantzen Beach Target",
            address: "1555 N Tomahawk Island Dr",
            city: "Portland, OR 97217",
            full_address: "Jantzen Beach Target\n1555 N Tomahawk Island Dr\nPortland, OR 97217",
            note: None,
        };
        const I5_CORRIDOR: HubInfo = HubInfo {
            name: "I5 Corridor",
            address: "Between Portland and Eugene",
            city: "",
            full_address: "Between Portland and Eugene",
            note: Some("Message courier to set location"),
        };
        const SALEM: HubInfo = HubInfo {
            name: "Public Service Building",
            address: "255 Capitol St NE",
            city: "Salem, OR 97310",
            full_address: "Public Service Building\n255 Capitol St NE\nSalem, OR 97310",
            note: None,
        };
        const EUGENE: HubInfo = HubInfo {
            name: "Self Delivery",
            address: "Will deliver my own meal",
            city: "",
            full_address: "Will deliver my own meal - no courier needed",
            note: Some("No courier needed"),
        };

        match self {
            Self::Portland => &PORTLAND,
            Self::I5Corridor => &I5_CORRIDOR,
            Self::Salem => &SALEM,
            Self::Eugene => &EUGENE,
        }
    }

    /// One-line display text: name, address, city, and note when present.
    #[must_use]
    pub fn display_text(self) -> String {
        let info = self.info();
        let mut text = format!("{} - {}", info.name, info.address);
        if !info.city.is_empty() {
            text.push_str(", ");
            text.push_str(info.city);
        }
        if let Some(note) = info.note {
            text.push_str(" (");
            text.push_str(note);
            text.push(')');
        }
        text
    }
}

impl fmt::Display for Hub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Hub {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Portland" => Ok(Self::Portland),
            "I5 Corridor" => Ok(Self::I5Corridor),
            "Salem" => Ok(Self::Salem),
            "Eugene" => Ok(Self::Eugene),
            _ => Err(format!(
                "invalid location: {s}. Must be Salem, Portland, Eugene, or I5 Corridor"
            )),
        }
    }
}

// SQLx support (with postgres feature): hubs are stored as TEXT, and as
// TEXT[] for courier coverage sets.
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Hub {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::postgres::PgHasArrayType for Hub {
    fn array_type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::postgres::PgHasArrayType>::array_type_info()
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Hub {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        s.parse::<Self>().map_err(Into::into)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Hub {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}
