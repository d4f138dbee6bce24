//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input does not contain between 10 and 15 digits.
    #[error("phone number must contain {min} to {max} digits")]
    BadDigitCount {
        /// Minimum number of digits.
        min: usize,
        /// Maximum number of digits.
        max: usize,
    },
}

/// A phone number.
///
/// Accepts any formatting (dashes, dots, parentheses, spaces); validation
/// only requires that the digit count fall in the accepted range. The raw
/// input is preserved so the number displays the way the caller wrote it.
///
/// ## Examples
///
/// ```
/// use mealtrain_core::Phone;
///
/// assert!(Phone::parse("503-555-0142").is_ok());
/// assert!(Phone::parse("(503) 555-0142").is_ok());
/// assert!(Phone::parse("+1 503 555 0142").is_ok());
///
/// assert!(Phone::parse("555-0142").is_err()); // too few digits
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Minimum number of digits.
    pub const MIN_DIGITS: usize = 10;

    /// Maximum number of digits.
    pub const MAX_DIGITS: usize = 15;

    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or does not contain between
    /// 10 and 15 digits after stripping formatting characters.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        let digit_count = s.chars().filter(char::is_ascii_digit).count();
        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digit_count) {
            return Err(PhoneError::BadDigitCount {
                min: Self::MIN_DIGITS,
                max: Self::MAX_DIGITS,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the phone number as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns only the digits of the phone number.
    #[must_use]
    pub fn digits(&self) -> String {
        self.0.chars().filter(char::is_ascii_digit).collect()
    }

    /// Renders a 10-digit number as `(NNN) NNN-NNNN`; any other length is
    /// returned as entered.
    #[must_use]
    pub fn formatted(&self) -> String {
        let digits = self.digits();
        if digits.len() == 10 {
            format!(
                "({}) {}-{}",
                digits.get(0..3).unwrap_or(""),
                digits.get(3..6).unwrap_or(""),
                digits.get(6..).unwrap_or("")
            )
        } else {
            self.0.clone()
        }
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Phone {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Phone {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Phone {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_formats() {
        assert!(Phone::parse("5035550142").is_ok());
        assert!(Phone::parse("503-555-0142").is_ok());
        assert!(Phone::parse("(503) 555-0142").is_ok());
        assert!(Phone::parse("503.555.0142").is_ok());
        assert!(Phone::parse("+1 503 555 0142").is_ok());
        // 15 digits: upper bound
        assert!(Phone::parse("123456789012345").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Phone::parse(""), Err(PhoneError::Empty)));
    }

    #[test]
    fn test_parse_too_few_digits() {
        assert!(matches!(
            Phone::parse("555-0142"),
            Err(PhoneError::BadDigitCount { .. })
        ));
    }

    #[test]
    fn test_parse_too_many_digits() {
        assert!(matches!(
            Phone::parse("1234567890123456"),
            Err(PhoneError::BadDigitCount { .. })
        ));
    }

    #[test]
    fn test_parse_no_digits() {
        assert!(matches!(
            Phone::parse("call me"),
            Err(PhoneError::BadDigitCount { .. })
        ));
    }

    #[test]
    fn test_digits() {
        let phone = Phone::parse("(503) 555-0142").unwrap();
        assert_eq!(phone.digits(), "5035550142");
    }

    #[test]
    fn test_formatted_ten_digits() {
        let phone = Phone::parse("503.555.0142").unwrap();
        assert_eq!(phone.formatted(), "(503) 555-0142");
    }

    #[test]
    fn test_formatted_other_lengths_unchanged() {
        let phone = Phone::parse("+1 503 555 0142").unwrap();
        assert_eq!(phone.formatted(), "+1 503 555 0142");
    }

    #[test]
    fn test_serde_roundtrip() {
        let phone = Phone::parse("503-555-0142").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"503-555-0142\"");

        let parsed: Phone = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, phone);
    }
}
