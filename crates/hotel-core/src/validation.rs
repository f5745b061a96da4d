//! # Validation Module
//!
//! Parsing of raw console lines into typed values.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE                                                  │
//! │  ├── Shape checks: integer, float, MM/DD/YYYY, non-empty               │
//! │  └── Failure → ValidationError → handler re-prompts                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Handler existence checks (hotel / room / company exist)      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database constraints                                         │
//! │  ├── UNIQUE (hotel, room, booking date)                                │
//! │  └── Foreign keys                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use hotel_core::validation::{parse_date, parse_id};
//!
//! assert_eq!(parse_id("hotel ID", " 42 ").unwrap(), 42);
//! assert!(parse_date("02/30/2024").is_err());
//! ```

use chrono::NaiveDate;

use crate::error::{ValidationError, ValidationResult};
use crate::{Id, DATE_FORMAT};

/// Longest name the `Users.name` column holds.
pub const MAX_NAME_LEN: usize = 50;

// =============================================================================
// Numbers
// =============================================================================

/// Parses an integer identifier (user, hotel, room, company).
pub fn parse_id(field: &str, input: &str) -> ValidationResult<Id> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::required(field));
    }

    input
        .parse::<Id>()
        .map_err(|_| ValidationError::invalid_format(field, "must be an integer"))
}

/// Parses a menu choice.
pub fn parse_choice(input: &str) -> ValidationResult<u32> {
    input
        .trim()
        .parse::<u32>()
        .map_err(|_| ValidationError::invalid_format("choice", "must be a menu number"))
}

/// Parses a latitude or longitude.
///
/// Any finite number is accepted; the database stores planar units.
pub fn parse_coordinate(field: &str, input: &str) -> ValidationResult<f64> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::required(field));
    }

    let value = input
        .parse::<f64>()
        .map_err(|_| ValidationError::invalid_format(field, "must be a number"))?;

    if !value.is_finite() {
        return Err(ValidationError::invalid_format(field, "must be a finite number"));
    }

    Ok(value)
}

/// Parses a room price in whole dollars. A leading `$` is tolerated.
///
/// ## Example
/// ```rust
/// use hotel_core::validation::parse_price;
///
/// assert_eq!(parse_price("$120").unwrap(), 120);
/// assert!(parse_price("-5").is_err());
/// ```
pub fn parse_price(input: &str) -> ValidationResult<i32> {
    let input = input.trim();
    let input = input.strip_prefix('$').unwrap_or(input).trim();

    if input.is_empty() {
        return Err(ValidationError::required("price"));
    }

    let value = input
        .parse::<i64>()
        .map_err(|_| ValidationError::invalid_format("price", "must be a whole number"))?;

    if value < 0 || value > i32::MAX as i64 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0.0,
            max: i32::MAX as f64,
        });
    }

    Ok(value as i32)
}

/// Checks a search radius.
pub fn validate_radius(radius: f64) -> ValidationResult<()> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "radius".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Dates
// =============================================================================

/// Parses a MM/DD/YYYY date.
///
/// ## Rules
/// - Month 1-12, day valid for that month (leap years included)
/// - Four-digit year
///
/// ## Example
/// ```rust
/// use hotel_core::validation::parse_date;
///
/// assert!(parse_date("01/15/2024").is_ok());
/// assert!(parse_date("13/40/2024").is_err());
/// ```
pub fn parse_date(input: &str) -> ValidationResult<NaiveDate> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::required("date"));
    }

    let year_ok = input
        .rsplit('/')
        .next()
        .map(|y| y.len() == 4 && y.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false);

    if !year_ok {
        return Err(ValidationError::invalid_format("date", "expected MM/DD/YYYY"));
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| ValidationError::invalid_format("date", "expected MM/DD/YYYY"))
}

/// Checks that `start` is not after `end`.
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> ValidationResult<()> {
    if start > end {
        return Err(ValidationError::InvertedRange {
            start: crate::types::format_date(start),
            end: crate::types::format_date(end),
        });
    }

    Ok(())
}

// =============================================================================
// Strings
// =============================================================================

/// Validates a user name for account creation.
///
/// ## Returns
/// The trimmed name.
pub fn validate_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::invalid_format(
            "name",
            format!("must be at most {} characters", MAX_NAME_LEN),
        ));
    }

    Ok(name.to_string())
}

/// Validates a password (must not be empty).
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::required("password"));
    }

    Ok(())
}

/// Validates an image URL.
///
/// ## Returns
/// The trimmed URL.
pub fn validate_image_url(url: &str) -> ValidationResult<String> {
    let url = url.trim();

    if url.is_empty() {
        return Err(ValidationError::required("image URL"));
    }

    if url.chars().any(char::is_whitespace) {
        return Err(ValidationError::invalid_format(
            "image URL",
            "must not contain spaces",
        ));
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("01/15/2024").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert!(parse_date(" 02/29/2024 ").is_ok());

        assert!(parse_date("13/40/2024").is_err());
        assert!(parse_date("02/30/2024").is_err());
        assert!(parse_date("02/29/2023").is_err());
        assert!(parse_date("2024-01-15").is_err());
        assert!(parse_date("01/15/24").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("userID", "17").unwrap(), 17);
        assert_eq!(parse_id("userID", " -3 ").unwrap(), -3);

        assert!(matches!(
            parse_id("userID", "abc"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_id("userID", "   "),
            Err(ValidationError::Required { .. })
        ));
        assert!(parse_id("userID", "1 OR 1=1").is_err());
        assert!(parse_id("userID", "99999999999").is_err());
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("20\n").unwrap(), 20);
        assert!(parse_choice("two").is_err());
        assert!(parse_choice("-1").is_err());
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("latitude", "33.97").unwrap(), 33.97);
        assert_eq!(parse_coordinate("longitude", "-117").unwrap(), -117.0);
        assert!(parse_coordinate("latitude", "north").is_err());
        assert!(parse_coordinate("latitude", "NaN").is_err());
        assert!(parse_coordinate("latitude", "inf").is_err());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("150").unwrap(), 150);
        assert_eq!(parse_price("$ 99").unwrap(), 99);
        assert_eq!(parse_price("0").unwrap(), 0);
        assert!(parse_price("-1").is_err());
        assert!(parse_price("12.50").is_err());
        assert!(parse_price("$").is_err());
    }

    #[test]
    fn test_validate_date_range() {
        let jan = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let feb = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();

        assert!(validate_date_range(jan, feb).is_ok());
        assert!(validate_date_range(jan, jan).is_ok());
        assert_eq!(
            validate_date_range(feb, jan).unwrap_err().to_string(),
            "02/01/2024 must not be after 01/01/2024"
        );
    }

    #[test]
    fn test_validate_strings() {
        assert_eq!(validate_name("  Ada ").unwrap(), "Ada");
        assert!(validate_name("").is_err());
        assert!(validate_name(&"x".repeat(51)).is_err());

        assert!(validate_password("secret").is_ok());
        assert!(validate_password("").is_err());

        assert_eq!(validate_image_url(" img/a.png ").unwrap(), "img/a.png");
        assert!(validate_image_url("a b").is_err());
    }

    #[test]
    fn test_validate_radius() {
        assert!(validate_radius(30.0).is_ok());
        assert!(validate_radius(0.0).is_err());
        assert!(validate_radius(f64::NAN).is_err());
    }
}
