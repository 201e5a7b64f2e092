//! # Validation Module
//!
//! Explicit, per-field validation for the search and booking forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Input formatting (input.rs)                                  │
//! │  ├── Strips non-digits, groups card numbers, inserts expiry slash      │
//! │  └── Runs on every keystroke, never fails                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Presence checks (name, ID, phone, cardholder)                     │
//! │  ├── Format checks (card digits, MM/YY, CVV)                           │
//! │  └── Date edge checks (ISO parse, pickup not in the past)              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Booking state machine (booking.rs)                           │
//! │  └── Collects every failure of a step into ValidationErrors            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No browser-native `required` attribute is assumed to exist; every rule
//! the form needs is a function here.
//!
//! ## Usage
//! ```rust
//! use rental_core::validation::{validate_card_number, validate_expiry};
//!
//! assert!(validate_card_number("4111 1111 1111 1111").is_ok());
//! assert!(validate_expiry("13/25").is_err());
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::{CARD_DIGITS_MAX, CARD_DIGITS_MIN, CVV_DIGITS, MAX_TEXT_FIELD_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Names
// =============================================================================

/// Field names as the presentation layer knows them.
pub mod fields {
    pub const FULL_NAME: &str = "fullName";
    pub const NATIONAL_ID: &str = "nationalId";
    pub const PHONE: &str = "phone";
    pub const CARDHOLDER_NAME: &str = "cardholderName";
    pub const CARD_NUMBER: &str = "cardNumber";
    pub const EXPIRY: &str = "expiry";
    pub const CVV: &str = "cvv";
    pub const START_DATE: &str = "startDate";
    pub const END_DATE: &str = "endDate";
    pub const PRICE: &str = "price";
    pub const RATING: &str = "rating";
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a free-text field is present.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_TEXT_FIELD_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_FIELD_LEN,
        });
    }

    Ok(())
}

pub fn validate_full_name(name: &str) -> ValidationResult<()> {
    validate_required(fields::FULL_NAME, name)
}

/// Cédula or passport number. Any non-empty text is accepted.
pub fn validate_national_id(id: &str) -> ValidationResult<()> {
    validate_required(fields::NATIONAL_ID, id)
}

pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    validate_required(fields::PHONE, phone)
}

pub fn validate_cardholder_name(name: &str) -> ValidationResult<()> {
    validate_required(fields::CARDHOLDER_NAME, name)
}

// =============================================================================
// Payment Validators
// =============================================================================

/// Validates a card number.
///
/// ## Rules
/// - Grouping separators are ignored
/// - Between 13 and 19 digits
///
/// ## Example
/// ```rust
/// use rental_core::validation::validate_card_number;
///
/// assert!(validate_card_number("4111 1111 1111 1111").is_ok());
/// assert!(validate_card_number("4111 1111 111").is_err());
/// assert!(validate_card_number("").is_err());
/// ```
pub fn validate_card_number(card_number: &str) -> ValidationResult<()> {
    let digits = card_number.chars().filter(char::is_ascii_digit).count();

    if digits == 0 {
        return Err(ValidationError::Required {
            field: fields::CARD_NUMBER.to_string(),
        });
    }

    if !(CARD_DIGITS_MIN..=CARD_DIGITS_MAX).contains(&digits) {
        return Err(ValidationError::InvalidLength {
            field: fields::CARD_NUMBER.to_string(),
            min: CARD_DIGITS_MIN,
            max: CARD_DIGITS_MAX,
        });
    }

    Ok(())
}

/// Validates a card expiry in `MM/YY` form.
///
/// ## Rules
/// - Exactly two digits, a slash, two digits
/// - Month between 01 and 12
///
/// Whether the card has already expired is the payment processor's call.
pub fn validate_expiry(expiry: &str) -> ValidationResult<()> {
    if expiry.is_empty() {
        return Err(ValidationError::Required {
            field: fields::EXPIRY.to_string(),
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: fields::EXPIRY.to_string(),
        reason: reason.to_string(),
    };

    let (month, year) = expiry.split_once('/').ok_or_else(|| invalid("expected MM/YY"))?;
    let two_digits = |s: &str| s.len() == 2 && s.chars().all(|c| c.is_ascii_digit());
    if !two_digits(month) || !two_digits(year) {
        return Err(invalid("expected MM/YY"));
    }

    let month: u32 = month.parse().map_err(|_| invalid("expected MM/YY"))?;
    if !(1..=12).contains(&month) {
        return Err(invalid("month must be between 01 and 12"));
    }

    Ok(())
}

/// Validates a CVV: exactly three digits.
pub fn validate_cvv(cvv: &str) -> ValidationResult<()> {
    if cvv.is_empty() {
        return Err(ValidationError::Required {
            field: fields::CVV.to_string(),
        });
    }

    if cvv.len() != CVV_DIGITS || !cvv.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidLength {
            field: fields::CVV.to_string(),
            min: CVV_DIGITS,
            max: CVV_DIGITS,
        });
    }

    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`) from a form field.
///
/// An empty value means "not selected" and yields `Ok(None)`.
pub fn parse_iso_date(field: &str, value: &str) -> ValidationResult<Option<NaiveDate>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
        })
}

/// Rejects a pickup date before `today`.
pub fn validate_pickup_date(start: NaiveDate, today: NaiveDate) -> ValidationResult<()> {
    if start < today {
        return Err(ValidationError::OutOfRange {
            field: fields::START_DATE.to_string(),
            min: today.to_string(),
            max: "any later date".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a daily price in centavos: zero up to
/// [`MAX_DAILY_PRICE_PESOS`](crate::MAX_DAILY_PRICE_PESOS).
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    let max = crate::MAX_DAILY_PRICE_PESOS * 100;
    if !(0..=max).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: fields::PRICE.to_string(),
            min: "0".to_string(),
            max: max.to_string(),
        });
    }

    Ok(())
}

/// Validates a rating: finite and within 0.0 to 5.0.
pub fn validate_rating(rating: f32) -> ValidationResult<()> {
    if !rating.is_finite() || !(0.0..=5.0).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: fields::RATING.to_string(),
            min: "0".to_string(),
            max: "5".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
