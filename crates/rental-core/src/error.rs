//! # Error Types
//!
//! Domain-specific error types for rental-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rental-core errors (this file)                                        │
//! │  ├── CoreError         - General domain errors                         │
//! │  ├── ValidationError   - One field failed presence/format checks       │
//! │  └── ValidationErrors  - Every failed field of one booking step        │
//! │                                                                         │
//! │  rental-booking errors (separate crate)                                │
//! │  └── BookingError      - Submission, timeout, config failures          │
//! │                                                                         │
//! │  showroom errors (in app)                                              │
//! │  └── ApiError          - What the presentation layer sees              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → BookingError → ApiError           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are fatal. Every failure leaves the caller in a state the
//! user can correct and re-enter.

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No vehicle in the catalog has this identifier.
    #[error("Vehicle not found: {0}")]
    VehicleNotFound(u32),

    /// Two catalog records share an identifier.
    #[error("Duplicate vehicle id in catalog: {0}")]
    DuplicateVehicleId(u32),

    /// Return date falls before the pickup date.
    ///
    /// ## When This Occurs
    /// ```text
    /// Search form: pickup 2024-06-03, return 2024-06-01
    ///      │
    ///      ▼
    /// RentalPeriod::new() rejects before any quote is computed
    ///      │
    ///      ▼
    /// InvalidRange { start: 2024-06-03, end: 2024-06-01 }
    /// ```
    #[error("Return date {end} is before pickup date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// The booking flow cannot perform `action` from its current state.
    #[error("Cannot {action} while booking is {state}")]
    InvalidTransition { state: String, action: String },

    /// One or more form fields failed validation.
    #[error("{0}")]
    InvalidFields(ValidationErrors),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Catalog source could not be parsed.
    #[error("Failed to parse catalog: {0}")]
    CatalogParse(String),
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        CoreError::InvalidFields(errors)
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::CatalogParse(err.to_string())
    }
}

impl CoreError {
    /// Returns the names of the fields that failed, if this is a field error.
    pub fn failed_fields(&self) -> Vec<&str> {
        match self {
            CoreError::InvalidFields(errors) => errors.fields(),
            CoreError::Validation(err) => vec![err.field()],
            _ => Vec::new(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Each variant names the field so the form can highlight it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Field has the wrong number of digits.
    #[error("{field} must have between {min} and {max} digits")]
    InvalidLength { field: String, min: usize, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: String, max: String },

    /// Invalid format (e.g., malformed date, bad expiry month).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// The name of the field this error refers to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidLength { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// Validation Errors (collection)
// =============================================================================

/// Every field failure produced while validating one booking step.
///
/// The booking form checks all fields before reporting, so a user who
/// leaves two fields blank sees both at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the error from `result`, if any.
    pub fn check<T>(&mut self, result: Result<T, ValidationError>) {
        if let Err(err) = result {
            self.0.push(err);
        }
    }

    /// Returns `Ok(())` when nothing failed.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Names of the failed fields, in check order.
    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(ValidationError::field).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidRange {
            start: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Return date 2024-06-01 is before pickup date 2024-06-03"
        );

        let err = CoreError::InvalidTransition {
            state: "submitting".to_string(),
            action: "edit payment details".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot edit payment details while booking is submitting"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "phone".to_string(),
        };
        assert_eq!(err.to_string(), "phone is required");
        assert_eq!(err.field(), "phone");

        let err = ValidationError::InvalidLength {
            field: "cardNumber".to_string(),
            min: 13,
            max: 19,
        };
        assert_eq!(err.to_string(), "cardNumber must have between 13 and 19 digits");
    }

    #[test]
    fn test_validation_errors_collects_failures() {
        let mut errors = ValidationErrors::new();
        errors.check::<()>(Ok(()));
        errors.check::<()>(Err(ValidationError::Required {
            field: "fullName".to_string(),
        }));
        errors.check::<()>(Err(ValidationError::Required {
            field: "phone".to_string(),
        }));

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.fields(), vec!["fullName", "phone"]);
        assert_eq!(errors.to_string(), "fullName is required; phone is required");
        assert!(errors.into_result().is_err());
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "cvv".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.failed_fields(), vec!["cvv"]);
    }
}
