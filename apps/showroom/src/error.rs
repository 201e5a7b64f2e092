//! # API Error Type
//!
//! Unified error type for showroom commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Showroom                           │
//! │                                                                         │
//! │  Presentation                Rust Backend                               │
//! │  ────────────                ────────────                               │
//! │                                                                         │
//! │  submit_booking()                                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Field failure? ─── CoreError::InvalidFields ─────┐             │  │
//! │  │         │                                          │             │  │
//! │  │         ▼                                          ▼             │  │
//! │  │  Service failure? ─ BookingError::Timeout ─────── ApiError ─────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  e.code = "VALIDATION_ERROR"                                           │
//! │  e.fields = ["phone"]         ◄── highlight exactly these inputs       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rental_booking::BookingError;
use rental_core::CoreError;
use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

/// API error returned from showroom commands.
///
/// ## Serialization
/// This is what the presentation layer receives when a command fails:
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "phone is required",
///   "fields": ["phone"],
///   "retryable": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
#[error("[{code:?}] {message}")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Form fields that failed validation; empty for other errors
    pub fields: Vec<String>,

    /// Whether submitting again may succeed
    pub retryable: bool,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Vehicle not in the catalog
    NotFound,

    /// One or more form fields failed validation
    ValidationError,

    /// Return date before pickup date
    InvalidRange,

    /// Booking service failed or timed out
    SubmissionFailed,

    /// The booking flow was closed, or no booking is open
    SessionClosed,

    /// Configuration or catalog source problem
    ConfigError,

    /// Action not allowed in the current state, or an unexpected failure
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            fields: Vec::new(),
            retryable: false,
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error naming the failed fields.
    pub fn validation<S: Into<String>>(message: impl Into<String>, fields: impl IntoIterator<Item = S>) -> Self {
        ApiError {
            fields: fields.into_iter().map(Into::into).collect(),
            ..ApiError::new(ErrorCode::ValidationError, message)
        }
    }

    /// Creates an error for commands that need an open booking.
    pub fn no_active_booking() -> Self {
        ApiError::new(ErrorCode::SessionClosed, "No booking in progress")
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::VehicleNotFound(id) => ApiError::not_found("Vehicle", id),
            CoreError::InvalidRange { .. } => ApiError::new(ErrorCode::InvalidRange, err.to_string()),
            CoreError::InvalidFields(_) | CoreError::Validation(_) => {
                let fields: Vec<String> = err.failed_fields().into_iter().map(String::from).collect();
                ApiError::validation(err.to_string(), fields)
            }
            CoreError::DuplicateVehicleId(_) | CoreError::CatalogParse(_) => {
                ApiError::new(ErrorCode::ConfigError, err.to_string())
            }
            CoreError::InvalidTransition { .. } => {
                tracing::debug!(error = %err, "Rejected booking action");
                ApiError::internal(err.to_string())
            }
        }
    }
}

/// Converts booking errors to API errors.
impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        let retryable = err.is_retryable();
        match err {
            BookingError::Core(core) => ApiError::from(core),
            BookingError::SubmissionFailed(_) | BookingError::Timeout(_) => ApiError {
                retryable,
                ..ApiError::new(ErrorCode::SubmissionFailed, err.to_string())
            },
            BookingError::SessionClosed => {
                ApiError::new(ErrorCode::SessionClosed, err.to_string())
            }
            BookingError::InvalidConfig(_)
            | BookingError::ConfigLoadFailed(_)
            | BookingError::ConfigSaveFailed(_) => {
                tracing::error!(error = %err, "Configuration error");
                ApiError::new(ErrorCode::ConfigError, err.to_string())
            }
        }
    }
}
