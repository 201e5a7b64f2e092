//! # Booking Error Types
//!
//! Error types for booking submission and configuration.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Booking Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Submission    │  │     Session             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Failed         │  │  SessionClosed          │ │
//! │  │  ConfigLoad     │  │  Timeout        │  │  Core (state machine,   │ │
//! │  │  ConfigSave     │  │                 │  │        field checks)    │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rental_core::CoreError;
use thiserror::Error;

/// Result type alias for booking operations.
pub type BookingResult<T> = Result<T, BookingError>;

/// Booking error type covering every failure a session can report.
///
/// None of these discard the user's entered data.
#[derive(Debug, Error)]
pub enum BookingError {
    // =========================================================================
    // Draft Errors
    // =========================================================================
    /// The booking draft rejected the action (invalid fields, wrong state).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The session was closed; its draft no longer exists.
    #[error("Booking session is closed")]
    SessionClosed,

    // =========================================================================
    // Submission Errors
    // =========================================================================
    /// The booking service reported a failure.
    #[error("Booking submission failed: {0}")]
    SubmissionFailed(String),

    /// The booking service did not answer in time.
    #[error("Booking submission timed out after {0} seconds")]
    Timeout(u64),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid booking configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for BookingError {
    fn from(err: std::io::Error) -> Self {
        BookingError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for BookingError {
    fn from(err: toml::de::Error) -> Self {
        BookingError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for BookingError {
    fn from(err: toml::ser::Error) -> Self {
        BookingError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization (for retry decisions)
// =============================================================================

impl BookingError {
    /// Returns true if submitting the same draft again may succeed.
    ///
    /// ## Retryable Errors
    /// - Service failures
    /// - Timeouts
    ///
    /// ## Non-Retryable Errors
    /// - Field validation failures (the user must fix the form first)
    /// - Closed sessions
    /// - Configuration errors
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BookingError::SubmissionFailed(_) | BookingError::Timeout(_)
        )
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            BookingError::InvalidConfig(_)
                | BookingError::ConfigLoadFailed(_)
                | BookingError::ConfigSaveFailed(_)
        )
    }

    /// Names of the form fields that failed validation, if any.
    pub fn failed_fields(&self) -> Vec<&str> {
        match self {
            BookingError::Core(err) => err.failed_fields(),
            _ => Vec::new(),
        }
    }
}
