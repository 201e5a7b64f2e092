//! # rental-booking: Booking Submission for the Rental Showroom
//!
//! This crate wraps the pure booking state machine from `rental-core` with
//! the one asynchronous operation in the system: confirming a booking with
//! an external booking service.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Booking Session Architecture                       │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                 BookingSession (one per wizard)                  │  │
//! │  │                                                                  │  │
//! │  │  Mutex<Option<BookingDraft>>   draft, None once closed          │  │
//! │  │  watch::Sender<bool>           cancellation signal              │  │
//! │  │  Duration                      service call timeout             │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │ BookingRequest                          │
//! │                               ▼                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │              dyn BookingService (async trait)                    │  │
//! │  │                                                                  │  │
//! │  │  SimulatedBookingService: fixed delay, always confirms          │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  GUARANTEES:                                                           │
//! │  • Single-flight: a submit while Submitting never reaches the service │
//! │  • Cancellation: close() during Submitting discards the late result   │
//! │  • Recovery: failure/timeout returns the draft to Payment, data kept  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`session`] - `BookingSession` with single-flight and cancellation
//! - [`service`] - `BookingService` trait and the simulated service
//! - [`config`] - Showroom configuration (TOML + environment)
//! - [`error`] - Booking error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rental_booking::{BookingSession, RentalConfig, SimulatedBookingService};
//!
//! let config = RentalConfig::load_or_default(None);
//! let service = Arc::new(SimulatedBookingService::from_settings(&config.submission));
//! let session = BookingSession::with_settings(draft, service, &config.submission);
//!
//! session.update_personal(personal).await?;
//! session.submit().await?;              // AdvancedToPayment
//! session.update_payment(payment).await?;
//! let outcome = session.submit().await?; // Completed(confirmation)
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod service;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{CatalogSettings, RentalConfig, SearchSettings, SubmissionSettings};
pub use error::{BookingError, BookingResult};
pub use service::{BookingConfirmation, BookingService, SimulatedBookingService};
pub use session::{BookingSession, SessionOutcome};
