//! # rental-core: Pure Business Logic for the Rental Showroom
//!
//! This crate is the **heart** of the showroom. It contains the catalog,
//! filtering, quoting and booking rules as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Rental Showroom Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Presentation Layer                           │   │
//! │  │    Search bar ──► Vehicle cards ──► Booking wizard              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ShowroomView snapshots                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    showroom (controller)                        │   │
//! │  │    search, apply_filter, start_booking, submit_booking, etc.    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               rental-booking (async sessions)                   │   │
//! │  │       single-flight submission, cancellation, config            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ rental-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │ catalog  │ │  filter  │ │  quote   │ │     booking      │  │   │
//! │  │   │ Vehicle  │ │ Criteria │ │  Money   │ │  BookingDraft    │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO ASYNC • NO CLOCK • PURE FUNCTIONS                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Vehicle, Category, Location, RentalPeriod)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - Immutable vehicle catalog and built-in fleet
//! - [`filter`] - Search criteria and the filter predicate
//! - [`quote`] - Daily price × inclusive day count
//! - [`offers`] - Early booking and weekend promotions
//! - [`packages`] - Flat-rate rental packages
//! - [`booking`] - Booking wizard state machine
//! - [`input`] - Payment field formatters
//! - [`validation`] - Per-field validation rules
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output; "today" is a parameter
//! 2. **No I/O**: network, file system and timers are FORBIDDEN here
//! 3. **Integer Money**: prices are centavos (i64)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rental_core::{Catalog, RentalPeriod, SearchCriteria};
//! use rental_core::quote::quote;
//!
//! let catalog = Catalog::fleet();
//! let criteria = SearchCriteria {
//!     category: Some("SUV".to_string()),
//!     ..Default::default()
//! };
//!
//! let period = RentalPeriod::new(
//!     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
//! ).unwrap();
//!
//! for vehicle in catalog.filter(&criteria) {
//!     let total = quote(vehicle.price(), Some(period));
//!     assert_eq!(total, vehicle.price() * 3);
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod booking;
pub mod catalog;
pub mod error;
pub mod filter;
pub mod input;
pub mod money;
pub mod offers;
pub mod packages;
pub mod quote;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use rental_core::Money` instead of
// `use rental_core::money::Money`

pub use booking::{BookingDraft, BookingPhase, BookingRequest, PaymentDetails, PersonalInfo, SubmitOutcome};
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError, ValidationErrors};
pub use filter::SearchCriteria;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Lower price filter bound when the visitor has not set one, in pesos.
pub const DEFAULT_PRICE_MIN_PESOS: i64 = 0;

/// Upper price filter bound when the visitor has not set one, in pesos.
pub const DEFAULT_PRICE_MAX_PESOS: i64 = 10_000;

/// Highest daily price a catalog may carry, in pesos.
///
/// At this price a rental spanning every representable date still fits
/// in an `i64` of centavos.
pub const MAX_DAILY_PRICE_PESOS: i64 = 100_000_000;

/// Fewest digits a card number may have.
pub const CARD_DIGITS_MIN: usize = 13;

/// Most digits a card number may have.
pub const CARD_DIGITS_MAX: usize = 19;

/// Formatted card number length: four groups of four plus three spaces.
pub const CARD_NUMBER_MAX_CHARS: usize = 19;

/// Formatted expiry length (`MM/YY`).
pub const EXPIRY_MAX_CHARS: usize = 5;

pub const CVV_DIGITS: usize = 3;

/// Longest accepted free-text field (names, ID, phone).
pub const MAX_TEXT_FIELD_LEN: usize = 200;

/// Early booking discount, in basis points (10%).
pub const EARLY_BOOKING_DISCOUNT_BPS: u32 = 1000;

/// Days between booking and pickup needed for the early booking discount.
pub const EARLY_BOOKING_MIN_DAYS: i64 = 7;
