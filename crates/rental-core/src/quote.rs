//! # Quote Calculator
//!
//! Total price for renting one vehicle over an optional period.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  period absent         → total = daily                                 │
//! │  period present        → total = daily × (end − start + 1)             │
//! │                                                                         │
//! │  2024-06-01 .. 2024-06-03 at RD$ 100.00/day                            │
//! │      days  = 2 + 1 = 3                                                  │
//! │      total = RD$ 300.00                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reversed ranges never reach this function: [`RentalPeriod`] cannot hold
//! one, so the day count is always at least 1 and a non-negative daily
//! price always gives a non-negative total.

use crate::money::Money;
use crate::types::RentalPeriod;

/// Computes the quote for `daily` over `period`.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use rental_core::money::Money;
/// use rental_core::quote::quote;
/// use rental_core::types::RentalPeriod;
///
/// let period = RentalPeriod::new(
///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
/// ).unwrap();
/// assert_eq!(quote(Money::from_pesos(100), Some(period)), Money::from_pesos(300));
/// assert_eq!(quote(Money::from_pesos(100), None), Money::from_pesos(100));
/// ```
pub fn quote(daily: Money, period: Option<RentalPeriod>) -> Money {
    match period {
        Some(period) => daily.multiply_days(period.days()),
        None => daily,
    }
}

/// Number of days billed for `period`; a missing period bills one day.
pub fn billed_days(period: Option<RentalPeriod>) -> i64 {
    period.map_or(1, |p| p.days())
}
