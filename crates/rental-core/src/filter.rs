//! # Filter Engine
//!
//! Narrows the catalog by the visitor's search and filter controls.
//!
//! ## Predicate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A vehicle is listed when ALL of these hold:                           │
//! │                                                                         │
//! │  1. Category   criteria.category empty/absent                          │
//! │                OR equals vehicle.category label (case-sensitive)       │
//! │                                                                         │
//! │  2. Price      min <= vehicle.price <= max   (inclusive)               │
//! │                default bounds RD$ 0 .. RD$ 10,000                       │
//! │                min > max matches nothing                                │
//! │                                                                         │
//! │  3. Location   criteria.location empty                                 │
//! │                OR vehicle.available                                     │
//! │                (the location text itself is not compared to anything) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The result keeps catalog order and borrows from the input; nothing is
//! sorted, copied or mutated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::types::{PriceRange, RentalPeriod, Vehicle};
use crate::validation::{fields, parse_iso_date, validate_pickup_date};

// =============================================================================
// Search Criteria
// =============================================================================

/// The visitor's current search and filter choices.
///
/// Every field empty or absent means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchCriteria {
    /// Selected or typed pickup location; empty means no constraint.
    pub location: String,

    #[ts(as = "Option<String>")]
    pub start_date: Option<NaiveDate>,

    #[ts(as = "Option<String>")]
    pub end_date: Option<NaiveDate>,

    /// Category label; `None` or `""` means all categories.
    pub category: Option<String>,

    /// Daily price bounds; `None` means the default RD$ 0 .. RD$ 10,000.
    pub price_range: Option<PriceRange>,
}

impl SearchCriteria {
    /// Sets the pickup and return dates after checking them.
    ///
    /// ## Errors
    /// - `InvalidRange` when the return date is before the pickup date
    /// - `Validation` when the pickup date is before `today`
    ///
    /// On error the criteria are left unchanged.
    pub fn set_dates(
        &mut self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> CoreResult<()> {
        if let Some(start) = start {
            validate_pickup_date(start, today)?;
        }
        RentalPeriod::from_dates(start, end)?;

        self.start_date = start;
        self.end_date = end;
        Ok(())
    }

    /// Parses `YYYY-MM-DD` form values (empty = not selected), then
    /// behaves like [`set_dates`](Self::set_dates).
    pub fn set_dates_from_form(&mut self, start: &str, end: &str, today: NaiveDate) -> CoreResult<()> {
        let start = parse_iso_date(fields::START_DATE, start)?;
        let end = parse_iso_date(fields::END_DATE, end)?;
        self.set_dates(start, end, today)
    }

    /// The rental period, when both dates are set.
    pub fn rental_period(&self) -> CoreResult<Option<RentalPeriod>> {
        RentalPeriod::from_dates(self.start_date, self.end_date)
    }

    /// Price bounds in effect.
    pub fn effective_price_range(&self) -> PriceRange {
        self.price_range.unwrap_or_default()
    }

    /// The category constraint, if any.
    pub fn category_filter(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    /// Returns true if `vehicle` passes every predicate.
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        let matches_category = self
            .category_filter()
            .map_or(true, |c| vehicle.category_label() == c);
        let matches_price = self.effective_price_range().contains(vehicle.price());
        let matches_location = self.location.is_empty() || vehicle.available;

        matches_category && matches_price && matches_location
    }
}

// =============================================================================
// Filter
// =============================================================================

/// Returns the vehicles matching `criteria`, preserving catalog order.
///
/// ## Example
/// ```rust
/// use rental_core::catalog::Catalog;
/// use rental_core::filter::{filter, SearchCriteria};
///
/// let catalog = Catalog::fleet();
/// let criteria = SearchCriteria {
///     category: Some("Pickup".to_string()),
///     ..Default::default()
/// };
/// let pickups = filter(catalog.vehicles(), &criteria);
/// assert!(pickups.iter().all(|v| v.category_label() == "Pickup"));
/// ```
pub fn filter<'a>(catalog: &'a [Vehicle], criteria: &SearchCriteria) -> Vec<&'a Vehicle> {
    catalog.iter().filter(|v| criteria.matches(v)).collect()
}

/// Returns every popular vehicle, preserving catalog order.
pub fn popular(catalog: &[Vehicle]) -> Vec<&Vehicle> {
    catalog.iter().filter(|v| v.popular).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
