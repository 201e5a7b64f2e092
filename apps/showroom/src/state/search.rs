//! # Search State
//!
//! The visitor's current search and filter choices.

use std::sync::{Mutex, MutexGuard};

use rental_core::types::PriceRange;
use rental_core::SearchCriteria;

/// Current `SearchCriteria`, replaced only through validated updates.
#[derive(Debug, Default)]
pub struct SearchState {
    criteria: Mutex<SearchCriteria>,
    /// Configured bounds, restored when the filter panel clears its range.
    default_price_range: PriceRange,
}

impl SearchState {
    /// Starts with no location, no dates and the configured price bounds.
    pub fn new(price_range: PriceRange) -> Self {
        SearchState {
            criteria: Mutex::new(SearchCriteria {
                price_range: Some(price_range),
                ..SearchCriteria::default()
            }),
            default_price_range: price_range,
        }
    }

    pub fn default_price_range(&self) -> PriceRange {
        self.default_price_range
    }

    /// Executes a function with read access to the criteria.
    pub fn with_criteria<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SearchCriteria) -> R,
    {
        f(&self.lock())
    }

    /// Executes a function with write access to the criteria.
    pub fn with_criteria_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SearchCriteria) -> R,
    {
        f(&mut self.lock())
    }

    /// Copy of the current criteria.
    pub fn snapshot(&self) -> SearchCriteria {
        self.with_criteria(SearchCriteria::clone)
    }

    // Criteria are plain data; a panic elsewhere cannot leave them half-updated
    fn lock(&self) -> MutexGuard<'_, SearchCriteria> {
        self.criteria.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
