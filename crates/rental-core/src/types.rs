//! # Domain Types
//!
//! Core domain types used throughout the showroom.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Vehicle      │   │   PriceRange    │   │  RentalPeriod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u32)       │   │  min (Money)    │   │  start (date)   │       │
//! │  │  name, image    │   │  max (Money)    │   │  end (date)     │       │
//! │  │  price_cents    │   │  inclusive      │   │  end >= start   │       │
//! │  │  category       │   └─────────────────┘   └─────────────────┘       │
//! │  │  features       │                                                    │
//! │  │  rating 0..=5   │   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  available      │   │    Category     │   │    Location     │       │
//! │  │  popular        │   │  SUV / Sedán /  │   │  Santo Domingo  │       │
//! │  └─────────────────┘   │  Pickup         │   │  Punta Cana ... │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Vehicles are immutable once loaded into a [`Catalog`](crate::catalog::Catalog).
//! Nothing in this crate hands out `&mut Vehicle`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::{DEFAULT_PRICE_MAX_PESOS, DEFAULT_PRICE_MIN_PESOS};

/// Stable catalog identifier of a vehicle.
pub type VehicleId = u32;

// =============================================================================
// Category
// =============================================================================

/// Vehicle body category.
///
/// The wire labels are the ones shown in the filter dropdown. Matching
/// against a filter string is exact and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Category {
    #[serde(rename = "SUV")]
    Suv,
    #[serde(rename = "Sedán")]
    Sedan,
    #[serde(rename = "Pickup")]
    Pickup,
}

impl Category {
    /// Every category, in dropdown order.
    pub const ALL: [Category; 3] = [Category::Suv, Category::Sedan, Category::Pickup];

    /// The exact label used for display and filtering.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Suv => "SUV",
            Category::Sedan => "Sedán",
            Category::Pickup => "Pickup",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "category".to_string(),
                reason: format!("unknown category '{}'", s),
            })
    }
}

// =============================================================================
// Vehicle
// =============================================================================

/// A rentable vehicle in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// Unique, stable identifier.
    pub id: VehicleId,

    /// Display name, e.g. "Toyota RAV4".
    pub name: String,

    /// Image reference (path or URL), opaque.
    pub image: String,

    /// Daily price in centavos.
    pub price_cents: i64,

    /// `None` for an uncategorized vehicle, written as `""` on the wire.
    /// Such a vehicle only shows up when no category filter is set.
    #[serde(default, with = "category_label")]
    #[ts(type = "string")]
    pub category: Option<Category>,

    /// Short feature labels. The card renders positions 0, 1 and 2 with
    /// fixed icons (seats, transmission, fuel).
    pub features: Vec<String>,

    /// Customer rating, 0.0 to 5.0.
    pub rating: f32,

    pub available: bool,

    /// Shown in the curated "most popular" listing.
    pub popular: bool,
}

impl Vehicle {
    /// Returns the daily price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// The category label, or `""` when uncategorized.
    pub fn category_label(&self) -> &'static str {
        self.category.as_ref().map_or("", Category::as_str)
    }
}

/// Category as its label, with `""` (or `null`) meaning uncategorized.
mod category_label {
    use super::*;
    use serde::de::Error as _;

    pub fn serialize<S: Serializer>(category: &Option<Category>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(category.as_ref().map_or("", Category::as_str))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Category>, D::Error> {
        match Option::<String>::deserialize(deserializer)?.as_deref() {
            None | Some("") => Ok(None),
            Some(label) => label.parse().map(Some).map_err(D::Error::custom),
        }
    }
}

// =============================================================================
// Location
// =============================================================================

/// Pickup locations offered by the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum Location {
    SantoDomingo,
    PuntaCana,
    Santiago,
    PuertoPlata,
}

impl Location {
    pub const ALL: [Location; 4] = [
        Location::SantoDomingo,
        Location::PuntaCana,
        Location::Santiago,
        Location::PuertoPlata,
    ];

    /// The value the search form submits.
    pub const fn slug(&self) -> &'static str {
        match self {
            Location::SantoDomingo => "santo-domingo",
            Location::PuntaCana => "punta-cana",
            Location::Santiago => "santiago",
            Location::PuertoPlata => "puerto-plata",
        }
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            Location::SantoDomingo => "Santo Domingo",
            Location::PuntaCana => "Punta Cana",
            Location::Santiago => "Santiago",
            Location::PuertoPlata => "Puerto Plata",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Location> {
        Location::ALL.into_iter().find(|l| l.slug() == slug)
    }

    /// Label for a pickup location as entered in the search form.
    ///
    /// Known slugs map to their display name, unknown text is shown as
    /// typed, and an empty value falls back to Santo Domingo.
    pub fn pickup_label(raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() {
            return Location::SantoDomingo.display_name().to_string();
        }
        match Location::from_slug(raw) {
            Some(location) => location.display_name().to_string(),
            None => raw.to_string(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// =============================================================================
// Price Range
// =============================================================================

/// Inclusive daily-price bounds used by the filter.
///
/// `min > max` is accepted: such a range simply contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceRange {
    pub min: Money,
    pub max: Money,
}

impl PriceRange {
    pub const fn new(min: Money, max: Money) -> Self {
        PriceRange { min, max }
    }

    /// Bounds in whole pesos, as typed into the filter form.
    pub const fn from_pesos(min: i64, max: i64) -> Self {
        PriceRange {
            min: Money::from_pesos(min),
            max: Money::from_pesos(max),
        }
    }

    #[inline]
    pub fn contains(&self, price: Money) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        PriceRange::from_pesos(DEFAULT_PRICE_MIN_PESOS, DEFAULT_PRICE_MAX_PESOS)
    }
}

// =============================================================================
// Rental Period
// =============================================================================

/// A validated pickup/return date pair.
///
/// Both days are included: a same-day rental is one day. Only serialized,
/// never deserialized, so every instance went through [`RentalPeriod::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RentalPeriod {
    #[ts(as = "String")]
    start: NaiveDate,
    #[ts(as = "String")]
    end: NaiveDate,
}

impl RentalPeriod {
    /// Creates a period, rejecting a return date before the pickup date.
    pub fn new(start: NaiveDate, end: NaiveDate) -> CoreResult<Self> {
        if end < start {
            return Err(CoreError::InvalidRange { start, end });
        }
        Ok(RentalPeriod { start, end })
    }

    /// Builds a period from optional form dates.
    ///
    /// Returns `Ok(None)` unless both dates are present.
    pub fn from_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> CoreResult<Option<Self>> {
        match (start, end) {
            (Some(start), Some(end)) => RentalPeriod::new(start, end).map(Some),
            _ => Ok(None),
        }
    }

    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive day count; always at least 1.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
