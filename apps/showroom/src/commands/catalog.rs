//! # Catalog Commands
//!
//! Commands behind the search bar, the filter panel and the vehicle grid.
//!
//! ## Search Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌────────────┐   search()        ┌──────────────┐   get_view()        │
//! │  │ Search bar │──────────────────►│ SearchState  │──────────────────►  │
//! │  │ location,  │   dates checked   │              │   filter + quote    │
//! │  │ dates      │   before stored   │              │   every card        │
//! │  └────────────┘                   │              │                     │
//! │  ┌────────────┐   apply_filter()  │              │                     │
//! │  │ Filter     │──────────────────►│              │                     │
//! │  │ category,  │                   └──────────────┘                     │
//! │  │ price      │                                                        │
//! │  └────────────┘                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use rental_core::booking::BookingSummary;
use rental_core::offers::{best_offer, AppliedOffer};
use rental_core::packages::{packages, RentalPackage};
use rental_core::quote::{billed_days, quote};
use rental_core::{Location, Money, PriceRange, RentalPeriod, SearchCriteria, Vehicle, VehicleId};
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::{BookingState, CatalogState, SearchState};

// =============================================================================
// Response Types
// =============================================================================

/// A vehicle as shown in the grid, priced for the current dates.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VehicleCard {
    pub vehicle: Vehicle,
    /// Days billed; 1 when no dates are selected.
    pub days: i64,
    pub quote: Money,
}

impl VehicleCard {
    pub fn new(vehicle: &Vehicle, period: Option<RentalPeriod>) -> Self {
        VehicleCard {
            vehicle: vehicle.clone(),
            days: billed_days(period),
            quote: quote(vehicle.price(), period),
        }
    }
}

/// Everything the presentation layer needs to render the page.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShowroomView {
    /// Vehicles matching the criteria, in catalog order.
    pub vehicles: Vec<VehicleCard>,
    /// The curated listing; ignores the criteria.
    pub popular: Vec<VehicleCard>,
    pub criteria: SearchCriteria,
    pub period: Option<RentalPeriod>,
    /// The open booking wizard, if any.
    pub booking: Option<BookingSummary>,
}

/// One entry of the pickup location dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LocationOption {
    pub slug: String,
    pub name: String,
}

impl From<Location> for LocationOption {
    fn from(location: Location) -> Self {
        LocationOption {
            slug: location.slug().to_string(),
            name: location.display_name().to_string(),
        }
    }
}

// =============================================================================
// Commands
// =============================================================================

/// Builds the current page snapshot.
pub async fn get_view(
    catalog: &CatalogState,
    search: &SearchState,
    booking: &BookingState,
) -> Result<ShowroomView, ApiError> {
    debug!("get_view command");

    let criteria = search.snapshot();
    let period = criteria.rental_period()?;
    let catalog = catalog.inner();

    let vehicles = catalog
        .filter(&criteria)
        .into_iter()
        .map(|v| VehicleCard::new(v, period))
        .collect();
    let popular = catalog
        .popular()
        .into_iter()
        .map(|v| VehicleCard::new(v, period))
        .collect();

    // A session completing between the two reads has no summary left
    let booking = match booking.active().await {
        Some(session) => session.summary().await.ok(),
        None => None,
    };

    Ok(ShowroomView {
        vehicles,
        popular,
        criteria,
        period,
        booking,
    })
}

/// Applies the search bar: pickup location and dates.
///
/// ## Arguments
/// * `location` - Location slug or free text; empty means anywhere
/// * `start`, `end` - `YYYY-MM-DD`, empty when not selected
/// * `today` - The visitor's current date; earlier pickups are rejected
///
/// ## Errors
/// - `VALIDATION_ERROR` (`startDate`/`endDate`) for malformed or past dates
/// - `INVALID_RANGE` when the return date is before the pickup date
///
/// On error the stored criteria are unchanged.
pub fn search(
    search: &SearchState,
    location: &str,
    start: &str,
    end: &str,
    today: NaiveDate,
) -> Result<SearchCriteria, ApiError> {
    debug!(location = %location, start = %start, end = %end, "search command");

    search.with_criteria_mut(|criteria| -> Result<SearchCriteria, ApiError> {
        let mut next = criteria.clone();
        next.set_dates_from_form(start, end, today)?;
        next.location = location.trim().to_string();

        *criteria = next.clone();
        Ok(next)
    })
}

/// Applies the filter panel: category and price bounds.
///
/// An empty category means all categories. No price range restores the
/// configured bounds. `min > max` is accepted and simply matches nothing.
pub fn apply_filter(
    search: &SearchState,
    category: Option<String>,
    price_range: Option<PriceRange>,
) -> SearchCriteria {
    debug!(?category, ?price_range, "apply_filter command");

    let price_range = price_range.unwrap_or_else(|| search.default_price_range());
    search.with_criteria_mut(|criteria| {
        criteria.category = category.filter(|c| !c.is_empty());
        criteria.price_range = Some(price_range);
        criteria.clone()
    })
}

/// Pickup locations for the search dropdown.
pub fn list_locations() -> Vec<LocationOption> {
    Location::ALL.into_iter().map(LocationOption::from).collect()
}

/// Rental packages, cheapest first.
pub fn list_packages() -> Vec<RentalPackage> {
    packages()
}

/// The best special offer for renting `vehicle_id` over the current dates.
///
/// `None` when no dates are selected or no offer applies.
pub fn offer_for(
    catalog: &CatalogState,
    search: &SearchState,
    vehicle_id: VehicleId,
    today: NaiveDate,
) -> Result<Option<AppliedOffer>, ApiError> {
    debug!(vehicle_id, "offer_for command");

    let vehicle = catalog.inner().get(vehicle_id)?;
    let period = search.with_criteria(SearchCriteria::rental_period)?;
    Ok(best_offer(vehicle.price(), period, today))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use rental_booking::{SimulatedBookingService, SubmissionSettings};
    use rental_core::offers::Offer;
    use rental_core::Catalog;

    use crate::error::ErrorCode;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn states() -> (CatalogState, SearchState, BookingState) {
        (
            CatalogState::new(Catalog::fleet()),
            SearchState::new(PriceRange::default()),
            BookingState::new(
                Arc::new(SimulatedBookingService::default()),
                SubmissionSettings::default(),
            ),
        )
    }

    fn ids(cards: &[VehicleCard]) -> Vec<VehicleId> {
        cards.iter().map(|c| c.vehicle.id).collect()
    }

    #[tokio::test]
    async fn test_initial_view_shows_full_catalog() {
        let (catalog, search_state, booking) = states();
        let view = get_view(&catalog, &search_state, &booking).await.unwrap();

        assert_eq!(ids(&view.vehicles), (1..=9).collect::<Vec<_>>());
        assert_eq!(ids(&view.popular), vec![1, 2, 3, 7]);
        assert!(view.period.is_none());
        assert!(view.booking.is_none());

        // Without dates every card is a one-day quote
        assert!(view.vehicles.iter().all(|c| c.days == 1 && c.quote == c.vehicle.price()));
    }

    #[tokio::test]
    async fn test_search_quotes_every_card() {
        let (catalog, search_state, booking) = states();
        search(&search_state, "santiago", "2024-06-10", "2024-06-12", date(2024, 6, 1)).unwrap();

        let view = get_view(&catalog, &search_state, &booking).await.unwrap();

        // A location hides unavailable vehicles
        assert_eq!(ids(&view.vehicles), vec![1, 2, 3, 5, 6, 7, 9]);
        assert_eq!(view.vehicles[0].days, 3);
        assert_eq!(view.vehicles[0].quote, Money::from_pesos(13_500));
        assert_eq!(view.popular[0].quote, Money::from_pesos(13_500));
        assert_eq!(view.criteria.location, "santiago");
    }

    #[test]
    fn test_search_rejects_past_pickup() {
        let (_, search_state, _) = states();
        let err = search(&search_state, "", "2024-05-31", "2024-06-02", date(2024, 6, 1)).unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.fields, vec!["startDate".to_string()]);
    }

    #[test]
    fn test_search_rejects_reversed_range_and_keeps_criteria() {
        let (_, search_state, _) = states();
        search(&search_state, "punta-cana", "2024-06-10", "2024-06-12", date(2024, 6, 1)).unwrap();

        let err = search(&search_state, "santiago", "2024-06-12", "2024-06-10", date(2024, 6, 1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRange);

        let criteria = search_state.snapshot();
        assert_eq!(criteria.location, "punta-cana");
        assert_eq!(criteria.start_date, Some(date(2024, 6, 10)));
        assert_eq!(criteria.end_date, Some(date(2024, 6, 12)));
    }

    #[test]
    fn test_search_single_date_gives_no_period() {
        let (_, search_state, _) = states();
        let criteria = search(&search_state, "", "2024-06-10", "", date(2024, 6, 1)).unwrap();
        assert!(criteria.rental_period().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_apply_filter() {
        let (catalog, search_state, booking) = states();
        apply_filter(&search_state, Some("SUV".to_string()), Some(PriceRange::from_pesos(0, 5000)));

        let view = get_view(&catalog, &search_state, &booking).await.unwrap();
        assert_eq!(ids(&view.vehicles), vec![1, 4]);

        // Empty category clears the constraint
        let criteria = apply_filter(&search_state, Some(String::new()), None);
        assert!(criteria.category.is_none());
        let view = get_view(&catalog, &search_state, &booking).await.unwrap();
        assert_eq!(view.vehicles.len(), 9);
    }

    #[tokio::test]
    async fn test_cleared_price_range_restores_configured_bounds() {
        let (catalog, _, booking) = states();
        let search_state = SearchState::new(PriceRange::from_pesos(2500, 4600));

        apply_filter(&search_state, None, Some(PriceRange::from_pesos(0, 1000)));
        let criteria = apply_filter(&search_state, None, None);
        assert_eq!(criteria.price_range, Some(PriceRange::from_pesos(2500, 4600)));

        let view = get_view(&catalog, &search_state, &booking).await.unwrap();
        assert_eq!(ids(&view.vehicles), vec![1, 2, 4, 5, 9]);
    }

    #[tokio::test]
    async fn test_inverted_price_range_is_empty() {
        let (catalog, search_state, booking) = states();
        apply_filter(&search_state, None, Some(PriceRange::from_pesos(5000, 1000)));

        let view = get_view(&catalog, &search_state, &booking).await.unwrap();
        assert!(view.vehicles.is_empty());
        assert_eq!(view.popular.len(), 4);
    }

    #[test]
    fn test_locations() {
        let locations = list_locations();
        assert_eq!(locations.len(), 4);
        assert_eq!(locations[0].slug, "santo-domingo");
        assert_eq!(locations[0].name, "Santo Domingo");
    }

    #[test]
    fn test_packages() {
        let packages = list_packages();
        assert_eq!(packages.len(), 3);
        assert!(packages[1].featured);
    }

    #[test]
    fn test_offer_for() {
        let (catalog, search_state, _) = states();
        assert_eq!(offer_for(&catalog, &search_state, 2, date(2024, 6, 1)).unwrap(), None);

        // Friday 2024-06-21 to Monday 2024-06-24
        search(&search_state, "", "2024-06-21", "2024-06-24", date(2024, 6, 1)).unwrap();
        let applied = offer_for(&catalog, &search_state, 2, date(2024, 6, 1)).unwrap().unwrap();
        assert_eq!(applied.offer, Offer::WeekendThreeForTwo);
        assert_eq!(applied.discount, Money::from_pesos(2800));
        assert_eq!(applied.total, Money::from_pesos(8400));

        let err = offer_for(&catalog, &search_state, 99, date(2024, 6, 1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let card = VehicleCard::new(Catalog::fleet().get(1).unwrap(), None);
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["vehicle"]["priceCents"], 450_000);
        assert_eq!(json["quote"], 450_000);
    }
}
