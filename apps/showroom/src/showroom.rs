//! # Showroom Controller
//!
//! The single owner of every piece of UI state. The presentation layer
//! holds a `Showroom`, calls its methods as callbacks, and renders the
//! snapshots they return.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            Showroom                                     │
//! │                                                                         │
//! │  config ──► CatalogState::load ──► catalog   (Arc<Catalog>, read-only) │
//! │         ──► search.price_range ──► search    (criteria)                │
//! │         ──► submission ──────────► booking   (active session + service)│
//! │                                                                         │
//! │  view() ◄── snapshot of all three                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::NaiveDate;
use rental_booking::{BookingService, RentalConfig, SimulatedBookingService};
use rental_core::booking::BookingSummary;
use rental_core::offers::AppliedOffer;
use rental_core::packages::RentalPackage;
use rental_core::{Catalog, PaymentDetails, PersonalInfo, PriceRange, SearchCriteria, VehicleId};

use crate::commands::booking::{self as booking_cmd, SubmitResponse};
use crate::commands::catalog::{self as catalog_cmd, LocationOption, ShowroomView};
use crate::error::ApiError;
use crate::state::{BookingState, CatalogState, SearchState};

/// Top-level controller for one visitor.
#[derive(Debug)]
pub struct Showroom {
    catalog: CatalogState,
    search: SearchState,
    booking: BookingState,
    config: RentalConfig,
}

impl Showroom {
    /// Builds a showroom around an already loaded catalog and a booking
    /// service.
    pub fn new(catalog: Catalog, config: RentalConfig, service: Arc<dyn BookingService>) -> Self {
        Self::assemble(CatalogState::new(catalog), config, service)
    }

    /// Loads the catalog named by `config` and submits bookings to the
    /// simulated service.
    pub fn from_config(config: RentalConfig) -> Result<Self, ApiError> {
        let catalog = CatalogState::load(&config.catalog)?;
        let service = Arc::new(SimulatedBookingService::from_settings(&config.submission));
        Ok(Self::assemble(catalog, config, service))
    }

    fn assemble(catalog: CatalogState, config: RentalConfig, service: Arc<dyn BookingService>) -> Self {
        Showroom {
            catalog,
            search: SearchState::new(config.search.price_range()),
            booking: BookingState::new(service, config.submission.clone()),
            config,
        }
    }

    pub fn config(&self) -> &RentalConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog.inner()
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    pub async fn view(&self) -> Result<ShowroomView, ApiError> {
        catalog_cmd::get_view(&self.catalog, &self.search, &self.booking).await
    }

    pub fn criteria(&self) -> SearchCriteria {
        self.search.snapshot()
    }

    pub fn search(
        &self,
        location: &str,
        start: &str,
        end: &str,
        today: NaiveDate,
    ) -> Result<SearchCriteria, ApiError> {
        catalog_cmd::search(&self.search, location, start, end, today)
    }

    pub fn apply_filter(&self, category: Option<String>, price_range: Option<PriceRange>) -> SearchCriteria {
        catalog_cmd::apply_filter(&self.search, category, price_range)
    }

    pub fn locations(&self) -> Vec<LocationOption> {
        catalog_cmd::list_locations()
    }

    pub fn packages(&self) -> Vec<RentalPackage> {
        catalog_cmd::list_packages()
    }

    pub fn offer_for(&self, vehicle_id: VehicleId, today: NaiveDate) -> Result<Option<AppliedOffer>, ApiError> {
        catalog_cmd::offer_for(&self.catalog, &self.search, vehicle_id, today)
    }

    // =========================================================================
    // Booking
    // =========================================================================

    pub async fn start_booking(&self, vehicle_id: VehicleId) -> Result<BookingSummary, ApiError> {
        booking_cmd::start_booking(&self.catalog, &self.search, &self.booking, vehicle_id).await
    }

    pub async fn booking(&self) -> Option<BookingSummary> {
        booking_cmd::get_booking(&self.booking).await
    }

    pub async fn update_personal(&self, personal: PersonalInfo) -> Result<BookingSummary, ApiError> {
        booking_cmd::update_personal(&self.booking, personal).await
    }

    pub async fn update_payment(&self, payment: PaymentDetails) -> Result<BookingSummary, ApiError> {
        booking_cmd::update_payment(&self.booking, payment).await
    }

    pub async fn submit_booking(&self) -> Result<SubmitResponse, ApiError> {
        booking_cmd::submit_booking(&self.booking).await
    }

    pub async fn close_booking(&self) -> bool {
        booking_cmd::close_booking(&self.booking).await
    }
}
