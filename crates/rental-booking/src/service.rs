//! # Booking Service
//!
//! The port through which finished drafts leave the showroom.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BookingSession ──► BookingService::confirm(&BookingRequest)           │
//! │                          │                                              │
//! │                          ├──► SimulatedBookingService (fixed delay,    │
//! │                          │    always confirms)                          │
//! │                          │                                              │
//! │                          └──► any real backend implementing the trait  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use async_trait::async_trait;
use rental_core::{BookingRequest, Money, VehicleId};
use serde::Serialize;
use tracing::info;
use ts_rs::TS;
use uuid::Uuid;

use crate::config::SubmissionSettings;
use crate::error::BookingResult;

/// What the booking service hands back on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    /// Human-facing reference, e.g. `RD-3F2A9C1B`.
    pub reference: String,
    #[ts(as = "String")]
    pub draft_id: Uuid,
    pub vehicle_id: VehicleId,
    pub total: Money,
}

impl BookingConfirmation {
    /// Builds a confirmation for `request` with a fresh reference.
    pub fn for_request(request: &BookingRequest) -> Self {
        let id = Uuid::new_v4().simple().to_string().to_uppercase();
        BookingConfirmation {
            reference: format!("RD-{}", &id[..8]),
            draft_id: request.draft_id,
            vehicle_id: request.vehicle_id,
            total: request.total,
        }
    }
}

/// Accepts a finished booking and confirms or rejects it.
///
/// Implementations must be safe to call from any task. A returned error is
/// treated as a transient failure: the draft goes back to the payment step.
#[async_trait]
pub trait BookingService: Send + Sync {
    async fn confirm(&self, request: &BookingRequest) -> BookingResult<BookingConfirmation>;
}

/// Stand-in for a real backend: waits a fixed delay, then confirms.
#[derive(Debug, Clone)]
pub struct SimulatedBookingService {
    delay: Duration,
}

impl SimulatedBookingService {
    pub fn new(delay: Duration) -> Self {
        SimulatedBookingService { delay }
    }

    pub fn from_settings(settings: &SubmissionSettings) -> Self {
        Self::new(settings.simulated_delay())
    }
}

impl Default for SimulatedBookingService {
    fn default() -> Self {
        Self::from_settings(&SubmissionSettings::default())
    }
}

#[async_trait]
impl BookingService for SimulatedBookingService {
    async fn confirm(&self, request: &BookingRequest) -> BookingResult<BookingConfirmation> {
        tokio::time::sleep(self.delay).await;

        let confirmation = BookingConfirmation::for_request(request);
        info!(
            reference = %confirmation.reference,
            vehicle_id = request.vehicle_id,
            total = %request.total,
            "Booking confirmed"
        );
        Ok(confirmation)
    }
}
