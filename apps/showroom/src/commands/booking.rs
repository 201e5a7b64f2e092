//! # Booking Commands
//!
//! Commands behind the booking wizard.
//!
//! ## Wizard Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  "Reservar" ──start_booking──► Personal info                           │
//! │                                   │  update_personal                    │
//! │                                   │  submit_booking ──► AdvancedToPayment│
//! │                                   ▼                                     │
//! │                                Payment                                  │
//! │                                   │  update_payment (formatted)         │
//! │                                   │  submit_booking ──► Completed       │
//! │                                   │                     (wizard closes) │
//! │                                   ▼                                     │
//! │  "X" at any point ──close_booking──► draft discarded                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rental_booking::{BookingConfirmation, SessionOutcome};
use rental_core::booking::BookingSummary;
use rental_core::{BookingDraft, PaymentDetails, PersonalInfo, VehicleId};
use serde::Serialize;
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::{BookingState, CatalogState, SearchState};

/// Result of pressing the wizard's submit button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SubmitResponse {
    /// Personal info accepted; show the payment form.
    AdvancedToPayment { booking: BookingSummary },
    /// Booking confirmed; the wizard is closed.
    Completed { confirmation: BookingConfirmation },
    /// A submission is already in flight; nothing happened.
    AlreadySubmitting,
    /// The wizard was closed while submitting; the result was dropped.
    Discarded,
}

/// Opens the booking wizard for `vehicle_id`.
///
/// ## Behavior
/// - Uses the pickup location and dates currently in the search bar
/// - Replaces any wizard already open; its in-flight submission, if any,
///   is cancelled and its result discarded
///
/// ## Errors
/// `NOT_FOUND` if the vehicle is not in the catalog.
pub async fn start_booking(
    catalog: &CatalogState,
    search: &SearchState,
    booking: &BookingState,
    vehicle_id: VehicleId,
) -> Result<BookingSummary, ApiError> {
    debug!(vehicle_id, "start_booking command");

    let vehicle = catalog.inner().get(vehicle_id)?;
    let (location, period) = search.with_criteria(|c| (c.location.clone(), c.rental_period()));

    let draft = BookingDraft::new(vehicle, &location, period?);
    let session = booking.open(draft).await;
    info!(draft_id = %session.draft_id(), vehicle_id, "Booking started");

    Ok(session.summary().await?)
}

/// The open wizard, if any.
pub async fn get_booking(booking: &BookingState) -> Option<BookingSummary> {
    debug!("get_booking command");
    match booking.active().await {
        Some(session) => session.summary().await.ok(),
        None => None,
    }
}

/// Stores the personal info form.
///
/// ## Errors
/// - `SESSION_CLOSED` if no wizard is open
/// - `INTERNAL` if the wizard is already past this step
pub async fn update_personal(
    booking: &BookingState,
    personal: PersonalInfo,
) -> Result<BookingSummary, ApiError> {
    debug!("update_personal command");

    let session = booking.require_active().await?;
    session.update_personal(personal).await?;
    Ok(session.summary().await?)
}

/// Stores the payment form; card number, expiry and CVV are formatted
/// exactly as the inputs display them.
///
/// ## Errors
/// - `SESSION_CLOSED` if no wizard is open
/// - `INTERNAL` if the wizard is not on the payment step
pub async fn update_payment(
    booking: &BookingState,
    payment: PaymentDetails,
) -> Result<BookingSummary, ApiError> {
    debug!("update_payment command");

    let session = booking.require_active().await?;
    session.update_payment(payment).await?;
    Ok(session.summary().await?)
}

/// Handles the wizard's submit button for whichever step is showing.
///
/// ## Errors
/// - `VALIDATION_ERROR` with the failed fields; the wizard stays on its step
/// - `SUBMISSION_FAILED` (retryable) if the booking service failed or timed
///   out; the wizard is back on the payment step with every field kept
/// - `SESSION_CLOSED` if no wizard is open
pub async fn submit_booking(booking: &BookingState) -> Result<SubmitResponse, ApiError> {
    debug!("submit_booking command");

    // The slot lock is released here, so close_booking can run meanwhile
    let session = booking.require_active().await?;

    let response = match session.submit().await? {
        SessionOutcome::AdvancedToPayment => SubmitResponse::AdvancedToPayment {
            booking: session.summary().await?,
        },
        SessionOutcome::Completed(confirmation) => {
            booking.release(session.draft_id()).await;
            SubmitResponse::Completed { confirmation }
        }
        SessionOutcome::AlreadySubmitting => SubmitResponse::AlreadySubmitting,
        SessionOutcome::Discarded => SubmitResponse::Discarded,
    };
    Ok(response)
}

/// Closes the wizard, discarding the draft. Returns false if none was open.
pub async fn close_booking(booking: &BookingState) -> bool {
    debug!("close_booking command");
    booking.close().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rental_booking::{BookingError, BookingResult, BookingService, SubmissionSettings};
    use rental_core::{BookingPhase, BookingRequest, Catalog, Money, PriceRange};

    use crate::commands::catalog::search;
    use crate::error::ErrorCode;

    struct CountingService {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl BookingService for CountingService {
        async fn confirm(&self, request: &BookingRequest) -> BookingResult<BookingConfirmation> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(1500)).await;
            if self.fail {
                return Err(BookingError::SubmissionFailed("gateway unavailable".into()));
            }
            Ok(BookingConfirmation::for_request(request))
        }
    }

    struct Fixture {
        catalog: CatalogState,
        search: SearchState,
        booking: BookingState,
        service: Arc<CountingService>,
    }

    fn fixture(fail: bool) -> Fixture {
        let service = Arc::new(CountingService {
            calls: AtomicUsize::new(0),
            fail,
        });
        Fixture {
            catalog: CatalogState::new(Catalog::fleet()),
            search: SearchState::new(PriceRange::default()),
            booking: BookingState::new(service.clone(), SubmissionSettings::default()),
            service,
        }
    }

    fn personal() -> PersonalInfo {
        PersonalInfo {
            full_name: "Ana Pérez".to_string(),
            national_id: "001-1234567-8".to_string(),
            phone: "809-555-0101".to_string(),
        }
    }

    fn raw_payment() -> PaymentDetails {
        PaymentDetails {
            cardholder_name: "ANA PEREZ".to_string(),
            card_number: "4111-1111-1111-1111".to_string(),
            expiry: "1228".to_string(),
            cvv: "12a3".to_string(),
        }
    }

    async fn to_payment_step(f: &Fixture, vehicle_id: VehicleId) {
        start_booking(&f.catalog, &f.search, &f.booking, vehicle_id).await.unwrap();
        update_personal(&f.booking, personal()).await.unwrap();
        let response = submit_booking(&f.booking).await.unwrap();
        assert!(matches!(response, SubmitResponse::AdvancedToPayment { .. }));
        update_payment(&f.booking, raw_payment()).await.unwrap();
    }

    #[tokio::test]
    async fn test_start_booking_uses_search_criteria() {
        let f = fixture(false);
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        search(&f.search, "punta-cana", "2024-06-10", "2024-06-12", today).unwrap();

        let summary = start_booking(&f.catalog, &f.search, &f.booking, 7).await.unwrap();
        assert_eq!(summary.vehicle_name, "Jeep Grand Cherokee");
        assert_eq!(summary.location, "Punta Cana");
        assert_eq!(summary.days, 3);
        assert_eq!(summary.total, Money::from_pesos(22_500));
        assert_eq!(summary.phase, BookingPhase::PersonalInfo);
    }

    #[tokio::test]
    async fn test_start_booking_unknown_vehicle() {
        let f = fixture(false);
        let err = start_booking(&f.catalog, &f.search, &f.booking, 99).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(get_booking(&f.booking).await.is_none());
    }

    #[tokio::test]
    async fn test_empty_phone_reports_only_phone() {
        let f = fixture(false);
        start_booking(&f.catalog, &f.search, &f.booking, 1).await.unwrap();
        update_personal(
            &f.booking,
            PersonalInfo {
                phone: String::new(),
                ..personal()
            },
        )
        .await
        .unwrap();

        let err = submit_booking(&f.booking).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.fields, vec!["phone".to_string()]);

        let summary = get_booking(&f.booking).await.unwrap();
        assert_eq!(summary.phase, BookingPhase::PersonalInfo);
        assert_eq!(summary.personal.full_name, "Ana Pérez");
    }

    #[tokio::test(start_paused = true)]
    async fn test_payment_is_formatted_and_booking_completes() {
        let f = fixture(false);
        to_payment_step(&f, 2).await;

        let summary = get_booking(&f.booking).await.unwrap();
        assert_eq!(summary.payment.card_number, "4111 1111 1111 1111");
        assert_eq!(summary.payment.expiry, "12/28");
        assert_eq!(summary.payment.cvv, "123");

        let SubmitResponse::Completed { confirmation } = submit_booking(&f.booking).await.unwrap() else {
            panic!("expected completion");
        };
        assert_eq!(confirmation.vehicle_id, 2);
        assert_eq!(f.service.calls.load(Ordering::SeqCst), 1);

        // The wizard is gone once completed
        assert!(get_booking(&f.booking).await.is_none());
        let err = submit_booking(&f.booking).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionClosed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_submit_calls_service_once() {
        let f = fixture(false);
        to_payment_step(&f, 3).await;

        let (first, second) = tokio::join!(submit_booking(&f.booking), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            submit_booking(&f.booking).await
        });

        assert!(matches!(first.unwrap(), SubmitResponse::Completed { .. }));
        assert_eq!(second.unwrap(), SubmitResponse::AlreadySubmitting);
        assert_eq!(f.service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_while_submitting_discards_result() {
        let f = fixture(false);
        to_payment_step(&f, 5).await;

        let (submitted, closed) = tokio::join!(submit_booking(&f.booking), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            close_booking(&f.booking).await
        });

        assert_eq!(submitted.unwrap(), SubmitResponse::Discarded);
        assert!(closed);
        assert!(get_booking(&f.booking).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_returns_to_payment_with_data() {
        let f = fixture(true);
        to_payment_step(&f, 6).await;

        let err = submit_booking(&f.booking).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SubmissionFailed);
        assert!(err.retryable);

        let summary = get_booking(&f.booking).await.unwrap();
        assert_eq!(summary.phase, BookingPhase::Payment);
        assert_eq!(summary.payment.card_number, "4111 1111 1111 1111");
        assert_eq!(summary.personal.phone, "809-555-0101");
    }

    #[tokio::test]
    async fn test_commands_without_open_wizard() {
        let f = fixture(false);
        assert!(!close_booking(&f.booking).await);

        let err = update_personal(&f.booking, personal()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionClosed);
    }
}
