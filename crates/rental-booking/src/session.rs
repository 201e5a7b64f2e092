//! # Booking Session
//!
//! Drives one [`BookingDraft`] through submission with the guarantees the
//! wizard needs once a real network call is involved.
//!
//! ## Submission Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      BookingSession::submit()                           │
//! │                                                                         │
//! │  lock draft ──► draft.submit()                                         │
//! │                   ├── AdvancedToPayment ──► return                      │
//! │                   ├── Ignored ────────────► return AlreadySubmitting    │
//! │                   └── ReadyToSubmit(req)                                │
//! │  unlock draft          │                                                │
//! │                        ▼                                                │
//! │  select! {                                                              │
//! │      cancel signal           ──► Discarded (draft untouched)           │
//! │      timeout(service.confirm) ──► result                               │
//! │  }                                                                      │
//! │                        │                                                │
//! │  lock draft ──► closed meanwhile?    ──► Discarded                     │
//! │                 Ok(confirmation)     ──► complete(), dispose, Completed │
//! │                 Err / timeout        ──► fail_submission(), Err         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The draft lock is never held across the service call, so `close()` and
//! concurrent `submit()` calls are answered immediately. A concurrent
//! `submit()` finds the draft in `Submitting` and returns
//! [`SessionOutcome::AlreadySubmitting`] without calling the service.
//!
//! A `submit()` future dropped mid-flight (aborted task, caller-side
//! timeout) puts the draft back on the payment step, so the visitor can
//! submit again.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rental_core::booking::{BookingPhase, BookingSummary};
use rental_core::{BookingDraft, PaymentDetails, PersonalInfo, SubmitOutcome};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::SubmissionSettings;
use crate::error::{BookingError, BookingResult};
use crate::service::{BookingConfirmation, BookingService};

/// What a call to [`BookingSession::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Personal info accepted; the payment form is next.
    AdvancedToPayment,
    /// The booking service confirmed. The draft has been disposed.
    Completed(BookingConfirmation),
    /// A submission was already in flight; the service was not called.
    AlreadySubmitting,
    /// The session was closed while the call was in flight; its result was
    /// ignored.
    Discarded,
}

/// One booking wizard, from the first form to confirmation or close.
pub struct BookingSession {
    draft_id: Uuid,

    /// `None` once the session is closed or completed.
    draft: Arc<Mutex<Option<BookingDraft>>>,

    /// Bumped each time a submission starts.
    attempts: Arc<AtomicU64>,

    service: Arc<dyn BookingService>,

    /// Upper bound on one service call.
    timeout: Duration,

    /// Flipped to `true` by `close()`; in-flight submissions watch it.
    cancel_tx: watch::Sender<bool>,
}

impl BookingSession {
    pub fn new(draft: BookingDraft, service: Arc<dyn BookingService>, timeout: Duration) -> Self {
        let (cancel_tx, _) = watch::channel(false);
        debug!(draft_id = %draft.id(), vehicle_id = draft.vehicle_id(), "Booking session opened");

        BookingSession {
            draft_id: draft.id(),
            draft: Arc::new(Mutex::new(Some(draft))),
            attempts: Arc::new(AtomicU64::new(0)),
            service,
            timeout,
            cancel_tx,
        }
    }

    pub fn with_settings(
        draft: BookingDraft,
        service: Arc<dyn BookingService>,
        settings: &SubmissionSettings,
    ) -> Self {
        Self::new(draft, service, settings.timeout())
    }

    pub fn draft_id(&self) -> Uuid {
        self.draft_id
    }

    /// Current phase, or `None` once the draft is gone.
    pub async fn phase(&self) -> Option<BookingPhase> {
        self.draft.lock().await.as_ref().map(BookingDraft::phase)
    }

    pub async fn is_closed(&self) -> bool {
        self.draft.lock().await.is_none()
    }

    pub async fn summary(&self) -> BookingResult<BookingSummary> {
        let guard = self.draft.lock().await;
        guard
            .as_ref()
            .map(BookingDraft::summary)
            .ok_or(BookingError::SessionClosed)
    }

    pub async fn update_personal(&self, personal: PersonalInfo) -> BookingResult<()> {
        let mut guard = self.draft.lock().await;
        let draft = guard.as_mut().ok_or(BookingError::SessionClosed)?;
        draft.update_personal(personal)?;
        Ok(())
    }

    pub async fn update_payment(&self, payment: PaymentDetails) -> BookingResult<()> {
        let mut guard = self.draft.lock().await;
        let draft = guard.as_mut().ok_or(BookingError::SessionClosed)?;
        draft.update_payment(payment)?;
        Ok(())
    }

    /// Handles the wizard's submit action.
    ///
    /// ## Errors
    /// - `SessionClosed` if the session was closed or already completed
    /// - `Core` for field validation failures; the draft stays on its step
    /// - `SubmissionFailed` / `Timeout` from the service; the draft returns
    ///   to the payment step with every field intact
    pub async fn submit(&self) -> BookingResult<SessionOutcome> {
        let (request, pending) = {
            let mut guard = self.draft.lock().await;
            let draft = guard.as_mut().ok_or(BookingError::SessionClosed)?;

            match draft.submit()? {
                SubmitOutcome::AdvancedToPayment => {
                    debug!(draft_id = %self.draft_id, "Personal info accepted");
                    return Ok(SessionOutcome::AdvancedToPayment);
                }
                SubmitOutcome::Ignored => {
                    debug!(draft_id = %self.draft_id, "Submission already in flight, ignoring");
                    return Ok(SessionOutcome::AlreadySubmitting);
                }
                SubmitOutcome::ReadyToSubmit(request) => {
                    let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
                    (request, PendingSubmission::new(self, attempt))
                }
            }
        };

        info!(
            draft_id = %self.draft_id,
            vehicle_id = request.vehicle_id,
            total = %request.total,
            "Submitting booking"
        );

        let mut cancel_rx = self.cancel_tx.subscribe();
        let result = tokio::select! {
            biased;

            _ = cancel_rx.wait_for(|closed| *closed) => None,
            result = tokio::time::timeout(self.timeout, self.service.confirm(&request)) => Some(result),
        };

        let Some(result) = result else {
            pending.settle();
            info!(draft_id = %self.draft_id, "Session closed during submission, discarding");
            return Ok(SessionOutcome::Discarded);
        };

        let mut guard = self.draft.lock().await;
        pending.settle();
        let Some(draft) = guard.as_mut() else {
            info!(draft_id = %self.draft_id, "Session closed before result was applied, discarding");
            return Ok(SessionOutcome::Discarded);
        };

        match result {
            Ok(Ok(confirmation)) => {
                draft.complete()?;
                *guard = None;
                info!(
                    draft_id = %self.draft_id,
                    reference = %confirmation.reference,
                    "Booking completed"
                );
                Ok(SessionOutcome::Completed(confirmation))
            }
            Ok(Err(err)) => {
                draft.fail_submission()?;
                warn!(draft_id = %self.draft_id, error = %err, "Booking submission failed");
                Err(err)
            }
            Err(_elapsed) => {
                draft.fail_submission()?;
                let secs = self.timeout.as_secs();
                warn!(draft_id = %self.draft_id, timeout_secs = secs, "Booking submission timed out");
                Err(BookingError::Timeout(secs))
            }
        }
    }

    /// Disposes the draft and cancels any in-flight submission.
    ///
    /// Safe to call more than once and from any state.
    pub async fn close(&self) {
        self.cancel_tx.send_replace(true);
        if self.draft.lock().await.take().is_some() {
            info!(draft_id = %self.draft_id, "Booking session closed");
        }
    }
}

// =============================================================================
// Abandoned Submissions
// =============================================================================

/// Held by `submit()` while its draft is `Submitting`.
///
/// Dropped without [`settle`](Self::settle), it returns the draft to the
/// payment step. A later submission owns the draft once it starts, so an
/// outdated guard leaves it alone.
struct PendingSubmission {
    draft_id: Uuid,
    draft: Arc<Mutex<Option<BookingDraft>>>,
    attempts: Arc<AtomicU64>,
    attempt: u64,
    settled: bool,
}

impl PendingSubmission {
    fn new(session: &BookingSession, attempt: u64) -> Self {
        PendingSubmission {
            draft_id: session.draft_id,
            draft: Arc::clone(&session.draft),
            attempts: Arc::clone(&session.attempts),
            attempt,
            settled: false,
        }
    }

    /// The caller is about to apply the result itself.
    fn settle(mut self) {
        self.settled = true;
    }
}

impl Drop for PendingSubmission {
    fn drop(&mut self) {
        if self.settled {
            return;
        }

        match self.draft.try_lock() {
            Ok(mut slot) => revert_abandoned(&mut slot, self.draft_id, &self.attempts, self.attempt),
            Err(_) => {
                // Someone holds the draft; revert once they let go
                let Ok(runtime) = tokio::runtime::Handle::try_current() else {
                    warn!(draft_id = %self.draft_id, "Submission abandoned outside a runtime");
                    return;
                };
                let (draft_id, attempt) = (self.draft_id, self.attempt);
                let draft = Arc::clone(&self.draft);
                let attempts = Arc::clone(&self.attempts);
                runtime.spawn(async move {
                    revert_abandoned(&mut *draft.lock().await, draft_id, &attempts, attempt);
                });
            }
        }
    }
}

fn revert_abandoned(slot: &mut Option<BookingDraft>, draft_id: Uuid, attempts: &AtomicU64, attempt: u64) {
    if attempts.load(Ordering::SeqCst) != attempt {
        return;
    }
    if let Some(draft) = slot.as_mut().filter(|d| d.is_submitting()) {
        if draft.fail_submission().is_ok() {
            warn!(draft_id = %draft_id, "Submission abandoned, back to payment");
        }
    }
}

impl std::fmt::Debug for BookingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingSession")
            .field("draft_id", &self.draft_id)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rental_core::{BookingRequest, Catalog, RentalPeriod};

    /// Counts calls; optionally fails after its delay.
    struct CountingService {
        calls: AtomicUsize,
        delay: Duration,
        fail: bool,
    }

    impl CountingService {
        fn new(delay: Duration, fail: bool) -> Arc<Self> {
            Arc::new(CountingService {
                calls: AtomicUsize::new(0),
                delay,
                fail,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl BookingService for CountingService {
        async fn confirm(&self, request: &BookingRequest) -> BookingResult<BookingConfirmation> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if self.fail {
                return Err(BookingError::SubmissionFailed("gateway unavailable".into()));
            }
            Ok(BookingConfirmation::for_request(request))
        }
    }

    fn personal() -> PersonalInfo {
        PersonalInfo {
            full_name: "Ana Pérez".to_string(),
            national_id: "001-1234567-8".to_string(),
            phone: "809-555-0101".to_string(),
        }
    }

    fn payment() -> PaymentDetails {
        PaymentDetails {
            cardholder_name: "ANA PEREZ".to_string(),
            card_number: "4111 1111 1111 1111".to_string(),
            expiry: "12/28".to_string(),
            cvv: "123".to_string(),
        }
    }

    fn draft() -> BookingDraft {
        let catalog = Catalog::fleet();
        let period = RentalPeriod::new(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        )
        .unwrap();
        BookingDraft::new(catalog.get(3).unwrap(), "santiago", Some(period))
    }

    /// A session already on the payment step with valid payment details.
    async fn ready_session(service: Arc<CountingService>, timeout: Duration) -> Arc<BookingSession> {
        let session = Arc::new(BookingSession::new(draft(), service, timeout));
        session.update_personal(personal()).await.unwrap();
        assert_eq!(session.submit().await.unwrap(), SessionOutcome::AdvancedToPayment);
        session.update_payment(payment()).await.unwrap();
        session
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_flow_completes_once() {
        let service = CountingService::new(Duration::from_millis(1500), false);
        let session = ready_session(service.clone(), Duration::from_secs(30)).await;

        let SessionOutcome::Completed(confirmation) = session.submit().await.unwrap() else {
            panic!("expected completion");
        };
        assert_eq!(confirmation.draft_id, session.draft_id());
        assert_eq!(confirmation.vehicle_id, 3);
        assert_eq!(service.calls(), 1);

        // Completed drafts are disposed
        assert!(session.is_closed().await);
        assert!(matches!(session.submit().await, Err(BookingError::SessionClosed)));
        assert_eq!(service.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_submit_while_submitting_is_noop() {
        let service = CountingService::new(Duration::from_millis(1500), false);
        let session = ready_session(service.clone(), Duration::from_secs(30)).await;

        let first = tokio::spawn({
            let session = session.clone();
            async move { session.submit().await }
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(session.phase().await, Some(BookingPhase::Submitting));

        assert_eq!(session.submit().await.unwrap(), SessionOutcome::AlreadySubmitting);
        assert_eq!(session.submit().await.unwrap(), SessionOutcome::AlreadySubmitting);

        let outcome = first.await.unwrap().unwrap();
        assert!(matches!(outcome, SessionOutcome::Completed(_)));
        assert_eq!(service.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_while_submitting_discards_result() {
        let service = CountingService::new(Duration::from_millis(1500), false);
        let session = ready_session(service.clone(), Duration::from_secs(30)).await;

        let in_flight = tokio::spawn({
            let session = session.clone();
            async move { session.submit().await }
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        session.close().await;

        assert_eq!(in_flight.await.unwrap().unwrap(), SessionOutcome::Discarded);
        assert!(session.is_closed().await);
        assert_eq!(session.phase().await, None);
        assert_eq!(service.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_aborted_submit_returns_to_payment() {
        let service = CountingService::new(Duration::from_millis(1500), false);
        let session = ready_session(service.clone(), Duration::from_secs(30)).await;

        let in_flight = tokio::spawn({
            let session = session.clone();
            async move { session.submit().await }
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(session.phase().await, Some(BookingPhase::Submitting));

        in_flight.abort();
        assert!(in_flight.await.unwrap_err().is_cancelled());
        tokio::time::sleep(Duration::from_secs(120)).await;

        assert_eq!(session.phase().await, Some(BookingPhase::Payment));
        assert_eq!(session.summary().await.unwrap().payment, payment());

        let outcome = session.submit().await.unwrap();
        assert!(matches!(outcome, SessionOutcome::Completed(_)));
        assert_eq!(service.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_caller_timeout_returns_to_payment() {
        let service = CountingService::new(Duration::from_millis(1500), false);
        let session = ready_session(service, Duration::from_secs(30)).await;

        let gave_up = tokio::time::timeout(Duration::from_millis(100), session.submit()).await;
        assert!(gave_up.is_err());

        assert_eq!(session.phase().await, Some(BookingPhase::Payment));
        assert!(matches!(session.submit().await.unwrap(), SessionOutcome::Completed(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_service_failure_returns_to_payment() {
        let service = CountingService::new(Duration::from_millis(100), true);
        let session = ready_session(service.clone(), Duration::from_secs(30)).await;

        let err = session.submit().await.unwrap_err();
        assert!(matches!(err, BookingError::SubmissionFailed(_)));
        assert!(err.is_retryable());

        assert_eq!(session.phase().await, Some(BookingPhase::Payment));
        let summary = session.summary().await.unwrap();
        assert_eq!(summary.personal, personal());
        assert_eq!(summary.payment, payment());

        // The caller may retry
        assert!(session.submit().await.is_err());
        assert_eq!(service.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_returns_to_payment() {
        let service = CountingService::new(Duration::from_secs(60), false);
        let session = ready_session(service, Duration::from_secs(1)).await;

        let err = session.submit().await.unwrap_err();
        assert!(matches!(err, BookingError::Timeout(1)));
        assert_eq!(session.phase().await, Some(BookingPhase::Payment));
    }

    #[tokio::test]
    async fn test_validation_failure_stays_on_step() {
        let service = CountingService::new(Duration::ZERO, false);
        let session = BookingSession::new(draft(), service.clone(), Duration::from_secs(30));
        session
            .update_personal(PersonalInfo {
                phone: String::new(),
                ..personal()
            })
            .await
            .unwrap();

        let err = session.submit().await.unwrap_err();
        assert_eq!(err.failed_fields(), vec!["phone"]);
        assert_eq!(session.phase().await, Some(BookingPhase::PersonalInfo));
        assert_eq!(service.calls(), 0);
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let service = CountingService::new(Duration::ZERO, false);
        let session = BookingSession::new(draft(), service, Duration::from_secs(30));
        session.close().await;
        session.close().await;
        assert!(matches!(
            session.update_personal(personal()).await,
            Err(BookingError::SessionClosed)
        ));
        assert!(matches!(session.summary().await, Err(BookingError::SessionClosed)));
    }
}
