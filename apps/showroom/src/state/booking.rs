//! # Booking State
//!
//! The booking wizard currently open, if any.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   None ──open(draft)──► Some(session A)                                │
//! │                              │                                          │
//! │                              ├──open(draft)──► Some(session B)          │
//! │                              │                 (A closed, any in-flight │
//! │                              │                  result discarded)       │
//! │                              │                                          │
//! │                              ├──release(A) on completion ──► None       │
//! │                              │                                          │
//! │                              └──close() ──► None                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The slot is a `tokio::sync::Mutex` held only to swap sessions. Commands
//! clone the `Arc<BookingSession>` out and release the lock before awaiting
//! the session, so closing the wizard never waits on a submission.

use std::sync::Arc;

use rental_booking::{BookingService, BookingSession, SubmissionSettings};
use rental_core::BookingDraft;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::ApiError;

/// Owner of the active booking session and the service it submits to.
pub struct BookingState {
    service: Arc<dyn BookingService>,
    settings: SubmissionSettings,
    active: Mutex<Option<Arc<BookingSession>>>,
}

impl BookingState {
    pub fn new(service: Arc<dyn BookingService>, settings: SubmissionSettings) -> Self {
        BookingState {
            service,
            settings,
            active: Mutex::new(None),
        }
    }

    /// Opens a session for `draft`, closing the previous one.
    pub async fn open(&self, draft: BookingDraft) -> Arc<BookingSession> {
        let session = Arc::new(BookingSession::with_settings(
            draft,
            self.service.clone(),
            &self.settings,
        ));

        let previous = self.active.lock().await.replace(session.clone());
        if let Some(previous) = previous {
            previous.close().await;
        }
        session
    }

    /// The active session, if a wizard is open.
    pub async fn active(&self) -> Option<Arc<BookingSession>> {
        self.active.lock().await.clone()
    }

    /// The active session, or `SESSION_CLOSED`.
    pub async fn require_active(&self) -> Result<Arc<BookingSession>, ApiError> {
        self.active().await.ok_or_else(ApiError::no_active_booking)
    }

    /// Forgets the session `draft_id` if it is still the active one.
    ///
    /// Used after completion, when the session has already disposed its
    /// draft.
    pub async fn release(&self, draft_id: Uuid) {
        let mut active = self.active.lock().await;
        if active.as_ref().is_some_and(|s| s.draft_id() == draft_id) {
            *active = None;
        }
    }

    /// Closes the active session. Returns false if none was open.
    pub async fn close(&self) -> bool {
        let session = self.active.lock().await.take();
        match session {
            Some(session) => {
                session.close().await;
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for BookingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingState")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
