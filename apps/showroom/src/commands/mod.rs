//! # Showroom Commands
//!
//! Every operation the presentation layer can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── catalog.rs  ◄─── View snapshot, search, filter, offers, packages
//! └── booking.rs  ◄─── Booking wizard: start, edit, submit, close
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Presentation layer                                                     │
//! │         │ callback (e.g. "Buscar" clicked)                              │
//! │         ▼                                                               │
//! │  fn search(                                                             │
//! │      search: &SearchState,   ◄── only the state it needs               │
//! │      location: String,       ◄── raw form values                       │
//! │      start: &str, end: &str,                                            │
//! │      today: NaiveDate,                                                  │
//! │  ) -> Result<SearchCriteria, ApiError>                                  │
//! │         │                                                               │
//! │         │ (immutable snapshot, serializable)                            │
//! │         ▼                                                               │
//! │  Presentation re-renders from the snapshot                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands never hand out references into state; every response is an
//! owned snapshot.

pub mod booking;
pub mod catalog;
