//! # State Module
//!
//! Manages the showroom's UI state.
//!
//! Instead of a single struct of shared mutable globals, each concern has
//! its own state type and commands take only the ones they need:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────────────┐  │
//! │  │ CatalogState │  │   SearchState    │  │      BookingState        │  │
//! │  │              │  │                  │  │                          │  │
//! │  │ Arc<Catalog> │  │ Mutex<           │  │ Mutex<Option<Arc<        │  │
//! │  │ (read-only)  │  │   SearchCriteria │  │   BookingSession>>>      │  │
//! │  │              │  │ >                │  │ + dyn BookingService     │  │
//! │  └──────────────┘  └──────────────────┘  └──────────────────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CatalogState: immutable after load, shared without locking          │
//! │  • SearchState: std Mutex, held only for short synchronous updates     │
//! │  • BookingState: tokio Mutex, never held across a service call         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod booking;
mod catalog;
mod search;

pub use booking::BookingState;
pub use catalog::CatalogState;
pub use search::SearchState;
