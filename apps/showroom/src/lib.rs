//! # Rentacar Showroom
//!
//! Controller layer of the rental showroom: owns the UI state and exposes
//! it to the presentation layer as commands returning snapshots.
//!
//! ## Module Organization
//! ```text
//! showroom/
//! ├── lib.rs          ◄─── You are here (startup & logging)
//! ├── showroom.rs     ◄─── Showroom controller (single owner of UI state)
//! ├── driver.rs       ◄─── Scripted headless session
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── catalog.rs  ◄─── Read-only catalog
//! │   ├── search.rs   ◄─── Search criteria
//! │   └── booking.rs  ◄─── Active booking session
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── catalog.rs  ◄─── View, search, filter, offers, packages
//! │   └── booking.rs  ◄─── Booking wizard
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod driver;
pub mod error;
pub mod showroom;
pub mod state;

pub use error::{ApiError, ErrorCode};
pub use showroom::Showroom;

use std::path::PathBuf;

use rental_booking::RentalConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Runs the headless showroom.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter                                │
/// │     • Default: info, rental crates at debug; RUST_LOG overrides         │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • config.toml (given path or platform config dir)                   │
/// │     • RENTAL_* environment overrides, then validation                   │
/// │     • Falls back to defaults with a warning                             │
/// │                                                                         │
/// │  3. Build the Showroom ───────────────────────────────────────────────► │
/// │     • CatalogState: configured JSON file or built-in fleet              │
/// │     • SearchState: configured price bounds                              │
/// │     • BookingState: simulated booking service                           │
/// │                                                                         │
/// │  4. Drive a Scripted Session ─────────────────────────────────────────► │
/// │     • Search, filter, book, print the confirmation                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(config_path: Option<PathBuf>) -> Result<(), ApiError> {
    init_tracing();

    info!("Starting Rentacar Showroom");

    let config = RentalConfig::load_or_default(config_path);
    let showroom = Showroom::from_config(config)?;
    info!(
        vehicles = showroom.catalog().len(),
        popular = showroom.catalog().popular().len(),
        "Showroom ready"
    );

    let today = chrono::Local::now().date_naive();
    let confirmation = driver::scripted_session(&showroom, today).await?;

    let json = serde_json::to_string_pretty(&confirmation)
        .map_err(|e| ApiError::internal(format!("Failed to serialize confirmation: {}", e)))?;
    println!("{}", json);

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=rental_booking=trace` - Trace the booking layer only
/// - Default: `info,rental=debug`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rental=debug,showroom=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
