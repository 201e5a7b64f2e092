//! # Rentacar Showroom Entry Point
//!
//! Headless driver for the showroom controller.
//!
//! ```text
//! showroom [config.toml]
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration (file, then `RENTAL_*` environment overrides)
//! 3. Load the catalog (configured JSON file or built-in fleet)
//! 4. Run a scripted booking and print the confirmation as JSON

use std::path::PathBuf;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let config_path = std::env::args().nth(1).map(PathBuf::from);

    match showroom::run(config_path).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(code = ?err.code, "{}", err.message);
            ExitCode::FAILURE
        }
    }
}
