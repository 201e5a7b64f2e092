//! # Catalog State
//!
//! Holds the vehicle catalog loaded at startup.
//!
//! ## Thread Safety
//! The catalog is never mutated after load, so it sits behind a plain
//! `Arc` and every command reads it concurrently.

use std::path::Path;
use std::sync::Arc;

use rental_booking::CatalogSettings;
use rental_core::Catalog;
use tracing::info;

use crate::error::{ApiError, ErrorCode};

/// Read-only catalog shared by every view.
#[derive(Debug, Clone)]
pub struct CatalogState {
    catalog: Arc<Catalog>,
}

impl CatalogState {
    pub fn new(catalog: Catalog) -> Self {
        CatalogState {
            catalog: Arc::new(catalog),
        }
    }

    /// Loads the catalog named by `settings`, or the built-in fleet.
    ///
    /// ## Errors
    /// `CONFIG_ERROR` if the file cannot be read or violates the catalog
    /// invariants (duplicate ids, negative prices, ratings outside 0..=5).
    pub fn load(settings: &CatalogSettings) -> Result<Self, ApiError> {
        match &settings.path {
            Some(path) => Self::from_file(path),
            None => {
                let catalog = Catalog::fleet();
                info!(vehicles = catalog.len(), "Using built-in fleet");
                Ok(Self::new(catalog))
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self, ApiError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            ApiError::new(
                ErrorCode::ConfigError,
                format!("Failed to read catalog {}: {}", path.display(), e),
            )
        })?;

        let catalog = Catalog::from_json(&json)?;
        info!(?path, vehicles = catalog.len(), "Catalog loaded from file");
        Ok(Self::new(catalog))
    }

    /// Returns a reference to the inner Catalog.
    pub fn inner(&self) -> &Catalog {
        &self.catalog
    }
}
