//! # Showroom Configuration
//!
//! Configuration for booking submission, search defaults and the catalog
//! source.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     RENTAL_SUBMIT_DELAY_MS=250                                         │
//! │     RENTAL_CATALOG_PATH=/srv/fleet.json                                │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/showroom/config.toml (Linux)                             │
//! │     ~/Library/Application Support/do.rentacar.showroom/config.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     1500 ms simulated delay, 30 s timeout, RD$ 0 .. RD$ 10,000         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # config.toml
//! [submission]
//! simulated_delay_ms = 1500
//! timeout_secs = 30
//!
//! [search]
//! default_price_min = 0
//! default_price_max = 10000
//!
//! [catalog]
//! path = "fleet.json"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use rental_core::types::PriceRange;
use rental_core::{DEFAULT_PRICE_MAX_PESOS, DEFAULT_PRICE_MIN_PESOS, MAX_DAILY_PRICE_PESOS};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{BookingError, BookingResult};

// =============================================================================
// Submission Settings
// =============================================================================

/// How booking submissions are performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionSettings {
    /// Latency of the simulated booking service (milliseconds).
    #[serde(default = "default_simulated_delay")]
    pub simulated_delay_ms: u64,

    /// Upper bound on one booking service call (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_simulated_delay() -> u64 {
    1500
}

fn default_timeout() -> u64 {
    30
}

impl Default for SubmissionSettings {
    fn default() -> Self {
        SubmissionSettings {
            simulated_delay_ms: default_simulated_delay(),
            timeout_secs: default_timeout(),
        }
    }
}

impl SubmissionSettings {
    pub fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// =============================================================================
// Search Settings
// =============================================================================

/// Initial values of the search and filter controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Lower price bound shown in the filter (whole pesos).
    #[serde(default = "default_price_min")]
    pub default_price_min: i64,

    /// Upper price bound shown in the filter (whole pesos).
    #[serde(default = "default_price_max")]
    pub default_price_max: i64,
}

fn default_price_min() -> i64 {
    DEFAULT_PRICE_MIN_PESOS
}

fn default_price_max() -> i64 {
    DEFAULT_PRICE_MAX_PESOS
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            default_price_min: default_price_min(),
            default_price_max: default_price_max(),
        }
    }
}

impl SearchSettings {
    pub fn price_range(&self) -> PriceRange {
        PriceRange::from_pesos(self.default_price_min, self.default_price_max)
    }
}

// =============================================================================
// Catalog Settings
// =============================================================================

/// Where the vehicle catalog comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// JSON file with the vehicle array. The built-in fleet is used when
    /// unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete showroom configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalConfig {
    #[serde(default)]
    pub submission: SubmissionSettings,

    #[serde(default)]
    pub search: SearchSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,
}

impl RentalConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (config.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> BookingResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading showroom config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load showroom config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> BookingResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| BookingError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Showroom config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> BookingResult<()> {
        if self.submission.timeout_secs == 0 {
            return Err(BookingError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.search.default_price_min < 0 {
            return Err(BookingError::InvalidConfig(
                "default_price_min must not be negative".into(),
            ));
        }

        if self.search.default_price_max > MAX_DAILY_PRICE_PESOS {
            return Err(BookingError::InvalidConfig(format!(
                "default_price_max must not exceed {}",
                MAX_DAILY_PRICE_PESOS
            )));
        }

        if self.search.default_price_min > self.search.default_price_max {
            return Err(BookingError::InvalidConfig(format!(
                "default_price_min ({}) is above default_price_max ({})",
                self.search.default_price_min, self.search.default_price_max
            )));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(delay) = lookup("RENTAL_SUBMIT_DELAY_MS") {
            match delay.parse::<u64>() {
                Ok(ms) => {
                    debug!(delay_ms = ms, "Overriding submission delay from environment");
                    self.submission.simulated_delay_ms = ms;
                }
                Err(_) => warn!(value = %delay, "Ignoring invalid RENTAL_SUBMIT_DELAY_MS"),
            }
        }

        if let Some(timeout) = lookup("RENTAL_SUBMIT_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.submission.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring invalid RENTAL_SUBMIT_TIMEOUT_SECS"),
            }
        }

        if let Some(path) = lookup("RENTAL_CATALOG_PATH") {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog.path = Some(PathBuf::from(path));
        }

        if let Some(max) = lookup("RENTAL_PRICE_MAX") {
            match max.parse::<i64>() {
                Ok(pesos) => self.search.default_price_max = pesos,
                Err(_) => warn!(value = %max, "Ignoring invalid RENTAL_PRICE_MAX"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("do", "rentacar", "showroom")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = RentalConfig::default();
        assert_eq!(config.submission.simulated_delay_ms, 1500);
        assert_eq!(config.submission.timeout(), Duration::from_secs(30));
        assert_eq!(config.search.price_range(), PriceRange::default());
        assert!(config.catalog.path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = RentalConfig::default();
        config.submission.timeout_secs = 0;
        assert!(config.validate().unwrap_err().is_config_error());

        let mut config = RentalConfig::default();
        config.search.default_price_min = 5000;
        config.search.default_price_max = 1000;
        assert!(config.validate().is_err());

        config.search.default_price_min = -1;
        config.search.default_price_max = 1000;
        assert!(config.validate().is_err());

        config.search.default_price_min = 0;
        config.search.default_price_max = MAX_DAILY_PRICE_PESOS;
        assert!(config.validate().is_ok());
        config.search.default_price_max = i64::MAX;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: RentalConfig = toml::from_str(
            r#"
            [submission]
            simulated_delay_ms = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.submission.simulated_delay_ms, 10);
        assert_eq!(config.submission.timeout_secs, 30);
        assert_eq!(config.search.default_price_max, 10_000);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("RENTAL_SUBMIT_DELAY_MS", "250"),
            ("RENTAL_SUBMIT_TIMEOUT_SECS", "not-a-number"),
            ("RENTAL_CATALOG_PATH", "/srv/fleet.json"),
            ("RENTAL_PRICE_MAX", "6000"),
        ]
        .into_iter()
        .collect();

        let mut config = RentalConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.submission.simulated_delay_ms, 250);
        assert_eq!(config.submission.timeout_secs, 30);
        assert_eq!(config.catalog.path, Some(PathBuf::from("/srv/fleet.json")));
        assert_eq!(config.search.default_price_max, 6000);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("rental-config-does-not-exist.toml");
        let config = RentalConfig::load_or_default(Some(path));
        assert_eq!(config.search.default_price_min, 0);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir()
            .join(format!("rental-config-{}", uuid::Uuid::new_v4()))
            .join("config.toml");

        let mut config = RentalConfig::default();
        config.submission.simulated_delay_ms = 42;
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[submission]"));

        let loaded: RentalConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded.submission.simulated_delay_ms, 42);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
