//! # Biljett Configuration System
//!
//! Hierarchical configuration for the reservation simulator.
//!
//! ## Features
//! - **Unified Configuration**: Single source of truth across all components
//! - **Validation**: Range and cross-field validation of critical parameters
//! - **Environment Awareness**: `BILJETT_*` variables override file settings
//!
//! The defaults reproduce the canonical scenario: 100 events of 500 seats,
//! 5 admission slots, 20 workers requesting 5-10 seats for 600 seconds.

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod admission;
mod error;
mod validation;
mod venue;
mod workload;

pub use admission::AdmissionConfig;
pub use error::ConfigError;
pub use venue::VenueConfig;
pub use workload::WorkloadConfig;

/// Top-level configuration container for all simulator components.
#[derive(Debug, Serialize, Deserialize, Validate, Default)]
pub struct BiljettConfig {
    /// Venue sizing (event count, per-event capacity).
    #[validate(nested)]
    pub venue: VenueConfig,

    /// Admission table parameters (slot count, booking delay).
    #[validate(nested)]
    pub admission: AdmissionConfig,

    /// Worker pool and operation mix parameters.
    #[validate(nested)]
    pub workload: WorkloadConfig,
}

impl BiljettConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/biljett.yaml` - base settings. If missing, defaults are used.
    /// 3. `BILJETT_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        // Start with defaults.
        let mut figment = Figment::from(Serialized::defaults(BiljettConfig::default()));

        if Path::new("config/biljett.yaml").exists() {
            figment = figment.merge(Yaml::file("config/biljett.yaml"));
        } else {
            println!("config/biljett.yaml not found, using default configuration");
        }

        figment
            .merge(Env::prefixed("BILJETT_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }

    /// Load configuration from a specific path for testing/validation.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(
                path.to_string_lossy().to_string(),
            )));
        }

        Figment::from(Serialized::defaults(BiljettConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("BILJETT_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config_validation() {
        let config = BiljettConfig::default();
        config.validate().expect("Default config should validate");
    }

    #[test]
    fn environment_override() {
        // Override a field via environment variable.
        std::env::set_var("BILJETT_ADMISSION__SLOTS", "9");
        let config = BiljettConfig::load().unwrap();
        assert_eq!(config.admission.slots, 9);
        std::env::remove_var("BILJETT_ADMISSION__SLOTS");
    }

    #[test]
    fn inverted_seat_range_is_rejected() {
        let mut config = BiljettConfig::default();
        config.workload.seats_min = 12;
        config.workload.seats_max = 6;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_slots_is_rejected() {
        let mut config = BiljettConfig::default();
        config.admission.slots = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_is_reported() {
        assert!(matches!(
            BiljettConfig::load_from_path("does/not/exist.yaml"),
            Err(ConfigError::FileNotFound(_))
        ));
    }
}
