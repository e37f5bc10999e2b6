//! # Booking Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     COURTSIDE_DISCOUNT_PERCENT=15                                      │
//! │     COURTSIDE_CLAY_COURTS=3                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or the platform config dir:                       │
//! │     ~/.config/courtside/courtside.toml (Linux)                         │
//! │     ~/Library/Application Support/com.courtside.courtside/... (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Grass 10, Clay 5, Hard 8, 10% discount                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [inventory]
//! grass = 10
//! clay = 5
//! hard = 8
//!
//! [pricing]
//! discount_percent = 10   # 0 disables the discount
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use courtside_core::validation::validate_discount_percent;
use courtside_core::{CoreError, DiscountPolicy, DEFAULT_DISCOUNT_PERCENT};

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] CoreError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// Initial court counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySettings {
    #[serde(default = "default_grass")]
    pub grass: u32,
    #[serde(default = "default_clay")]
    pub clay: u32,
    #[serde(default = "default_hard")]
    pub hard: u32,
}

fn default_grass() -> u32 {
    10
}

fn default_clay() -> u32 {
    5
}

fn default_hard() -> u32 {
    8
}

impl Default for InventorySettings {
    fn default() -> Self {
        InventorySettings {
            grass: default_grass(),
            clay: default_clay(),
            hard: default_hard(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Percentage discount applied to every booking. 0 disables it.
    #[serde(default = "default_discount_percent")]
    pub discount_percent: i64,
}

fn default_discount_percent() -> i64 {
    DEFAULT_DISCOUNT_PERCENT
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            discount_percent: default_discount_percent(),
        }
    }
}

// =============================================================================
// Booking Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfig {
    #[serde(default)]
    pub inventory: InventorySettings,
    #[serde(default)]
    pub pricing: PricingSettings,
}

impl BookingConfig {
    /// Loads configuration from file (if present) and environment.
    ///
    /// An explicit `config_path` that does not exist is an error; the
    /// platform default path is optional.
    pub fn load(config_path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading booking config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Checks values that serde cannot.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_discount_percent(self.pricing.discount_percent)?;
        Ok(())
    }

    /// Applies `COURTSIDE_*` overrides read through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("COURTSIDE_DISCOUNT_PERCENT") {
            match raw.trim().parse::<i64>() {
                Ok(p) => {
                    debug!(discount_percent = p, "Overriding discount from environment");
                    self.pricing.discount_percent = p;
                }
                Err(_) => warn!(value = %raw, "Ignoring non-numeric COURTSIDE_DISCOUNT_PERCENT"),
            }
        }

        let counts = [
            ("COURTSIDE_GRASS_COURTS", &mut self.inventory.grass),
            ("COURTSIDE_CLAY_COURTS", &mut self.inventory.clay),
            ("COURTSIDE_HARD_COURTS", &mut self.inventory.hard),
        ];
        for (key, slot) in counts {
            if let Some(raw) = lookup(key) {
                match raw.trim().parse::<u32>() {
                    Ok(n) => {
                        debug!(key, count = n, "Overriding court count from environment");
                        *slot = n;
                    }
                    Err(_) => warn!(key, value = %raw, "Ignoring invalid court count"),
                }
            }
        }
    }

    /// The discount every booking gets.
    pub fn discount_policy(&self) -> DiscountPolicy {
        match self.pricing.discount_percent {
            0 => DiscountPolicy::NoDiscount,
            p => DiscountPolicy::Percentage(p),
        }
    }

    /// Platform config file location, if a home directory can be found.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "courtside", "courtside")
            .map(|dirs| dirs.config_dir().join("courtside.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = BookingConfig::default();
        assert_eq!(config.inventory.grass, 10);
        assert_eq!(config.inventory.clay, 5);
        assert_eq!(config.inventory.hard, 8);
        assert_eq!(config.discount_policy(), DiscountPolicy::Percentage(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = BookingConfig::from_toml("[inventory]\nclay = 2\n").unwrap();
        assert_eq!(config.inventory.clay, 2);
        assert_eq!(config.inventory.grass, 10);
        assert_eq!(config.pricing.discount_percent, 10);
    }

    #[test]
    fn test_zero_discount_means_no_discount() {
        let config = BookingConfig::from_toml("[pricing]\ndiscount_percent = 0\n").unwrap();
        assert_eq!(config.discount_policy(), DiscountPolicy::NoDiscount);
    }

    #[test]
    fn test_invalid_discount_rejected() {
        let config = BookingConfig::from_toml("[pricing]\ndiscount_percent = 120\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid(CoreError::InvalidDiscount { percent: 120 }))
        ));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            BookingConfig::from_toml("[inventory\nclay = 2"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = BookingConfig::default();
        config.apply_overrides(env(&[
            ("COURTSIDE_DISCOUNT_PERCENT", "25"),
            ("COURTSIDE_HARD_COURTS", "1"),
            ("COURTSIDE_GRASS_COURTS", "lots"),
        ]));

        assert_eq!(config.pricing.discount_percent, 25);
        assert_eq!(config.inventory.hard, 1);
        // Unparseable value ignored.
        assert_eq!(config.inventory.grass, 10);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = BookingConfig::load(Some(Path::new("/nonexistent/courtside.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
