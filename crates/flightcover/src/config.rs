//! Configuration management for flightcover.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::tags::DEFAULT_DELIMITERS;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "flightcover";

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "FLIGHTCOVER_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FLIGHTCOVER_`, sections split
///    by a double underscore, e.g. `FLIGHTCOVER_INTAKE__MIN_INSURANCE_PRICE`)
/// 2. TOML config file at `~/.config/flightcover/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Intake form configuration.
    pub intake: IntakeConfig,
    /// Wallet stub configuration.
    pub wallet: WalletConfig,
    /// Dashboard configuration.
    pub dashboard: DashboardConfig,
}

/// Intake form configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Require the airplane name field.
    pub require_airplane_name: bool,
    /// Require the flight date field.
    pub require_flight_date: bool,
    /// Smallest accepted insurance price in ETH.
    pub min_insurance_price: f64,
    /// Characters that commit a wallet address tag.
    pub tag_delimiters: Vec<char>,
}

/// Wallet stub configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Address reported after a demo "connect".
    pub demo_address: String,
}

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Seed the insured flights list with mock entries.
    pub seed_mock_flights: bool,
    /// Seed the transaction summary with mock entries.
    pub seed_mock_transactions: bool,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            require_airplane_name: true,
            require_flight_date: true,
            min_insurance_price: 0.01,
            tag_delimiters: DEFAULT_DELIMITERS.to_vec(),
        }
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            demo_address: "0xYourWalletAddress".to_string(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            seed_mock_flights: true,
            seed_mock_transactions: true,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        tracing::debug!(path = %config_file.display(), "configuration loaded");
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let min = self.intake.min_insurance_price;
        if !min.is_finite() || min <= 0.0 {
            return Err(Error::config_validation(format!(
                "min_insurance_price must be a positive number, got {min}"
            )));
        }

        if self.intake.tag_delimiters.is_empty() {
            return Err(Error::config_validation(
                "tag_delimiters must contain at least one character",
            ));
        }

        if self.wallet.demo_address.trim().is_empty() {
            return Err(Error::config_validation("demo_address must not be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.intake.require_airplane_name);
        assert!(config.intake.require_flight_date);
        assert!(config.dashboard.seed_mock_flights);
        assert_eq!(config.wallet.demo_address, "0xYourWalletAddress");
    }

    #[test]
    fn test_default_intake_config() {
        let intake = IntakeConfig::default();

        assert!((intake.min_insurance_price - 0.01).abs() < f64::EPSILON);
        assert_eq!(intake.tag_delimiters, vec![',', '\n']);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_non_positive_price() {
        let mut config = Config::default();
        config.intake.min_insurance_price = 0.0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("min_insurance_price"));
    }

    #[test]
    fn test_validate_nan_price() {
        let mut config = Config::default();
        config.intake.min_insurance_price = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_delimiters() {
        let mut config = Config::default();
        config.intake.tag_delimiters.clear();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("tag_delimiters"));
    }

    #[test]
    fn test_validate_empty_demo_address() {
        let mut config = Config::default();
        config.wallet.demo_address = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("demo_address"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("flightcover"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // A missing file falls back to defaults.
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), Config::default());
    }

    #[test]
    fn test_load_toml_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [intake]
                require_airplane_name = false
                min_insurance_price = 0.5
                tag_delimiters = [";"]

                [dashboard]
                seed_mock_flights = false
                "#,
            )?;

            let config = Config::load_from(Some(PathBuf::from("config.toml")))
                .map_err(|e| e.to_string())?;
            assert!(!config.intake.require_airplane_name);
            assert!(config.intake.require_flight_date);
            assert!((config.intake.min_insurance_price - 0.5).abs() < f64::EPSILON);
            assert_eq!(config.intake.tag_delimiters, vec![';']);
            assert!(!config.dashboard.seed_mock_flights);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[wallet]\ndemo_address = \"0xfile\"\n")?;
            jail.set_env("FLIGHTCOVER_WALLET__DEMO_ADDRESS", "0xenv");

            let config = Config::load_from(Some(PathBuf::from("config.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.wallet.demo_address, "0xenv");
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[intake]\nmin_insurance_price = -1.0\n")?;
            let result = Config::load_from(Some(PathBuf::from("config.toml")));
            assert!(matches!(result, Err(Error::ConfigValidation { .. })));
            Ok(())
        });
    }

    #[test]
    fn test_intake_config_serialize() {
        let json = serde_json::to_string(&IntakeConfig::default()).unwrap();
        assert!(json.contains("min_insurance_price"));
        assert!(json.contains("tag_delimiters"));
    }
}
