//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::intake::IntakeField;

/// One-shot insurance submission.
#[derive(Debug, Args)]
pub struct InsureCommand {
    /// Airplane name (e.g. "Boeing 737 MAX")
    #[arg(long)]
    pub airplane_name: Option<String>,

    /// Airline ICAO code (e.g. AAL)
    #[arg(long)]
    pub aircraft_code: Option<String>,

    /// Flight number, two letters and 3-4 digits (e.g. AA1234)
    #[arg(short = 'f', long = "flight")]
    pub flight_number: Option<String>,

    /// Flight date, YYYY-MM-DD
    #[arg(short = 'd', long = "date")]
    pub flight_date: Option<String>,

    /// Insurance price in ETH
    #[arg(short, long)]
    pub price: Option<String>,

    /// Passenger wallet address (repeatable or comma-separated)
    #[arg(short, long = "wallet", value_delimiter = ',')]
    pub wallets: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,
}

impl InsureCommand {
    /// The scalar form fields that were given on the command line.
    #[must_use]
    pub fn fields(&self) -> Vec<(IntakeField, &str)> {
        [
            (IntakeField::AirplaneName, &self.airplane_name),
            (IntakeField::AircraftCode, &self.aircraft_code),
            (IntakeField::FlightNumber, &self.flight_number),
            (IntakeField::FlightDate, &self.flight_date),
            (IntakeField::InsurancePrice, &self.price),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }
}

/// Single-value validation checks.
#[derive(Debug, Subcommand)]
pub enum CheckCommand {
    /// Check a wallet address (0x followed by 40 hex digits)
    Address {
        /// The address to check
        value: String,
    },

    /// Check a flight number (two uppercase letters, 3-4 digits)
    Flight {
        /// The flight number to check
        value: String,
    },

    /// Check an insurance price
    Price {
        /// The price to check
        value: String,

        /// Minimum accepted price (defaults to the configured minimum)
        #[arg(long)]
        min: Option<f64>,
    },

    /// Check a flight date (YYYY-MM-DD, today or later)
    Date {
        /// The date to check
        value: String,
    },
}

/// Flights list arguments.
#[derive(Debug, Args)]
pub struct FlightsCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Transaction summary arguments.
#[derive(Debug, Args)]
pub struct TransactionsCommand {
    /// Status filter tags, replacing the default (repeatable or comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub status: Vec<String>,

    /// Show every transaction regardless of status
    #[arg(short, long, conflicts_with = "status")]
    pub all: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insure() -> InsureCommand {
        InsureCommand {
            airplane_name: None,
            aircraft_code: Some("AAL".to_string()),
            flight_number: Some("AA1234".to_string()),
            flight_date: None,
            price: Some("0.5".to_string()),
            wallets: Vec::new(),
            format: OutputFormat::Json,
        }
    }

    #[test]
    fn test_insure_fields_skip_missing() {
        let cmd = insure();
        assert_eq!(
            cmd.fields(),
            vec![
                (IntakeField::AircraftCode, "AAL"),
                (IntakeField::FlightNumber, "AA1234"),
                (IntakeField::InsurancePrice, "0.5"),
            ]
        );
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }

    #[test]
    fn test_check_command_debug() {
        let cmd = CheckCommand::Flight {
            value: "AA123".to_string(),
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Flight"));
        assert!(debug_str.contains("AA123"));
    }

    #[test]
    fn test_output_format_debug() {
        let format = OutputFormat::Json;
        let debug_str = format!("{format:?}");
        assert_eq!(debug_str, "Json");
    }
}
