//! Command-line interface for flightcover.
//!
//! This module provides the CLI structure for the `flightcover` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    CheckCommand, ConfigCommand, FlightsCommand, InsureCommand, OutputFormat,
    TransactionsCommand,
};

/// flightcover - Flight-delay insurance intake
///
/// Collects flight and passenger wallet details, validates them, and keeps a
/// dashboard of insured flights and insurance transactions.
#[derive(Debug, Parser)]
#[command(name = "flightcover")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start an interactive session (type `help` inside)
    Shell,

    /// Submit one insurance request and print the accepted record
    Insure(InsureCommand),

    /// Validate a single value
    #[command(subcommand)]
    Check(CheckCommand),

    /// List insured flights
    Flights(FlightsCommand),

    /// Show the transaction summary
    Transactions(TransactionsCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Logging verbosity selected by `-v`/`-q`.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.verbose, self.quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Shell,
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "flightcover");
    }

    #[test]
    fn test_verbosity_levels() {
        use crate::logging::Verbosity;

        assert_eq!(cli(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli(3, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_shell() {
        let cli = Cli::try_parse_from(["flightcover", "shell"]).unwrap();
        assert!(matches!(cli.command, Command::Shell));
    }

    #[test]
    fn test_parse_insure() {
        let args = [
            "flightcover",
            "insure",
            "--aircraft-code",
            "AAL",
            "--flight",
            "AA1234",
            "--date",
            "2030-01-01",
            "--price",
            "0.3",
            "--wallet",
            "0xaa,0xbb",
            "-w",
            "0xcc",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Insure(cmd) = cli.command else {
            panic!("expected insure");
        };
        assert_eq!(cmd.flight_number.as_deref(), Some("AA1234"));
        assert_eq!(cmd.wallets, vec!["0xaa", "0xbb", "0xcc"]);
        assert_eq!(cmd.format, OutputFormat::Json);
        assert!(cmd.airplane_name.is_none());
    }

    #[test]
    fn test_parse_check_flight() {
        let cli = Cli::try_parse_from(["flightcover", "check", "flight", "AA123"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Check(CheckCommand::Flight { ref value }) if value == "AA123"
        ));
    }

    #[test]
    fn test_parse_transactions_status() {
        let cli =
            Cli::try_parse_from(["flightcover", "transactions", "--status", "Pending,Delayed"])
                .unwrap();
        let Command::Transactions(cmd) = cli.command else {
            panic!("expected transactions");
        };
        assert_eq!(cmd.status, vec!["Pending", "Delayed"]);
        assert!(!cmd.all);
    }

    #[test]
    fn test_transactions_all_conflicts_with_status() {
        let result =
            Cli::try_parse_from(["flightcover", "transactions", "--all", "--status", "Pending"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_flights_json() {
        let cli = Cli::try_parse_from(["flightcover", "flights", "-f", "json"]).unwrap();
        let Command::Flights(cmd) = cli.command else {
            panic!("expected flights");
        };
        assert_eq!(cmd.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_with_config() {
        let args = ["flightcover", "-c", "/custom/config.toml", "flights"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_with_verbose_after_subcommand() {
        let cli = Cli::try_parse_from(["flightcover", "shell", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_with_quiet() {
        let cli = Cli::try_parse_from(["flightcover", "-q", "config", "path"]).unwrap();
        assert!(cli.quiet);
    }
}
