//! `flightcover` - CLI for flight-delay insurance intake
//!
//! This binary runs the interactive session and the one-shot commands on top
//! of the `flightcover` library.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io;

use anyhow::{bail, Context};
use chrono::Local;
use clap::Parser;

use flightcover::cli::{
    CheckCommand, Cli, Command, ConfigCommand, FlightsCommand, InsureCommand, OutputFormat,
    TransactionsCommand,
};
use flightcover::flights::{Transaction, TransactionSummary};
use flightcover::intake::{IntakeController, IntakePolicy, SubmitOutcome};
use flightcover::session::{render_flights, render_transactions, write_json, Session};
use flightcover::validate::{self, builtin_patterns};
use flightcover::{init_logging, App, Config, Error, FlightInsuranceRecord, InsuredFlights};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;

    match cli.command {
        Command::Shell => handle_shell(&config),
        Command::Insure(cmd) => handle_insure(&config, &cmd),
        Command::Check(cmd) => handle_check(&config, &cmd),
        Command::Flights(cmd) => handle_flights(&config, &cmd),
        Command::Transactions(cmd) => handle_transactions(&cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn handle_shell(config: &Config) -> anyhow::Result<()> {
    println!("flightcover {} - type 'help' for commands", env!("CARGO_PKG_VERSION"));
    Session::new(App::init(config)).run(io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}

fn handle_insure(config: &Config, cmd: &InsureCommand) -> anyhow::Result<()> {
    let mut controller = IntakeController::new(IntakePolicy::from(&config.intake));
    for (field, value) in cmd.fields() {
        controller.set_field(field, value);
    }
    for wallet in &cmd.wallets {
        controller.add_wallet(wallet);
    }

    let mut accepted: Option<FlightInsuranceRecord> = None;
    let outcome = controller.submit(&mut |record: FlightInsuranceRecord| accepted = Some(record));
    match outcome {
        SubmitOutcome::Accepted => {}
        SubmitOutcome::Rejected(e) => bail!("{e}"),
        SubmitOutcome::Ignored => bail!("submission ignored"),
    }
    let record = accepted.ok_or_else(|| Error::internal("accepted submission produced no record"))?;

    match cmd.format {
        OutputFormat::Json => write_json(&mut io::stdout(), &record)?,
        OutputFormat::Plain | OutputFormat::Table => println!("{record}"),
    }
    Ok(())
}

fn handle_check(config: &Config, cmd: &CheckCommand) -> anyhow::Result<()> {
    match cmd {
        CheckCommand::Address { value } => {
            check_shape("wallet_address", value, validate::is_valid_wallet_address(value))
        }
        CheckCommand::Flight { value } => {
            check_shape("flight_number", value, validate::is_valid_flight_number(value))
        }
        CheckCommand::Price { value, min } => {
            let min = min.unwrap_or(config.intake.min_insurance_price);
            let price = validate::parse_insurance_price(value, min)?;
            println!("valid: {price:.2} ETH");
            Ok(())
        }
        CheckCommand::Date { value } => {
            let date = validate::parse_flight_date(value, Local::now().date_naive())?;
            println!("valid: {date}");
            Ok(())
        }
    }
}

fn check_shape(pattern: &str, value: &str, valid: bool) -> anyhow::Result<()> {
    if valid {
        println!("valid");
        return Ok(());
    }
    let expected = builtin_patterns()
        .into_iter()
        .find(|p| p.name == pattern)
        .map_or(pattern, |p| p.description);
    bail!("invalid: '{value}' is not a {expected}")
}

fn handle_flights(config: &Config, cmd: &FlightsCommand) -> anyhow::Result<()> {
    let flights = if config.dashboard.seed_mock_flights {
        InsuredFlights::with_mock_flights()
    } else {
        InsuredFlights::new()
    };

    match cmd.format {
        OutputFormat::Json => write_json(&mut io::stdout(), flights.all())?,
        OutputFormat::Plain => {
            for line in render_flights(&flights) {
                println!("{line}");
            }
        }
        OutputFormat::Table => {
            println!(
                "{:<5}{:<10}{:<8}{:<12}{}",
                "ID", "Flight", "ICAO", "Price", "Wallets"
            );
            for f in flights.all() {
                let price = format!("{:.2} ETH", f.record.insurance_price());
                println!(
                    "{:<5}{:<10}{:<8}{:<12}{}",
                    f.id,
                    f.record.flight_number(),
                    f.record.aircraft_code(),
                    price,
                    f.record.passenger_wallet_addresses().len()
                );
            }
        }
    }
    Ok(())
}

fn handle_transactions(cmd: &TransactionsCommand) -> anyhow::Result<()> {
    let mut summary = TransactionSummary::with_mock_transactions();
    if cmd.all || !cmd.status.is_empty() {
        let filter = summary.status_filter_mut();
        while filter.remove_at(0).is_some() {}
        for status in &cmd.status {
            filter.add(status);
        }
    }

    let visible: Vec<&Transaction> = summary.visible().collect();
    match cmd.format {
        OutputFormat::Json => write_json(&mut io::stdout(), &visible)?,
        OutputFormat::Table => {
            for line in render_transactions(&visible) {
                println!("{line}");
            }
        }
        OutputFormat::Plain => {
            for tx in visible {
                println!(
                    "{} {} {} {}",
                    tx.flight_number, tx.status, tx.wallet_address, tx.insurance_amount
                );
            }
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                write_json(&mut io::stdout(), config)?;
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Intake]");
                println!(
                    "  Require airplane name: {}",
                    config.intake.require_airplane_name
                );
                println!(
                    "  Require flight date:   {}",
                    config.intake.require_flight_date
                );
                println!(
                    "  Min insurance price:   {}",
                    config.intake.min_insurance_price
                );
                println!(
                    "  Tag delimiters:        {:?}",
                    config.intake.tag_delimiters
                );
                println!();
                println!("[Wallet]");
                println!("  Demo address:          {}", config.wallet.demo_address);
                println!();
                println!("[Dashboard]");
                println!(
                    "  Seed mock flights:     {}",
                    config.dashboard.seed_mock_flights
                );
                println!(
                    "  Seed transactions:     {}",
                    config.dashboard.seed_mock_transactions
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => bail!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
