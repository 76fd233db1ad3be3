//! `flightcover` - Flight-delay insurance intake
//!
//! This library provides the intake form for flight-delay insurance (field
//! validation, wallet address tags, submission state machine), the modal
//! that hosts it, and the in-memory dashboard state it feeds.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod flights;
pub mod intake;
pub mod logging;
pub mod modal;
pub mod record;
pub mod session;
pub mod tags;
pub mod validate;
pub mod wallet;

pub use app::{App, Route};
pub use config::Config;
pub use error::{Error, Result};
pub use flights::{InsuredFlight, InsuredFlights, TransactionSummary};
pub use intake::{IntakeController, IntakeField, SubmitHandler, SubmitOutcome, ValidationError};
pub use logging::init_logging;
pub use modal::ModalShell;
pub use record::FlightInsuranceRecord;
pub use tags::{Tag, TagEditor};
pub use wallet::WalletSession;
