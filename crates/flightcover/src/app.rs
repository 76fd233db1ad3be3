//! Application state shared by the front-end flows.
//!
//! [`App::init`] builds everything once at startup from the [`Config`]. The
//! wallet session, dashboard lists and intake modal are plain fields that
//! callers reach through `&App` / `&mut App`.

use std::fmt;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::flights::{InsuredFlight, InsuredFlights, TransactionSummary};
use crate::intake::{IntakePolicy, SubmitOutcome};
use crate::modal::{ModalShell, Notice};
use crate::wallet::WalletSession;

/// Text of the notice shown when starting without a wallet.
pub const CONNECT_WALLET_TEXT: &str = "Please connect your wallet to proceed";

/// Which page is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// Landing page.
    #[default]
    Home,
    /// Insured flights dashboard.
    Dashboard,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "home"),
            Self::Dashboard => write!(f, "dashboard"),
        }
    }
}

/// The whole front-end state.
#[derive(Debug, Clone)]
pub struct App {
    wallet: WalletSession,
    demo_address: String,
    route: Route,
    flights: InsuredFlights,
    transactions: TransactionSummary,
    modal: ModalShell,
    notice: Option<Notice>,
}

impl App {
    /// Build the application state from configuration.
    #[must_use]
    pub fn init(config: &Config) -> Self {
        Self::build(config, ModalShell::new(IntakePolicy::from(&config.intake)))
    }

    /// Like [`App::init`], with a custom "today" for flight date checks.
    #[must_use]
    pub fn init_with_today(config: &Config, today: fn() -> NaiveDate) -> Self {
        Self::build(
            config,
            ModalShell::with_today(IntakePolicy::from(&config.intake), today),
        )
    }

    fn build(config: &Config, modal: ModalShell) -> Self {
        let flights = if config.dashboard.seed_mock_flights {
            InsuredFlights::with_mock_flights()
        } else {
            InsuredFlights::new()
        };
        let transactions = if config.dashboard.seed_mock_transactions {
            TransactionSummary::with_mock_transactions()
        } else {
            TransactionSummary::default()
        };
        debug!(flights = flights.len(), "application state initialized");

        Self {
            wallet: WalletSession::new(),
            demo_address: config.wallet.demo_address.clone(),
            route: Route::Home,
            flights,
            transactions,
            modal,
            notice: None,
        }
    }

    /// The wallet session.
    #[must_use]
    pub fn wallet(&self) -> &WalletSession {
        &self.wallet
    }

    /// The current page.
    #[must_use]
    pub fn route(&self) -> Route {
        self.route
    }

    /// Insured flights.
    #[must_use]
    pub fn flights(&self) -> &InsuredFlights {
        &self.flights
    }

    /// Transaction summary.
    #[must_use]
    pub fn transactions(&self) -> &TransactionSummary {
        &self.transactions
    }

    /// Mutable transaction summary, for editing the status filter.
    pub fn transactions_mut(&mut self) -> &mut TransactionSummary {
        &mut self.transactions
    }

    /// The intake modal.
    #[must_use]
    pub fn modal(&self) -> &ModalShell {
        &self.modal
    }

    /// Mutable intake modal.
    pub fn modal_mut(&mut self) -> &mut ModalShell {
        &mut self.modal
    }

    /// Connect the wallet with the configured demo address.
    pub fn connect_wallet(&mut self) {
        let address = self.demo_address.clone();
        self.wallet.connect(address);
    }

    /// Disconnect the wallet, close the modal and go home.
    pub fn disconnect_wallet(&mut self) {
        self.wallet.disconnect();
        self.modal.close();
        self.route = Route::Home;
    }

    /// Go to the landing page.
    pub fn go_home(&mut self) {
        self.route = Route::Home;
    }

    /// Go to the dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WalletNotConnected`] without a connected wallet.
    pub fn open_dashboard(&mut self) -> Result<()> {
        if !self.wallet.is_connected() {
            return Err(Error::WalletNotConnected);
        }
        self.route = Route::Dashboard;
        Ok(())
    }

    /// The landing page's call to action.
    ///
    /// Opens the intake modal when a wallet is connected, otherwise queues an
    /// error notice. Returns whether the modal is open afterwards.
    pub fn get_started(&mut self) -> bool {
        if self.wallet.is_connected() {
            self.modal.open();
            true
        } else {
            info!("get started refused: wallet not connected");
            self.notice = Some(Notice::error("Error!", CONNECT_WALLET_TEXT));
            false
        }
    }

    /// The dashboard's "Insure Flight" action.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WalletNotConnected`] without a connected wallet.
    pub fn insure_flight(&mut self) -> Result<()> {
        if !self.wallet.is_connected() {
            return Err(Error::WalletNotConnected);
        }
        self.modal.open();
        Ok(())
    }

    /// Submit the intake form; accepted records join the insured flights.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.modal.submit(&mut self.flights)
    }

    /// The notice waiting to be acknowledged, if any.
    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref().or_else(|| self.modal.notice())
    }

    /// Dismiss the pending notice.
    pub fn acknowledge(&mut self) -> Option<Notice> {
        self.notice.take().or_else(|| self.modal.acknowledge())
    }

    /// Details of an insured flight.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FlightNotFound`] for an unknown id.
    pub fn view_flight(&self, id: u64) -> Result<&InsuredFlight> {
        self.flights.get(id).ok_or(Error::FlightNotFound { id })
    }
}
