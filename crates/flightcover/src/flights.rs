//! In-memory dashboard data: insured flights and insurance transactions.
//!
//! Both lists are mock data held for the lifetime of the process. Accepted
//! intake records are appended to [`InsuredFlights`].

use std::fmt;

use chrono::NaiveTime;
use serde::Serialize;
use tracing::info;

use crate::intake::SubmitHandler;
use crate::record::FlightInsuranceRecord;
use crate::tags::TagEditor;

/// A flight shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsuredFlight {
    /// Dashboard-local id.
    pub id: u64,
    /// The insured record.
    pub record: FlightInsuranceRecord,
}

/// Ordered list of insured flights.
#[derive(Debug, Clone)]
pub struct InsuredFlights {
    flights: Vec<InsuredFlight>,
    next_id: u64,
}

impl InsuredFlights {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flights: Vec::new(),
            next_id: 1,
        }
    }

    /// Create a list holding the two mock flights, `AA123` and `DL456`.
    #[must_use]
    pub fn with_mock_flights() -> Self {
        let mut flights = Self::new();
        flights.insert(FlightInsuranceRecord::new(
            None,
            "AAL".to_string(),
            "AA123".to_string(),
            None,
            0.1,
            vec!["0x1234567890123456789012345678901234567890".to_string()],
        ));
        flights.insert(FlightInsuranceRecord::new(
            None,
            "DAL".to_string(),
            "DL456".to_string(),
            None,
            0.2,
            vec!["0x8765432109876543210987654321098765432109".to_string()],
        ));
        flights
    }

    /// Append a record and return its id.
    pub fn insert(&mut self, record: FlightInsuranceRecord) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.flights.push(InsuredFlight { id, record });
        id
    }

    /// Look up a flight by id.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&InsuredFlight> {
        self.flights.iter().find(|f| f.id == id)
    }

    /// All flights, oldest first.
    #[must_use]
    pub fn all(&self) -> &[InsuredFlight] {
        &self.flights
    }

    /// Number of flights.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    /// Check if there are no flights.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }
}

impl Default for InsuredFlights {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmitHandler for InsuredFlights {
    fn on_submit(&mut self, record: FlightInsuranceRecord) {
        let flight = record.flight_number().to_string();
        let id = self.insert(record);
        info!(id, %flight, "flight insured");
    }
}

/// Settlement status of an insurance transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Awaiting the flight.
    Pending,
    /// Settled without payout.
    Completed,
    /// The flight was delayed.
    Delayed,
}

impl TransactionStatus {
    /// Lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Delayed => "delayed",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the transaction summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Row id.
    pub id: String,
    /// Flight number.
    pub flight_number: String,
    /// Scheduled departure time.
    pub time_of_flight: NaiveTime,
    /// Shortened wallet address.
    pub wallet_address: String,
    /// Settlement status.
    pub status: TransactionStatus,
    /// Insured amount, with unit.
    pub insurance_amount: String,
}

/// Transaction table with a tag-based status filter.
#[derive(Debug, Clone)]
pub struct TransactionSummary {
    transactions: Vec<Transaction>,
    status_filter: TagEditor,
}

impl Default for TransactionSummary {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl TransactionSummary {
    /// Create a summary over `transactions` with the default filter
    /// (`Pending`, `Completed`).
    #[must_use]
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions,
            status_filter: TagEditor::from_tokens(["Pending", "Completed"]),
        }
    }

    /// Create a summary over the two mock transactions.
    #[must_use]
    pub fn with_mock_transactions() -> Self {
        Self::new(vec![
            Transaction {
                id: "1".to_string(),
                flight_number: "AA1234".to_string(),
                time_of_flight: NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default(),
                wallet_address: "0x1234...5678".to_string(),
                status: TransactionStatus::Pending,
                insurance_amount: "0.1 ETH".to_string(),
            },
            Transaction {
                id: "2".to_string(),
                flight_number: "UA5678".to_string(),
                time_of_flight: NaiveTime::from_hms_opt(14, 30, 0).unwrap_or_default(),
                wallet_address: "0x8765...4321".to_string(),
                status: TransactionStatus::Completed,
                insurance_amount: "0.2 ETH".to_string(),
            },
        ])
    }

    /// The status filter editor.
    #[must_use]
    pub fn status_filter(&self) -> &TagEditor {
        &self.status_filter
    }

    /// Mutable access to the status filter editor.
    pub fn status_filter_mut(&mut self) -> &mut TagEditor {
        &mut self.status_filter
    }

    /// All transactions, unfiltered.
    #[must_use]
    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Transactions whose status matches a filter tag (case-insensitive).
    /// An empty filter shows everything.
    pub fn visible(&self) -> impl Iterator<Item = &Transaction> + '_ {
        self.transactions.iter().filter(move |tx| {
            self.status_filter.is_empty()
                || self
                    .status_filter
                    .texts()
                    .any(|tag| tag.eq_ignore_ascii_case(tx.status.as_str()))
        })
    }
}
