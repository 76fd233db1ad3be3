//! Intake form controller for flight insurance requests.
//!
//! The controller owns the form's field values and runs validation when the
//! form is submitted. A submission either lands in the form's single error
//! slot or produces a [`FlightInsuranceRecord`] that is handed to a
//! [`SubmitHandler`] exactly once. Validation failures never escape as
//! `Err`.
//!
//! ```text
//! Editing --submit--> Validating --+--> Rejected --> Editing (error set)
//!                                  +--> Accepted (terminal, form reset)
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::config::IntakeConfig;
use crate::record::FlightInsuranceRecord;
use crate::tags::{TagEditor, DEFAULT_DELIMITERS};
use crate::validate::{
    is_valid_flight_number, is_valid_wallet_address, parse_flight_date, parse_insurance_price,
};

/// Shown when a required field is empty.
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields correctly.";

/// Shown when the flight number has the wrong shape.
pub const FLIGHT_NUMBER_MESSAGE: &str =
    "Please fill in fields correctly. Flight number should be in format AA1234";

/// Shown when any passenger wallet address has the wrong shape.
pub const WALLET_ADDRESS_MESSAGE: &str = "Please enter valid wallet addresses (0x format)";

/// The inputs of the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntakeField {
    /// Free-text airplane name.
    AirplaneName,
    /// Airline ICAO-style code.
    AircraftCode,
    /// Flight number such as `AA123`.
    FlightNumber,
    /// ISO flight date.
    FlightDate,
    /// Insurance price in ETH.
    InsurancePrice,
    /// Passenger wallet addresses (tag editor).
    PassengerWallets,
}

impl IntakeField {
    /// All fields, in form order.
    pub const ALL: [IntakeField; 6] = [
        Self::AirplaneName,
        Self::AircraftCode,
        Self::FlightNumber,
        Self::FlightDate,
        Self::InsurancePrice,
        Self::PassengerWallets,
    ];

    /// The form label for this field.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::AirplaneName => "Airplane Name",
            Self::AircraftCode => "Aircraft Code",
            Self::FlightNumber => "Flight Number",
            Self::FlightDate => "Flight Date",
            Self::InsurancePrice => "Insurance Price (ETH)",
            Self::PassengerWallets => "Passengers' Wallet Addresses",
        }
    }

    /// The snake_case key used on the command line.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::AirplaneName => "airplane_name",
            Self::AircraftCode => "aircraft_code",
            Self::FlightNumber => "flight_number",
            Self::FlightDate => "flight_date",
            Self::InsurancePrice => "insurance_price",
            Self::PassengerWallets => "wallets",
        }
    }
}

impl fmt::Display for IntakeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when a field name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for IntakeField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "airplane_name" | "airplanename" | "name" => Ok(Self::AirplaneName),
            "aircraft_code" | "aircraftcode" | "code" | "icao" => Ok(Self::AircraftCode),
            "flight_number" | "flightnumber" | "flight" => Ok(Self::FlightNumber),
            "flight_date" | "flightdate" | "date" => Ok(Self::FlightDate),
            "insurance_price" | "insuranceprice" | "price" => Ok(Self::InsurancePrice),
            "wallets" | "passenger_wallets" | "passengerwalletaddresses" => {
                Ok(Self::PassengerWallets)
            }
            _ => Err(UnknownField(s.to_string())),
        }
    }
}

/// Why a submission was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required inputs were empty.
    #[error("Please fill in all fields correctly.")]
    MissingField {
        /// The empty fields, in form order.
        fields: Vec<IntakeField>,
    },

    /// A present input failed its shape or range check.
    #[error("{message}")]
    InvalidFormat {
        /// The offending field.
        field: IntakeField,
        /// User-visible message.
        message: String,
    },
}

impl ValidationError {
    fn invalid(field: IntakeField, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field,
            message: message.into(),
        }
    }

    /// Check if this is a [`ValidationError::MissingField`].
    #[must_use]
    pub fn is_missing_field(&self) -> bool {
        matches!(self, Self::MissingField { .. })
    }

    /// Check if this is a [`ValidationError::InvalidFormat`].
    #[must_use]
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, Self::InvalidFormat { .. })
    }
}

/// Which fields are required and how tag input is split.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakePolicy {
    /// Require the airplane name.
    pub require_airplane_name: bool,
    /// Require the flight date.
    pub require_flight_date: bool,
    /// Smallest accepted insurance price in ETH.
    pub min_insurance_price: f64,
    /// Characters that commit a wallet address tag.
    pub tag_delimiters: Vec<char>,
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self {
            require_airplane_name: true,
            require_flight_date: true,
            min_insurance_price: 0.01,
            tag_delimiters: DEFAULT_DELIMITERS.to_vec(),
        }
    }
}

impl From<&IntakeConfig> for IntakePolicy {
    fn from(config: &IntakeConfig) -> Self {
        Self {
            require_airplane_name: config.require_airplane_name,
            require_flight_date: config.require_flight_date,
            min_insurance_price: config.min_insurance_price,
            tag_delimiters: config.tag_delimiters.clone(),
        }
    }
}

/// Ephemeral form contents.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    airplane_name: String,
    aircraft_code: String,
    flight_number: String,
    flight_date: String,
    insurance_price: String,
    wallets: TagEditor,
    error: Option<String>,
    submitting: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self::with_delimiters(DEFAULT_DELIMITERS.iter().copied())
    }
}

impl FormState {
    /// Create an empty form whose wallet editor commits on `delimiters`.
    #[must_use]
    pub fn with_delimiters(delimiters: impl IntoIterator<Item = char>) -> Self {
        Self {
            airplane_name: String::new(),
            aircraft_code: String::new(),
            flight_number: String::new(),
            flight_date: String::new(),
            insurance_price: String::new(),
            wallets: TagEditor::with_delimiters(delimiters),
            error: None,
            submitting: false,
        }
    }

    /// Raw text of a field. For [`IntakeField::PassengerWallets`] this is
    /// the uncommitted tag input.
    #[must_use]
    pub fn value(&self, field: IntakeField) -> &str {
        match field {
            IntakeField::AirplaneName => &self.airplane_name,
            IntakeField::AircraftCode => &self.aircraft_code,
            IntakeField::FlightNumber => &self.flight_number,
            IntakeField::FlightDate => &self.flight_date,
            IntakeField::InsurancePrice => &self.insurance_price,
            IntakeField::PassengerWallets => self.wallets.pending(),
        }
    }

    /// The wallet address editor.
    #[must_use]
    pub fn wallets(&self) -> &TagEditor {
        &self.wallets
    }

    /// The most recent validation message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a submission is being validated.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// True when every field is empty, there is no error and no submission
    /// in flight.
    #[must_use]
    pub fn is_pristine(&self) -> bool {
        IntakeField::ALL.iter().all(|f| self.value(*f).is_empty())
            && self.wallets.is_empty()
            && self.error.is_none()
            && !self.submitting
    }
}

/// Lifecycle state of an [`IntakeController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeState {
    /// Accepting edits.
    Editing,
    /// Running validators.
    Validating,
    /// Validation failed; passes straight back to `Editing`.
    Rejected,
    /// A record was handed off. No further edits or submissions.
    Accepted,
}

impl fmt::Display for IntakeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Editing => write!(f, "editing"),
            Self::Validating => write!(f, "validating"),
            Self::Rejected => write!(f, "rejected"),
            Self::Accepted => write!(f, "accepted"),
        }
    }
}

/// Receives accepted records.
pub trait SubmitHandler {
    /// Take ownership of an accepted record.
    fn on_submit(&mut self, record: FlightInsuranceRecord);
}

impl<F> SubmitHandler for F
where
    F: FnMut(FlightInsuranceRecord),
{
    fn on_submit(&mut self, record: FlightInsuranceRecord) {
        self(record);
    }
}

/// Result of [`IntakeController::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The record was handed to the handler and the form was reset.
    Accepted,
    /// Validation failed; the message is in the form's error slot.
    Rejected(ValidationError),
    /// The controller had already accepted a submission.
    Ignored,
}

impl SubmitOutcome {
    /// Check if the submission was accepted.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Orchestrates the intake form.
#[derive(Debug, Clone)]
pub struct IntakeController {
    policy: IntakePolicy,
    form: FormState,
    state: IntakeState,
    today: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl Default for IntakeController {
    fn default() -> Self {
        Self::new(IntakePolicy::default())
    }
}

impl IntakeController {
    /// Create a controller that checks dates against the local calendar.
    #[must_use]
    pub fn new(policy: IntakePolicy) -> Self {
        Self::with_today(policy, local_today)
    }

    /// Create a controller with a custom source for "today".
    #[must_use]
    pub fn with_today(policy: IntakePolicy, today: fn() -> NaiveDate) -> Self {
        let form = FormState::with_delimiters(policy.tag_delimiters.iter().copied());
        Self {
            policy,
            form,
            state: IntakeState::Editing,
            today,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> IntakeState {
        self.state
    }

    /// Current form contents.
    #[must_use]
    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// The policy this controller validates against.
    #[must_use]
    pub fn policy(&self) -> &IntakePolicy {
        &self.policy
    }

    fn editable(&self) -> bool {
        if self.state == IntakeState::Accepted {
            warn!("edit ignored: submission already accepted");
            return false;
        }
        true
    }

    /// Replace a field's text.
    ///
    /// For [`IntakeField::PassengerWallets`] the value is typed into the tag
    /// editor instead, so delimiters inside it commit tags. Returns `false`
    /// when the controller no longer accepts edits.
    pub fn set_field(&mut self, field: IntakeField, value: &str) -> bool {
        if !self.editable() {
            return false;
        }
        let slot = match field {
            IntakeField::AirplaneName => &mut self.form.airplane_name,
            IntakeField::AircraftCode => &mut self.form.aircraft_code,
            IntakeField::FlightNumber => &mut self.form.flight_number,
            IntakeField::FlightDate => &mut self.form.flight_date,
            IntakeField::InsurancePrice => &mut self.form.insurance_price,
            IntakeField::PassengerWallets => {
                self.form.wallets.input(value);
                return true;
            }
        };
        value.clone_into(slot);
        trace!(%field, "field updated");
        true
    }

    /// Type text into the wallet address editor.
    pub fn type_wallets(&mut self, text: &str) -> Vec<u64> {
        if !self.editable() {
            return Vec::new();
        }
        self.form.wallets.input(text)
    }

    /// Add one wallet address tag directly.
    pub fn add_wallet(&mut self, address: &str) -> Option<u64> {
        if !self.editable() {
            return None;
        }
        self.form.wallets.add(address)
    }

    /// Commit whatever is pending in the wallet editor.
    pub fn commit_wallet(&mut self) -> Option<u64> {
        if !self.editable() {
            return None;
        }
        self.form.wallets.commit()
    }

    /// Remove the wallet tag at `index`. Out of range is a no-op.
    pub fn remove_wallet(&mut self, index: usize) -> bool {
        self.editable() && self.form.wallets.remove_at(index).is_some()
    }

    /// Validate the form and, on success, hand the record to `handler`.
    pub fn submit<H>(&mut self, handler: &mut H) -> SubmitOutcome
    where
        H: SubmitHandler + ?Sized,
    {
        if self.state == IntakeState::Accepted {
            warn!("submit ignored: submission already accepted");
            return SubmitOutcome::Ignored;
        }

        self.form.error = None;
        self.form.submitting = true;
        self.transition(IntakeState::Validating);

        match self.validate() {
            Err(err) => {
                self.transition(IntakeState::Rejected);
                debug!(error = %err, "submission rejected");
                self.form.error = Some(err.to_string());
                self.form.submitting = false;
                self.transition(IntakeState::Editing);
                SubmitOutcome::Rejected(err)
            }
            Ok(record) => {
                self.transition(IntakeState::Accepted);
                info!(
                    flight = record.flight_number(),
                    passengers = record.passenger_wallet_addresses().len(),
                    "insurance request accepted"
                );
                handler.on_submit(record);
                self.form = FormState::with_delimiters(self.policy.tag_delimiters.iter().copied());
                SubmitOutcome::Accepted
            }
        }
    }

    fn transition(&mut self, to: IntakeState) {
        trace!(from = %self.state, %to, "intake transition");
        self.state = to;
    }

    fn missing_fields(&self) -> Vec<IntakeField> {
        let form = &self.form;
        IntakeField::ALL
            .into_iter()
            .filter(|field| match field {
                IntakeField::AirplaneName => {
                    self.policy.require_airplane_name && is_blank(&form.airplane_name)
                }
                IntakeField::FlightDate => {
                    self.policy.require_flight_date && is_blank(&form.flight_date)
                }
                IntakeField::PassengerWallets => form.wallets.is_empty(),
                other => is_blank(form.value(*other)),
            })
            .collect()
    }

    fn validate(&self) -> Result<FlightInsuranceRecord, ValidationError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ValidationError::MissingField { fields: missing });
        }

        let form = &self.form;
        if !is_valid_flight_number(&form.flight_number) {
            return Err(ValidationError::invalid(
                IntakeField::FlightNumber,
                FLIGHT_NUMBER_MESSAGE,
            ));
        }

        let price = parse_insurance_price(&form.insurance_price, self.policy.min_insurance_price)
            .map_err(|e| {
                ValidationError::invalid(
                    IntakeField::InsurancePrice,
                    format!("Please enter a valid insurance price: {e}"),
                )
            })?;

        let date = if is_blank(&form.flight_date) {
            None
        } else {
            let date = parse_flight_date(&form.flight_date, (self.today)()).map_err(|e| {
                ValidationError::invalid(
                    IntakeField::FlightDate,
                    format!("Please choose a flight date of today or later: {e}"),
                )
            })?;
            Some(date)
        };

        if !form.wallets.texts().all(is_valid_wallet_address) {
            return Err(ValidationError::invalid(
                IntakeField::PassengerWallets,
                WALLET_ADDRESS_MESSAGE,
            ));
        }

        let airplane_name = Some(form.airplane_name.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(FlightInsuranceRecord::new(
            airplane_name,
            form.aircraft_code.trim().to_string(),
            form.flight_number.clone(),
            date,
            price,
            form.wallets.texts().map(str::to_string).collect(),
        ))
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
