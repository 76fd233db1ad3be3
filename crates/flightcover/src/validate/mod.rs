//! Field validators for the flight insurance intake form.
//!
//! - **Shape predicates**: [`is_valid_wallet_address`] and
//!   [`is_valid_flight_number`] check an input against an anchored regex.
//!   They are pure and never panic.
//!
//! - **Value parsers**: [`parse_insurance_price`] and [`parse_flight_date`]
//!   turn raw input into typed values and enforce range rules.
//!
//! # Example
//!
//! ```
//! use flightcover::validate::{is_valid_flight_number, is_valid_wallet_address};
//!
//! assert!(is_valid_wallet_address("0x1234567890123456789012345678901234567890"));
//! assert!(!is_valid_wallet_address("0x123"));
//!
//! assert!(is_valid_flight_number("AA123"));
//! assert!(!is_valid_flight_number("aa123"));
//! ```

mod fields;
mod patterns;

use std::sync::OnceLock;

use regex::Regex;

pub use fields::{
    parse_flight_date, parse_insurance_price, DateError, PriceError, FLIGHT_DATE_FORMAT,
    PRICE_STEP,
};
pub use patterns::{
    builtin_patterns, ValidationPattern, FLIGHT_NUMBER_PATTERN, WALLET_ADDRESS_PATTERN,
};

fn wallet_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(WALLET_ADDRESS_PATTERN).expect("wallet pattern compiles"))
}

fn flight_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(FLIGHT_NUMBER_PATTERN).expect("flight pattern compiles"))
}

/// Returns true iff `s` is `0x` followed by exactly 40 hex digits.
#[must_use]
pub fn is_valid_wallet_address(s: &str) -> bool {
    wallet_regex().is_match(s)
}

/// Returns true iff `s` is two uppercase ASCII letters followed by 3 or 4 digits.
#[must_use]
pub fn is_valid_flight_number(s: &str) -> bool {
    flight_regex().is_match(s)
}
