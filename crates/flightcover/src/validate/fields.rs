//! Numeric and calendar field parsing.
//!
//! The price and date inputs are not shape-checked by regex; they are parsed
//! and then range-checked against the intake policy.

use chrono::NaiveDate;
use thiserror::Error;

/// Date format accepted for the flight date (ISO calendar date).
pub const FLIGHT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Smallest price increment, in ETH.
pub const PRICE_STEP: f64 = 0.01;

/// Why an insurance price was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("'{0}' is not a number")]
    NotANumber(String),

    /// The value is below the configured minimum.
    #[error("price must be at least {min}")]
    BelowMinimum {
        /// The configured minimum.
        min: f64,
    },

    /// The value has more than two decimal places.
    #[error("price must be a multiple of 0.01")]
    OffStep,
}

/// Why a flight date was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// The input is not a `YYYY-MM-DD` date.
    #[error("'{0}' is not a YYYY-MM-DD date")]
    Malformed(String),

    /// The date lies before today.
    #[error("{date} is in the past (today is {today})")]
    InPast {
        /// The parsed date.
        date: NaiveDate,
        /// The reference day.
        today: NaiveDate,
    },
}

/// Digits allowed after the decimal point, matching [`PRICE_STEP`].
const PRICE_DECIMALS: usize = 2;

/// Parse an insurance price in ETH.
///
/// Accepts a plain decimal (optional sign, digits, at most one `.`) that is
/// at least `min` and has no more than two significant decimal places.
/// Exponent forms such as `1e-2` are not prices.
///
/// # Errors
///
/// Returns a [`PriceError`] describing the first failed check.
pub fn parse_insurance_price(input: &str, min: f64) -> Result<f64, PriceError> {
    let trimmed = input.trim();
    let not_a_number = || PriceError::NotANumber(trimmed.to_string());

    let unsigned = trimmed.strip_prefix(['-', '+']).unwrap_or(trimmed);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(whole) || !is_digits(fraction) || whole.len() + fraction.len() == 0 {
        return Err(not_a_number());
    }

    let value: f64 = trimmed
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(not_a_number)?;
    if value < min {
        return Err(PriceError::BelowMinimum { min });
    }

    if fraction.trim_end_matches('0').len() > PRICE_DECIMALS {
        return Err(PriceError::OffStep);
    }

    Ok(value)
}

/// Parse a flight date and require it to be `today` or later.
///
/// # Errors
///
/// Returns a [`DateError`] if the input is malformed or lies in the past.
pub fn parse_flight_date(input: &str, today: NaiveDate) -> Result<NaiveDate, DateError> {
    let trimmed = input.trim();
    let date = NaiveDate::parse_from_str(trimmed, FLIGHT_DATE_FORMAT)
        .map_err(|_| DateError::Malformed(trimmed.to_string()))?;

    if date < today {
        return Err(DateError::InPast { date, today });
    }

    Ok(date)
}
