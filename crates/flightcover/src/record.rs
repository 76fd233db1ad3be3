//! The validated flight insurance record.
//!
//! A [`FlightInsuranceRecord`] is only built by the intake controller after
//! every check has passed, and it exposes no way to change it afterwards.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// A fully validated request to insure a flight.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightInsuranceRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    airplane_name: Option<String>,
    aircraft_code: String,
    flight_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    flight_date: Option<NaiveDate>,
    insurance_price: f64,
    passenger_wallet_addresses: Vec<String>,
}

impl FlightInsuranceRecord {
    pub(crate) fn new(
        airplane_name: Option<String>,
        aircraft_code: String,
        flight_number: String,
        flight_date: Option<NaiveDate>,
        insurance_price: f64,
        passenger_wallet_addresses: Vec<String>,
    ) -> Self {
        Self {
            airplane_name,
            aircraft_code,
            flight_number,
            flight_date,
            insurance_price,
            passenger_wallet_addresses,
        }
    }

    /// Airplane name, when one was entered.
    #[must_use]
    pub fn airplane_name(&self) -> Option<&str> {
        self.airplane_name.as_deref()
    }

    /// Airline ICAO-style code.
    #[must_use]
    pub fn aircraft_code(&self) -> &str {
        &self.aircraft_code
    }

    /// Flight number, e.g. `AA123`.
    #[must_use]
    pub fn flight_number(&self) -> &str {
        &self.flight_number
    }

    /// Date of the flight, when one was entered.
    #[must_use]
    pub fn flight_date(&self) -> Option<NaiveDate> {
        self.flight_date
    }

    /// Insurance price in ETH.
    #[must_use]
    pub fn insurance_price(&self) -> f64 {
        self.insurance_price
    }

    /// Passenger wallet addresses in the order they were entered.
    #[must_use]
    pub fn passenger_wallet_addresses(&self) -> &[String] {
        &self.passenger_wallet_addresses
    }
}

/// Renders the flight details view.
impl fmt::Display for FlightInsuranceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Flight Details")?;
        if let Some(name) = &self.airplane_name {
            writeln!(f, "  Airplane Name:    {name}")?;
        }
        writeln!(f, "  Airline ICAO:     {}", self.aircraft_code)?;
        writeln!(f, "  Flight Number:    {}", self.flight_number)?;
        if let Some(date) = self.flight_date {
            writeln!(f, "  Flight Date:      {date}")?;
        }
        writeln!(f, "  Insurance Price:  {:.2} ETH", self.insurance_price)?;
        write!(f, "  Passengers' Wallet Addresses:")?;
        for address in &self.passenger_wallet_addresses {
            write!(f, "\n    - {address}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FlightInsuranceRecord {
        FlightInsuranceRecord::new(
            Some("Boeing 737".to_string()),
            "AAL".to_string(),
            "AA123".to_string(),
            NaiveDate::from_ymd_opt(2026, 12, 1),
            0.25,
            vec!["0x1234567890123456789012345678901234567890".to_string()],
        )
    }

    #[test]
    fn test_serialize_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["airplaneName"], "Boeing 737");
        assert_eq!(json["aircraftCode"], "AAL");
        assert_eq!(json["flightNumber"], "AA123");
        assert_eq!(json["flightDate"], "2026-12-01");
        assert_eq!(json["insurancePrice"], 0.25);
        assert_eq!(
            json["passengerWalletAddresses"][0],
            "0x1234567890123456789012345678901234567890"
        );
    }

    #[test]
    fn test_serialize_skips_absent_optionals() {
        let record = FlightInsuranceRecord::new(
            None,
            "DAL".to_string(),
            "DL456".to_string(),
            None,
            1.0,
            vec![],
        );
        let json = serde_json::to_value(record).unwrap();
        assert!(json.get("airplaneName").is_none());
        assert!(json.get("flightDate").is_none());
    }

    #[test]
    fn test_display_details() {
        let text = sample().to_string();
        assert!(text.starts_with("Flight Details"));
        assert!(text.contains("Airline ICAO:     AAL"));
        assert!(text.contains("0.25 ETH"));
        assert!(text.contains("- 0x1234567890123456789012345678901234567890"));
    }
}
