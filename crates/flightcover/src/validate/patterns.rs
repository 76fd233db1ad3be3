//! Built-in shape patterns for intake fields.
//!
//! Each pattern is anchored on both ends, so a match means the whole input
//! has the expected shape.

use regex::Regex;

/// Wallet address: `0x` followed by exactly 40 hex digits, any case.
pub const WALLET_ADDRESS_PATTERN: &str = r"^0x[a-fA-F0-9]{40}$";

/// Flight number: two uppercase letters followed by 3 or 4 ASCII digits.
///
/// Spelled `[0-9]` because `\d` in `regex` also matches non-ASCII digits.
pub const FLIGHT_NUMBER_PATTERN: &str = r"^[A-Z]{2}[0-9]{3,4}$";

/// A compiled field validation pattern.
#[derive(Debug, Clone)]
pub struct ValidationPattern {
    /// Name of the pattern for identification.
    pub name: &'static str,

    /// Description of what this pattern accepts.
    pub description: &'static str,

    /// The compiled regex.
    regex: Regex,
}

impl ValidationPattern {
    /// Create a new validation pattern.
    ///
    /// # Panics
    ///
    /// Panics if the regex pattern is invalid.
    #[must_use]
    pub fn new(name: &'static str, description: &'static str, pattern: &str) -> Self {
        Self {
            name,
            description,
            regex: Regex::new(pattern).expect("Invalid regex pattern"),
        }
    }

    /// Check if the input matches this pattern.
    #[must_use]
    pub fn matches(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }

    /// The source text of the compiled regex.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Get all built-in validation patterns.
#[must_use]
pub fn builtin_patterns() -> Vec<ValidationPattern> {
    vec![
        ValidationPattern::new(
            "wallet_address",
            "Passenger wallet address (0x plus 40 hex digits)",
            WALLET_ADDRESS_PATTERN,
        ),
        ValidationPattern::new(
            "flight_number",
            "Airline flight number (e.g. AA123 or AA1234)",
            FLIGHT_NUMBER_PATTERN,
        ),
    ]
}
