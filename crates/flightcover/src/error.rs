//! Error types for flightcover.
//!
//! This module defines the application-level error type. Intake validation
//! failures are not represented here: they live in [`crate::intake`] and are
//! always resolved into the form's error slot instead of being returned.

use thiserror::Error;

/// The main error type for flightcover operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Application State Errors ===
    /// An action needs a connected wallet.
    #[error("wallet is not connected")]
    WalletNotConnected,

    /// No insured flight exists with the given id.
    #[error("no insured flight with id {id}")]
    FlightNotFound {
        /// The id that was looked up.
        id: u64,
    },

    // === I/O Errors ===
    /// File system or terminal operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for flightcover operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error means the wallet must be connected first.
    #[must_use]
    pub fn is_wallet_not_connected(&self) -> bool {
        matches!(self, Self::WalletNotConnected)
    }
}
