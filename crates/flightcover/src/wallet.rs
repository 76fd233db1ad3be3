//! Wallet connection stub.
//!
//! There is no real wallet behind this: connecting records a flag and an
//! address string.

use serde::Serialize;
use tracing::info;

/// Connection state of the user's wallet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WalletSession {
    connected: bool,
    address: String,
}

impl WalletSession {
    /// A disconnected session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the wallet connected with `address`.
    pub fn connect(&mut self, address: impl Into<String>) {
        self.address = address.into();
        self.connected = true;
        info!(address = %self.address, "wallet connected");
    }

    /// Mark the wallet disconnected and forget the address.
    pub fn disconnect(&mut self) {
        if self.connected {
            info!(address = %self.address, "wallet disconnected");
        }
        self.connected = false;
        self.address.clear();
    }

    /// Whether a wallet is connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// The connected address, empty when disconnected.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_disconnected() {
        let wallet = WalletSession::new();
        assert!(!wallet.is_connected());
        assert_eq!(wallet.address(), "");
    }

    #[test]
    fn test_connect_and_disconnect() {
        let mut wallet = WalletSession::new();
        wallet.connect("0xYourWalletAddress");
        assert!(wallet.is_connected());
        assert_eq!(wallet.address(), "0xYourWalletAddress");

        wallet.disconnect();
        assert!(!wallet.is_connected());
        assert_eq!(wallet.address(), "");
    }
}
