//! Wallet session state.

use crate::error::{MarketError, MarketResult};
use crate::marketplace::Address;

/// Connection state of the externally-owned wallet.
///
/// The wallet provider owns the actual account; this type only mirrors what
/// the provider last reported. A restored session is trusted as-is until the
/// user explicitly disconnects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletSession {
    address: Option<Address>,
}

impl WalletSession {
    pub const fn disconnected() -> Self {
        Self { address: None }
    }

    pub const fn connected(address: Address) -> Self {
        Self {
            address: Some(address),
        }
    }

    pub const fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// Get the connected address, or fail if no wallet is connected.
    pub fn require_address(&self) -> MarketResult<&Address> {
        self.address.as_ref().ok_or(MarketError::WalletNotConnected)
    }

    pub fn connect(&mut self, address: Address) {
        self.address = Some(address);
    }

    pub fn disconnect(&mut self) {
        self.address = None;
    }
}
