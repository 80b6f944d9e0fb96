//! Wallet provider abstraction.

use anyhow::Result;
use async_trait::async_trait;

/// Abstraction over the external wallet provider (the injected browser
/// wallet in the original host environment).
///
/// The provider owns the actual accounts; this crate only records the
/// address it reports. A connection request may prompt the user and is
/// therefore asynchronous and fallible.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Request access to the provider's accounts.
    ///
    /// Returns the available account addresses; the first entry is treated
    /// as the active account. An empty list means the provider refused.
    async fn request_accounts(&self) -> Result<Vec<String>>;
}
