//! Contract submission abstraction.

use anyhow::Result;
use async_trait::async_trait;

/// Abstraction over the external NFT and marketplace contracts.
///
/// Each operation submits a transaction and resolves once it is mined.
/// The contracts are authoritative for minting and fixed-price sales;
/// this crate records their local effect after a successful call.
#[async_trait]
pub trait ContractClient: Send + Sync {
    /// Mint a token pointing at `metadata_uri`.
    ///
    /// Returns the token identifier assigned by the contract, as the raw
    /// string reported by the provider. Callers validate the shape.
    async fn mint(&self, metadata_uri: &str) -> Result<String>;

    /// List a token for sale at a fixed price (atomic units).
    async fn list_item(&self, token_id: &str, price: u64) -> Result<()>;

    /// Buy a listed token at its asking price (atomic units).
    async fn buy_item(&self, token_id: &str, price: u64) -> Result<()>;

    /// Cancel an active fixed-price listing.
    async fn cancel_listing(&self, token_id: &str) -> Result<()>;

    /// Update the asking price of an active listing.
    async fn update_price(&self, token_id: &str, new_price: u64) -> Result<()>;
}
