//! Configuration constants for the marketplace state core.
//!
//! This module centralizes the fixed persistence key names and other
//! configuration values to improve maintainability and enable easier tuning.

/// Persistence key for the asset collection snapshot.
pub const STORAGE_KEY_ASSETS: &str = "nfts";

/// Persistence key for the transaction ledger snapshot.
pub const STORAGE_KEY_TRANSACTIONS: &str = "transactions";

/// Persistence key for the wallet connection flag.
pub const STORAGE_KEY_WALLET_CONNECTED: &str = "walletConnected";

/// Persistence key for the connected wallet address.
pub const STORAGE_KEY_WALLET_ADDRESS: &str = "walletAddress";

/// Schema version written into every persisted snapshot envelope.
/// Snapshots carrying a different version are discarded on load.
pub const SCHEMA_VERSION: u32 = 1;

/// Maximum size accepted when deserializing a persisted snapshot or an
/// external JSON payload.
pub const MAX_PAYLOAD_SIZE: usize = 1_048_576;

/// Return the current Unix timestamp in milliseconds.
///
/// This is a convenience wrapper that avoids the boilerplate of
/// `SystemTimeProvider::new().now_millis()` in production code paths.
/// For testable code, prefer accepting a `TimeProvider` parameter instead.
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
