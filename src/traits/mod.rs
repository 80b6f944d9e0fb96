//! Trait abstractions for dependency injection and testability.
//!
//! This module provides trait-based abstractions for external dependencies,
//! enabling unit testing without requiring an actual wallet, contract
//! endpoint, upload service, or durable storage.

pub mod contract;
pub mod ipfs;
pub mod storage;
pub mod time;
pub mod wallet;

// Re-export all traits for crate-internal use.
// The public API surface is controlled by lib.rs re-exports.
pub use contract::ContractClient;
pub use ipfs::IpfsUploader;
pub use storage::KeyValueStore;
pub use time::TimeProvider;
pub use wallet::WalletProvider;

// Re-export default implementations
pub use time::SystemTimeProvider;
