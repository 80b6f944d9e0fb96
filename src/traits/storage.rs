//! Durable key-value persistence abstraction.

use anyhow::Result;

/// Abstraction over the durable local key-value layer used to mirror
/// application state (browser storage in the original host environment).
///
/// Operations are synchronous: the persistence layer is consulted inline
/// after each in-memory mutation, and failures are treated as best-effort
/// by the callers (logged, never propagated past the mutation).
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, overwriting any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`. Removing an absent key is not
    /// an error.
    fn remove(&self, key: &str) -> Result<()>;
}
