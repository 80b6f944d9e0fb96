//! Mock key-value store for testing.

use crate::traits::KeyValueStore;
use anyhow::{anyhow, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Types of failures that can be simulated.
#[derive(Debug, Clone)]
pub enum MockStorageFailure {
    /// Fail all operations.
    All,
    /// Fail only read operations.
    Reads,
    /// Fail only write operations (set and remove).
    Writes,
    /// Fail on a specific key.
    OnKey(String),
}

#[derive(Debug, Default)]
struct MockStorageInner {
    entries: HashMap<String, String>,
    fail_mode: Option<MockStorageFailure>,
    write_count: u64,
}

/// In-memory key-value store with failure injection.
///
/// Clones share the same underlying map, so a store handed to a `Market`
/// can still be inspected and poked from the test.
#[derive(Debug, Clone, Default)]
pub struct MockStorage {
    inner: Arc<Mutex<MockStorageInner>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable a failure mode for subsequent operations.
    pub fn set_fail_mode(&self, mode: Option<MockStorageFailure>) {
        self.inner.lock().fail_mode = mode;
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> u64 {
        self.inner.lock().write_count
    }

    /// Direct read of the underlying map, bypassing failure injection.
    pub fn raw_get(&self, key: &str) -> Option<String> {
        self.inner.lock().entries.get(key).cloned()
    }

    /// Direct write to the underlying map, bypassing failure injection.
    pub fn raw_set(&self, key: &str, value: &str) {
        self.inner
            .lock()
            .entries
            .insert(key.to_string(), value.to_string());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.lock().entries.contains_key(key)
    }

    fn should_fail(mode: Option<&MockStorageFailure>, key: &str, is_write: bool) -> bool {
        match mode {
            Some(MockStorageFailure::All) => true,
            Some(MockStorageFailure::Reads) => !is_write,
            Some(MockStorageFailure::Writes) => is_write,
            Some(MockStorageFailure::OnKey(k)) => k == key,
            None => false,
        }
    }
}

impl KeyValueStore for MockStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let inner = self.inner.lock();
        if Self::should_fail(inner.fail_mode.as_ref(), key, false) {
            return Err(anyhow!("simulated storage read failure"));
        }
        Ok(inner.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        if Self::should_fail(inner.fail_mode.as_ref(), key, true) {
            return Err(anyhow!("simulated storage write failure"));
        }
        inner.entries.insert(key.to_string(), value.to_string());
        inner.write_count += 1;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        if Self::should_fail(inner.fail_mode.as_ref(), key, true) {
            return Err(anyhow!("simulated storage write failure"));
        }
        inner.entries.remove(key);
        Ok(())
    }
}
