//! Mock wallet provider for testing.

use crate::traits::WalletProvider;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// Create a deterministic test address from an id.
pub fn make_test_address(id: u8) -> String {
    format!("0x{id:040x}")
}

#[derive(Debug, Default)]
struct MockWalletInner {
    accounts: Vec<String>,
    fail_mode: bool,
    request_count: u64,
}

/// Mock wallet provider with scripted accounts.
#[derive(Debug, Clone, Default)]
pub struct MockWallet {
    inner: Arc<Mutex<MockWalletInner>>,
}

impl MockWallet {
    /// Create a provider with no accounts (connection will be refused).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider exposing a single test account.
    pub fn with_account(id: u8) -> Self {
        let wallet = Self::default();
        wallet.inner.lock().accounts = vec![make_test_address(id)];
        wallet
    }

    /// Replace the scripted account list.
    pub fn set_accounts(&self, accounts: Vec<String>) {
        self.inner.lock().accounts = accounts;
    }

    /// Make subsequent requests fail (no provider available).
    pub fn set_fail_mode(&self, fail: bool) {
        self.inner.lock().fail_mode = fail;
    }

    /// Number of account requests made so far.
    pub fn request_count(&self) -> u64 {
        self.inner.lock().request_count
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn request_accounts(&self) -> Result<Vec<String>> {
        let mut inner = self.inner.lock();
        inner.request_count += 1;
        if inner.fail_mode {
            return Err(anyhow!("no wallet provider available"));
        }
        Ok(inner.accounts.clone())
    }
}
