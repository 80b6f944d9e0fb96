//! Mock contract client for testing.

use crate::traits::ContractClient;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// A recorded contract call, for assertions on flow behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractCall {
    Mint { metadata_uri: String },
    ListItem { token_id: String, price: u64 },
    BuyItem { token_id: String, price: u64 },
    CancelListing { token_id: String },
    UpdatePrice { token_id: String, new_price: u64 },
}

#[derive(Debug)]
struct MockContractInner {
    calls: Vec<ContractCall>,
    next_token_id: u64,
    fail_mode: bool,
    /// When set, `mint` returns this raw string instead of a real token id.
    mint_response_override: Option<String>,
}

/// Mock contract client that records calls and mints sequential token ids.
#[derive(Debug, Clone)]
pub struct MockContract {
    inner: Arc<Mutex<MockContractInner>>,
}

impl MockContract {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockContractInner {
                calls: Vec::new(),
                next_token_id: 1,
                fail_mode: false,
                mint_response_override: None,
            })),
        }
    }

    /// Make every subsequent call fail.
    pub fn set_fail_mode(&self, fail: bool) {
        self.inner.lock().fail_mode = fail;
    }

    /// Script a raw (possibly malformed) mint response.
    pub fn set_mint_response(&self, raw: impl Into<String>) {
        self.inner.lock().mint_response_override = Some(raw.into());
    }

    /// All calls recorded so far, in order.
    pub fn calls(&self) -> Vec<ContractCall> {
        self.inner.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().calls.len()
    }

    fn check_fail(inner: &MockContractInner) -> Result<()> {
        if inner.fail_mode {
            return Err(anyhow!("simulated contract failure"));
        }
        Ok(())
    }
}

impl Default for MockContract {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContractClient for MockContract {
    async fn mint(&self, metadata_uri: &str) -> Result<String> {
        let mut inner = self.inner.lock();
        Self::check_fail(&inner)?;
        inner.calls.push(ContractCall::Mint {
            metadata_uri: metadata_uri.to_string(),
        });
        if let Some(raw) = inner.mint_response_override.clone() {
            return Ok(raw);
        }
        let token_id = inner.next_token_id;
        inner.next_token_id += 1;
        Ok(token_id.to_string())
    }

    async fn list_item(&self, token_id: &str, price: u64) -> Result<()> {
        let mut inner = self.inner.lock();
        Self::check_fail(&inner)?;
        inner.calls.push(ContractCall::ListItem {
            token_id: token_id.to_string(),
            price,
        });
        Ok(())
    }

    async fn buy_item(&self, token_id: &str, price: u64) -> Result<()> {
        let mut inner = self.inner.lock();
        Self::check_fail(&inner)?;
        inner.calls.push(ContractCall::BuyItem {
            token_id: token_id.to_string(),
            price,
        });
        Ok(())
    }

    async fn cancel_listing(&self, token_id: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        Self::check_fail(&inner)?;
        inner.calls.push(ContractCall::CancelListing {
            token_id: token_id.to_string(),
        });
        Ok(())
    }

    async fn update_price(&self, token_id: &str, new_price: u64) -> Result<()> {
        let mut inner = self.inner.lock();
        Self::check_fail(&inner)?;
        inner.calls.push(ContractCall::UpdatePrice {
            token_id: token_id.to_string(),
            new_price,
        });
        Ok(())
    }
}
