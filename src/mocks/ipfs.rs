//! Mock IPFS uploader for testing.

use crate::marketplace::NftMetadata;
use crate::traits::IpfsUploader;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Default)]
struct MockIpfsInner {
    uploads: Vec<String>,
    metadata_uploads: Vec<String>,
    fail_mode: bool,
    next_cid: u64,
}

/// Mock IPFS uploader producing deterministic URIs.
#[derive(Debug, Clone, Default)]
pub struct MockIpfs {
    inner: Arc<Mutex<MockIpfsInner>>,
}

impl MockIpfs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent upload fail.
    pub fn set_fail_mode(&self, fail: bool) {
        self.inner.lock().fail_mode = fail;
    }

    /// URIs of uploaded files, in order.
    pub fn file_uploads(&self) -> Vec<String> {
        self.inner.lock().uploads.clone()
    }

    /// Serialized metadata documents uploaded, in order.
    pub fn metadata_uploads(&self) -> Vec<String> {
        self.inner.lock().metadata_uploads.clone()
    }
}

#[async_trait]
impl IpfsUploader for MockIpfs {
    async fn upload_file(&self, bytes: &[u8]) -> Result<String> {
        let mut inner = self.inner.lock();
        if inner.fail_mode {
            return Err(anyhow!("simulated IPFS failure"));
        }
        inner.next_cid += 1;
        let uri = format!("ipfs://file-{}-{}", inner.next_cid, bytes.len());
        inner.uploads.push(uri.clone());
        Ok(uri)
    }

    async fn upload_metadata(&self, metadata: &NftMetadata) -> Result<String> {
        let mut inner = self.inner.lock();
        if inner.fail_mode {
            return Err(anyhow!("simulated IPFS failure"));
        }
        let document = metadata
            .to_json()
            .map_err(|e| anyhow!("metadata serialization failed: {e}"))?;
        inner.next_cid += 1;
        let uri = format!("ipfs://meta-{}", inner.next_cid);
        inner.metadata_uploads.push(document);
        Ok(uri)
    }
}
