//! IPFS upload abstraction.

use anyhow::Result;
use async_trait::async_trait;

use crate::marketplace::NftMetadata;

/// Abstraction over the IPFS upload service used during minting.
///
/// Pinning semantics are the service's concern; this crate only needs the
/// resulting content URIs.
#[async_trait]
pub trait IpfsUploader: Send + Sync {
    /// Upload raw file bytes (the NFT image) and return its URI.
    async fn upload_file(&self, bytes: &[u8]) -> Result<String>;

    /// Upload a token metadata document and return its URI.
    async fn upload_metadata(&self, metadata: &NftMetadata) -> Result<String>;
}
