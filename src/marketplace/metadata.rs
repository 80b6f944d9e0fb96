use serde::{Deserialize, Serialize};

use crate::error::{MarketError, MarketResult};
use crate::util::json_from_str;

/// Token metadata document uploaded to IPFS at mint time.
///
/// External metadata is validated through `from_json` instead of being
/// trusted shape-free at use-site: a payload that does not match produces
/// a `MalformedResponse` at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NftMetadata {
    pub name: String,
    pub description: String,

    /// Image URI the metadata points at
    pub image: String,
}

impl NftMetadata {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            image: image.into(),
        }
    }

    /// Serialize to the JSON document shape stored on IPFS.
    pub fn to_json(&self) -> MarketResult<String> {
        serde_json::to_string(self)
            .map_err(|e| MarketError::Serialization(format!("Failed to serialize metadata: {e}")))
    }

    /// Parse and validate an external metadata document.
    pub fn from_json(data: &str) -> MarketResult<Self> {
        json_from_str(data)
            .map_err(|e| MarketError::MalformedResponse(format!("invalid metadata document: {e}")))
    }
}
