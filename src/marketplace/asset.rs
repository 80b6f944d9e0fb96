use serde::{Deserialize, Serialize};

use crate::config::now_millis;
use crate::error::{MarketError, MarketResult};

/// Locally-assigned asset identifier.
///
/// Assigned by the asset store at creation time; stable for the lifetime of
/// the record (assets are never hard-deleted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(pub u64);

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// On-chain token identifier as reported by the NFT contract.
///
/// Token identifiers are decimal strings (uint256 rendered in base 10).
/// `parse` validates the shape at the contract boundary so a malformed
/// provider response is rejected instead of trusted at use-site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(String);

impl TokenId {
    /// Validate and wrap a raw token identifier string.
    pub fn parse(raw: &str) -> MarketResult<Self> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MarketError::MalformedResponse(format!(
                "invalid token id '{raw}': expected a decimal string"
            )));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A wallet or contract address.
///
/// Hex addresses are compared case-insensitively by the host chain, so the
/// string is normalized to lowercase at construction. All equality and hash
/// operations therefore see the canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for display: first 8 and last 6 characters.
    pub fn short(&self) -> String {
        if self.0.len() <= 14 {
            return self.0.clone();
        }
        format!("{}...{}", &self.0[..8], &self.0[self.0.len() - 6..])
    }
}

impl From<String> for Address {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One bid in an asset's auction history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    /// Address that placed the bid
    pub bidder: Address,

    /// Bid amount in atomic units
    pub amount: u64,

    /// Unix timestamp (milliseconds) when the bid was placed
    pub time: u64,
}

/// Derived auction lifecycle phase for an asset.
///
/// `Ended` is computed from the end timestamp against the current time and
/// is never stored; finalization returns the asset to `Unlisted` with its
/// new owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuctionPhase {
    /// Not listed for auction
    Unlisted,
    /// Auction is open and accepting bids
    Active,
    /// Auction deadline has passed, waiting for finalization
    Ended,
}

/// Caller-supplied fields for a new asset, captured at mint time.
#[derive(Debug, Clone)]
pub struct AssetDraft {
    pub name: String,
    pub creator: String,
    pub description: String,
    pub image: String,
}

/// One NFT record tracked by the application: the on-chain token plus the
/// local marketplace state layered over it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Local identifier assigned by the asset store
    pub id: AssetId,

    /// On-chain token identifier; set once minting succeeds
    pub token_id: Option<TokenId>,

    pub name: String,
    pub creator: String,

    /// Address of the NFT contract the token lives on
    pub contract_address: Address,

    pub description: String,

    /// Image URI (IPFS or gateway URL)
    pub image: String,

    /// Current owner address
    pub owner: Address,

    /// Asking price in atomic units while listed for sale
    pub price: Option<u64>,

    pub for_sale: bool,
    pub for_auction: bool,

    /// Unix timestamp (milliseconds) when the auction ends
    pub auction_end_time: Option<u64>,

    /// Highest bid so far, or the starting bid if no bids were placed
    pub current_bid: Option<u64>,

    /// Address of the highest bidder, once a bid has been placed
    pub highest_bidder: Option<Address>,

    /// Ordered bid history for the running auction
    #[serde(default)]
    pub bids: Vec<Bid>,

    /// Number of completed transfers (sales and auction settlements)
    pub sales_count: u32,

    /// Unix timestamp (milliseconds) when the record was created
    pub created_at: u64,
}

impl Asset {
    /// Derive the auction phase at the current time.
    pub fn auction_phase(&self) -> AuctionPhase {
        self.auction_phase_at(now_millis())
    }

    /// Derive the auction phase at a specific timestamp.
    pub fn auction_phase_at(&self, now: u64) -> AuctionPhase {
        if !self.for_auction {
            return AuctionPhase::Unlisted;
        }
        if self.is_auction_ended_at(now) {
            AuctionPhase::Ended
        } else {
            AuctionPhase::Active
        }
    }

    /// Check if the auction deadline has passed.
    pub fn is_auction_ended(&self) -> bool {
        self.is_auction_ended_at(now_millis())
    }

    /// Check if the auction deadline has passed at a specific timestamp.
    ///
    /// An auction with no end timestamp counts as ended; the store never
    /// produces that state.
    pub fn is_auction_ended_at(&self, now: u64) -> bool {
        self.auction_end_time.map_or(true, |end| end <= now)
    }

    /// Get auction time remaining in milliseconds (0 if ended or not
    /// auctioned).
    pub fn time_remaining(&self) -> u64 {
        self.time_remaining_at(now_millis())
    }

    /// Get auction time remaining at a specific timestamp.
    pub fn time_remaining_at(&self, now: u64) -> u64 {
        self.auction_end_time
            .map_or(0, |end| end.saturating_sub(now))
    }

    /// Check whether `address` is the current owner.
    pub fn is_owned_by(&self, address: &Address) -> bool {
        &self.owner == address
    }
}
