/// Domain-specific error types for the marketplace state core.
#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    #[error("Wallet is not connected")]
    WalletNotConnected,

    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Caller {caller} is not the owner (owner is {owner})")]
    NotOwner { caller: String, owner: String },

    #[error("Asset is not listed for sale")]
    NotForSale,

    #[error("Asset is not listed for auction")]
    NotForAuction,

    #[error("Bid of {offered} does not exceed the current bid of {current}")]
    InvalidBid { offered: u64, current: u64 },

    #[error("Auction is still active ({remaining_ms} ms remaining)")]
    AuctionStillActive { remaining_ms: u64 },

    #[error("Auction has already ended")]
    AuctionEnded,

    #[error("Auction has no bids to settle")]
    NoBids,

    #[error("Another mutation is already in flight for asset {0}")]
    OperationInFlight(String),

    #[error("Wallet provider call failed: {0}")]
    Wallet(String),

    #[error("Contract call failed: {0}")]
    Contract(String),

    #[error("IPFS upload failed: {0}")]
    Ipfs(String),

    #[error("Persistence operation failed: {0}")]
    Storage(String),

    #[error("Malformed external response: {0}")]
    MalformedResponse(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience type alias.
pub type MarketResult<T> = Result<T, MarketError>;
