pub mod asset;
pub mod metadata;
pub mod transaction;

pub use asset::{Address, Asset, AssetDraft, AssetId, AuctionPhase, Bid, TokenId};
pub use metadata::NftMetadata;
pub use transaction::{Transaction, TransactionLedger};
