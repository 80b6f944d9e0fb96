pub mod actions;
pub mod config;
pub mod error;
pub mod market;
pub mod marketplace;
pub mod session;
pub mod shared_state;
pub mod traits;
pub mod util;

#[cfg(any(test, feature = "test-support"))]
pub mod mocks;

pub use config::*;
pub use error::{MarketError, MarketResult};
pub use market::Market;
pub use marketplace::{
    Address, Asset, AssetDraft, AssetId, AuctionPhase, Bid, NftMetadata, TokenId, Transaction,
    TransactionLedger,
};
pub use session::WalletSession;
pub use shared_state::{MutationGuard, SharedAppState};
pub use traits::{
    ContractClient, IpfsUploader, KeyValueStore, SystemTimeProvider, TimeProvider, WalletProvider,
};
