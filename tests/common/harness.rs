//! Multi-wallet test harness for integration testing.
//!
//! Wraps a `SharedAppState` built from mock collaborators and offers
//! shorthand for the common flow steps (connect, mint, advance time).

use nft_market::actions::{self, MintRequest};
use nft_market::mocks::{
    make_test_address, MockContract, MockIpfs, MockStorage, MockTime, MockWallet,
};
use nft_market::{Address, Asset, AssetId, Market, SharedAppState, Transaction};

pub type TestAppState = SharedAppState<MockStorage, MockTime, MockWallet, MockContract, MockIpfs>;

/// NFT contract address stamped onto minted assets in tests.
pub const NFT_CONTRACT: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";

pub struct MarketHarness {
    pub state: TestAppState,
    pub time: MockTime,
    pub storage: MockStorage,
}

#[allow(dead_code)]
impl MarketHarness {
    /// Create a harness with fresh storage and the clock at t=1000.
    pub fn new() -> Self {
        Self::with_storage(MockStorage::new(), MockTime::new(1000))
    }

    /// Create a harness over existing storage (for reload scenarios).
    pub fn with_storage(storage: MockStorage, time: MockTime) -> Self {
        let market = Market::load(storage.clone(), time.clone());
        let state = SharedAppState::new(
            market,
            MockWallet::new(),
            MockContract::new(),
            MockIpfs::new(),
            Address::new(NFT_CONTRACT),
        );
        Self {
            state,
            time,
            storage,
        }
    }

    /// Switch the active wallet to the given test account.
    pub async fn connect(&self, id: u8) -> Address {
        self.state.wallet.set_accounts(vec![make_test_address(id)]);
        actions::connect_wallet(&self.state)
            .await
            .expect("wallet connection should succeed")
    }

    /// Mint an asset owned by the currently connected wallet.
    pub async fn mint(&self, name: &str) -> AssetId {
        actions::mint_nft(&self.state, Self::mint_request(name))
            .await
            .expect("mint should succeed")
    }

    pub fn mint_request(name: &str) -> MintRequest {
        MintRequest {
            name: name.to_string(),
            creator: "Artist".to_string(),
            description: format!("{name} description"),
            image_bytes: vec![1, 2, 3, 4],
        }
    }

    pub fn advance_time(&self, millis: u64) {
        self.time.advance(millis);
    }

    pub fn set_time(&self, timestamp: u64) {
        self.time.set(timestamp);
    }

    pub fn asset(&self, id: AssetId) -> Asset {
        self.state
            .market
            .read()
            .asset(id)
            .expect("asset should exist")
            .clone()
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.state.market.read().transactions().to_vec()
    }

    pub fn address(id: u8) -> Address {
        Address::new(make_test_address(id))
    }
}
