//! Persistence and reload scenarios.

use nft_market::actions;
use nft_market::mocks::{MockStorage, MockTime};
use nft_market::STORAGE_KEY_ASSETS;

use crate::common::MarketHarness;

#[tokio::test]
async fn test_full_session_survives_reload() {
    let storage = MockStorage::new();
    let time = MockTime::new(1000);

    let (id, winner) = {
        let harness = MarketHarness::with_storage(storage.clone(), time.clone());
        harness.connect(1).await;
        let id = harness.mint("Durable").await;
        actions::open_auction(&harness.state, id, 100, 10_000).unwrap();
        let winner = harness.connect(2).await;
        actions::place_bid(&harness.state, id, 300).unwrap();
        harness.set_time(10_000);
        actions::finalize_auction(&harness.state, id).unwrap();
        (id, winner)
    };

    // A fresh process over the same storage sees the settled state
    let harness = MarketHarness::with_storage(storage, time);
    let asset = harness.asset(id);
    assert_eq!(asset.owner, winner);
    assert!(!asset.for_auction);
    assert_eq!(asset.sales_count, 1);
    assert_eq!(harness.transactions().len(), 1);

    // The restored wallet session is trusted without re-prompting
    let market = harness.state.market.read();
    assert_eq!(market.session().address(), Some(&winner));
}

#[tokio::test]
async fn test_reload_discards_tampered_snapshot() {
    let storage = MockStorage::new();
    let time = MockTime::new(1000);

    {
        let harness = MarketHarness::with_storage(storage.clone(), time.clone());
        harness.connect(1).await;
        harness.mint("Corrupted Later").await;
    }

    storage.raw_set(STORAGE_KEY_ASSETS, "]]]]");

    let harness = MarketHarness::with_storage(storage, time);
    assert!(harness.state.market.read().assets().is_empty());
}

#[tokio::test]
async fn test_reload_keeps_mid_auction_state() {
    let storage = MockStorage::new();
    let time = MockTime::new(1000);

    let id = {
        let harness = MarketHarness::with_storage(storage.clone(), time.clone());
        harness.connect(1).await;
        let id = harness.mint("Interrupted").await;
        actions::open_auction(&harness.state, id, 100, 60_000).unwrap();
        harness.connect(2).await;
        actions::place_bid(&harness.state, id, 250).unwrap();
        id
    };

    // Reload mid-auction: the countdown and bid history pick up where
    // they left off
    let harness = MarketHarness::with_storage(storage, time.clone());
    let asset = harness.asset(id);
    assert!(asset.for_auction);
    assert_eq!(asset.current_bid, Some(250));
    assert_eq!(asset.bids.len(), 1);
    assert_eq!(asset.time_remaining_at(time.get()), 59_000);

    // And the auction can conclude normally
    harness.set_time(60_000);
    let tx = actions::finalize_auction(&harness.state, id).unwrap();
    assert_eq!(tx.price, 250);
}

#[tokio::test]
async fn test_disconnect_survives_reload() {
    let storage = MockStorage::new();
    let time = MockTime::new(1000);

    {
        let harness = MarketHarness::with_storage(storage.clone(), time.clone());
        harness.connect(1).await;
        actions::disconnect_wallet(&harness.state);
    }

    let harness = MarketHarness::with_storage(storage, time);
    assert!(!harness.state.market.read().session().is_connected());
}
