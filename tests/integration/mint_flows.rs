//! Mint flow tests: IPFS upload, contract mint, local asset recording.

use nft_market::actions;
use nft_market::mocks::ContractCall;
use nft_market::{MarketError, NftMetadata};

use crate::common::MarketHarness;

#[tokio::test]
async fn test_mint_records_asset_for_connected_wallet() {
    let harness = MarketHarness::new();
    harness.connect(1).await;

    let id = harness.mint("Genesis").await;

    let asset = harness.asset(id);
    assert_eq!(asset.name, "Genesis");
    assert_eq!(asset.owner, MarketHarness::address(1));
    assert_eq!(asset.sales_count, 0);
    assert!(asset.token_id.is_some());
    assert!(!asset.for_sale);
    assert!(!asset.for_auction);
}

#[tokio::test]
async fn test_mint_uploads_image_then_metadata() {
    let harness = MarketHarness::new();
    harness.connect(1).await;

    let id = harness.mint("Pinned").await;

    let files = harness.state.ipfs.file_uploads();
    assert_eq!(files.len(), 1);
    // The recorded asset points at the uploaded image
    assert_eq!(harness.asset(id).image, files[0]);

    // The uploaded metadata document carries the image URI
    let documents = harness.state.ipfs.metadata_uploads();
    assert_eq!(documents.len(), 1);
    let metadata = NftMetadata::from_json(&documents[0]).unwrap();
    assert_eq!(metadata.name, "Pinned");
    assert_eq!(metadata.image, files[0]);
}

#[tokio::test]
async fn test_mint_submits_contract_call() {
    let harness = MarketHarness::new();
    harness.connect(1).await;

    harness.mint("Minted").await;

    let calls = harness.state.contract.calls();
    assert_eq!(calls.len(), 1);
    assert!(matches!(calls[0], ContractCall::Mint { .. }));
}

#[tokio::test]
async fn test_mint_without_wallet_is_rejected_before_upload() {
    let harness = MarketHarness::new();

    let result =
        actions::mint_nft(&harness.state, MarketHarness::mint_request("Orphan")).await;

    assert!(matches!(result, Err(MarketError::WalletNotConnected)));
    // Nothing was uploaded or submitted
    assert!(harness.state.ipfs.file_uploads().is_empty());
    assert_eq!(harness.state.contract.call_count(), 0);
}

#[tokio::test]
async fn test_mint_aborts_on_ipfs_failure() {
    let harness = MarketHarness::new();
    harness.connect(1).await;
    harness.state.ipfs.set_fail_mode(true);

    let result = actions::mint_nft(&harness.state, MarketHarness::mint_request("Lost")).await;

    assert!(matches!(result, Err(MarketError::Ipfs(_))));
    assert!(harness.state.market.read().assets().is_empty());
    assert_eq!(harness.state.contract.call_count(), 0);
}

#[tokio::test]
async fn test_mint_aborts_on_contract_failure() {
    let harness = MarketHarness::new();
    harness.connect(1).await;
    harness.state.contract.set_fail_mode(true);

    let result = actions::mint_nft(&harness.state, MarketHarness::mint_request("Lost")).await;

    assert!(matches!(result, Err(MarketError::Contract(_))));
    assert!(harness.state.market.read().assets().is_empty());
}

#[tokio::test]
async fn test_mint_rejects_malformed_token_id() {
    let harness = MarketHarness::new();
    harness.connect(1).await;
    harness.state.contract.set_mint_response("0xdeadbeef");

    let result = actions::mint_nft(&harness.state, MarketHarness::mint_request("Bad")).await;

    assert!(matches!(result, Err(MarketError::MalformedResponse(_))));
    assert!(harness.state.market.read().assets().is_empty());
}
