//! Business logic for marketplace operations.
//!
//! These functions drive the full flows that combine external collaborator
//! calls (wallet, contract, IPFS) with core mutations. The view layer is a
//! thin dispatcher into this module and holds no business rules of its own.
//!
//! External failures abort the flow with no state mutated; no retries are
//! performed anywhere. Auction operations are client-simulated and never
//! touch the contract.

use tracing::info;

use crate::error::{MarketError, MarketResult};
use crate::marketplace::{Address, AssetDraft, AssetId, NftMetadata, TokenId, Transaction};
use crate::shared_state::SharedAppState;
use crate::traits::{ContractClient, IpfsUploader, KeyValueStore, TimeProvider, WalletProvider};

/// Caller-supplied fields for the mint flow.
#[derive(Debug, Clone)]
pub struct MintRequest {
    pub name: String,
    pub creator: String,
    pub description: String,

    /// Raw image bytes to pin before minting
    pub image_bytes: Vec<u8>,
}

/// Connect the wallet: request accounts from the provider and record the
/// first one as the active session address.
pub async fn connect_wallet<S, C, W, N, I>(
    state: &SharedAppState<S, C, W, N, I>,
) -> MarketResult<Address>
where
    S: KeyValueStore,
    C: TimeProvider,
    W: WalletProvider,
    N: ContractClient,
    I: IpfsUploader,
{
    let accounts = state
        .wallet
        .request_accounts()
        .await
        .map_err(|e| MarketError::Wallet(e.to_string()))?;
    let Some(first) = accounts.into_iter().next() else {
        return Err(MarketError::Wallet(
            "wallet provider returned no accounts".to_string(),
        ));
    };

    let address = Address::new(first);
    state.market.write().connect_session(address.clone());
    Ok(address)
}

/// Disconnect the wallet and drop the persisted session record.
pub fn disconnect_wallet<S, C, W, N, I>(state: &SharedAppState<S, C, W, N, I>)
where
    S: KeyValueStore,
    C: TimeProvider,
    W: WalletProvider,
    N: ContractClient,
    I: IpfsUploader,
{
    state.market.write().disconnect_session();
}

/// Mint a new NFT: pin the image and metadata to IPFS, submit the mint
/// transaction, validate the returned token id, and record the asset.
pub async fn mint_nft<S, C, W, N, I>(
    state: &SharedAppState<S, C, W, N, I>,
    request: MintRequest,
) -> MarketResult<AssetId>
where
    S: KeyValueStore,
    C: TimeProvider,
    W: WalletProvider,
    N: ContractClient,
    I: IpfsUploader,
{
    let MintRequest {
        name,
        creator,
        description,
        image_bytes,
    } = request;

    // Check the session up front so a disconnected wallet doesn't pay for
    // uploads that can never be recorded.
    state.market.read().session().require_address()?;

    let image_uri = state
        .ipfs
        .upload_file(&image_bytes)
        .await
        .map_err(|e| MarketError::Ipfs(e.to_string()))?;

    let metadata = NftMetadata::new(&name, &description, &image_uri);
    let metadata_uri = state
        .ipfs
        .upload_metadata(&metadata)
        .await
        .map_err(|e| MarketError::Ipfs(e.to_string()))?;

    let raw_token = state
        .contract
        .mint(&metadata_uri)
        .await
        .map_err(|e| MarketError::Contract(e.to_string()))?;
    let token_id = TokenId::parse(&raw_token)?;
    info!("Minted token {token_id} with metadata {metadata_uri}");

    state.market.write().create_asset(
        AssetDraft {
            name,
            creator,
            description,
            image: image_uri,
        },
        token_id,
        state.nft_contract_address.clone(),
    )
}

/// Buy a listed asset: submit the purchase to the marketplace contract,
/// then record the transfer locally.
pub async fn purchase_asset<S, C, W, N, I>(
    state: &SharedAppState<S, C, W, N, I>,
    id: AssetId,
) -> MarketResult<Transaction>
where
    S: KeyValueStore,
    C: TimeProvider,
    W: WalletProvider,
    N: ContractClient,
    I: IpfsUploader,
{
    let _guard = state.begin_mutation(id)?;

    let (token_id, price) = {
        let market = state.market.read();
        market.session().require_address()?;
        let asset = market
            .asset(id)
            .ok_or_else(|| MarketError::NotFound(id.to_string()))?;
        let Some(price) = asset.price else {
            return Err(MarketError::NotForSale);
        };
        (minted_token(asset.token_id.clone(), id)?, price)
    };

    state
        .contract
        .buy_item(token_id.as_str(), price)
        .await
        .map_err(|e| MarketError::Contract(e.to_string()))?;

    state.market.write().buy(id)
}

/// List an asset for fixed-price sale through the marketplace contract.
pub async fn list_asset_for_sale<S, C, W, N, I>(
    state: &SharedAppState<S, C, W, N, I>,
    id: AssetId,
    price: u64,
) -> MarketResult<()>
where
    S: KeyValueStore,
    C: TimeProvider,
    W: WalletProvider,
    N: ContractClient,
    I: IpfsUploader,
{
    let _guard = state.begin_mutation(id)?;

    let token_id = owned_token(state, id)?;
    state
        .contract
        .list_item(token_id.as_str(), price)
        .await
        .map_err(|e| MarketError::Contract(e.to_string()))?;

    state.market.write().list_for_sale(id, price)
}

/// Cancel a listing. Fixed-price listings are cancelled on the contract
/// first; auction listings are client-local and cancel without one.
pub async fn cancel_asset_listing<S, C, W, N, I>(
    state: &SharedAppState<S, C, W, N, I>,
    id: AssetId,
) -> MarketResult<()>
where
    S: KeyValueStore,
    C: TimeProvider,
    W: WalletProvider,
    N: ContractClient,
    I: IpfsUploader,
{
    let _guard = state.begin_mutation(id)?;

    let token_id = owned_token(state, id)?;
    let for_sale = state
        .market
        .read()
        .asset(id)
        .is_some_and(|a| a.for_sale);

    if for_sale {
        state
            .contract
            .cancel_listing(token_id.as_str())
            .await
            .map_err(|e| MarketError::Contract(e.to_string()))?;
    }

    state.market.write().cancel_listing(id)
}

/// Update the asking price of a listed asset.
pub async fn update_listing_price<S, C, W, N, I>(
    state: &SharedAppState<S, C, W, N, I>,
    id: AssetId,
    new_price: u64,
) -> MarketResult<()>
where
    S: KeyValueStore,
    C: TimeProvider,
    W: WalletProvider,
    N: ContractClient,
    I: IpfsUploader,
{
    let _guard = state.begin_mutation(id)?;

    let token_id = owned_token(state, id)?;
    let for_sale = state
        .market
        .read()
        .asset(id)
        .is_some_and(|a| a.for_sale);

    if for_sale {
        state
            .contract
            .update_price(token_id.as_str(), new_price)
            .await
            .map_err(|e| MarketError::Contract(e.to_string()))?;
    }

    state.market.write().update_price(id, new_price)
}

/// Open a client-simulated auction on an asset.
pub fn open_auction<S, C, W, N, I>(
    state: &SharedAppState<S, C, W, N, I>,
    id: AssetId,
    starting_bid: u64,
    end_time: u64,
) -> MarketResult<()>
where
    S: KeyValueStore,
    C: TimeProvider,
    W: WalletProvider,
    N: ContractClient,
    I: IpfsUploader,
{
    state.market.write().list_for_auction(id, starting_bid, end_time)
}

/// Place a bid in a client-simulated auction.
pub fn place_bid<S, C, W, N, I>(
    state: &SharedAppState<S, C, W, N, I>,
    id: AssetId,
    amount: u64,
) -> MarketResult<()>
where
    S: KeyValueStore,
    C: TimeProvider,
    W: WalletProvider,
    N: ContractClient,
    I: IpfsUploader,
{
    state.market.write().place_bid(id, amount)
}

/// Settle an ended auction.
pub fn finalize_auction<S, C, W, N, I>(
    state: &SharedAppState<S, C, W, N, I>,
    id: AssetId,
) -> MarketResult<Transaction>
where
    S: KeyValueStore,
    C: TimeProvider,
    W: WalletProvider,
    N: ContractClient,
    I: IpfsUploader,
{
    state.market.write().finalize_auction(id)
}

/// Look up the asset's on-chain token id, verifying that the session wallet
/// owns the asset before anything is submitted to the contract.
fn owned_token<S, C, W, N, I>(
    state: &SharedAppState<S, C, W, N, I>,
    id: AssetId,
) -> MarketResult<TokenId>
where
    S: KeyValueStore,
    C: TimeProvider,
    W: WalletProvider,
    N: ContractClient,
    I: IpfsUploader,
{
    let market = state.market.read();
    let caller = market.session().require_address()?;
    let asset = market
        .asset(id)
        .ok_or_else(|| MarketError::NotFound(id.to_string()))?;
    if !asset.is_owned_by(caller) {
        return Err(MarketError::NotOwner {
            caller: caller.to_string(),
            owner: asset.owner.to_string(),
        });
    }
    minted_token(asset.token_id.clone(), id)
}

fn minted_token(token_id: Option<TokenId>, id: AssetId) -> MarketResult<TokenId> {
    token_id.ok_or_else(|| MarketError::Validation(format!("asset {id} has no on-chain token")))
}
