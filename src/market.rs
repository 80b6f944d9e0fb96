//! Core marketplace state.
//!
//! `Market` is the single explicitly-owned state object behind every
//! operation: it holds the asset collection, the transaction ledger, and the
//! wallet session, and mirrors each snapshot to the key-value persistence
//! layer after every mutation. All listing/auction invariants are enforced
//! here, so they hold regardless of caller.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{
    SCHEMA_VERSION, STORAGE_KEY_ASSETS, STORAGE_KEY_TRANSACTIONS, STORAGE_KEY_WALLET_ADDRESS,
    STORAGE_KEY_WALLET_CONNECTED,
};
use crate::error::{MarketError, MarketResult};
use crate::marketplace::{
    Address, Asset, AssetDraft, AssetId, Bid, TokenId, Transaction, TransactionLedger,
};
use crate::session::WalletSession;
use crate::traits::{KeyValueStore, TimeProvider};
use crate::util::json_from_str;

/// Versioned envelope wrapped around every persisted snapshot.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot<T> {
    version: u32,
    records: T,
}

/// The marketplace state core, generic over persistence and clock.
pub struct Market<S, C>
where
    S: KeyValueStore,
    C: TimeProvider,
{
    storage: S,
    time: C,
    assets: Vec<Asset>,
    ledger: TransactionLedger,
    session: WalletSession,
    next_asset_id: u64,
}

impl<S, C> Market<S, C>
where
    S: KeyValueStore,
    C: TimeProvider,
{
    /// Initialize the market from persisted snapshots.
    ///
    /// Missing keys yield empty state. Malformed or version-mismatched
    /// snapshots are logged and discarded rather than failing startup; the
    /// in-memory state is authoritative from then on.
    pub fn load(storage: S, time: C) -> Self {
        let assets: Vec<Asset> = load_snapshot(&storage, STORAGE_KEY_ASSETS).unwrap_or_default();
        let transactions: Vec<Transaction> =
            load_snapshot(&storage, STORAGE_KEY_TRANSACTIONS).unwrap_or_default();
        let session = load_session(&storage);

        let next_asset_id = assets.iter().map(|a| a.id.0).max().unwrap_or(0) + 1;
        info!(
            "Loaded market state: {} assets, {} transactions, wallet {}",
            assets.len(),
            transactions.len(),
            if session.is_connected() {
                "connected"
            } else {
                "disconnected"
            }
        );

        Self {
            storage,
            time,
            assets,
            ledger: TransactionLedger::from_entries(transactions),
            session,
            next_asset_id,
        }
    }

    /// Write all snapshots to persistence (teardown flush).
    pub fn flush(&self) -> MarketResult<()> {
        self.try_persist_assets()?;
        self.try_persist_transactions()?;
        self.try_persist_session()?;
        Ok(())
    }

    // ---- snapshot reads ------------------------------------------------

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn asset(&self, id: AssetId) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.all()
    }

    pub fn session(&self) -> &WalletSession {
        &self.session
    }

    // ---- wallet session ------------------------------------------------

    /// Record a successful wallet connection and persist it.
    pub fn connect_session(&mut self, address: Address) {
        info!("Wallet connected: {}", address.short());
        self.session.connect(address);
        self.persist_session();
    }

    /// Clear the wallet session and remove the persisted record.
    pub fn disconnect_session(&mut self) {
        info!("Wallet disconnected");
        self.session.disconnect();
        self.persist_session();
    }

    // ---- asset store ---------------------------------------------------

    /// Create a new asset record after a successful mint.
    ///
    /// Requires a connected wallet session; the session address becomes the
    /// owner and creator-of-record for ownership checks.
    pub fn create_asset(
        &mut self,
        draft: AssetDraft,
        token_id: TokenId,
        contract_address: Address,
    ) -> MarketResult<AssetId> {
        let owner = self.session.require_address()?.clone();
        let id = AssetId(self.next_asset_id);
        self.next_asset_id += 1;

        let asset = Asset {
            id,
            token_id: Some(token_id),
            name: draft.name,
            creator: draft.creator,
            contract_address,
            description: draft.description,
            image: draft.image,
            owner,
            price: None,
            for_sale: false,
            for_auction: false,
            auction_end_time: None,
            current_bid: None,
            highest_bidder: None,
            bids: Vec::new(),
            sales_count: 0,
            created_at: self.time.now_millis(),
        };

        info!("Created asset {} ('{}')", id, asset.name);
        self.assets.push(asset);
        self.persist_assets();
        Ok(id)
    }

    /// List an asset for fixed-price sale.
    ///
    /// Supersedes any auction listing on the asset: auction sub-fields are
    /// cleared so the two listing modes stay mutually exclusive.
    pub fn list_for_sale(&mut self, id: AssetId, price: u64) -> MarketResult<()> {
        let caller = self.session.require_address()?.clone();
        let asset = self.get_asset_mut(id)?;
        check_owner(asset, &caller)?;

        asset.for_sale = true;
        asset.for_auction = false;
        asset.price = Some(price);
        clear_auction_fields(asset);

        info!("Asset {id} listed for sale at {price}");
        self.persist_assets();
        Ok(())
    }

    /// Record a completed fixed-price purchase by the connected wallet.
    ///
    /// Requires the asset to have an asking price; appends exactly one
    /// ledger entry and transfers ownership. State and ledger are untouched
    /// on any failure.
    pub fn buy(&mut self, id: AssetId) -> MarketResult<Transaction> {
        let buyer = self.session.require_address()?.clone();
        let now = self.time.now_millis();
        let idx = self.index_of(id)?;

        let (name, seller, price) = {
            let asset = &self.assets[idx];
            let Some(price) = asset.price else {
                return Err(MarketError::NotForSale);
            };
            (asset.name.clone(), asset.owner.clone(), price)
        };

        let tx = self
            .ledger
            .record(id, &name, buyer.clone(), seller, price, now)
            .clone();

        let asset = &mut self.assets[idx];
        asset.owner = buyer;
        asset.for_sale = false;
        asset.price = None;
        asset.sales_count += 1;

        info!("Asset {id} sold for {price} (sale #{})", asset.sales_count);
        self.persist_assets();
        self.persist_transactions();
        Ok(tx)
    }

    /// Cancel any active listing on the asset.
    ///
    /// Clears both listing modes and all auction sub-fields so a later
    /// re-listing starts from a clean record.
    pub fn cancel_listing(&mut self, id: AssetId) -> MarketResult<()> {
        let caller = self.session.require_address()?.clone();
        let asset = self.get_asset_mut(id)?;
        check_owner(asset, &caller)?;

        asset.for_sale = false;
        asset.for_auction = false;
        asset.price = None;
        clear_auction_fields(asset);

        info!("Listing cancelled for asset {id}");
        self.persist_assets();
        Ok(())
    }

    /// Overwrite the asking price of an asset.
    pub fn update_price(&mut self, id: AssetId, new_price: u64) -> MarketResult<()> {
        let caller = self.session.require_address()?.clone();
        let asset = self.get_asset_mut(id)?;
        check_owner(asset, &caller)?;

        asset.price = Some(new_price);

        info!("Asset {id} price updated to {new_price}");
        self.persist_assets();
        Ok(())
    }

    // ---- auction engine ------------------------------------------------

    /// Open an auction on an asset.
    ///
    /// The end timestamp must lie strictly in the future. Any fixed-price
    /// listing is superseded and the bid history starts empty.
    pub fn list_for_auction(
        &mut self,
        id: AssetId,
        starting_bid: u64,
        end_time: u64,
    ) -> MarketResult<()> {
        let caller = self.session.require_address()?.clone();
        let now = self.time.now_millis();
        let asset = self.get_asset_mut(id)?;
        check_owner(asset, &caller)?;

        if end_time <= now {
            return Err(MarketError::Validation(format!(
                "auction end time {end_time} is not in the future (now {now})"
            )));
        }

        asset.for_auction = true;
        asset.for_sale = false;
        asset.price = None;
        asset.current_bid = Some(starting_bid);
        asset.auction_end_time = Some(end_time);
        asset.bids.clear();
        asset.highest_bidder = None;

        info!("Asset {id} listed for auction, starting bid {starting_bid}, ends {end_time}");
        self.persist_assets();
        Ok(())
    }

    /// Place a bid by the connected wallet.
    ///
    /// The bid must strictly exceed the current bid and the auction must
    /// still be running; nothing is mutated on rejection.
    pub fn place_bid(&mut self, id: AssetId, amount: u64) -> MarketResult<()> {
        let bidder = self.session.require_address()?.clone();
        let now = self.time.now_millis();
        let asset = self.get_asset_mut(id)?;

        if !asset.for_auction {
            return Err(MarketError::NotForAuction);
        }
        if asset.is_auction_ended_at(now) {
            return Err(MarketError::AuctionEnded);
        }
        let current = asset.current_bid.unwrap_or(0);
        if amount <= current {
            return Err(MarketError::InvalidBid {
                offered: amount,
                current,
            });
        }

        asset.bids.push(Bid {
            bidder: bidder.clone(),
            amount,
            time: now,
        });
        asset.current_bid = Some(amount);
        asset.highest_bidder = Some(bidder);

        info!("Bid of {amount} placed on asset {id}");
        self.persist_assets();
        Ok(())
    }

    /// Settle an ended auction: record the transfer and hand the asset to
    /// the highest bidder.
    ///
    /// Fails with `AuctionStillActive` before the deadline and `NoBids` when
    /// nobody bid; all validation happens before any field is touched, so a
    /// failed finalization leaves the asset unchanged.
    pub fn finalize_auction(&mut self, id: AssetId) -> MarketResult<Transaction> {
        let now = self.time.now_millis();
        let idx = self.index_of(id)?;

        let (name, seller, winner, price) = {
            let asset = &self.assets[idx];
            if !asset.for_auction {
                return Err(MarketError::NotForAuction);
            }
            let (Some(winner), Some(price)) = (asset.highest_bidder.clone(), asset.current_bid)
            else {
                return Err(MarketError::NoBids);
            };
            let remaining = asset.time_remaining_at(now);
            if remaining > 0 {
                return Err(MarketError::AuctionStillActive {
                    remaining_ms: remaining,
                });
            }
            (asset.name.clone(), asset.owner.clone(), winner, price)
        };

        let tx = self
            .ledger
            .record(id, &name, winner.clone(), seller, price, now)
            .clone();

        let asset = &mut self.assets[idx];
        asset.owner = winner;
        asset.for_auction = false;
        clear_auction_fields(asset);
        asset.sales_count += 1;

        info!("Auction for asset {id} finalized at {price}");
        self.persist_assets();
        self.persist_transactions();
        Ok(tx)
    }

    // ---- internals -----------------------------------------------------

    fn index_of(&self, id: AssetId) -> MarketResult<usize> {
        self.assets
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| MarketError::NotFound(id.to_string()))
    }

    fn get_asset_mut(&mut self, id: AssetId) -> MarketResult<&mut Asset> {
        let idx = self.index_of(id)?;
        Ok(&mut self.assets[idx])
    }

    fn persist_assets(&self) {
        if let Err(e) = self.try_persist_assets() {
            warn!("Failed to persist asset snapshot: {e}");
        }
    }

    fn persist_transactions(&self) {
        if let Err(e) = self.try_persist_transactions() {
            warn!("Failed to persist transaction snapshot: {e}");
        }
    }

    fn persist_session(&self) {
        if let Err(e) = self.try_persist_session() {
            warn!("Failed to persist wallet session: {e}");
        }
    }

    fn try_persist_assets(&self) -> MarketResult<()> {
        let json = encode_snapshot(&self.assets)?;
        self.storage
            .set(STORAGE_KEY_ASSETS, &json)
            .map_err(|e| MarketError::Storage(e.to_string()))
    }

    fn try_persist_transactions(&self) -> MarketResult<()> {
        let json = encode_snapshot(&self.ledger.all())?;
        self.storage
            .set(STORAGE_KEY_TRANSACTIONS, &json)
            .map_err(|e| MarketError::Storage(e.to_string()))
    }

    fn try_persist_session(&self) -> MarketResult<()> {
        let map_err = |e: anyhow::Error| MarketError::Storage(e.to_string());
        match self.session.address() {
            Some(address) => {
                self.storage
                    .set(STORAGE_KEY_WALLET_CONNECTED, "true")
                    .map_err(map_err)?;
                self.storage
                    .set(STORAGE_KEY_WALLET_ADDRESS, address.as_str())
                    .map_err(map_err)?;
            }
            None => {
                self.storage
                    .remove(STORAGE_KEY_WALLET_CONNECTED)
                    .map_err(map_err)?;
                self.storage
                    .remove(STORAGE_KEY_WALLET_ADDRESS)
                    .map_err(map_err)?;
            }
        }
        Ok(())
    }
}

fn check_owner(asset: &Asset, caller: &Address) -> MarketResult<()> {
    if !asset.is_owned_by(caller) {
        return Err(MarketError::NotOwner {
            caller: caller.to_string(),
            owner: asset.owner.to_string(),
        });
    }
    Ok(())
}

fn clear_auction_fields(asset: &mut Asset) {
    asset.auction_end_time = None;
    asset.current_bid = None;
    asset.highest_bidder = None;
    asset.bids.clear();
}

fn encode_snapshot<T: Serialize>(records: &T) -> MarketResult<String> {
    serde_json::to_string(&Snapshot {
        version: SCHEMA_VERSION,
        records,
    })
    .map_err(|e| MarketError::Serialization(format!("Failed to serialize snapshot: {e}")))
}

fn load_snapshot<T: serde::de::DeserializeOwned>(
    storage: &impl KeyValueStore,
    key: &str,
) -> Option<T> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!("Failed to read persisted snapshot '{key}': {e}");
            return None;
        }
    };
    match json_from_str::<Snapshot<T>>(&raw) {
        Ok(snapshot) if snapshot.version == SCHEMA_VERSION => Some(snapshot.records),
        Ok(snapshot) => {
            warn!(
                "Discarding snapshot '{key}' with unsupported schema version {}",
                snapshot.version
            );
            None
        }
        Err(e) => {
            warn!("Discarding malformed snapshot '{key}': {e}");
            None
        }
    }
}

fn load_session(storage: &impl KeyValueStore) -> WalletSession {
    let connected = match storage.get(STORAGE_KEY_WALLET_CONNECTED) {
        Ok(value) => value.as_deref() == Some("true"),
        Err(e) => {
            warn!("Failed to read persisted wallet session: {e}");
            false
        }
    };
    if !connected {
        return WalletSession::disconnected();
    }
    match storage.get(STORAGE_KEY_WALLET_ADDRESS) {
        Ok(Some(address)) if !address.is_empty() => {
            WalletSession::connected(Address::new(address))
        }
        Ok(_) => WalletSession::disconnected(),
        Err(e) => {
            warn!("Failed to read persisted wallet address: {e}");
            WalletSession::disconnected()
        }
    }
}
