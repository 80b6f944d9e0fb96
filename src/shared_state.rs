//! Shared application state for the view layer and the action flows.
//!
//! `SharedAppState` bundles the market state object with the external
//! collaborator handles. The view layer reads snapshots through the market
//! lock and forwards user intents to the functions in `actions`.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::error::{MarketError, MarketResult};
use crate::market::Market;
use crate::marketplace::{Address, AssetId};
use crate::traits::{ContractClient, IpfsUploader, KeyValueStore, TimeProvider, WalletProvider};

/// Bundled application state shared between the view layer and the
/// asynchronous action flows.
pub struct SharedAppState<S, C, W, N, I>
where
    S: KeyValueStore,
    C: TimeProvider,
    W: WalletProvider,
    N: ContractClient,
    I: IpfsUploader,
{
    pub market: Arc<RwLock<Market<S, C>>>,
    pub wallet: W,
    pub contract: N,
    pub ipfs: I,

    /// Address of the NFT contract, stamped onto newly minted assets.
    pub nft_contract_address: Address,

    /// Asset ids with a contract-backed mutation currently in flight.
    in_flight: Arc<Mutex<HashSet<AssetId>>>,
}

impl<S, C, W, N, I> SharedAppState<S, C, W, N, I>
where
    S: KeyValueStore,
    C: TimeProvider,
    W: WalletProvider,
    N: ContractClient,
    I: IpfsUploader,
{
    pub fn new(
        market: Market<S, C>,
        wallet: W,
        contract: N,
        ipfs: I,
        nft_contract_address: Address,
    ) -> Self {
        Self {
            market: Arc::new(RwLock::new(market)),
            wallet,
            contract,
            ipfs,
            nft_contract_address,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Acquire the single-flight guard for an asset.
    ///
    /// Contract-backed flows hold this across their external call so a rapid
    /// repeated intent (double-clicked buy) cannot submit twice or
    /// double-append ledger entries. The slot frees when the guard drops.
    pub fn begin_mutation(&self, id: AssetId) -> MarketResult<MutationGuard> {
        let mut in_flight = self.in_flight.lock();
        if !in_flight.insert(id) {
            return Err(MarketError::OperationInFlight(id.to_string()));
        }
        Ok(MutationGuard {
            set: Arc::clone(&self.in_flight),
            id,
        })
    }
}

impl<S, C, W, N, I> Clone for SharedAppState<S, C, W, N, I>
where
    S: KeyValueStore,
    C: TimeProvider,
    W: WalletProvider + Clone,
    N: ContractClient + Clone,
    I: IpfsUploader + Clone,
{
    fn clone(&self) -> Self {
        Self {
            market: Arc::clone(&self.market),
            wallet: self.wallet.clone(),
            contract: self.contract.clone(),
            ipfs: self.ipfs.clone(),
            nft_contract_address: self.nft_contract_address.clone(),
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

/// RAII handle for an in-flight asset mutation; releases the slot on drop.
pub struct MutationGuard {
    set: Arc<Mutex<HashSet<AssetId>>>,
    id: AssetId,
}

impl Drop for MutationGuard {
    fn drop(&mut self) {
        self.set.lock().remove(&self.id);
    }
}
