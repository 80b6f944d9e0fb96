use serde::{Deserialize, Serialize};

use crate::marketplace::asset::{Address, AssetId};

/// One completed transfer: a fixed-price sale or an auction settlement.
///
/// Immutable once created. The asset name is denormalized so the record
/// stays meaningful even after the asset itself is renamed or re-listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: u64,
    pub asset_id: AssetId,
    pub asset_name: String,
    pub buyer: Address,
    pub seller: Address,

    /// Settlement price in atomic units
    pub price: u64,

    /// Unix timestamp (milliseconds) when the transfer completed
    pub timestamp: u64,
}

/// Append-only ledger of completed transfers, ordered by creation time.
///
/// Entries are only ever added through `record`; nothing removes or mutates
/// them afterwards.
#[derive(Debug, Clone, Default)]
pub struct TransactionLedger {
    entries: Vec<Transaction>,
    next_id: u64,
}

impl TransactionLedger {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuild a ledger from persisted entries.
    ///
    /// The identifier counter resumes after the highest persisted id so new
    /// entries never collide with restored ones.
    pub fn from_entries(entries: Vec<Transaction>) -> Self {
        let next_id = entries.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Self { entries, next_id }
    }

    /// Append a completed transfer and return the stored record.
    pub fn record(
        &mut self,
        asset_id: AssetId,
        asset_name: &str,
        buyer: Address,
        seller: Address,
        price: u64,
        timestamp: u64,
    ) -> &Transaction {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Transaction {
            id,
            asset_id,
            asset_name: asset_name.to_string(),
            buyer,
            seller,
            price,
            timestamp,
        });
        self.entries.last().expect("entry was just pushed")
    }

    /// All recorded transfers, oldest first.
    pub fn all(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
