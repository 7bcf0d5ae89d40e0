use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cash::CashLedger;
use super::quote::QuoteCache;
use super::security::{OptionContract, Share};
use super::settings::Settings;
use super::snapshot::SnapshotStore;
use super::ticker::TickerRegistry;
use super::transaction::Transaction;

/// The main data container. Everything in here gets serialized and saved
/// through the storage manager.
///
/// Securities are never deleted — a fully closed position stays at zero
/// open quantity. Transactions are immutable append-only history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    /// Symbol-keyed instrument identities
    pub tickers: TickerRegistry,

    /// Share positions, one row per symbol
    pub shares: Vec<Share>,

    /// Option positions, one row per contract
    pub options: Vec<OptionContract>,

    /// Cash state (main balance, deposits, interest)
    pub cash: CashLedger,

    /// Append-only transaction history
    pub transactions: Vec<Transaction>,

    /// Dated total-value records for period-return baselines
    pub snapshots: SnapshotStore,

    /// User settings (API keys, quote TTL)
    pub settings: Settings,

    /// Cached live quotes — bounds provider call volume
    #[serde(default)]
    pub quote_cache: QuoteCache,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            tickers: TickerRegistry::new(),
            shares: Vec::new(),
            options: Vec::new(),
            cash: CashLedger::new(),
            transactions: Vec::new(),
            snapshots: SnapshotStore::new(),
            settings: Settings::default(),
            quote_cache: QuoteCache::new(),
        }
    }
}

impl Ledger {
    pub fn share(&self, id: Uuid) -> Option<&Share> {
        self.shares.iter().find(|share| share.position.id == id)
    }

    pub fn option(&self, id: Uuid) -> Option<&OptionContract> {
        self.options.iter().find(|option| option.position.id == id)
    }
}
