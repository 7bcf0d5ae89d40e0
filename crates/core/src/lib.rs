pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use errors::TrackerError;
use models::{
    ledger::Ledger,
    quote::LivePrices,
    security::{OptionContract, SecurityKind, Share},
    settings::Settings,
    snapshot::SnapshotStore,
    ticker::Ticker,
    transaction::{SecurityRef, Transaction, TransactionRequest},
};
use providers::registry::MarketDataRegistry;
use services::{
    ledger_service::{LedgerService, SecurityListing},
    quote_service::QuoteService,
    valuation_service::{PortfolioReport, ValuationService},
};
use storage::manager::StorageManager;

/// Main entry point for the Investment Tracker core library.
/// Holds the ledger state and all services needed to operate on it.
#[must_use]
pub struct InvestmentTracker {
    ledger: Ledger,
    ledger_service: LedgerService,
    quote_service: QuoteService,
    valuation_service: ValuationService,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for InvestmentTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvestmentTracker")
            .field("shares", &self.ledger.shares.len())
            .field("options", &self.ledger.options.len())
            .field("transactions", &self.ledger.transactions.len())
            .field("snapshots", &self.ledger.snapshots.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl InvestmentTracker {
    /// Create a brand new empty tracker with default settings.
    pub fn create_new() -> Self {
        Self::build(Ledger::default())
    }

    /// Load an existing ledger from raw bytes.
    pub fn load_from_bytes(data: &[u8]) -> Result<Self, TrackerError> {
        let ledger = StorageManager::load_from_bytes(data)?;
        Ok(Self::build(ledger))
    }

    /// Save the current ledger to raw bytes.
    /// Clears the unsaved-changes flag on success.
    pub fn save_to_bytes(&mut self) -> Result<Vec<u8>, TrackerError> {
        let bytes = StorageManager::save_to_bytes(&self.ledger)?;
        self.dirty = false;
        Ok(bytes)
    }

    /// Load the ledger from a file on disk.
    pub fn load_from_file(path: &str) -> Result<Self, TrackerError> {
        let ledger = StorageManager::load_from_file(path)?;
        Ok(Self::build(ledger))
    }

    /// Save the ledger to a file on disk.
    /// Clears the unsaved-changes flag on success.
    pub fn save_to_file(&mut self, path: &str) -> Result<(), TrackerError> {
        StorageManager::save_to_file(&self.ledger, path)?;
        self.dirty = false;
        Ok(())
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Record a transaction as one all-or-nothing unit.
    /// A failure (bad lookup, zero quantity) leaves no partial mutation.
    pub fn record_transaction(&mut self, request: TransactionRequest) -> Result<Uuid, TrackerError> {
        let id = self.ledger_service.record_transaction(&mut self.ledger, request)?;
        self.dirty = true;
        Ok(id)
    }

    /// Record a cash deposit.
    pub fn record_deposit(&mut self, amount: f64, date: NaiveDate) -> Result<Uuid, TrackerError> {
        self.record_transaction(TransactionRequest::deposit(amount, date))
    }

    /// Record an interest credit.
    pub fn record_interest(&mut self, amount: f64, date: NaiveDate) -> Result<Uuid, TrackerError> {
        self.record_transaction(TransactionRequest::interest(amount, date))
    }

    /// All transactions, newest first.
    #[must_use]
    pub fn transactions(&self) -> Vec<&Transaction> {
        let mut transactions: Vec<&Transaction> = self.ledger.transactions.iter().collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        transactions
    }

    /// Transactions that settled against a specific security, newest first.
    #[must_use]
    pub fn transactions_for_security(&self, id: Uuid) -> Vec<&Transaction> {
        let mut transactions: Vec<&Transaction> = self
            .ledger
            .transactions
            .iter()
            .filter(|transaction| {
                matches!(
                    transaction.target,
                    SecurityRef::Share(target) | SecurityRef::Option(target) if target == id
                )
            })
            .collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        transactions
    }

    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.ledger.transactions.len()
    }

    // ── Securities ──────────────────────────────────────────────────

    /// Open securities of the requested kind, with display labels.
    #[must_use]
    pub fn open_securities(&self, kind: SecurityKind) -> Vec<SecurityListing> {
        self.ledger_service.open_securities(&self.ledger, kind)
    }

    #[must_use]
    pub fn shares(&self) -> &[Share] {
        &self.ledger.shares
    }

    #[must_use]
    pub fn options(&self) -> &[OptionContract] {
        &self.ledger.options
    }

    #[must_use]
    pub fn share(&self, id: Uuid) -> Option<&Share> {
        self.ledger.share(id)
    }

    #[must_use]
    pub fn option(&self, id: Uuid) -> Option<&OptionContract> {
        self.ledger.option(id)
    }

    // ── Tickers ─────────────────────────────────────────────────────

    #[must_use]
    pub fn ticker(&self, symbol: &str) -> Option<&Ticker> {
        self.ledger.tickers.get(symbol)
    }

    /// Change a ticker's display name — the only mutation tickers allow.
    pub fn rename_ticker(&mut self, symbol: &str, name: impl Into<String>) -> bool {
        let renamed = self.ledger.tickers.rename(symbol, name);
        if renamed {
            self.dirty = true;
        }
        renamed
    }

    // ── Cash ────────────────────────────────────────────────────────

    /// The running main balance debited/credited by every trade.
    #[must_use]
    pub fn cash_balance(&self) -> f64 {
        self.ledger.cash.main_balance
    }

    /// Total cash across main balance, deposits, and interest.
    #[must_use]
    pub fn total_cash(&self) -> f64 {
        self.ledger.cash.total()
    }

    #[must_use]
    pub fn deposits_total(&self) -> f64 {
        self.ledger.cash.deposits_total()
    }

    #[must_use]
    pub fn interest_total(&self) -> f64 {
        self.ledger.cash.interest_total()
    }

    // ── Prices & Valuation ──────────────────────────────────────────

    /// Fetch live prices for every open position and write the marks back.
    /// Fetch failures degrade to cached zero placeholders.
    pub async fn refresh_prices(&mut self) -> LivePrices {
        let live = self.quote_service.get_live_prices(&mut self.ledger).await;
        self.quote_service.update_prices(&mut self.ledger, &live);
        self.dirty = true;
        live
    }

    /// Full valuation pass: refresh prices, compute the aggregate report,
    /// and record today's snapshot.
    pub async fn portfolio_report(&mut self) -> PortfolioReport {
        let live = self.refresh_prices().await;
        let today = Utc::now().date_naive();
        self.compute_portfolio_gains(&live, today)
    }

    /// Compute the aggregate report from already-fetched prices and record
    /// the `as_of` snapshot.
    pub fn compute_portfolio_gains(
        &mut self,
        live: &LivePrices,
        as_of: NaiveDate,
    ) -> PortfolioReport {
        let report = self
            .valuation_service
            .compute_portfolio_gains(&mut self.ledger, live, as_of);
        self.dirty = true;
        report
    }

    // ── Snapshots ───────────────────────────────────────────────────

    #[must_use]
    pub fn snapshots(&self) -> &SnapshotStore {
        &self.ledger.snapshots
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.ledger.settings
    }

    /// Set an API key for a provider (e.g., "marketdata").
    /// Rebuilds the provider registry so the new key takes effect immediately.
    pub fn set_api_key(&mut self, provider: String, key: String) {
        self.ledger.settings.api_keys.insert(provider, key);

        let registry = MarketDataRegistry::new_with_defaults(&self.ledger.settings.api_keys);
        self.quote_service = QuoteService::new(registry);
        self.dirty = true;
    }

    /// Remove an API key for a provider.
    /// Rebuilds the provider registry so the removal takes effect immediately.
    pub fn remove_api_key(&mut self, provider: &str) -> bool {
        let removed = self.ledger.settings.api_keys.remove(provider).is_some();
        if removed {
            let registry = MarketDataRegistry::new_with_defaults(&self.ledger.settings.api_keys);
            self.quote_service = QuoteService::new(registry);
            self.dirty = true;
        }
        removed
    }

    /// Set how long fetched quotes stay valid. Must be positive.
    pub fn set_quote_ttl_minutes(&mut self, minutes: i64) -> Result<(), TrackerError> {
        if minutes <= 0 {
            return Err(TrackerError::Validation(format!(
                "Quote TTL must be positive, got {minutes}"
            )));
        }
        self.ledger.settings.quote_ttl_minutes = minutes;
        self.dirty = true;
        Ok(())
    }

    // ── Cache Management ────────────────────────────────────────────

    /// Total number of cached live quotes.
    #[must_use]
    pub fn quote_cache_entries(&self) -> usize {
        self.ledger.quote_cache.total_entries()
    }

    /// Drop all cached quotes; the next valuation pass re-fetches everything.
    pub fn clear_quote_cache(&mut self) {
        self.ledger.quote_cache.clear();
        self.dirty = true;
    }

    // ── Dirty State ─────────────────────────────────────────────────

    /// Returns `true` if the ledger has been modified since the last save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(ledger: Ledger) -> Self {
        let registry = MarketDataRegistry::new_with_defaults(&ledger.settings.api_keys);
        let quote_service = QuoteService::new(registry);
        let ledger_service = LedgerService::new();
        let valuation_service = ValuationService::new();

        Self {
            ledger,
            ledger_service,
            quote_service,
            valuation_service,
            dirty: false,
        }
    }
}

impl Default for InvestmentTracker {
    fn default() -> Self {
        Self::create_new()
    }
}
