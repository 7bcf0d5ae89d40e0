use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Live quote for an option contract: underlying spot, option mid, and
/// per-contract theta, as returned by the market-data provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    pub underlying_price: f64,
    pub mid: f64,
    pub theta: f64,
}

impl OptionQuote {
    /// Zero-valued placeholder used when a fetch fails and the valuation
    /// pass degrades instead of aborting.
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Live prices gathered for one valuation pass, keyed by security id.
#[derive(Debug, Clone, Default)]
pub struct LivePrices {
    pub options: HashMap<Uuid, OptionQuote>,
    pub shares: HashMap<Uuid, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CachedQuote<T> {
    value: T,
    fetched_at: DateTime<Utc>,
}

/// Time-expiring quote cache, persisted inside the ledger.
///
/// Entries stay valid for the settings TTL window; a stale-but-cached value
/// within the window is an acceptable read. Degraded zero placeholders are
/// cached like real quotes, so a failing provider is not re-hit on every
/// valuation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteCache {
    options: HashMap<String, CachedQuote<OptionQuote>>,
    shares: HashMap<String, CachedQuote<f64>>,
}

impl QuoteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached option quote, if one was fetched within the TTL window.
    pub fn get_option(
        &self,
        key: &str,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Option<OptionQuote> {
        self.options
            .get(key)
            .filter(|cached| now - cached.fetched_at <= ttl)
            .map(|cached| cached.value)
    }

    pub fn put_option(&mut self, key: impl Into<String>, quote: OptionQuote, now: DateTime<Utc>) {
        self.options.insert(
            key.into(),
            CachedQuote {
                value: quote,
                fetched_at: now,
            },
        );
    }

    /// Get a cached share mid, if one was fetched within the TTL window.
    pub fn get_share(&self, symbol: &str, now: DateTime<Utc>, ttl: Duration) -> Option<f64> {
        self.shares
            .get(symbol)
            .filter(|cached| now - cached.fetched_at <= ttl)
            .map(|cached| cached.value)
    }

    pub fn put_share(&mut self, symbol: impl Into<String>, mid: f64, now: DateTime<Utc>) {
        self.shares.insert(
            symbol.into(),
            CachedQuote {
                value: mid,
                fetched_at: now,
            },
        );
    }

    /// Total number of cached entries across both maps.
    pub fn total_entries(&self) -> usize {
        self.options.len() + self.shares.len()
    }

    pub fn clear(&mut self) {
        self.options.clear();
        self.shares.clear();
    }
}
