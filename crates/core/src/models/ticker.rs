use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The instrument class of a listed symbol.
/// Carried for display and listing purposes; the accounting engine does not
/// branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstrumentClass {
    /// Common equity (AAPL, TSLA, etc.)
    Stock,
    /// Exchange-traded fund (VTI, SPY, etc.)
    Etf,
    /// Money-market fund (SPAXX, VMFXX, etc.)
    MoneyMarket,
    /// Open-end mutual fund
    MutualFund,
}

impl std::fmt::Display for InstrumentClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstrumentClass::Stock => write!(f, "Stock"),
            InstrumentClass::Etf => write!(f, "ETF"),
            InstrumentClass::MoneyMarket => write!(f, "Money Market"),
            InstrumentClass::MutualFund => write!(f, "Mutual Fund"),
        }
    }
}

/// A market symbol and its display identity.
///
/// Immutable after creation except for the display name. Securities
/// reference a ticker by symbol; they never own one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    /// Market symbol, uppercased (e.g., "TSLA", "VTI")
    pub symbol: String,

    /// Human-readable name (e.g., "Tesla Inc.", "Vanguard Total Market")
    pub name: String,

    /// Instrument class of the listed symbol
    pub class: InstrumentClass,
}

impl Ticker {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, class: InstrumentClass) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            name: name.into(),
            class,
        }
    }
}

impl std::fmt::Display for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} — {}", self.symbol, self.name)
    }
}

/// Symbol-keyed registry of tickers.
///
/// Rows are created lazily on the first transaction that mentions a new
/// symbol and are never deleted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickerRegistry {
    tickers: HashMap<String, Ticker>,
}

impl TickerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, symbol: &str) -> Option<&Ticker> {
        self.tickers.get(&symbol.to_uppercase())
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.tickers.contains_key(&symbol.to_uppercase())
    }

    /// Look up a ticker, inserting it if the symbol is unknown.
    /// An existing row is returned untouched: symbol and class are
    /// immutable after creation.
    pub fn ensure(
        &mut self,
        symbol: &str,
        name: &str,
        class: InstrumentClass,
    ) -> &Ticker {
        self.tickers
            .entry(symbol.to_uppercase())
            .or_insert_with(|| Ticker::new(symbol, name, class))
    }

    /// Change a ticker's display name. Returns `false` for an unknown symbol.
    pub fn rename(&mut self, symbol: &str, name: impl Into<String>) -> bool {
        match self.tickers.get_mut(&symbol.to_uppercase()) {
            Some(ticker) => {
                ticker.name = name.into();
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    /// All registered symbols in deterministic (sorted) order.
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.tickers.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }
}
