use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::TrackerError;
use crate::models::quote::OptionQuote;
use crate::models::security::OptionDirection;

/// Which quote shapes a provider can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteKind {
    /// Live `(underlying, mid, theta)` for a single option contract
    OptionChain,
    /// Live mid price for a share
    Share,
}

impl std::fmt::Display for QuoteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteKind::OptionChain => write!(f, "option chain"),
            QuoteKind::Share => write!(f, "share"),
        }
    }
}

/// Trait abstraction for all market-data providers.
///
/// Each upstream API implements this trait. If an API stops working or
/// changes, we replace only that one implementation — the rest of the
/// codebase is untouched.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Which quote kinds this provider can serve.
    fn supported_kinds(&self) -> Vec<QuoteKind>;

    /// Live quote for a single option contract.
    async fn option_quote(
        &self,
        symbol: &str,
        expiration: NaiveDate,
        direction: OptionDirection,
        strike: f64,
    ) -> Result<OptionQuote, TrackerError>;

    /// Live mid price for a share.
    async fn share_quote(&self, symbol: &str) -> Result<f64, TrackerError>;
}
