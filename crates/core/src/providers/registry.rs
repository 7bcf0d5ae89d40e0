use std::collections::HashMap;

use super::marketdata_app::MarketDataAppProvider;
use super::traits::{MarketDataProvider, QuoteKind};
use super::yahoo_finance::YahooFinanceProvider;

/// Registry of all available market-data providers.
///
/// Routes requests to the correct provider based on `QuoteKind`.
/// Registration order doubles as fallback priority: if the first provider
/// for a kind fails, the quote service tries the next one.
pub struct MarketDataRegistry {
    providers: Vec<Box<dyn MarketDataProvider>>,
}

impl MarketDataRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Create a registry with all default providers pre-configured.
    pub fn new_with_defaults(api_keys: &HashMap<String, String>) -> Self {
        let mut registry = Self::new();

        // marketdata.app — option chains + equities, requires API key
        if let Some(key) = api_keys.get("marketdata") {
            registry.register(Box::new(MarketDataAppProvider::new(key.clone())));
        }

        // Yahoo Finance — shares, no API key needed (fallback)
        if let Ok(yahoo) = YahooFinanceProvider::new() {
            registry.register(Box::new(yahoo));
        }

        registry
    }

    /// Register a new market-data provider.
    pub fn register(&mut self, provider: Box<dyn MarketDataProvider>) {
        self.providers.push(provider);
    }

    /// Find the first provider that serves the given quote kind.
    pub fn provider_for(&self, kind: QuoteKind) -> Option<&dyn MarketDataProvider> {
        self.providers
            .iter()
            .find(|provider| provider.supported_kinds().contains(&kind))
            .map(|provider| provider.as_ref())
    }

    /// Return ALL providers serving the given quote kind, in registration
    /// order. Used for fallback when the primary fails.
    pub fn providers_for(&self, kind: QuoteKind) -> Vec<&dyn MarketDataProvider> {
        self.providers
            .iter()
            .filter(|provider| provider.supported_kinds().contains(&kind))
            .map(|provider| provider.as_ref())
            .collect()
    }
}

impl Default for MarketDataRegistry {
    fn default() -> Self {
        Self::new()
    }
}
