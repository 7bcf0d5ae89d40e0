use chrono::{NaiveDate, Utc};
use log::{debug, warn};

use crate::errors::TrackerError;
use crate::models::ledger::Ledger;
use crate::models::quote::{LivePrices, OptionQuote};
use crate::models::security::{OptionDirection, Security};
use crate::providers::registry::MarketDataRegistry;
use crate::providers::traits::QuoteKind;

/// Fetches live quotes for every open position, with TTL caching.
///
/// Fetch failures never abort a valuation pass: the failed security gets a
/// zero-valued placeholder that is cached for the same TTL window, so a
/// flapping provider is not re-hit on every pass. Each security's fetch is
/// isolated — one symbol failing does not affect the others.
pub struct QuoteService {
    registry: MarketDataRegistry,
}

impl QuoteService {
    pub fn new(registry: MarketDataRegistry) -> Self {
        Self { registry }
    }

    /// Gather live prices for every open option and share.
    ///
    /// Cache-first: a quote fetched within the TTL window is served from
    /// the ledger's quote cache without touching the provider.
    pub async fn get_live_prices(&self, ledger: &mut Ledger) -> LivePrices {
        let now = Utc::now();
        let ttl = ledger.settings.quote_ttl();
        let mut live = LivePrices::default();

        let contracts: Vec<_> = ledger
            .options
            .iter()
            .filter(|option| option.is_open())
            .map(|option| {
                (
                    option.position.id,
                    option.position.symbol.clone(),
                    option.expiration_date,
                    option.direction,
                    option.strike_price,
                    option.contract_key(),
                )
            })
            .collect();

        for (id, symbol, expiration, direction, strike, key) in contracts {
            let quote = match ledger.quote_cache.get_option(&key, now, ttl) {
                Some(cached) => {
                    debug!("quote cache hit for {key}");
                    cached
                }
                None => {
                    let quote = match self
                        .fetch_option_quote(&symbol, expiration, direction, strike)
                        .await
                    {
                        Ok(quote) => quote,
                        Err(e) => {
                            warn!("option quote for {key} failed, degrading to zero placeholder: {e}");
                            OptionQuote::zero()
                        }
                    };
                    ledger.quote_cache.put_option(&key, quote, now);
                    quote
                }
            };
            live.options.insert(id, quote);
        }

        let open_shares: Vec<_> = ledger
            .shares
            .iter()
            .filter(|share| share.is_open())
            .map(|share| (share.position.id, share.position.symbol.clone()))
            .collect();

        for (id, symbol) in open_shares {
            let mid = match ledger.quote_cache.get_share(&symbol, now, ttl) {
                Some(cached) => {
                    debug!("quote cache hit for {symbol}");
                    cached
                }
                None => {
                    let mid = match self.fetch_share_mid(&symbol).await {
                        Ok(mid) => mid,
                        Err(e) => {
                            warn!("share quote for {symbol} failed, degrading to zero placeholder: {e}");
                            0.0
                        }
                    };
                    ledger.quote_cache.put_share(&symbol, mid, now);
                    mid
                }
            };
            live.shares.insert(id, mid);
        }

        live
    }

    /// Write the fetched marks back onto the open positions.
    pub fn update_prices(&self, ledger: &mut Ledger, live: &LivePrices) {
        for option in ledger.options.iter_mut().filter(|option| option.is_open()) {
            if let Some(quote) = live.options.get(&option.position.id) {
                option.set_current_value(quote.mid);
            }
        }
        for share in ledger.shares.iter_mut().filter(|share| share.is_open()) {
            if let Some(mid) = live.shares.get(&share.position.id) {
                share.set_current_value(*mid);
            }
        }
    }

    /// Fetch one option quote with automatic provider fallback:
    /// providers are tried in registration order until one answers.
    async fn fetch_option_quote(
        &self,
        symbol: &str,
        expiration: NaiveDate,
        direction: OptionDirection,
        strike: f64,
    ) -> Result<OptionQuote, TrackerError> {
        let providers = self.registry.providers_for(QuoteKind::OptionChain);
        if providers.is_empty() {
            return Err(TrackerError::NoProvider(QuoteKind::OptionChain.to_string()));
        }

        let mut last_error = None;
        for provider in providers {
            match provider
                .option_quote(symbol, expiration, direction, strike)
                .await
            {
                Ok(quote) => return Ok(quote),
                Err(e) => last_error = Some(e),
            }
        }
        Err(last_error
            .unwrap_or_else(|| TrackerError::NoProvider(QuoteKind::OptionChain.to_string())))
    }

    async fn fetch_share_mid(&self, symbol: &str) -> Result<f64, TrackerError> {
        let providers = self.registry.providers_for(QuoteKind::Share);
        if providers.is_empty() {
            return Err(TrackerError::NoProvider(QuoteKind::Share.to_string()));
        }

        let mut last_error = None;
        for provider in providers {
            match provider.share_quote(symbol).await {
                Ok(mid) => return Ok(mid),
                Err(e) => last_error = Some(e),
            }
        }
        Err(last_error.unwrap_or_else(|| TrackerError::NoProvider(QuoteKind::Share.to_string())))
    }
}
