use async_trait::async_trait;
use chrono::NaiveDate;

use super::traits::{MarketDataProvider, QuoteKind};
use crate::errors::TrackerError;
use crate::models::quote::OptionQuote;
use crate::models::security::OptionDirection;

/// Yahoo Finance provider for share prices.
///
/// - **Free**: No API key required (unofficial public API).
/// - **Coverage**: Global equities, ETFs, mutual funds.
///
/// Serves as the keyless fallback for share mids when no marketdata.app
/// token is configured. Option chains are not served here — the registry
/// never routes them to this provider.
pub struct YahooFinanceProvider {
    connector: yahoo_finance_api::YahooConnector,
}

impl YahooFinanceProvider {
    pub fn new() -> Result<Self, TrackerError> {
        let connector = yahoo_finance_api::YahooConnector::new().map_err(|e| TrackerError::Api {
            provider: "Yahoo Finance".into(),
            message: format!("Failed to create connector: {e}"),
        })?;
        Ok(Self { connector })
    }
}

#[async_trait]
impl MarketDataProvider for YahooFinanceProvider {
    fn name(&self) -> &str {
        "Yahoo Finance"
    }

    fn supported_kinds(&self) -> Vec<QuoteKind> {
        vec![QuoteKind::Share]
    }

    async fn option_quote(
        &self,
        symbol: &str,
        _expiration: NaiveDate,
        _direction: OptionDirection,
        _strike: f64,
    ) -> Result<OptionQuote, TrackerError> {
        Err(TrackerError::Api {
            provider: "Yahoo Finance".into(),
            message: format!("Option chains are not supported (requested {symbol})"),
        })
    }

    async fn share_quote(&self, symbol: &str) -> Result<f64, TrackerError> {
        let resp = self
            .connector
            .get_latest_quotes(symbol, "1d")
            .await
            .map_err(|e| TrackerError::Api {
                provider: "Yahoo Finance".into(),
                message: format!("Failed to fetch latest quote for {symbol}: {e}"),
            })?;

        let quote = resp.last_quote().map_err(|e| TrackerError::Api {
            provider: "Yahoo Finance".into(),
            message: format!("No quote data for {symbol}: {e}"),
        })?;

        Ok(quote.close)
    }
}
