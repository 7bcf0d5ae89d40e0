use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::traits::{MarketDataProvider, QuoteKind};
use crate::errors::TrackerError;
use crate::models::quote::OptionQuote;
use crate::models::security::OptionDirection;

const BASE_URL: &str = "https://api.marketdata.app/v1";

/// marketdata.app provider: option chains and US equity prices.
///
/// - **Auth**: Bearer token, required for every endpoint.
/// - **Status codes**: 200 for live data, 203 for provider-cached data —
///   both are valid answers; anything else is a fetch failure carrying the
///   response body.
/// - **Endpoints**: `/options/chain/{symbol}/` filtered to a single
///   contract, `/stocks/prices/{symbol}/` for equity mids.
///
/// Responses use parallel arrays; a single-contract chain request yields
/// one-element arrays.
pub struct MarketDataAppProvider {
    client: Client,
    api_key: String,
}

// ── marketdata.app response types ───────────────────────────────────

#[derive(Deserialize)]
struct OptionChainResponse {
    #[serde(rename = "underlyingPrice")]
    underlying_price: Vec<f64>,
    mid: Vec<f64>,
    theta: Vec<f64>,
}

#[derive(Deserialize)]
struct StockPriceResponse {
    /// Status: "ok" or an error marker such as "no_data"
    s: String,
    #[serde(default)]
    mid: Option<Vec<f64>>,
}

impl MarketDataAppProvider {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, api_key }
    }

    /// Fetch a URL with Bearer auth, accepting 200 and 203.
    async fn fetch(&self, ticker: &str, url: &str) -> Result<String, TrackerError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 && status != 203 {
            let response_text = response.text().await.unwrap_or_default();
            return Err(TrackerError::DataFetch {
                ticker: ticker.to_string(),
                status_code: status,
                response_text,
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl MarketDataProvider for MarketDataAppProvider {
    fn name(&self) -> &str {
        "marketdata.app"
    }

    fn supported_kinds(&self) -> Vec<QuoteKind> {
        vec![QuoteKind::OptionChain, QuoteKind::Share]
    }

    async fn option_quote(
        &self,
        symbol: &str,
        expiration: NaiveDate,
        direction: OptionDirection,
        strike: f64,
    ) -> Result<OptionQuote, TrackerError> {
        let url = format!(
            "{BASE_URL}/options/chain/{symbol}/?expiration={}&side={}&strike={}",
            expiration.format("%Y-%m-%d"),
            direction.side_name(),
            strike as i64,
        );

        let body = self.fetch(symbol, &url).await?;
        let chain: OptionChainResponse =
            serde_json::from_str(&body).map_err(|e| TrackerError::Api {
                provider: "marketdata.app".into(),
                message: format!("Failed to parse option chain for {symbol}: {e}"),
            })?;

        match (
            chain.underlying_price.first(),
            chain.mid.first(),
            chain.theta.first(),
        ) {
            (Some(&underlying_price), Some(&mid), Some(&theta)) => Ok(OptionQuote {
                underlying_price,
                mid,
                theta,
            }),
            _ => Err(TrackerError::Api {
                provider: "marketdata.app".into(),
                message: format!("Empty option chain for {symbol}"),
            }),
        }
    }

    async fn share_quote(&self, symbol: &str) -> Result<f64, TrackerError> {
        let url = format!("{BASE_URL}/stocks/prices/{symbol}/");

        let body = self.fetch(symbol, &url).await?;
        let price: StockPriceResponse =
            serde_json::from_str(&body).map_err(|e| TrackerError::Api {
                provider: "marketdata.app".into(),
                message: format!("Failed to parse price response for {symbol}: {e}"),
            })?;

        if price.s != "ok" {
            return Err(TrackerError::Api {
                provider: "marketdata.app".into(),
                message: format!("API returned status {} for {symbol}", price.s),
            });
        }

        price
            .mid
            .as_deref()
            .and_then(|mids| mids.first())
            .copied()
            .ok_or_else(|| TrackerError::Api {
                provider: "marketdata.app".into(),
                message: format!("No price data for {symbol}"),
            })
    }
}
