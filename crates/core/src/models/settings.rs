use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default live-quote cache window, in minutes.
pub const DEFAULT_QUOTE_TTL_MINUTES: i64 = 30;

/// User-configurable settings, persisted inside the ledger file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Optional API keys for providers that require them.
    /// Keys: provider name (e.g., "marketdata").
    /// Values: the API key string.
    pub api_keys: HashMap<String, String>,

    /// How long a fetched live quote stays valid, bounding call volume
    /// against the market-data provider.
    pub quote_ttl_minutes: i64,
}

impl Settings {
    pub fn quote_ttl(&self) -> Duration {
        Duration::minutes(self.quote_ttl_minutes)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_keys: HashMap::new(),
            quote_ttl_minutes: DEFAULT_QUOTE_TTL_MINUTES,
        }
    }
}
