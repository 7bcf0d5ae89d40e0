use thiserror::Error;

/// Unified error type for the entire investment-tracker-core library.
/// Every fallible public function returns `Result<T, TrackerError>`.
#[derive(Debug, Error)]
pub enum TrackerError {
    // ── Storage / File ──────────────────────────────────────────────
    #[error("Unsupported file version: {0}")]
    UnsupportedVersion(u16),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Market data ─────────────────────────────────────────────────
    /// The provider answered with a non-success status for one security.
    #[error("Error fetching data for {ticker}: HTTP {status_code}")]
    DataFetch {
        ticker: String,
        status_code: u16,
        response_text: String,
    },

    #[error("API error ({provider}): {message}")]
    Api { provider: String, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("No provider available for quote kind: {0}")]
    NoProvider(String),

    // ── Accounting ──────────────────────────────────────────────────
    #[error("{kind} not found: {id}")]
    ObjectNotFound { kind: String, id: String },

    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl TrackerError {
    /// Shorthand for a missing-entity error.
    pub fn not_found(kind: &str, id: impl ToString) -> Self {
        TrackerError::ObjectNotFound {
            kind: kind.to_string(),
            id: id.to_string(),
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for TrackerError {
    fn from(e: std::io::Error) -> Self {
        TrackerError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(e: serde_json::Error) -> Self {
        TrackerError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for TrackerError {
    fn from(e: reqwest::Error) -> Self {
        // Sanitize error message: strip query parameters from URLs to prevent
        // API key leakage. reqwest errors often contain full URLs with secrets.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        TrackerError::Network(sanitized)
    }
}
