// ═══════════════════════════════════════════════════════════════════
// Error Tests — TrackerError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use investment_tracker_core::errors::TrackerError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn data_fetch_mirrors_the_provider_failure() {
        let err = TrackerError::DataFetch {
            ticker: "TSLA".into(),
            status_code: 404,
            response_text: "no such contract".into(),
        };
        assert_eq!(err.to_string(), "Error fetching data for TSLA: HTTP 404");
    }

    #[test]
    fn object_not_found() {
        let err = TrackerError::not_found("share", "abc-123");
        assert_eq!(err.to_string(), "share not found: abc-123");
    }

    #[test]
    fn invalid_transaction() {
        let err = TrackerError::InvalidTransaction("quantity must be non-zero".into());
        assert_eq!(
            err.to_string(),
            "Invalid transaction: quantity must be non-zero"
        );
    }

    #[test]
    fn validation() {
        let err = TrackerError::Validation("Quote TTL must be positive, got 0".into());
        assert_eq!(
            err.to_string(),
            "Validation failed: Quote TTL must be positive, got 0"
        );
    }

    #[test]
    fn api_error_names_the_provider() {
        let err = TrackerError::Api {
            provider: "marketdata.app".into(),
            message: "Empty option chain for TSLA".into(),
        };
        assert_eq!(
            err.to_string(),
            "API error (marketdata.app): Empty option chain for TSLA"
        );
    }

    #[test]
    fn no_provider() {
        let err = TrackerError::NoProvider("option chain".into());
        assert_eq!(
            err.to_string(),
            "No provider available for quote kind: option chain"
        );
    }

    #[test]
    fn unsupported_version() {
        let err = TrackerError::UnsupportedVersion(99);
        assert_eq!(err.to_string(), "Unsupported file version: 99");
    }

    #[test]
    fn network() {
        let err = TrackerError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }
}

// ── Field access ────────────────────────────────────────────────────

mod fields {
    use super::*;

    #[test]
    fn data_fetch_keeps_the_response_body() {
        let err = TrackerError::DataFetch {
            ticker: "TSLA".into(),
            status_code: 429,
            response_text: "rate limited".into(),
        };
        match err {
            TrackerError::DataFetch {
                ticker,
                status_code,
                response_text,
            } => {
                assert_eq!(ticker, "TSLA");
                assert_eq!(status_code, 429);
                assert_eq!(response_text, "rate limited");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn not_found_accepts_any_id_type() {
        let id = uuid::Uuid::new_v4();
        let err = TrackerError::not_found("option", id);
        assert_eq!(err.to_string(), format!("option not found: {id}"));
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn io_error_becomes_file_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: TrackerError = io.into();
        assert!(matches!(err, TrackerError::FileIO(_)));
    }

    #[test]
    fn serde_json_error_becomes_deserialization() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: TrackerError = parse_err.into();
        assert!(matches!(err, TrackerError::Deserialization(_)));
    }
}
