// ═══════════════════════════════════════════════════════════════════
// Model Tests — Ticker, Security predicates, CashLedger, SnapshotStore,
// QuoteCache, Transaction
// ═══════════════════════════════════════════════════════════════════

use chrono::{Duration, NaiveDate, Utc};

use investment_tracker_core::models::cash::{CashCategory, CashLedger};
use investment_tracker_core::models::quote::{OptionQuote, QuoteCache};
use investment_tracker_core::models::security::{
    OptionContract, OptionDirection, Security, SecurityKind, Share,
};
use investment_tracker_core::models::snapshot::SnapshotStore;
use investment_tracker_core::models::ticker::{InstrumentClass, Ticker, TickerRegistry};
use investment_tracker_core::models::transaction::{SecurityRef, Transaction};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
//  InstrumentClass & Ticker
// ═══════════════════════════════════════════════════════════════════

mod instrument_class {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(InstrumentClass::Stock.to_string(), "Stock");
        assert_eq!(InstrumentClass::Etf.to_string(), "ETF");
        assert_eq!(InstrumentClass::MoneyMarket.to_string(), "Money Market");
        assert_eq!(InstrumentClass::MutualFund.to_string(), "Mutual Fund");
    }

    #[test]
    fn serde_roundtrip_json() {
        for class in [
            InstrumentClass::Stock,
            InstrumentClass::Etf,
            InstrumentClass::MoneyMarket,
            InstrumentClass::MutualFund,
        ] {
            let json = serde_json::to_string(&class).unwrap();
            let back: InstrumentClass = serde_json::from_str(&json).unwrap();
            assert_eq!(class, back);
        }
    }
}

mod ticker {
    use super::*;

    #[test]
    fn new_uppercases_symbol() {
        let ticker = Ticker::new("tsla", "Tesla Inc.", InstrumentClass::Stock);
        assert_eq!(ticker.symbol, "TSLA");
    }

    #[test]
    fn display_includes_symbol_and_name() {
        let ticker = Ticker::new("VTI", "Vanguard Total Market", InstrumentClass::Etf);
        assert_eq!(ticker.to_string(), "VTI — Vanguard Total Market");
    }

    #[test]
    fn registry_ensure_inserts_once() {
        let mut registry = TickerRegistry::new();

        registry.ensure("TSLA", "Tesla Inc.", InstrumentClass::Stock);
        registry.ensure("tsla", "Some Other Name", InstrumentClass::Etf);

        assert_eq!(registry.len(), 1);
        let ticker = registry.get("TSLA").unwrap();
        // first creation wins: symbol and class are immutable
        assert_eq!(ticker.name, "Tesla Inc.");
        assert_eq!(ticker.class, InstrumentClass::Stock);
    }

    #[test]
    fn registry_lookup_is_case_insensitive() {
        let mut registry = TickerRegistry::new();
        registry.ensure("VTI", "Vanguard Total Market", InstrumentClass::Etf);

        assert!(registry.contains("vti"));
        assert!(registry.get("vti").is_some());
    }

    #[test]
    fn rename_changes_only_display_name() {
        let mut registry = TickerRegistry::new();
        registry.ensure("TSLA", "Tesla", InstrumentClass::Stock);

        assert!(registry.rename("TSLA", "Tesla Inc."));

        let ticker = registry.get("TSLA").unwrap();
        assert_eq!(ticker.name, "Tesla Inc.");
        assert_eq!(ticker.symbol, "TSLA");
        assert_eq!(ticker.class, InstrumentClass::Stock);
    }

    #[test]
    fn rename_unknown_symbol_returns_false() {
        let mut registry = TickerRegistry::new();
        assert!(!registry.rename("NOPE", "Nothing"));
    }

    #[test]
    fn symbols_are_sorted() {
        let mut registry = TickerRegistry::new();
        registry.ensure("VTI", "Vanguard", InstrumentClass::Etf);
        registry.ensure("AAPL", "Apple", InstrumentClass::Stock);
        registry.ensure("TSLA", "Tesla", InstrumentClass::Stock);

        assert_eq!(registry.symbols(), vec!["AAPL", "TSLA", "VTI"]);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Security predicates & labels
// ═══════════════════════════════════════════════════════════════════

mod securities {
    use super::*;

    fn short_call() -> OptionContract {
        let mut option =
            OptionContract::new("TSLA", d(2025, 9, 19), 180.0, OptionDirection::Call);
        option.position.open_quantity = -2.0;
        option
    }

    #[test]
    fn share_multiplier_is_one() {
        assert_eq!(Share::new("VTI").multiplier(), 1.0);
    }

    #[test]
    fn option_multiplier_is_one_hundred() {
        assert_eq!(short_call().multiplier(), 100.0);
    }

    #[test]
    fn short_long_open_predicates() {
        let option = short_call();
        assert!(option.is_short());
        assert!(!option.is_long());
        assert!(option.is_open());

        let flat = Share::new("VTI");
        assert!(!flat.is_short());
        assert!(!flat.is_long());
        assert!(!flat.is_open());
    }

    #[test]
    fn expires_today_is_false_for_a_future_date() {
        let option = OptionContract::new(
            "TSLA",
            Utc::now().date_naive() + Duration::days(30),
            180.0,
            OptionDirection::Call,
        );
        assert!(!option.expires_today());
    }

    #[test]
    fn share_label_is_the_symbol() {
        assert_eq!(Share::new("vti").label(), "VTI");
    }

    #[test]
    fn option_label_carries_strike_side_and_expiry() {
        let option = short_call();
        assert_eq!(option.label(), "TSLA 180c 2025-09-19");
    }

    #[test]
    fn direction_letters_and_side_names() {
        assert_eq!(OptionDirection::Put.letter(), 'p');
        assert_eq!(OptionDirection::Call.letter(), 'c');
        assert_eq!(OptionDirection::Put.side_name(), "put");
        assert_eq!(OptionDirection::Call.side_name(), "call");
        assert_eq!(OptionDirection::Put.to_string(), "PUT");
        assert_eq!(OptionDirection::Call.to_string(), "CALL");
    }

    #[test]
    fn security_kind_display() {
        assert_eq!(SecurityKind::Share.to_string(), "Share");
        assert_eq!(SecurityKind::Option.to_string(), "Option");
    }

    #[test]
    fn contract_key_identifies_the_contract() {
        let call = short_call();
        let put = OptionContract::new("TSLA", d(2025, 9, 19), 180.0, OptionDirection::Put);
        assert_ne!(call.contract_key(), put.contract_key());
        assert_eq!(call.contract_key(), "TSLA|2025-09-19|c|180");
    }

    #[test]
    fn serde_roundtrip_json() {
        let option = short_call();
        let json = serde_json::to_string(&option).unwrap();
        let back: OptionContract = serde_json::from_str(&json).unwrap();
        assert_eq!(option, back);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  CashLedger
// ═══════════════════════════════════════════════════════════════════

mod cash {
    use super::*;

    #[test]
    fn credit_main_accumulates() {
        let mut cash = CashLedger::new();
        cash.credit_main(-200.0);
        cash.credit_main(150.0);
        assert_eq!(cash.main_balance, -50.0);
    }

    #[test]
    fn deposits_and_interest_accumulate_separately() {
        let mut cash = CashLedger::new();
        cash.add_deposit(1000.0, d(2024, 9, 1));
        cash.add_deposit(500.0, d(2024, 10, 1));
        cash.add_interest(12.5, d(2024, 10, 1));

        assert_eq!(cash.deposits_total(), 1500.0);
        assert_eq!(cash.interest_total(), 12.5);
    }

    #[test]
    fn total_sums_every_category() {
        let mut cash = CashLedger::new();
        cash.add_deposit(1000.0, d(2024, 9, 1));
        cash.add_interest(10.0, d(2024, 10, 1));
        cash.credit_main(-300.0);

        assert_eq!(cash.total(), 710.0);
    }

    #[test]
    fn category_display() {
        assert_eq!(CashCategory::Deposit.to_string(), "Deposit");
        assert_eq!(CashCategory::Interest.to_string(), "Interest");
        assert_eq!(CashCategory::Main.to_string(), "Main");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  SnapshotStore
// ═══════════════════════════════════════════════════════════════════

mod snapshots {
    use super::*;

    #[test]
    fn upsert_keeps_dates_sorted() {
        let mut store = SnapshotStore::new();
        store.upsert(d(2024, 9, 10), 10500.0);
        store.upsert(d(2024, 9, 1), 10000.0);
        store.upsert(d(2024, 9, 5), 10200.0);

        let dates: Vec<NaiveDate> = store.iter().map(|snapshot| snapshot.date).collect();
        assert_eq!(dates, vec![d(2024, 9, 1), d(2024, 9, 5), d(2024, 9, 10)]);
    }

    #[test]
    fn same_day_upsert_replaces_instead_of_duplicating() {
        let mut store = SnapshotStore::new();
        store.upsert(d(2024, 9, 1), 10000.0);
        store.upsert(d(2024, 9, 1), 10250.0);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(d(2024, 9, 1)), Some(10250.0));
    }

    #[test]
    fn oldest_is_the_baseline_row() {
        let mut store = SnapshotStore::new();
        store.upsert(d(2024, 9, 10), 10500.0);
        store.upsert(d(2024, 9, 1), 10000.0);

        assert_eq!(store.oldest().unwrap().value, 10000.0);
        assert_eq!(store.latest().unwrap().value, 10500.0);
    }

    #[test]
    fn empty_store() {
        let store = SnapshotStore::new();
        assert!(store.is_empty());
        assert!(store.oldest().is_none());
        assert!(store.get(d(2024, 9, 1)).is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  QuoteCache
// ═══════════════════════════════════════════════════════════════════

mod quote_cache {
    use super::*;

    #[test]
    fn fresh_entry_is_served() {
        let mut cache = QuoteCache::new();
        let now = Utc::now();
        let quote = OptionQuote {
            underlying_price: 180.0,
            mid: 3.0,
            theta: -0.05,
        };

        cache.put_option("TSLA|2025-09-19|c|180", quote, now);

        let hit = cache.get_option(
            "TSLA|2025-09-19|c|180",
            now + Duration::minutes(10),
            Duration::minutes(30),
        );
        assert_eq!(hit, Some(quote));
    }

    #[test]
    fn entry_older_than_ttl_is_ignored() {
        let mut cache = QuoteCache::new();
        let now = Utc::now();

        cache.put_share("VTI", 250.0, now);

        let hit = cache.get_share("VTI", now + Duration::minutes(31), Duration::minutes(30));
        assert_eq!(hit, None);
    }

    #[test]
    fn zero_placeholder_is_cached_like_a_real_quote() {
        let mut cache = QuoteCache::new();
        let now = Utc::now();

        cache.put_option("TSLA|2025-09-19|c|180", OptionQuote::zero(), now);

        let hit = cache.get_option("TSLA|2025-09-19|c|180", now, Duration::minutes(30));
        assert_eq!(hit, Some(OptionQuote::zero()));
    }

    #[test]
    fn total_entries_and_clear() {
        let mut cache = QuoteCache::new();
        let now = Utc::now();
        cache.put_share("VTI", 250.0, now);
        cache.put_option("TSLA|2025-09-19|c|180", OptionQuote::zero(), now);

        assert_eq!(cache.total_entries(), 2);
        cache.clear();
        assert_eq!(cache.total_entries(), 0);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Transaction
// ═══════════════════════════════════════════════════════════════════

mod transactions {
    use super::*;

    #[test]
    fn total_value_is_price_times_quantity() {
        let share_id = uuid::Uuid::new_v4();
        let transaction =
            Transaction::new(d(2024, 9, 6), 25.0, -4.0, SecurityRef::Share(share_id));

        assert_eq!(transaction.total_value, -100.0);
        assert_eq!(transaction.target, SecurityRef::Share(share_id));
    }

    #[test]
    fn serde_roundtrip_json() {
        let transaction = Transaction::new(
            d(2024, 9, 6),
            5.0,
            -2.0,
            SecurityRef::Cash(CashCategory::Deposit),
        );
        let json = serde_json::to_string(&transaction).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(transaction, back);
    }
}
