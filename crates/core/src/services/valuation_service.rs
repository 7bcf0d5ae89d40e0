use chrono::NaiveDate;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::ledger::Ledger;
use crate::models::quote::LivePrices;
use crate::models::security::Security;

/// Headline portfolio figures for one valuation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioStats {
    /// Total cash across main balance, deposits, and interest
    pub current_cash: f64,

    /// `deposits + main balance + sum of live marks`
    pub curr_portfolio_value: f64,

    /// Sum of per-ticker P/L plus interest earned
    pub total_gain: f64,

    /// Growth beyond contributed capital, relative to the oldest snapshot
    pub pl_percentage: f64,

    /// Aggregate daily option time-decay income, scaled by the contract
    /// multiplier
    pub current_theta: f64,

    /// Annualized extrapolation of today's theta income rate
    pub apy: f64,
}

/// Full report of one valuation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioReport {
    pub stats: PortfolioStats,

    /// Ticker symbol → summed all-time P/L across its securities
    pub gains_by_ticker: HashMap<String, f64>,

    /// Open share id → unrealized-only gain/loss at the live mark
    pub share_live_gl: HashMap<Uuid, f64>,

    /// Open option id → unrealized-only gain/loss at the live mark
    pub option_live_gl: HashMap<Uuid, f64>,
}

/// Aggregates ledger state and live prices into the portfolio report.
///
/// Assumes `update_prices` has already written the live marks onto the
/// positions; the `live` map is only consulted for option theta.
pub struct ValuationService;

impl ValuationService {
    pub fn new() -> Self {
        Self
    }

    /// Compute the aggregate report and record the `as_of` snapshot.
    pub fn compute_portfolio_gains(
        &self,
        ledger: &mut Ledger,
        live: &LivePrices,
        as_of: NaiveDate,
    ) -> PortfolioReport {
        let deposits_total = ledger.cash.deposits_total();
        let interest_total = ledger.cash.interest_total();
        let main_balance = ledger.cash.main_balance;

        let mut gains_by_ticker: HashMap<String, f64> = HashMap::new();
        let mut share_live_gl = HashMap::new();
        let mut option_live_gl = HashMap::new();
        let mut current_mark_total = 0.0;
        let mut current_theta = 0.0;

        for option in &ledger.options {
            *gains_by_ticker
                .entry(option.position.symbol.clone())
                .or_insert(0.0) += option.calculate_pl();
            current_mark_total += option.position.current_value;

            if option.is_open() {
                if let Some(quote) = live.options.get(&option.position.id) {
                    current_theta += quote.theta * option.position.open_quantity;
                }
                option_live_gl.insert(option.position.id, option.live_gl());
            }
        }

        for share in &ledger.shares {
            *gains_by_ticker
                .entry(share.position.symbol.clone())
                .or_insert(0.0) += share.calculate_pl();
            current_mark_total += share.position.current_value;

            if share.is_open() {
                share_live_gl.insert(share.position.id, share.live_gl());
            }
        }

        let total_gain = gains_by_ticker.values().sum::<f64>() + interest_total;
        let curr_portfolio_value = deposits_total + main_balance + current_mark_total;

        // Baseline is the oldest snapshot; the comparison measures growth
        // beyond contributed capital.
        let baseline = ledger.snapshots.oldest().map(|snapshot| snapshot.value);
        let pl_percentage = match baseline {
            Some(value) if value != 0.0 && value + deposits_total != 0.0 => {
                ((curr_portfolio_value - (value + deposits_total)) / (value + deposits_total))
                    * 100.0
            }
            _ => 0.0,
        };

        // Percent gain for the year if today's aggregate theta were
        // collected daily against the current portfolio value.
        let apy = if curr_portfolio_value != 0.0 {
            ((current_theta * 100.0 * 365.0) / curr_portfolio_value) * 100.0
        } else {
            0.0
        };

        ledger.snapshots.upsert(as_of, curr_portfolio_value);

        PortfolioReport {
            stats: PortfolioStats {
                current_cash: ledger.cash.total(),
                curr_portfolio_value,
                total_gain,
                pl_percentage,
                current_theta: current_theta * 100.0,
                apy,
            },
            gains_by_ticker,
            share_live_gl,
            option_live_gl,
        }
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}
