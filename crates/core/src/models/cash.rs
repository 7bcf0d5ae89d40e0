use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category of a cash row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashCategory {
    /// Capital contributed from outside the portfolio
    Deposit,
    /// Interest credited on idle cash
    Interest,
    /// The running operating balance debited/credited by every trade
    Main,
}

impl std::fmt::Display for CashCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CashCategory::Deposit => write!(f, "Deposit"),
            CashCategory::Interest => write!(f, "Interest"),
            CashCategory::Main => write!(f, "Main"),
        }
    }
}

/// A dated deposit or interest credit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashEntry {
    pub amount: f64,
    pub date: NaiveDate,
}

/// Running cash state of the portfolio.
///
/// The main balance is debited/credited by every security transaction's
/// cash effect; deposits and interest accumulate as separate dated rows.
/// This ledger is an explicitly passed handle — nothing in the crate looks
/// it up ambiently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashLedger {
    /// Running operating balance
    pub main_balance: f64,

    /// Deposit rows, in insertion order
    pub deposits: Vec<CashEntry>,

    /// Interest rows, in insertion order
    pub interest: Vec<CashEntry>,
}

impl CashLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit (or debit, for a negative amount) the main balance.
    pub fn credit_main(&mut self, amount: f64) {
        self.main_balance += amount;
    }

    pub fn add_deposit(&mut self, amount: f64, date: NaiveDate) {
        self.deposits.push(CashEntry { amount, date });
    }

    pub fn add_interest(&mut self, amount: f64, date: NaiveDate) {
        self.interest.push(CashEntry { amount, date });
    }

    pub fn deposits_total(&self) -> f64 {
        self.deposits.iter().map(|entry| entry.amount).sum()
    }

    pub fn interest_total(&self) -> f64 {
        self.interest.iter().map(|entry| entry.amount).sum()
    }

    /// Total cash across every category.
    pub fn total(&self) -> f64 {
        self.main_balance + self.deposits_total() + self.interest_total()
    }
}
