use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::cash::CashCategory;
use crate::models::security::OptionDirection;
use crate::models::ticker::InstrumentClass;

/// Polymorphic reference to the entity a transaction settled against.
///
/// A tagged union resolved through an explicit ledger lookup — there is no
/// reflection-style generic foreign key anywhere in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SecurityRef {
    Share(Uuid),
    Option(Uuid),
    Cash(CashCategory),
}

/// Immutable record of one buy/sell/deposit/interest event.
///
/// Created once by the transaction recorder, never mutated or deleted.
/// Each creation drives exactly one ledger state transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: Uuid,

    /// Settlement date (daily granularity)
    pub date: NaiveDate,

    /// Per-unit trade price (for cash rows, the credited amount)
    pub unit_price: f64,

    /// Signed quantity; positive buys, negative sells
    pub quantity: f64,

    /// `unit_price × quantity`, unscaled by any contract multiplier
    pub total_value: f64,

    /// The security or cash row this transaction settled against
    pub target: SecurityRef,
}

impl Transaction {
    pub fn new(date: NaiveDate, unit_price: f64, quantity: f64, target: SecurityRef) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            unit_price,
            quantity,
            total_value: unit_price * quantity,
            target,
        }
    }
}

/// Target of a share request: an existing position or a new one.
///
/// A `New` target with a symbol that already has a position reuses the
/// existing row — positions are never duplicated per symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShareTarget {
    Existing(Uuid),
    New {
        symbol: String,
        name: String,
        class: InstrumentClass,
    },
}

/// Target of an option request: an existing contract or a new one.
/// Contract identity is `(symbol, expiration, strike, direction)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OptionTarget {
    Existing(Uuid),
    New {
        symbol: String,
        name: String,
        class: InstrumentClass,
        expiration_date: NaiveDate,
        strike_price: f64,
        direction: OptionDirection,
    },
}

/// A transaction submission, before it has been applied to the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransactionRequest {
    Share {
        target: ShareTarget,
        quantity: f64,
        price: f64,
        date: NaiveDate,
    },
    Option {
        target: OptionTarget,
        quantity: f64,
        price: f64,
        date: NaiveDate,
    },
    Cash {
        category: CashCategory,
        amount: f64,
        date: NaiveDate,
    },
}

impl TransactionRequest {
    /// Trade on an existing share position.
    pub fn share_existing(id: Uuid, quantity: f64, price: f64, date: NaiveDate) -> Self {
        TransactionRequest::Share {
            target: ShareTarget::Existing(id),
            quantity,
            price,
            date,
        }
    }

    /// Trade on a share position, creating it (and its ticker) if needed.
    pub fn share_new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        class: InstrumentClass,
        quantity: f64,
        price: f64,
        date: NaiveDate,
    ) -> Self {
        TransactionRequest::Share {
            target: ShareTarget::New {
                symbol: symbol.into(),
                name: name.into(),
                class,
            },
            quantity,
            price,
            date,
        }
    }

    /// Trade on an existing option contract.
    pub fn option_existing(id: Uuid, quantity: f64, price: f64, date: NaiveDate) -> Self {
        TransactionRequest::Option {
            target: OptionTarget::Existing(id),
            quantity,
            price,
            date,
        }
    }

    /// Trade on an option contract, creating it (and its ticker) if needed.
    #[allow(clippy::too_many_arguments)]
    pub fn option_new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        class: InstrumentClass,
        expiration_date: NaiveDate,
        strike_price: f64,
        direction: OptionDirection,
        quantity: f64,
        price: f64,
        date: NaiveDate,
    ) -> Self {
        TransactionRequest::Option {
            target: OptionTarget::New {
                symbol: symbol.into(),
                name: name.into(),
                class,
                expiration_date,
                strike_price,
                direction,
            },
            quantity,
            price,
            date,
        }
    }

    pub fn deposit(amount: f64, date: NaiveDate) -> Self {
        TransactionRequest::Cash {
            category: CashCategory::Deposit,
            amount,
            date,
        }
    }

    pub fn interest(amount: f64, date: NaiveDate) -> Self {
        TransactionRequest::Cash {
            category: CashCategory::Interest,
            amount,
            date,
        }
    }
}
