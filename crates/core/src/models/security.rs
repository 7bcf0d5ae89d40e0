use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TrackerError;
use crate::models::cash::CashLedger;

/// Contract multiplier for listed options: one contract controls 100 units.
pub const OPTION_MULTIPLIER: f64 = 100.0;

/// Put or call side of an option contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionDirection {
    Put,
    Call,
}

impl OptionDirection {
    /// Single-letter code used in display labels and cache keys.
    pub fn letter(self) -> char {
        match self {
            OptionDirection::Put => 'p',
            OptionDirection::Call => 'c',
        }
    }

    /// The `side` value expected by the options-chain API.
    pub fn side_name(self) -> &'static str {
        match self {
            OptionDirection::Put => "put",
            OptionDirection::Call => "call",
        }
    }
}

impl std::fmt::Display for OptionDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionDirection::Put => write!(f, "PUT"),
            OptionDirection::Call => write!(f, "CALL"),
        }
    }
}

/// Kind selector used by listings and transaction targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecurityKind {
    Share,
    Option,
}

impl std::fmt::Display for SecurityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecurityKind::Share => write!(f, "Share"),
            SecurityKind::Option => write!(f, "Option"),
        }
    }
}

/// Shared position state of any tracked security.
///
/// The open-quantity sign encodes long/short; the cost basis follows the
/// same sign convention. `current_value` and `realized_pl` are denominated
/// consistently with the security's unit multiplier: `current_value` is a
/// total dollar mark, `realized_pl` is per-unit cash flow that gets scaled
/// by the multiplier when reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Unique identifier
    pub id: Uuid,

    /// Ticker symbol, uppercased — references the registry, never owns it
    pub symbol: String,

    /// Signed count of units currently held; zero means fully closed
    pub open_quantity: f64,

    /// Weighted-average acquisition price per unit of the open position.
    /// Exactly 0 whenever the position is fully closed.
    pub cost_basis: f64,

    /// Total dollar mark from the last live-price pass
    pub current_value: f64,

    /// Cumulative signed cash flow of all trades on this position;
    /// persists across full closes
    pub realized_pl: f64,

    /// When the position last transitioned from flat to open
    #[serde(default)]
    pub when_opened: Option<NaiveDate>,

    /// When the position last transitioned to flat
    #[serde(default)]
    pub when_closed: Option<NaiveDate>,
}

impl Position {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.into().to_uppercase(),
            open_quantity: 0.0,
            cost_basis: 0.0,
            current_value: 0.0,
            realized_pl: 0.0,
            when_opened: None,
            when_closed: None,
        }
    }

    /// Ordinary transaction path.
    ///
    /// Order matters: the basis update must read the pre-trade quantity,
    /// and the realized update uses the raw (unscaled) cash flow.
    ///
    /// Basis rules:
    /// - a trade that closes the position to exactly zero resets the basis;
    /// - a trade that reduces an open position (opposite sign) removes
    ///   units at the existing basis, leaving the per-unit basis unchanged;
    /// - any other trade folds into the weighted average.
    pub(crate) fn apply(
        &mut self,
        price: f64,
        quantity: f64,
        date: NaiveDate,
        multiplier: f64,
        cash: &mut CashLedger,
    ) {
        let new_quantity = self.open_quantity + quantity;
        let reducing = self.open_quantity != 0.0 && quantity * self.open_quantity < 0.0;
        if new_quantity == 0.0 {
            self.cost_basis = 0.0;
        } else if !reducing {
            self.cost_basis = (self.cost_basis * self.open_quantity + price * quantity)
                / new_quantity;
        }
        cash.credit_main(-price * quantity * multiplier);
        self.realized_pl += -price * quantity;
        self.set_open_quantity(new_quantity, date);
    }

    /// Update the open quantity, stamping the open/close dates on the
    /// flat↔open transitions.
    pub(crate) fn set_open_quantity(&mut self, new_quantity: f64, date: NaiveDate) {
        if self.open_quantity == 0.0 && new_quantity != 0.0 {
            self.when_opened = Some(date);
            self.when_closed = None;
        } else if self.open_quantity != 0.0 && new_quantity == 0.0 {
            self.when_closed = Some(date);
        }
        self.open_quantity = new_quantity;
    }
}

/// Common capability set of `Share` and `OptionContract`.
///
/// Shared accounting behavior lives in the provided methods; the two
/// implementations only supply their multiplier, position storage, and
/// display label.
pub trait Security {
    /// Unit scaling factor converting a per-unit price into total dollars.
    fn multiplier(&self) -> f64;

    fn position(&self) -> &Position;

    fn position_mut(&mut self) -> &mut Position;

    /// Display label for listings.
    fn label(&self) -> String;

    /// Apply a buy/sell to this position, debiting/crediting the main cash
    /// balance. Rejects a zero quantity before any mutation.
    fn apply_transaction(
        &mut self,
        price: f64,
        quantity: f64,
        date: NaiveDate,
        cash: &mut CashLedger,
    ) -> Result<(), TrackerError> {
        if quantity == 0.0 {
            return Err(TrackerError::InvalidTransaction(
                "quantity must be non-zero".into(),
            ));
        }
        let multiplier = self.multiplier();
        self.position_mut().apply(price, quantity, date, multiplier, cash);
        Ok(())
    }

    /// Mark the position at a live unit price. Pure assignment; realized
    /// P/L is not touched.
    fn set_current_value(&mut self, live_unit_price: f64) {
        let multiplier = self.multiplier();
        let position = self.position_mut();
        position.current_value = position.open_quantity * live_unit_price * multiplier;
    }

    /// All-time P/L: booked cash flow plus the live mark.
    fn calculate_pl(&self) -> f64 {
        let position = self.position();
        position.realized_pl * self.multiplier() + position.current_value
    }

    /// Unrealized-only gain/loss were the position closed at the live mark
    /// right now, excluding historical realized P/L.
    fn live_gl(&self) -> f64 {
        let position = self.position();
        -position.open_quantity * position.cost_basis * self.multiplier()
            + position.current_value
    }

    fn is_long(&self) -> bool {
        self.position().open_quantity > 0.0
    }

    fn is_short(&self) -> bool {
        self.position().open_quantity < 0.0
    }

    fn is_open(&self) -> bool {
        self.position().open_quantity != 0.0
    }
}

/// An equity share position. Unit multiplier 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Share {
    pub position: Position,
}

impl Share {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            position: Position::new(symbol),
        }
    }
}

impl Security for Share {
    fn multiplier(&self) -> f64 {
        1.0
    }

    fn position(&self) -> &Position {
        &self.position
    }

    fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }

    fn label(&self) -> String {
        self.position.symbol.clone()
    }
}

/// A listed option contract position. 100-unit contract multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    pub position: Position,

    /// Expiry date of the contract
    pub expiration_date: NaiveDate,

    pub strike_price: f64,

    pub direction: OptionDirection,
}

impl OptionContract {
    pub fn new(
        symbol: impl Into<String>,
        expiration_date: NaiveDate,
        strike_price: f64,
        direction: OptionDirection,
    ) -> Self {
        Self {
            position: Position::new(symbol),
            expiration_date,
            strike_price,
            direction,
        }
    }

    pub fn expires_today(&self) -> bool {
        self.expiration_date == Utc::now().date_naive()
    }

    /// Cache key identifying this exact contract.
    pub fn contract_key(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.position.symbol,
            self.expiration_date,
            self.direction.letter(),
            self.strike_price,
        )
    }
}

impl Security for OptionContract {
    fn multiplier(&self) -> f64 {
        OPTION_MULTIPLIER
    }

    fn position(&self) -> &Position {
        &self.position
    }

    fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }

    fn label(&self) -> String {
        format!(
            "{} {}{} {}",
            self.position.symbol,
            self.strike_price,
            self.direction.letter(),
            self.expiration_date,
        )
    }
}
