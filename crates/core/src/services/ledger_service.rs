use chrono::NaiveDate;
use log::debug;
use uuid::Uuid;

use crate::errors::TrackerError;
use crate::models::cash::CashCategory;
use crate::models::ledger::Ledger;
use crate::models::security::{OptionContract, OptionDirection, Security, SecurityKind, Share};
use crate::models::transaction::{
    OptionTarget, SecurityRef, ShareTarget, Transaction, TransactionRequest,
};

/// An open security with its display label, as returned by listings.
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityListing {
    pub id: Uuid,
    pub label: String,
}

/// Applies transaction submissions to the ledger.
///
/// Pure in-memory business logic — no I/O. Atomicity comes from the
/// stage-and-commit wrapper: a request is applied to a copy of the ledger
/// and committed by replacement only on success, so a failure partway
/// (e.g., a security lookup) leaves no partial mutation behind.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Record a transaction as one all-or-nothing unit.
    /// Returns the id of the appended transaction row.
    pub fn record_transaction(
        &self,
        ledger: &mut Ledger,
        request: TransactionRequest,
    ) -> Result<Uuid, TrackerError> {
        let mut staged = ledger.clone();
        let id = self.apply_request(&mut staged, request)?;
        *ledger = staged;
        Ok(id)
    }

    fn apply_request(
        &self,
        ledger: &mut Ledger,
        request: TransactionRequest,
    ) -> Result<Uuid, TrackerError> {
        match request {
            TransactionRequest::Share {
                target,
                quantity,
                price,
                date,
            } => {
                let idx = self.resolve_share(ledger, target)?;
                let share = &mut ledger.shares[idx];
                share.apply_transaction(price, quantity, date, &mut ledger.cash)?;
                let transaction =
                    Transaction::new(date, price, quantity, SecurityRef::Share(share.position.id));
                let id = transaction.id;
                debug!(
                    "recorded share transaction: {} {} @ {}",
                    share.position.symbol, quantity, price
                );
                ledger.transactions.push(transaction);
                Ok(id)
            }
            TransactionRequest::Option {
                target,
                quantity,
                price,
                date,
            } => {
                let idx = self.resolve_option(ledger, target)?;
                let covered_call_close = {
                    let option = &ledger.options[idx];
                    option.is_short()
                        && quantity > 0.0
                        && option.direction == OptionDirection::Call
                };
                if covered_call_close {
                    self.close_covered_call(ledger, idx, price, quantity, date)?;
                } else {
                    let option = &mut ledger.options[idx];
                    option.apply_transaction(price, quantity, date, &mut ledger.cash)?;
                }
                let option_id = ledger.options[idx].position.id;
                let transaction =
                    Transaction::new(date, price, quantity, SecurityRef::Option(option_id));
                let id = transaction.id;
                debug!(
                    "recorded option transaction: {} {} @ {}",
                    ledger.options[idx].label(),
                    quantity,
                    price
                );
                ledger.transactions.push(transaction);
                Ok(id)
            }
            TransactionRequest::Cash {
                category,
                amount,
                date,
            } => {
                if amount == 0.0 {
                    return Err(TrackerError::InvalidTransaction(
                        "cash amount must be non-zero".into(),
                    ));
                }
                match category {
                    CashCategory::Deposit => ledger.cash.add_deposit(amount, date),
                    CashCategory::Interest => ledger.cash.add_interest(amount, date),
                    CashCategory::Main => {
                        return Err(TrackerError::InvalidTransaction(
                            "the main balance cannot be credited directly".into(),
                        ));
                    }
                }
                let transaction =
                    Transaction::new(date, amount, 1.0, SecurityRef::Cash(category));
                let id = transaction.id;
                ledger.transactions.push(transaction);
                Ok(id)
            }
        }
    }

    /// Resolve a share target to an index into `ledger.shares`, creating
    /// the position (and its ticker) for an unknown symbol.
    fn resolve_share(
        &self,
        ledger: &mut Ledger,
        target: ShareTarget,
    ) -> Result<usize, TrackerError> {
        match target {
            ShareTarget::Existing(id) => ledger
                .shares
                .iter()
                .position(|share| share.position.id == id)
                .ok_or_else(|| TrackerError::not_found("share", id)),
            ShareTarget::New {
                symbol,
                name,
                class,
            } => {
                ledger.tickers.ensure(&symbol, &name, class);
                let upper = symbol.to_uppercase();
                if let Some(idx) = ledger
                    .shares
                    .iter()
                    .position(|share| share.position.symbol == upper)
                {
                    return Ok(idx);
                }
                ledger.shares.push(Share::new(upper));
                Ok(ledger.shares.len() - 1)
            }
        }
    }

    /// Resolve an option target to an index into `ledger.options`, creating
    /// the contract (and its ticker) when no row matches the contract
    /// identity `(symbol, expiration, strike, direction)`.
    fn resolve_option(
        &self,
        ledger: &mut Ledger,
        target: OptionTarget,
    ) -> Result<usize, TrackerError> {
        match target {
            OptionTarget::Existing(id) => ledger
                .options
                .iter()
                .position(|option| option.position.id == id)
                .ok_or_else(|| TrackerError::not_found("option", id)),
            OptionTarget::New {
                symbol,
                name,
                class,
                expiration_date,
                strike_price,
                direction,
            } => {
                ledger.tickers.ensure(&symbol, &name, class);
                let upper = symbol.to_uppercase();
                if let Some(idx) = ledger.options.iter().position(|option| {
                    option.position.symbol == upper
                        && option.expiration_date == expiration_date
                        && option.strike_price == strike_price
                        && option.direction == direction
                }) {
                    return Ok(idx);
                }
                ledger.options.push(OptionContract::new(
                    upper,
                    expiration_date,
                    strike_price,
                    direction,
                ));
                Ok(ledger.options.len() - 1)
            }
        }
    }

    /// Covered-call closure: buying back a short call books the trade
    /// profit on the option and folds it into the underlying share basis,
    /// instead of scoring it as independent option income.
    ///
    /// The option's own cost basis is not touched. Requires an open share
    /// position under the same symbol — closing a covered call against a
    /// flat or missing underlying is rejected before any mutation.
    fn close_covered_call(
        &self,
        ledger: &mut Ledger,
        option_idx: usize,
        price: f64,
        quantity: f64,
        date: NaiveDate,
    ) -> Result<(), TrackerError> {
        let symbol = ledger.options[option_idx].position.symbol.clone();
        let share_idx = ledger
            .shares
            .iter()
            .position(|share| share.position.symbol == symbol && share.is_open())
            .ok_or_else(|| {
                TrackerError::InvalidTransaction(format!(
                    "cannot close a covered call on {symbol} without an open share position"
                ))
            })?;
        let share_quantity = ledger.shares[share_idx].position.open_quantity;

        let option = &mut ledger.options[option_idx];
        let multiplier = option.multiplier();
        let trade_profit = (option.position.cost_basis - price) * quantity * multiplier;

        ledger.cash.credit_main(-price * quantity * multiplier);
        option.position.realized_pl += trade_profit / multiplier;
        let new_quantity = option.position.open_quantity + quantity;
        option.position.set_open_quantity(new_quantity, date);

        ledger.shares[share_idx].position.cost_basis -= trade_profit / share_quantity;

        debug!(
            "covered-call close on {symbol}: profit {trade_profit}, share basis now {}",
            ledger.shares[share_idx].position.cost_basis
        );
        Ok(())
    }

    /// Open securities of the requested kind, with display labels.
    /// Options come back ordered by expiration date.
    pub fn open_securities(&self, ledger: &Ledger, kind: SecurityKind) -> Vec<SecurityListing> {
        match kind {
            SecurityKind::Share => ledger
                .shares
                .iter()
                .filter(|share| share.is_open())
                .map(|share| SecurityListing {
                    id: share.position.id,
                    label: share.label(),
                })
                .collect(),
            SecurityKind::Option => {
                let mut open: Vec<&OptionContract> =
                    ledger.options.iter().filter(|option| option.is_open()).collect();
                open.sort_by_key(|option| option.expiration_date);
                open.iter()
                    .map(|option| SecurityListing {
                        id: option.position.id,
                        label: option.label(),
                    })
                    .collect()
            }
        }
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
