//! Results of successful machine operations.
//!
//! Each operation has its own outcome type so that only the fields it
//! actually produces exist. `Display` renders the customer-facing message.

use std::fmt;

use crate::Amount;
use crate::machine::ChangePlan;
use crate::model::Drink;

/// Snapshot of payment state and the drinks on offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub cash_input: Amount,
    pub card_amount: Amount,
    pub available_drinks: Vec<Drink>,
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.cash_input.saturating_add(self.card_amount);
        if total.is_zero() {
            write!(f, "Select a drink or insert money.")
        } else {
            write!(f, "Current input: {total}. Select a drink.")
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CashInserted {
    pub amount: Amount,
    pub cash_input: Amount,
}

impl fmt::Display for CashInserted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Inserted {} in cash. Current input: {}.",
            self.amount, self.cash_input
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardAuthorized {
    pub card_amount: Amount,
}

impl fmt::Display for CardAuthorized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card payment of {} ready.", self.card_amount)
    }
}

/// A drink was vended. `change` is owed, not yet dispensed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchased {
    pub drink: Drink,
    pub change: Amount,
    pub cash_input: Amount,
    pub card_amount: Amount,
}

impl fmt::Display for Purchased {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Purchased {}.", self.drink.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CashReturned {
    NothingToReturn,
    Returned(ChangePlan),
}

impl CashReturned {
    pub fn change(&self) -> Amount {
        match self {
            CashReturned::NothingToReturn => Amount::ZERO,
            CashReturned::Returned(plan) => plan.total(),
        }
    }
}

impl fmt::Display for CashReturned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CashReturned::NothingToReturn => write!(f, "No cash to return."),
            CashReturned::Returned(plan) => write!(f, "Returned {} in cash.", plan.total()),
        }
    }
}

/// What happened to the card authorization on cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardRelease {
    NotHeld,
    Cancelled(Amount),
    /// The issuer refused to void the charge; needs a manual refund.
    Failed(Amount),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cancelled {
    pub cash: Option<ChangePlan>,
    pub card: CardRelease,
}

impl Cancelled {
    /// Cash handed back, zero when none was inserted.
    pub fn returned(&self) -> Amount {
        self.cash.as_ref().map(ChangePlan::total).unwrap_or_default()
    }
}

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transaction cancelled.")?;
        if let Some(plan) = &self.cash {
            write!(f, " Returned {} in cash.", plan.total())?;
        }
        match self.card {
            CardRelease::NotHeld => Ok(()),
            CardRelease::Cancelled(amount) => {
                write!(f, " Card payment of {amount} cancelled.")
            }
            CardRelease::Failed(amount) => write!(
                f,
                " Card payment of {amount} could not be cancelled. Please contact an operator."
            ),
        }
    }
}

/// Outcome of [`VendingMachine::apply`](super::VendingMachine::apply).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Status(StatusReport),
    CashInserted(CashInserted),
    CardAuthorized(CardAuthorized),
    Purchased(Purchased),
    CashReturned(CashReturned),
    Cancelled(Cancelled),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Status(o) => fmt::Display::fmt(o, f),
            Outcome::CashInserted(o) => fmt::Display::fmt(o, f),
            Outcome::CardAuthorized(o) => fmt::Display::fmt(o, f),
            Outcome::Purchased(o) => fmt::Display::fmt(o, f),
            Outcome::CashReturned(o) => fmt::Display::fmt(o, f),
            Outcome::Cancelled(o) => fmt::Display::fmt(o, f),
        }
    }
}
