//! Error types for machine operations.

use thiserror::Error;

use crate::Amount;
use crate::machine::CardRelease;
use crate::model::DrinkId;

/// Error returned by [`VendingMachine`](super::VendingMachine) operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VendingError {
    #[error("invalid money: {0} is not an accepted coin or bill")]
    InvalidMoney(Amount),

    #[error("insufficient funds for {name}: price {price}, {shortfall} short")]
    InsufficientFunds {
        drink: DrinkId,
        name: String,
        price: Amount,
        shortfall: Amount,
    },

    #[error("{name} is out of stock")]
    OutOfStock { drink: DrinkId, name: String },

    #[error("unknown drink '{0}'")]
    InvalidSelection(DrinkId),

    #[error("card payment of {0} was declined")]
    PaymentFailed(Amount),

    /// `card` records what happened to the card authorization when the
    /// failure came from a cancel; `NotHeld` for a plain cash return.
    #[error("not enough change to return {requested}: {remaining} could not be dispensed")]
    NotEnoughChange {
        requested: Amount,
        remaining: Amount,
        card: CardRelease,
    },

    #[error("{amount} would overflow the {committed} already committed")]
    FundsOverflow { amount: Amount, committed: Amount },

    #[error("cannot return {requested}: only {cash_input} in cash was inserted")]
    ReturnExceedsInput { requested: Amount, cash_input: Amount },
}

impl VendingError {
    /// Whether an operator has to intervene (refill the change reserve)
    /// rather than the customer retrying.
    pub fn is_operator_escalation(&self) -> bool {
        matches!(self, VendingError::NotEnoughChange { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_not_enough_change_escalates() {
        let escalating = VendingError::NotEnoughChange {
            requested: Amount::new(400),
            remaining: Amount::new(400),
            card: CardRelease::NotHeld,
        };
        assert!(escalating.is_operator_escalation());
        assert!(!VendingError::InvalidMoney(Amount::new(50)).is_operator_escalation());
        assert!(!VendingError::PaymentFailed(Amount::new(1100)).is_operator_escalation());
        assert!(
            !VendingError::FundsOverflow {
                amount: Amount::new(100),
                committed: Amount::new(u64::MAX),
            }
            .is_operator_escalation()
        );
    }

    #[test]
    fn insufficient_funds_message_names_shortfall() {
        let err = VendingError::InsufficientFunds {
            drink: "cola".into(),
            name: "Cola".into(),
            price: Amount::new(1100),
            shortfall: Amount::new(100),
        };
        assert_eq!(
            err.to_string(),
            "insufficient funds for Cola: price 1100, 100 short"
        );
    }
}
