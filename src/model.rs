//! Core domain types for the vending machine.

use std::fmt;

use crate::Amount;

/// Drink identifier (e.g. `"cola"`).
pub type DrinkId = String;

/// A drink slot: identity, price and remaining stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drink {
    pub id: DrinkId,
    /// Display label.
    pub name: String,
    pub price: Amount,
    pub stock: u32,
}

impl Drink {
    pub fn new(id: impl Into<DrinkId>, name: impl Into<String>, price: u64, stock: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: Amount::new(price),
            stock,
        }
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// A coin or bill the machine both accepts and dispenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Denomination {
    Coin100,
    Coin500,
    Bill1000,
    Bill5000,
    Bill10000,
}

impl Denomination {
    /// Ascending by value.
    pub const ALL: [Denomination; 5] = [
        Denomination::Coin100,
        Denomination::Coin500,
        Denomination::Bill1000,
        Denomination::Bill5000,
        Denomination::Bill10000,
    ];

    /// Scan order for greedy change-making.
    pub const DESCENDING: [Denomination; 5] = [
        Denomination::Bill10000,
        Denomination::Bill5000,
        Denomination::Bill1000,
        Denomination::Coin500,
        Denomination::Coin100,
    ];

    pub const fn value(self) -> Amount {
        Amount::new(match self {
            Denomination::Coin100 => 100,
            Denomination::Coin500 => 500,
            Denomination::Bill1000 => 1_000,
            Denomination::Bill5000 => 5_000,
            Denomination::Bill10000 => 10_000,
        })
    }

    /// Map an inserted amount onto the valid-cash set.
    pub fn from_amount(amount: Amount) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.value() == amount)
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// A request from whatever hosts the machine (kiosk UI, script, HTTP layer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Report payment state and the drinks currently on offer.
    Status,
    /// Insert a single coin or bill.
    InsertCash { amount: Amount },
    /// Authorize a card payment for an exact amount.
    AuthorizeCard { card: String, amount: Amount },
    /// Buy one unit of a drink with the committed funds.
    Purchase { drink: DrinkId },
    /// Give back all inserted cash that has not been spent.
    ReturnCash,
    /// Abort the pending transaction: return cash, cancel the card payment.
    Cancel,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Status => "status",
            Command::InsertCash { .. } => "insert_cash",
            Command::AuthorizeCard { .. } => "insert_card",
            Command::Purchase { .. } => "purchase",
            Command::ReturnCash => "return_cash",
            Command::Cancel => "cancel",
        }
    }

    /// Drink named by the command, if any.
    pub fn drink(&self) -> Option<&str> {
        match self {
            Command::Purchase { drink } => Some(drink),
            _ => None,
        }
    }

    /// Money carried by the command, if any.
    pub fn amount(&self) -> Option<Amount> {
        match self {
            Command::InsertCash { amount } | Command::AuthorizeCard { amount, .. } => {
                Some(*amount)
            }
            _ => None,
        }
    }
}
