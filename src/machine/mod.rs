//! Vending machine aggregate.
//!
//! The machine owns its stock ledger, change reserve and payment state and
//! applies one command at a time. It can also consume an async stream of
//! commands, which is how a host serializes concurrent customers onto a
//! single machine.

use tokio_stream::{Stream, StreamExt};
use tracing::{error, info, warn};

use crate::Amount;
use crate::config::{ConfigError, MachineConfig};
use crate::model::{Command, Denomination};

mod card;
pub use card::{CardGateway, SimulatedGateway};

mod error;
pub use error::VendingError;

mod ledger;
pub use ledger::StockLedger;

mod outcome;
pub use outcome::{
    Cancelled, CardAuthorized, CardRelease, CashInserted, CashReturned, Outcome, Purchased,
    StatusReport,
};

mod state;
pub use state::PaymentState;

mod vault;
pub use vault::{ChangePlan, ChangeVault};

/// A single vending machine.
///
/// `G` is the card network the machine talks to.
pub struct VendingMachine<G = SimulatedGateway> {
    /// Inventory restored by [`VendingMachine::reset_to_default`].
    config: MachineConfig,
    ledger: StockLedger,
    vault: ChangeVault,
    payment: PaymentState,
    gateway: G,
}

impl VendingMachine<SimulatedGateway> {
    pub fn new(config: MachineConfig) -> Result<Self, ConfigError> {
        Self::with_gateway(config, SimulatedGateway)
    }
}

/// Public API
impl<G: CardGateway> VendingMachine<G> {
    pub fn with_gateway(config: MachineConfig, gateway: G) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::assemble(config, gateway))
    }

    /// Restore the initial inventory and drop any pending payment.
    pub fn reset_to_default(&mut self) {
        self.ledger = StockLedger::new(self.config.drinks.clone());
        self.vault = ChangeVault::new(self.config.reserve.clone());
        self.payment.reset();
    }

    pub fn ledger(&self) -> &StockLedger {
        &self.ledger
    }

    pub fn vault(&self) -> &ChangeVault {
        &self.vault
    }

    pub fn payment(&self) -> &PaymentState {
        &self.payment
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Run the machine over the given command stream
    pub async fn run(&mut self, mut stream: impl Stream<Item = Command> + Unpin) {
        while let Some(command) = stream.next().await {
            // a rejected command leaves the machine usable, keep going
            let _ = self.apply(command);
        }
    }

    /// Apply a single command on top of the current machine state
    pub fn apply(&mut self, command: Command) -> Result<Outcome, VendingError> {
        let name = command.name();
        let drink = command.drink().map(str::to_owned);
        let amount = command.amount().map(Amount::value);
        let result = match command {
            Command::Status => Ok(Outcome::Status(self.status())),
            Command::InsertCash { amount } => {
                self.insert_cash(amount).map(Outcome::CashInserted)
            }
            Command::AuthorizeCard { card, amount } => self
                .authorize_card(&card, amount)
                .map(Outcome::CardAuthorized),
            Command::Purchase { drink } => self.purchase(&drink).map(Outcome::Purchased),
            Command::ReturnCash => self.return_cash().map(Outcome::CashReturned),
            Command::Cancel => self.cancel().map(Outcome::Cancelled),
        };
        Self::log_result(name, drink.as_deref(), amount, &result);
        result
    }

    pub fn status(&self) -> StatusReport {
        StatusReport {
            cash_input: self.payment.cash_input(),
            card_amount: self.payment.card_amount(),
            available_drinks: self.ledger.list_available().cloned().collect(),
        }
    }

    /// Accept one coin or bill:
    /// - Reject anything outside the valid-cash set
    /// - Credit the cash accumulator
    /// - Put the piece into the change reserve
    pub fn insert_cash(&mut self, amount: Amount) -> Result<CashInserted, VendingError> {
        let denomination =
            Denomination::from_amount(amount).ok_or(VendingError::InvalidMoney(amount))?;

        if self.payment.total_with_cash(amount).is_none() {
            return Err(VendingError::FundsOverflow {
                amount,
                committed: self.payment.total(),
            });
        }

        self.payment.credit_cash(amount);
        self.vault.deposit(denomination);

        Ok(CashInserted {
            amount,
            cash_input: self.payment.cash_input(),
        })
    }

    /// Authorize a card charge. An approval replaces any earlier one.
    ///
    /// Amounts that would overflow together with the inserted cash are
    /// refused before the gateway is asked.
    pub fn authorize_card(
        &mut self,
        card_number: &str,
        amount: Amount,
    ) -> Result<CardAuthorized, VendingError> {
        if self.payment.total_with_card(amount).is_none() {
            return Err(VendingError::FundsOverflow {
                amount,
                committed: self.payment.cash_input(),
            });
        }

        if !self.gateway.authorize(card_number, amount) {
            return Err(VendingError::PaymentFailed(amount));
        }

        self.payment.authorize_card(amount);

        Ok(CardAuthorized {
            card_amount: self.payment.card_amount(),
        })
    }

    /// Vend one drink:
    /// - Ensure the drink exists and is in stock
    /// - Ensure committed funds cover the price (nothing changes otherwise)
    /// - Take one unit out of stock, then settle payment
    ///
    /// The change owed is reported but stays in the cash accumulator until
    /// [`VendingMachine::return_cash`].
    pub fn purchase(&mut self, drink_id: &str) -> Result<Purchased, VendingError> {
        let drink = self
            .ledger
            .find(drink_id)
            .ok_or_else(|| VendingError::InvalidSelection(drink_id.to_string()))?;

        if !drink.in_stock() {
            return Err(VendingError::OutOfStock {
                drink: drink.id.clone(),
                name: drink.name.clone(),
            });
        }

        let total = self.payment.total();
        if total < drink.price {
            return Err(VendingError::InsufficientFunds {
                drink: drink.id.clone(),
                name: drink.name.clone(),
                price: drink.price,
                shortfall: drink.price.saturating_sub(total),
            });
        }

        let drink = self.ledger.decrease_stock(drink_id)?.clone();
        let change = self.payment.settle(drink.price);

        Ok(Purchased {
            drink,
            change,
            cash_input: self.payment.cash_input(),
            card_amount: self.payment.card_amount(),
        })
    }

    /// Give back all unspent cash.
    pub fn return_cash(&mut self) -> Result<CashReturned, VendingError> {
        self.return_cash_amount(self.payment.cash_input())
    }

    /// Count `amount` out of the reserve and close the cash side of the
    /// transaction:
    /// - Reject `amount` above the inserted cash (nothing changes)
    /// - Clear the cash accumulator, including anything above `amount`
    /// - Dispense `amount` greedily from the reserve
    ///
    /// The accumulator is cleared before change is counted out, so a
    /// `NotEnoughChange` failure leaves it at zero: the customer's money is
    /// owed by the operator at that point, not retryable.
    pub fn return_cash_amount(&mut self, amount: Amount) -> Result<CashReturned, VendingError> {
        let cash_input = self.payment.cash_input();
        if amount > cash_input {
            return Err(VendingError::ReturnExceedsInput {
                requested: amount,
                cash_input,
            });
        }

        self.payment.take_cash();
        if amount.is_zero() {
            return Ok(CashReturned::NothingToReturn);
        }
        let plan = self.dispense(amount)?;
        Ok(CashReturned::Returned(plan))
    }

    /// Abort the pending transaction:
    /// - Void the card authorization; a refused void is reported, not raised
    /// - Return inserted cash; a `NotEnoughChange` failure here carries the
    ///   card outcome, since the card has already been voided (or refused)
    /// - Leave both accumulators at zero in every case
    pub fn cancel(&mut self) -> Result<Cancelled, VendingError> {
        let card_amount = self.payment.take_card();
        let cash_amount = self.payment.take_cash();

        let card = if card_amount.is_zero() {
            CardRelease::NotHeld
        } else if self.gateway.cancel(card_amount) {
            CardRelease::Cancelled(card_amount)
        } else {
            warn!(amount = %card_amount, "card cancellation refused, manual refund required");
            CardRelease::Failed(card_amount)
        };

        let cash = if cash_amount.is_zero() {
            None
        } else {
            let plan = self.dispense(cash_amount).map_err(|e| match e {
                VendingError::NotEnoughChange {
                    requested,
                    remaining,
                    ..
                } => VendingError::NotEnoughChange {
                    requested,
                    remaining,
                    card,
                },
                other => other,
            })?;
            Some(plan)
        };

        Ok(Cancelled { cash, card })
    }
}

/// Private API
impl<G: CardGateway> VendingMachine<G> {
    fn assemble(config: MachineConfig, gateway: G) -> Self {
        Self {
            ledger: StockLedger::new(config.drinks.clone()),
            vault: ChangeVault::new(config.reserve.clone()),
            payment: PaymentState::default(),
            config,
            gateway,
        }
    }

    /// Count `amount` out of the reserve, escalating to the operator when
    /// the reserve cannot cover it.
    fn dispense(&mut self, amount: Amount) -> Result<ChangePlan, VendingError> {
        self.vault.dispense(amount).inspect_err(|e| {
            if let VendingError::NotEnoughChange { remaining, .. } = e {
                error!(
                    requested = %amount,
                    remaining = %remaining,
                    reserve = ?self.vault,
                    "change reserve exhausted, operator refill required"
                );
            }
        })
    }

    /// Small helper to log `apply` results
    fn log_result(
        command: &str,
        drink: Option<&str>,
        amount: Option<u64>,
        result: &Result<Outcome, VendingError>,
    ) {
        match result {
            Ok(outcome) => {
                info!(command, drink, amount, outcome = %outcome, "{command} applied");
            }
            Err(e) => {
                info!(command, drink, amount, reason = %e, "{command} rejected");
            }
        }
    }
}

impl Default for VendingMachine<SimulatedGateway> {
    fn default() -> Self {
        Self::assemble(MachineConfig::default(), SimulatedGateway)
    }
}
