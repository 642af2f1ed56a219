//! Card payment capability the machine calls out to.

use tracing::info;

use crate::Amount;

/// Card network seam. Both calls are synchronous yes/no answers.
pub trait CardGateway {
    /// Ask the issuer to approve a charge of `amount`.
    fn authorize(&mut self, card_number: &str, amount: Amount) -> bool;

    /// Void a previously approved charge of `amount`.
    fn cancel(&mut self, amount: Amount) -> bool;
}

/// Stand-in gateway that approves everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedGateway;

impl CardGateway for SimulatedGateway {
    fn authorize(&mut self, card_number: &str, amount: Amount) -> bool {
        info!(card = %masked(card_number), amount = %amount, "authorizing card payment");
        true
    }

    fn cancel(&mut self, amount: Amount) -> bool {
        info!(amount = %amount, "cancelling card payment");
        true
    }
}

/// Keep only the last four digits for logs.
fn masked(card_number: &str) -> String {
    let digits: Vec<char> = card_number.chars().filter(char::is_ascii_digit).collect();
    let tail: String = digits[digits.len().saturating_sub(4)..].iter().collect();
    format!("****{tail}")
}
