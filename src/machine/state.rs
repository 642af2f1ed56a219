use crate::Amount;

/// Money committed to the pending transaction.
///
/// Idle when both accumulators are zero, funded otherwise.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PaymentState {
    cash_input: Amount,
    card_amount: Amount,
}

impl PaymentState {
    pub fn cash_input(&self) -> Amount {
        self.cash_input
    }

    pub fn card_amount(&self) -> Amount {
        self.card_amount
    }

    /// Saturating; funding that would overflow is refused before it lands.
    pub fn total(&self) -> Amount {
        self.cash_input.saturating_add(self.card_amount)
    }

    /// Total after crediting `amount` in cash, `None` on overflow.
    pub fn total_with_cash(&self, amount: Amount) -> Option<Amount> {
        self.cash_input
            .checked_add(amount)?
            .checked_add(self.card_amount)
    }

    /// Total after replacing the card authorization, `None` on overflow.
    pub fn total_with_card(&self, amount: Amount) -> Option<Amount> {
        self.cash_input.checked_add(amount)
    }

    pub fn is_idle(&self) -> bool {
        self.total().is_zero()
    }

    pub fn credit_cash(&mut self, amount: Amount) {
        self.cash_input += amount;
    }

    /// Replaces any outstanding authorization; card amounts never stack.
    pub fn authorize_card(&mut self, amount: Amount) {
        self.card_amount = amount;
    }

    /// Clear the cash accumulator, returning what it held.
    pub fn take_cash(&mut self) -> Amount {
        std::mem::take(&mut self.cash_input)
    }

    /// Clear the card slot, returning the authorized amount.
    pub fn take_card(&mut self) -> Amount {
        std::mem::take(&mut self.card_amount)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Pay `price` out of the committed funds and return the change owed
    /// (`total - price`). Caller guarantees `total() >= price`.
    ///
    /// Cash pays when it covers the price on its own, leaving the card slot
    /// untouched. Otherwise the card authorization is consumed whole and any
    /// remainder of the price comes out of cash.
    pub fn settle(&mut self, price: Amount) -> Amount {
        let total = self.total();
        match self.cash_input.checked_sub(price) {
            Some(rest) if !self.cash_input.is_zero() => self.cash_input = rest,
            _ => {
                let uncovered = price.saturating_sub(self.take_card());
                self.cash_input = self.cash_input.saturating_sub(uncovered);
            }
        }
        total.saturating_sub(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn funded(cash: u64, card: u64) -> PaymentState {
        PaymentState {
            cash_input: Amount::new(cash),
            card_amount: Amount::new(card),
        }
    }

    #[test]
    fn payment_state_default_is_idle() {
        let state = PaymentState::default();
        assert!(state.is_idle());
        assert_eq!(state.total(), Amount::ZERO);
    }

    #[test]
    fn cash_accumulates_and_card_replaces() {
        let mut state = PaymentState::default();
        state.credit_cash(Amount::new(1000));
        state.credit_cash(Amount::new(500));
        state.authorize_card(Amount::new(700));
        state.authorize_card(Amount::new(1100));

        assert_eq!(state.cash_input(), Amount::new(1500));
        assert_eq!(state.card_amount(), Amount::new(1100));
        assert_eq!(state.total(), Amount::new(2600));
        assert!(!state.is_idle());
    }

    #[test]
    fn total_saturates_and_overflow_is_detected() {
        let state = funded(100, u64::MAX);
        assert_eq!(state.total(), Amount::new(u64::MAX));
        assert_eq!(state.total_with_cash(Amount::new(100)), None);
        assert_eq!(state.total_with_card(Amount::new(1100)), Some(Amount::new(1200)));
        assert_eq!(funded(500, 0).total_with_card(Amount::new(u64::MAX)), None);
        assert_eq!(
            funded(500, 700).total_with_cash(Amount::new(1000)),
            Some(Amount::new(2200))
        );
    }

    #[test]
    fn settle_with_cash_debits_price() {
        let mut state = funded(1500, 0);
        assert_eq!(state.settle(Amount::new(1100)), Amount::new(400));
        assert_eq!(state, funded(400, 0));
    }

    #[test]
    fn settle_with_cash_leaves_card_untouched() {
        let mut state = funded(2000, 700);
        assert_eq!(state.settle(Amount::new(1100)), Amount::new(1600));
        assert_eq!(state, funded(900, 700));
    }

    #[test]
    fn settle_with_card_consumes_whole_authorization() {
        let mut state = funded(0, 1500);
        // overage is reported but the card slot is cleared regardless
        assert_eq!(state.settle(Amount::new(1100)), Amount::new(400));
        assert_eq!(state, funded(0, 0));
    }

    #[test]
    fn settle_combined_uses_card_then_cash() {
        let mut state = funded(500, 700);
        assert_eq!(state.settle(Amount::new(1100)), Amount::new(100));
        assert_eq!(state, funded(100, 0));
    }

    #[test]
    fn take_clears_accumulators() {
        let mut state = funded(300, 600);
        assert_eq!(state.take_cash(), Amount::new(300));
        assert_eq!(state.take_card(), Amount::new(600));
        assert!(state.is_idle());

        let mut state = funded(300, 600);
        state.reset();
        assert!(state.is_idle());
    }
}
