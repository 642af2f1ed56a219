use crate::machine::VendingError;
use crate::model::Drink;

/// Drinks on offer, in display order, with their remaining stock.
#[derive(Debug, Clone, Default)]
pub struct StockLedger {
    drinks: Vec<Drink>,
}

impl StockLedger {
    pub fn new(drinks: Vec<Drink>) -> Self {
        Self { drinks }
    }

    /// Every drink, sold out or not.
    pub fn drinks(&self) -> &[Drink] {
        &self.drinks
    }

    /// Drinks with stock left, in insertion order.
    pub fn list_available(&self) -> impl Iterator<Item = &Drink> + '_ {
        self.drinks.iter().filter(|drink| drink.in_stock())
    }

    pub fn find(&self, drink_id: &str) -> Option<&Drink> {
        self.drinks.iter().find(|drink| drink.id == drink_id)
    }

    /// Take one unit out of stock.
    ///
    /// Callers check availability first; hitting an unknown or sold-out slot
    /// here is a bug and is reported without touching stock.
    pub fn decrease_stock(&mut self, drink_id: &str) -> Result<&Drink, VendingError> {
        let drink = self
            .drinks
            .iter_mut()
            .find(|drink| drink.id == drink_id)
            .ok_or_else(|| VendingError::InvalidSelection(drink_id.to_string()))?;

        drink.stock = drink
            .stock
            .checked_sub(1)
            .ok_or_else(|| VendingError::OutOfStock {
                drink: drink.id.clone(),
                name: drink.name.clone(),
            })?;

        Ok(&*drink)
    }
}
