//! Initial inventory for a machine.

use std::collections::{BTreeMap, HashSet};

use thiserror::Error;

use crate::model::{Denomination, Drink, DrinkId};

/// Rejected initial inventory.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("duplicate drink id '{0}'")]
    DuplicateDrink(DrinkId),
    #[error("drink '{0}' must have a positive price")]
    ZeroPrice(DrinkId),
}

/// Drinks (in display order) and the change reserve a machine starts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineConfig {
    pub drinks: Vec<Drink>,
    pub reserve: BTreeMap<Denomination, u32>,
}

impl MachineConfig {
    pub fn new(drinks: Vec<Drink>, reserve: BTreeMap<Denomination, u32>) -> Self {
        Self { drinks, reserve }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for drink in &self.drinks {
            if !seen.insert(drink.id.as_str()) {
                return Err(ConfigError::DuplicateDrink(drink.id.clone()));
            }
            if drink.price.is_zero() {
                return Err(ConfigError::ZeroPrice(drink.id.clone()));
            }
        }
        Ok(())
    }
}

/// Factory seed: three drinks and a small coin/bill float.
impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            drinks: vec![
                Drink::new("cola", "Cola", 1_100, 5),
                Drink::new("water", "Water", 600, 10),
                Drink::new("coffee", "Coffee", 700, 7),
            ],
            reserve: BTreeMap::from([
                (Denomination::Coin100, 10),
                (Denomination::Coin500, 5),
                (Denomination::Bill1000, 3),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = MachineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.drinks.len(), 3);
        assert_eq!(config.reserve.get(&Denomination::Coin100), Some(&10));
        assert_eq!(config.reserve.get(&Denomination::Bill5000), None);
    }

    #[test]
    fn rejects_duplicate_drink() {
        let config = MachineConfig::new(
            vec![
                Drink::new("cola", "Cola", 1100, 1),
                Drink::new("cola", "Diet Cola", 1200, 1),
            ],
            BTreeMap::new(),
        );
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateDrink("cola".into()))
        );
    }

    #[test]
    fn rejects_free_drink() {
        let config = MachineConfig::new(vec![Drink::new("air", "Air", 0, 1)], BTreeMap::new());
        assert_eq!(config.validate(), Err(ConfigError::ZeroPrice("air".into())));
    }
}
