//! Change reserve and greedy change-making.
//!
//! The denomination set {100, 500, 1000, 5000, 10000} is canonical: scanning
//! from the largest unit down either represents the target exactly with the
//! fewest pieces or proves no representation exists within the counts held.

use std::collections::BTreeMap;

use crate::Amount;
use crate::machine::{CardRelease, VendingError};
use crate::model::Denomination;

/// Coins and bills held back for making change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeVault {
    reserve: BTreeMap<Denomination, u32>,
}

/// Pieces selected to pay out an amount, largest denomination first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangePlan {
    pieces: Vec<(Denomination, u32)>,
}

impl ChangePlan {
    pub fn pieces(&self) -> &[(Denomination, u32)] {
        &self.pieces
    }

    pub fn total(&self) -> Amount {
        self.pieces.iter().map(|&(d, units)| d.value() * units).sum()
    }

    pub fn unit_count(&self) -> u32 {
        self.pieces.iter().map(|&(_, units)| units).sum()
    }
}

impl ChangeVault {
    /// Missing denominations start at zero.
    pub fn new(reserve: BTreeMap<Denomination, u32>) -> Self {
        let mut vault = Self {
            reserve: Denomination::ALL.into_iter().map(|d| (d, 0)).collect(),
        };
        vault.reserve.extend(reserve);
        vault
    }

    pub fn count(&self, denomination: Denomination) -> u32 {
        self.reserve.get(&denomination).copied().unwrap_or(0)
    }

    /// Counts for every denomination, ascending.
    pub fn counts(&self) -> impl Iterator<Item = (Denomination, u32)> + '_ {
        self.reserve.iter().map(|(&d, &count)| (d, count))
    }

    /// Put one inserted coin or bill into the reserve.
    pub fn deposit(&mut self, denomination: Denomination) {
        let count = self.reserve.entry(denomination).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Greedy pass over the reserve without touching it.
    ///
    /// Returns the uncovered remainder when the reserve cannot represent
    /// `target` exactly.
    pub fn plan(&self, target: Amount) -> Result<ChangePlan, Amount> {
        let mut remaining = target.value();
        let mut pieces = Vec::new();

        for denomination in Denomination::DESCENDING {
            if remaining == 0 {
                break;
            }
            let unit = denomination.value().value();
            let units = u32::try_from(remaining / unit)
                .unwrap_or(u32::MAX)
                .min(self.count(denomination));
            if units > 0 {
                remaining -= unit * u64::from(units);
                pieces.push((denomination, units));
            }
        }

        if remaining > 0 {
            return Err(Amount::new(remaining));
        }
        Ok(ChangePlan { pieces })
    }

    /// Pay out exactly `target` from the reserve.
    ///
    /// The reserve is only debited once the whole amount is known to be
    /// representable; on failure every count is left as it was.
    pub fn dispense(&mut self, target: Amount) -> Result<ChangePlan, VendingError> {
        let plan = self
            .plan(target)
            .map_err(|remaining| VendingError::NotEnoughChange {
                requested: target,
                remaining,
                card: CardRelease::NotHeld,
            })?;

        for &(denomination, units) in plan.pieces() {
            if let Some(count) = self.reserve.get_mut(&denomination) {
                *count -= units;
            }
        }

        Ok(plan)
    }
}

impl Default for ChangeVault {
    fn default() -> Self {
        Self::new(BTreeMap::new())
    }
}
