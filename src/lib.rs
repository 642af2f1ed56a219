pub mod amount;
pub mod config;
pub mod csv;
pub mod machine;
pub mod model;

pub use amount::Amount;
pub use config::{ConfigError, MachineConfig};
pub use machine::{Outcome, VendingError, VendingMachine};
pub use model::{Command, Denomination, Drink, DrinkId};
