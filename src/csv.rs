use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::machine::CardGateway;
use crate::{Amount, Command, VendingMachine};

/// Errors that can occur when reading command scripts or writing reports
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to open command script: {0}")]
    Open(#[source] csv::Error),

    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized command '{command}'")]
    UnrecognizedCommand { line: usize, command: String },

    #[error("line {line}: {command} missing {field}")]
    MissingField {
        line: usize,
        command: String,
        field: &'static str,
    },

    #[error("failed to write report: {0}")]
    Write(#[from] csv::Error),
}

#[derive(Debug, Deserialize)]
struct InputRow {
    command: String,
    drink: Option<String>,
    amount: Option<u64>,
    card: Option<String>,
}

#[derive(Debug, Serialize)]
struct ReportRow {
    section: &'static str,
    key: String,
    value: u64,
}

impl InputRow {
    fn require<T>(
        value: Option<T>,
        line: usize,
        command: &str,
        field: &'static str,
    ) -> Result<T, CsvError> {
        value.ok_or_else(|| CsvError::MissingField {
            line,
            command: command.to_string(),
            field,
        })
    }

    fn into_command(self, line: usize) -> Result<Command, CsvError> {
        let name = self.command.as_str();
        match name {
            "status" => Ok(Command::Status),
            "insert_cash" => {
                let amount = Self::require(self.amount, line, name, "amount")?;
                Ok(Command::InsertCash {
                    amount: Amount::new(amount),
                })
            }
            "insert_card" => {
                let card = Self::require(self.card, line, name, "card")?;
                let amount = Self::require(self.amount, line, name, "amount")?;
                Ok(Command::AuthorizeCard {
                    card,
                    amount: Amount::new(amount),
                })
            }
            "purchase" => {
                let drink = Self::require(self.drink, line, name, "drink")?;
                Ok(Command::Purchase { drink })
            }
            "return_cash" => Ok(Command::ReturnCash),
            "cancel" => Ok(Command::Cancel),
            other => Err(CsvError::UnrecognizedCommand {
                line,
                command: other.to_string(),
            }),
        }
    }
}

/// Read commands from a csv script with columns `command,drink,amount,card`
pub fn read_commands(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<Command, CsvError>>, CsvError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(CsvError::Open)?;

    Ok(reader
        .into_deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            row.into_command(line)
        }))
}

/// Write payment state, stock and change reserve as `section,key,value` rows
pub fn write_report<G: CardGateway>(
    machine: &VendingMachine<G>,
    writer: impl io::Write,
) -> Result<(), CsvError> {
    let mut writer = csv::Writer::from_writer(writer);

    let payment = machine.payment();
    let rows = [
        ("cash_input", payment.cash_input()),
        ("card_amount", payment.card_amount()),
    ]
    .into_iter()
    .map(|(key, amount)| ReportRow {
        section: "payment",
        key: key.to_string(),
        value: amount.value(),
    })
    .chain(machine.ledger().drinks().iter().map(|drink| ReportRow {
        section: "stock",
        key: drink.id.clone(),
        value: u64::from(drink.stock),
    }))
    .chain(machine.vault().counts().map(|(denomination, count)| ReportRow {
        section: "reserve",
        key: denomination.to_string(),
        value: u64::from(count),
    }));

    for row in rows {
        writer.serialize(&row)?;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
