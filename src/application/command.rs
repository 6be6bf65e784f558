use crate::error::{LedgerError, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum CommandAction {
    Add,
    Remove,
    Update,
    Increment,
    Decrement,
    Reset,
    Checkout,
}

/// A flat user action as it arrives from an input source.
///
/// Which of the optional fields are required depends on the action.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone)]
pub struct CommandRecord {
    pub action: CommandAction,
    pub product: Option<String>,
    pub index: Option<usize>,
    pub quantity: Option<i64>,
}

/// A validated user action against the current order.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum OrderCommand {
    Add { product: String },
    Remove { index: usize },
    Update { index: usize, quantity: i64 },
    Increment { index: usize },
    Decrement { index: usize },
    Reset,
    Checkout,
}

impl TryFrom<CommandRecord> for OrderCommand {
    type Error = LedgerError;

    fn try_from(record: CommandRecord) -> Result<Self> {
        let index = || {
            record
                .index
                .ok_or_else(|| missing(record.action, "index"))
        };

        let command = match record.action {
            CommandAction::Add => OrderCommand::Add {
                product: record
                    .product
                    .clone()
                    .filter(|p| !p.is_empty())
                    .ok_or_else(|| missing(record.action, "product"))?,
            },
            CommandAction::Remove => OrderCommand::Remove { index: index()? },
            CommandAction::Update => OrderCommand::Update {
                index: index()?,
                quantity: record
                    .quantity
                    .ok_or_else(|| missing(record.action, "quantity"))?,
            },
            CommandAction::Increment => OrderCommand::Increment { index: index()? },
            CommandAction::Decrement => OrderCommand::Decrement { index: index()? },
            CommandAction::Reset => OrderCommand::Reset,
            CommandAction::Checkout => OrderCommand::Checkout,
        };
        Ok(command)
    }
}

fn missing(action: CommandAction, field: &str) -> LedgerError {
    LedgerError::InvalidCommand(format!("{:?} requires a {}", action, field).to_lowercase())
}
