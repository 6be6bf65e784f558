use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Index {index} out of range for order with {len} items")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Invalid quantity {0}: must be a positive count")]
    InvalidQuantity(i64),
    #[error("Order total would overflow")]
    TotalOverflow,
    #[error("Order is empty")]
    EmptyOrder,
    #[error("Unknown product: {0}")]
    UnknownProduct(String),
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
    #[error("Catalog file not found: {}", .0.display())]
    CatalogNotFound(PathBuf),
    #[error("Catalog parsing failed: {0}")]
    CatalogParse(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
