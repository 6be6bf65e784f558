//! Application layer orchestrating an order session.
//!
//! `OrderSession` owns the ledger for one screen session, resolves product
//! names through the loaded catalog, hands finished orders to the checkout
//! gateway and tells observers to re-render after each change.

pub mod command;
pub mod session;
