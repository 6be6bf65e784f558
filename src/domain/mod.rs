//! Domain layer: catalog data, the order ledger and the ports the application
//! layer talks through. Nothing in here performs I/O.

pub mod catalog;
pub mod money;
pub mod order;
pub mod ports;
