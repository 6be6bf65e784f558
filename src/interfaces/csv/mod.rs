//! CSV input of user commands and CSV output of the final order.

pub mod command_reader;
pub mod order_writer;
