//! Adapters for the domain ports.

pub mod in_memory;
pub mod json_catalog;
pub mod mock_checkout;
pub mod summary_log;
