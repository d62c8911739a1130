//! Recur Core Library
//!
//! Recurring payment detection over a flat list of transactions:
//! - Merchant grouping by label normalization
//! - Dominant interval detection from a pairwise day-gap histogram
//! - Recurring chain marking with time and amount tolerance bands
//! - Next-occurrence forecasting
//! - Layered TOML configuration for the tolerances
//! - JSON and CSV transaction import

pub mod config;
pub mod engine;
pub mod error;
pub mod forecast;
pub mod group;
pub mod import;
pub mod interval;
pub mod marker;
pub mod models;

#[cfg(test)]
mod test_utils;

pub use config::{load_config, ConfigSource, RecurrenceConfig};
pub use engine::{RecurrenceEngine, RunStats};
pub use error::{Error, Result};
pub use import::{load_transactions, ImportOptions, InputFormat};
pub use models::{
    AnnotatedTransaction, GroupKey, RecurrencePrediction, Transaction, TransactionGroup,
};
