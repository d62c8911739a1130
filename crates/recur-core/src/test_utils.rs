//! Shared builders for unit tests

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::Transaction;

/// Parse a `YYYY-MM-DD` date
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Build a transaction owned by `user-1`
pub fn tx(id: &str, label: &str, amount: &str, posted_at: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        owner_id: "user-1".to_string(),
        label: label.to_string(),
        amount: Decimal::from_str(amount).unwrap(),
        posted_at: date(posted_at),
    }
}
