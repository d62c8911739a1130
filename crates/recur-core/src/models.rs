//! Data models for Recur

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A posted transaction as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier (deduplication key)
    pub id: String,
    /// Identifier of the user the transaction belongs to
    pub owner_id: String,
    /// Raw transaction name as printed by the bank
    pub label: String,
    pub amount: Decimal,
    pub posted_at: NaiveDate,
}

/// Normalized merchant identifier used to partition transactions
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(String);

impl GroupKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// All transactions sharing a group key, ordered oldest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionGroup {
    pub key: GroupKey,
    pub members: Vec<Transaction>,
}

impl TransactionGroup {
    pub fn new(key: GroupKey) -> Self {
        Self {
            key,
            members: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Working copy of a transaction carrying the recurrence flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    #[serde(default)]
    pub is_recurring: bool,
}

impl From<&Transaction> for AnnotatedTransaction {
    fn from(tx: &Transaction) -> Self {
        Self {
            transaction: tx.clone(),
            is_recurring: false,
        }
    }
}

/// Predicted next occurrence of a recurring series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrencePrediction {
    /// Exact label of the most recent recurring transaction
    pub label: String,
    pub owner_id: String,
    /// Mean amount of the recurring transactions
    pub next_amount: Decimal,
    pub next_date: NaiveDate,
    /// Recurring transactions of the series, oldest first
    pub member_transactions: Vec<AnnotatedTransaction>,
    pub group_key: GroupKey,
    /// Dominant interval the projection was made with
    pub interval_days: i64,
}
