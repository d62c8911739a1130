//! Merchant grouping
//!
//! Bank labels often carry a store or terminal number after the merchant
//! name ("WALMART 4521", "SHELL 9981"). Stripping a trailing token that
//! contains a digit puts all of a merchant's charges into one series.

use std::collections::BTreeMap;

use crate::models::{GroupKey, Transaction, TransactionGroup};

/// Derive the group key for a transaction label
///
/// The key is the label without its last whitespace-delimited token when
/// that token contains an ASCII digit, otherwise the label verbatim.
/// Empty, single-character, and single-token labels are used as-is.
pub fn group_key(label: &str) -> GroupKey {
    if label.chars().count() <= 1 {
        return GroupKey::new(label);
    }

    match label.rfind(char::is_whitespace) {
        Some(idx) => {
            let trailing = &label[idx..];
            let head = label[..idx].trim_end();
            if !head.is_empty() && trailing.chars().any(|c| c.is_ascii_digit()) {
                GroupKey::new(head)
            } else {
                GroupKey::new(label)
            }
        }
        None => GroupKey::new(label),
    }
}

/// Partition transactions into per-merchant groups
///
/// Members are ordered by `(posted_at, label)`. The sort is stable, so
/// input the caller already sorted keeps its insertion order on ties.
pub fn group(transactions: &[Transaction]) -> BTreeMap<GroupKey, TransactionGroup> {
    let mut groups: BTreeMap<GroupKey, TransactionGroup> = BTreeMap::new();

    for tx in transactions {
        let key = group_key(&tx.label);
        groups
            .entry(key.clone())
            .or_insert_with(|| TransactionGroup::new(key))
            .members
            .push(tx.clone());
    }

    for group in groups.values_mut() {
        group
            .members
            .sort_by(|a, b| (a.posted_at, &a.label).cmp(&(b.posted_at, &b.label)));
    }

    groups
}
