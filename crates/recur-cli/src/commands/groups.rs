//! Groups command implementation

use anyhow::Result;
use recur_core::group::group;
use recur_core::interval::dominant_interval;
use recur_core::models::Transaction;
use recur_core::RecurrenceConfig;

use super::{load_input, truncate};
use crate::cli::InputArgs;

/// One row of the groups listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    pub key: String,
    pub members: usize,
    pub interval_days: Option<i64>,
}

pub fn cmd_groups(input: &InputArgs, config: RecurrenceConfig) -> Result<()> {
    let transactions = load_input(input)?;
    let summaries = summarize_groups(&transactions, &config);

    if summaries.is_empty() {
        println!("No transactions found in {}", input.file.display());
        return Ok(());
    }

    println!();
    println!("🏷️  Merchant Groups");
    println!("   ─────────────────────────────────────────────────────────────");

    for summary in &summaries {
        let interval = summary
            .interval_days
            .map(|days| format!("{}d", days))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "   {:32} │ {:>4} charges │ interval {:>5}",
            truncate(&summary.key, 32),
            summary.members,
            interval
        );
    }

    Ok(())
}

/// Group transactions and compute each group's dominant interval, in key order
pub fn summarize_groups(
    transactions: &[Transaction],
    config: &RecurrenceConfig,
) -> Vec<GroupSummary> {
    group(transactions)
        .into_values()
        .map(|group| GroupSummary {
            key: group.key.to_string(),
            members: group.len(),
            interval_days: dominant_interval(&group, config),
        })
        .collect()
}
