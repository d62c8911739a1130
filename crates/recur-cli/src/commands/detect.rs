//! Detect command implementation

use anyhow::Result;
use recur_core::{RecurrenceConfig, RecurrenceEngine, RecurrencePrediction, RunStats, Transaction};
#[cfg(not(feature = "parallel"))]
use tracing::warn;

use super::{load_input, truncate};
use crate::cli::InputArgs;

pub fn cmd_detect(
    input: &InputArgs,
    config: RecurrenceConfig,
    output: &str,
    parallel: bool,
) -> Result<()> {
    let transactions = load_input(input)?;
    let engine = RecurrenceEngine::new(config);
    let (predictions, stats) = run_engine(&engine, &transactions, parallel);

    match output {
        "json" => println!("{}", render_json(&predictions)?),
        "table" => print_table(&predictions, &stats, engine.config()),
        other => anyhow::bail!("Unknown output format: {} (use table or json)", other),
    }

    Ok(())
}

/// Run detection, sequentially or with one task per group
pub fn run_engine(
    engine: &RecurrenceEngine,
    transactions: &[Transaction],
    parallel: bool,
) -> (Vec<RecurrencePrediction>, RunStats) {
    if parallel {
        run_parallel(engine, transactions)
    } else {
        engine.run_with_stats(transactions)
    }
}

#[cfg(feature = "parallel")]
fn run_parallel(
    engine: &RecurrenceEngine,
    transactions: &[Transaction],
) -> (Vec<RecurrencePrediction>, RunStats) {
    engine.run_parallel(transactions)
}

#[cfg(not(feature = "parallel"))]
fn run_parallel(
    engine: &RecurrenceEngine,
    transactions: &[Transaction],
) -> (Vec<RecurrencePrediction>, RunStats) {
    warn!("Built without the parallel feature, running sequentially");
    engine.run_with_stats(transactions)
}

/// Pretty-printed JSON array of predictions
pub fn render_json(predictions: &[RecurrencePrediction]) -> Result<String> {
    Ok(serde_json::to_string_pretty(predictions)?)
}

fn print_table(
    predictions: &[RecurrencePrediction],
    stats: &RunStats,
    config: &RecurrenceConfig,
) {
    println!();
    println!("🔁 Recurring Payments");
    println!("   ─────────────────────────────────────────────────────────────");

    if predictions.is_empty() {
        println!("   No recurring payments found.");
    }

    for prediction in predictions {
        println!(
            "   {:24} │ {:>10} every {:>3}d │ next {} │ {} charges",
            truncate(&prediction.label, 24),
            format!("${:.2}", prediction.next_amount),
            prediction.interval_days,
            prediction.next_date,
            prediction.member_transactions.len()
        );
    }

    println!();
    println!("📊 Summary");
    println!("   ─────────────────────────────");
    println!("   Transactions:       {}", stats.transactions_seen);
    println!("   Merchant groups:    {}", stats.groups_seen);
    println!("   Too few charges:    {}", stats.groups_too_small);
    println!("   No repeating gap:   {}", stats.groups_without_interval);
    println!("   No matching chain:  {}", stats.groups_without_chain);
    println!("   Out of range:       {}", stats.groups_unprojectable);
    println!("   🔁 Recurring:       {}", stats.predictions);
    println!(
        "   Tolerances:         ±{} time, ±{} amount",
        config.time_delta, config.amount_delta
    );
}
