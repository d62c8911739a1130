//! Recurrence detection engine
//!
//! Runs grouping, interval analysis, chain marking and forecasting over a
//! snapshot of transactions. Groups are visited in ascending key order, so
//! the same input always yields the same prediction list.

use tracing::{debug, info};

use crate::config::RecurrenceConfig;
use crate::forecast::forecast;
use crate::group::group;
use crate::interval::dominant_interval;
use crate::marker::mark;
use crate::models::{RecurrencePrediction, Transaction, TransactionGroup};

/// Counters describing one engine run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub transactions_seen: usize,
    pub groups_seen: usize,
    /// Groups with a single member
    pub groups_too_small: usize,
    /// Groups where no pair of transactions had similar amounts
    pub groups_without_interval: usize,
    /// Groups with an interval but no transaction chain fitting it
    pub groups_without_chain: usize,
    /// Groups with a chain whose next amount or date cannot be represented
    pub groups_unprojectable: usize,
    pub predictions: usize,
}

/// Outcome of analyzing a single group
enum GroupOutcome {
    TooSmall,
    NoInterval,
    NoChain,
    Unprojectable,
    Predicted(RecurrencePrediction),
}

/// Detects recurring series and forecasts their next occurrence
#[derive(Debug, Clone, Default)]
pub struct RecurrenceEngine {
    config: RecurrenceConfig,
}

impl RecurrenceEngine {
    pub fn new(config: RecurrenceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RecurrenceConfig {
        &self.config
    }

    /// Run detection and return one prediction per recurring group
    pub fn run(&self, transactions: &[Transaction]) -> Vec<RecurrencePrediction> {
        self.run_with_stats(transactions).0
    }

    /// Run detection, also returning run counters
    pub fn run_with_stats(
        &self,
        transactions: &[Transaction],
    ) -> (Vec<RecurrencePrediction>, RunStats) {
        let groups = group(transactions);
        let outcomes: Vec<GroupOutcome> = groups
            .values()
            .map(|group| self.analyze_group(group))
            .collect();
        summarize(transactions.len(), outcomes)
    }

    /// Run detection with one rayon task per group
    ///
    /// Produces exactly the same predictions, in the same order, as [`run`].
    ///
    /// [`run`]: RecurrenceEngine::run
    #[cfg(feature = "parallel")]
    pub fn run_parallel(
        &self,
        transactions: &[Transaction],
    ) -> (Vec<RecurrencePrediction>, RunStats) {
        use rayon::prelude::*;

        let groups: Vec<TransactionGroup> = group(transactions).into_values().collect();
        let outcomes: Vec<GroupOutcome> = groups
            .par_iter()
            .map(|group| self.analyze_group(group))
            .collect();
        summarize(transactions.len(), outcomes)
    }

    /// Analyze one group: interval, then chain, then forecast
    pub fn predict_group(&self, group: &TransactionGroup) -> Option<RecurrencePrediction> {
        match self.analyze_group(group) {
            GroupOutcome::Predicted(prediction) => Some(prediction),
            _ => None,
        }
    }

    fn analyze_group(&self, group: &TransactionGroup) -> GroupOutcome {
        if group.len() < 2 {
            debug!("Skipping {} - only {} transaction(s)", group.key, group.len());
            return GroupOutcome::TooSmall;
        }

        let Some(interval) = dominant_interval(group, &self.config) else {
            debug!("Skipping {} - no amount-consistent pairs", group.key);
            return GroupOutcome::NoInterval;
        };

        let marked = mark(group, interval, &self.config);
        let recurring = marked.iter().filter(|m| m.is_recurring).count();
        debug!(
            "{}: dominant interval {} days, {}/{} transactions recurring",
            group.key,
            interval,
            recurring,
            group.len()
        );

        if recurring == 0 {
            return GroupOutcome::NoChain;
        }

        match forecast(&group.key, &marked, interval) {
            Some(prediction) => GroupOutcome::Predicted(prediction),
            None => GroupOutcome::Unprojectable,
        }
    }
}

fn summarize(
    transactions_seen: usize,
    outcomes: Vec<GroupOutcome>,
) -> (Vec<RecurrencePrediction>, RunStats) {
    let mut stats = RunStats {
        transactions_seen,
        groups_seen: outcomes.len(),
        ..Default::default()
    };
    let mut predictions = Vec::new();

    for outcome in outcomes {
        match outcome {
            GroupOutcome::TooSmall => stats.groups_too_small += 1,
            GroupOutcome::NoInterval => stats.groups_without_interval += 1,
            GroupOutcome::NoChain => stats.groups_without_chain += 1,
            GroupOutcome::Unprojectable => stats.groups_unprojectable += 1,
            GroupOutcome::Predicted(prediction) => predictions.push(prediction),
        }
    }
    stats.predictions = predictions.len();

    info!(
        "Recurrence detection complete: {} transactions, {} groups, {} predictions",
        stats.transactions_seen, stats.groups_seen, stats.predictions
    );

    (predictions, stats)
}
