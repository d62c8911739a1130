//! Recurring chain marking
//!
//! Walks a group oldest first and links each transaction to the first later
//! transaction that fits both the amount band and the time window around
//! the dominant interval. Matching resumes from the matched transaction, so
//! the result is a chain rather than every pair that happens to fit.

use rust_decimal::Decimal;

use crate::config::RecurrenceConfig;
use crate::interval::{amount_similar, days_between};
use crate::models::{AnnotatedTransaction, TransactionGroup};

/// Open time window `(min, max)` in days around an interval
pub fn time_window(interval: i64, time_delta: Decimal) -> (Decimal, Decimal) {
    let interval = Decimal::from(interval);
    (
        interval * (Decimal::ONE - time_delta),
        interval * (Decimal::ONE + time_delta),
    )
}

/// Annotate every member of the group with its recurrence flag
pub fn mark(
    group: &TransactionGroup,
    interval: i64,
    config: &RecurrenceConfig,
) -> Vec<AnnotatedTransaction> {
    let mut marked: Vec<AnnotatedTransaction> =
        group.members.iter().map(AnnotatedTransaction::from).collect();
    let (time_min, time_max) = time_window(interval, config.time_delta);
    let len = marked.len();

    let mut i = 0;
    while i + 1 < len {
        let anchor = &marked[i].transaction;
        let partner = (i + 1..len).find(|&j| {
            let candidate = &marked[j].transaction;
            let days = Decimal::from(days_between(anchor.posted_at, candidate.posted_at));
            amount_similar(anchor.amount, candidate.amount, config.amount_delta)
                && days > time_min
                && days < time_max
        });

        match partner {
            Some(j) => {
                marked[i].is_recurring = true;
                marked[j].is_recurring = true;
                i = j;
            }
            None => i += 1,
        }
    }

    marked
}
