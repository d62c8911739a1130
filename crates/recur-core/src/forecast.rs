//! Next-occurrence forecasting

use chrono::Days;
use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{AnnotatedTransaction, GroupKey, RecurrencePrediction};

/// Project the next occurrence from the marked members of a group
///
/// The amount is the mean of all recurring members and the date is the
/// last recurring member's date plus the interval. Returns `None` when
/// nothing was marked, the amounts overflow when summed, or the projected
/// date is out of calendar range.
pub fn forecast(
    key: &GroupKey,
    marked: &[AnnotatedTransaction],
    interval: i64,
) -> Option<RecurrencePrediction> {
    let recurring: Vec<AnnotatedTransaction> =
        marked.iter().filter(|m| m.is_recurring).cloned().collect();
    let last = &recurring.last()?.transaction;
    let (label, owner_id, last_date) = (last.label.clone(), last.owner_id.clone(), last.posted_at);

    let Some(total) = recurring
        .iter()
        .try_fold(Decimal::ZERO, |sum, m| sum.checked_add(m.transaction.amount))
    else {
        warn!("Cannot average {} - amounts overflow", key);
        return None;
    };
    let next_amount = total / Decimal::from(recurring.len());

    let next_date = match u64::try_from(interval)
        .ok()
        .and_then(|days| last_date.checked_add_days(Days::new(days)))
    {
        Some(date) => date,
        None => {
            warn!(
                "Cannot project {} by {} days from {}",
                key, interval, last_date
            );
            return None;
        }
    };

    Some(RecurrencePrediction {
        label,
        owner_id,
        next_amount,
        next_date,
        group_key: key.clone(),
        interval_days: interval,
        member_transactions: recurring,
    })
}
