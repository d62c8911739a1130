//! Dominant interval detection
//!
//! Every pair of transactions in a group whose amounts are similar votes
//! for its day gap. The gap with the most votes is the recurrence interval.
//! This is O(n²) per group, which is fine for per-user transaction volumes.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::RecurrenceConfig;
use crate::models::TransactionGroup;

/// Check whether `current` lies strictly inside `prev ± prev·delta`
///
/// The band is built around `prev` only, so the check is not symmetric:
/// `amount_similar(100, 121)` fails while `amount_similar(121, 100)` holds.
/// A zero `prev` has an empty band and never matches, and neither does a
/// band whose edges fall outside the `Decimal` range.
pub fn amount_similar(prev: Decimal, current: Decimal, delta: Decimal) -> bool {
    let Some(spread) = prev.checked_mul(delta) else {
        return false;
    };
    match (prev.checked_sub(spread), prev.checked_add(spread)) {
        (Some(amount_min), Some(amount_max)) => current > amount_min && current < amount_max,
        _ => false,
    }
}

/// Whole days between two dates, regardless of order
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days().abs()
}

/// Count day gaps over all amount-similar pairs `(i, j)`, `i < j`
pub fn interval_histogram(
    group: &TransactionGroup,
    config: &RecurrenceConfig,
) -> BTreeMap<i64, usize> {
    let mut histogram = BTreeMap::new();
    let members = &group.members;

    for (i, tx) in members.iter().enumerate() {
        for next in &members[i + 1..] {
            if amount_similar(tx.amount, next.amount, config.amount_delta) {
                *histogram
                    .entry(days_between(tx.posted_at, next.posted_at))
                    .or_insert(0) += 1;
            }
        }
    }

    histogram
}

/// Pick the most frequent interval; the smaller interval wins ties
pub fn select_dominant(histogram: &BTreeMap<i64, usize>) -> Option<i64> {
    let mut best: Option<(i64, usize)> = None;
    for (&interval, &count) in histogram {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((interval, count)),
        }
    }
    best.map(|(interval, _)| interval)
}

/// Dominant recurrence interval of a group in days
///
/// Returns `None` for groups with fewer than two members or when no pair of
/// transactions has similar amounts.
pub fn dominant_interval(group: &TransactionGroup, config: &RecurrenceConfig) -> Option<i64> {
    if group.len() < 2 {
        return None;
    }
    select_dominant(&interval_histogram(group, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GroupKey;
    use crate::test_utils::{date, tx};
    use rust_decimal_macros::dec;

    fn group_of(members: Vec<crate::models::Transaction>) -> TransactionGroup {
        TransactionGroup {
            key: GroupKey::from("Test"),
            members,
        }
    }

    #[test]
    fn test_amount_similar_band() {
        let delta = dec!(0.20);
        assert!(amount_similar(dec!(100), dec!(119), delta));
        assert!(!amount_similar(dec!(100), dec!(121), delta));
        assert!(amount_similar(dec!(119), dec!(100), delta));
        assert!(amount_similar(dec!(100), dec!(81), delta));
    }

    #[test]
    fn test_amount_similar_bounds_are_exclusive() {
        let delta = dec!(0.20);
        assert!(!amount_similar(dec!(100), dec!(120), delta));
        assert!(!amount_similar(dec!(100), dec!(80), delta));
    }

    #[test]
    fn test_amount_similar_is_asymmetric() {
        // 100 is within 121 ± 24.2, but 121 is outside 100 ± 20
        let delta = dec!(0.20);
        assert!(amount_similar(dec!(121), dec!(100), delta));
        assert!(!amount_similar(dec!(100), dec!(121), delta));
    }

    #[test]
    fn test_amount_similar_zero_never_matches() {
        let delta = dec!(0.20);
        assert!(!amount_similar(Decimal::ZERO, Decimal::ZERO, delta));
        assert!(!amount_similar(Decimal::ZERO, dec!(0.01), delta));
    }

    #[test]
    fn test_amount_similar_overflowing_band_never_matches() {
        let delta = dec!(0.20);
        let huge: Decimal = "70000000000000000000000000000".parse().unwrap();
        let large: Decimal = "50000000000000000000000000000".parse().unwrap();
        assert!(!amount_similar(huge, huge, delta));
        assert!(!amount_similar(Decimal::MAX, Decimal::MAX, delta));
        assert!(!amount_similar(Decimal::MIN, Decimal::MIN, delta));
        assert!(amount_similar(large, large, delta));
    }

    #[test]
    fn test_amount_similar_zero_delta_never_matches() {
        assert!(!amount_similar(dec!(9.99), dec!(9.99), Decimal::ZERO));
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(date("2018-09-18"), date("2018-10-18")), 30);
        assert_eq!(days_between(date("2018-10-18"), date("2018-09-18")), 30);
        assert_eq!(days_between(date("2024-02-28"), date("2024-03-01")), 2); // leap year
    }

    #[test]
    fn test_select_dominant_tie_prefers_smaller() {
        let histogram = BTreeMap::from([(60, 2), (30, 2)]);
        assert_eq!(select_dominant(&histogram), Some(30));
    }

    #[test]
    fn test_select_dominant_highest_count() {
        let histogram = BTreeMap::from([(7, 1), (14, 3), (30, 2)]);
        assert_eq!(select_dominant(&histogram), Some(14));
    }

    #[test]
    fn test_select_dominant_empty() {
        assert_eq!(select_dominant(&BTreeMap::new()), None);
    }

    #[test]
    fn test_histogram_counts_all_pairs() {
        let group = group_of(vec![
            tx("1", "Netflix", "13.99", "2018-09-18"),
            tx("2", "Netflix", "13.99", "2018-10-18"),
            tx("3", "Netflix", "13.99", "2018-11-18"),
        ]);

        let histogram = interval_histogram(&group, &RecurrenceConfig::default());
        // 30 + 31 days between consecutive charges, 61 across the whole span
        assert_eq!(histogram, BTreeMap::from([(30, 1), (31, 1), (61, 1)]));
        assert_eq!(
            dominant_interval(&group, &RecurrenceConfig::default()),
            Some(30)
        );
    }

    #[test]
    fn test_histogram_skips_dissimilar_amounts() {
        let group = group_of(vec![
            tx("1", "Store", "10", "2024-01-01"),
            tx("2", "Store", "500", "2024-07-19"),
        ]);

        assert!(interval_histogram(&group, &RecurrenceConfig::default()).is_empty());
        assert_eq!(dominant_interval(&group, &RecurrenceConfig::default()), None);
    }

    #[test]
    fn test_dominant_interval_weekly_with_noise() {
        let group = group_of(vec![
            tx("1", "Cleaner", "50", "2024-01-01"),
            tx("2", "Cleaner", "50", "2024-01-08"),
            tx("3", "Cleaner", "50", "2024-01-15"),
            tx("4", "Cleaner", "50", "2024-01-22"),
            tx("5", "Cleaner", "400", "2024-01-25"),
        ]);

        assert_eq!(
            dominant_interval(&group, &RecurrenceConfig::default()),
            Some(7)
        );
    }

    #[test]
    fn test_dominant_interval_requires_two_members() {
        let group = group_of(vec![tx("1", "Gym", "30", "2024-01-01")]);
        let config = RecurrenceConfig::default();
        assert_eq!(dominant_interval(&group, &config), None);
        assert_eq!(dominant_interval(&group_of(vec![]), &config), None);
    }

    #[test]
    fn test_wider_amount_delta_admits_more_pairs() {
        let group = group_of(vec![
            tx("1", "Power", "100", "2024-01-01"),
            tx("2", "Power", "130", "2024-01-31"),
        ]);

        assert_eq!(dominant_interval(&group, &RecurrenceConfig::default()), None);

        let loose = RecurrenceConfig::new(dec!(0.20), dec!(0.50)).unwrap();
        assert_eq!(dominant_interval(&group, &loose), Some(30));
    }
}
