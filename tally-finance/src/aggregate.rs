//! Monthly normalization of a transaction set.
//!
//! Every "monthly" figure is a raw sum divided by the number of distinct
//! calendar months the dated transactions span (at least 1). Values keep
//! full precision here; rounding belongs to [`crate::report`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use tally_core::{BudgetError, Bucket, Result, Transaction, months_observed};
use tracing::debug;

use crate::category_rules::categorize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyProfile {
    pub income: f64,
    pub months_observed: u32,
    /// Sum of all amounts / months
    pub total_monthly_spend: f64,
    /// Per-bucket monthly spend straight from the transactions
    pub raw_by_bucket: BTreeMap<Bucket, f64>,
    /// Per-bucket monthly figures with positive leftover folded into Savings
    pub spend_by_bucket: BTreeMap<Bucket, f64>,
    /// Keyed by the raw category label
    pub spend_by_category: BTreeMap<String, f64>,
    /// income - total_monthly_spend
    pub leftover: f64,
    /// Raw (not normalized) spend per calendar date, ascending
    pub daily_trend: Vec<(NaiveDate, f64)>,
}

impl MonthlyProfile {
    /// Monthly figure for a bucket, Savings including leftover
    pub fn monthly(&self, bucket: Bucket) -> f64 {
        self.spend_by_bucket.get(&bucket).copied().unwrap_or(0.0)
    }

    /// Monthly figure for a bucket before the leftover adjustment
    pub fn raw_monthly(&self, bucket: Bucket) -> f64 {
        self.raw_by_bucket.get(&bucket).copied().unwrap_or(0.0)
    }

    /// Categories ordered by monthly spend, largest first (ties by name)
    pub fn categories_by_amount(&self) -> Vec<(&str, f64)> {
        let mut rows: Vec<(&str, f64)> = self
            .spend_by_category
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        rows.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows
    }

    /// Biggest monthly expense category
    pub fn top_category(&self) -> Option<(&str, f64)> {
        self.categories_by_amount().into_iter().next()
    }
}

/// Whether there is anything to aggregate
pub fn is_ready(txns: &[Transaction]) -> bool {
    !txns.is_empty()
}

/// Build the monthly profile. Callers check [`is_ready`] first; an empty
/// set yields an all-zero spend profile.
pub fn aggregate(txns: &[Transaction], income: f64) -> MonthlyProfile {
    let months = months_observed(txns.iter().filter_map(|t| t.date));
    let divisor = f64::from(months);

    let mut raw_bucket: BTreeMap<Bucket, f64> = Bucket::ALL.iter().map(|b| (*b, 0.0)).collect();
    let mut by_category: BTreeMap<String, f64> = BTreeMap::new();
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut total = 0.0;

    for txn in txns {
        let cat = categorize(&txn.category);
        *raw_bucket.entry(cat.bucket).or_insert(0.0) += txn.amount;
        *by_category.entry(txn.category.clone()).or_insert(0.0) += txn.amount;
        if let Some(date) = txn.date {
            *by_date.entry(date).or_insert(0.0) += txn.amount;
        }
        total += txn.amount;
    }

    let total_monthly_spend = total / divisor;
    let leftover = income - total_monthly_spend;

    let raw_by_bucket: BTreeMap<Bucket, f64> =
        raw_bucket.into_iter().map(|(b, v)| (b, v / divisor)).collect();

    let mut spend_by_bucket = raw_by_bucket.clone();
    if let Some(savings) = spend_by_bucket.get_mut(&Bucket::Savings) {
        *savings += leftover.max(0.0);
    }

    let spend_by_category = by_category
        .into_iter()
        .map(|(k, v)| (k, v / divisor))
        .collect();

    debug!(
        transactions = txns.len(),
        months,
        total_monthly_spend,
        leftover,
        "aggregated monthly profile"
    );

    MonthlyProfile {
        income,
        months_observed: months,
        total_monthly_spend,
        raw_by_bucket,
        spend_by_bucket,
        spend_by_category,
        leftover,
        daily_trend: by_date.into_iter().collect(),
    }
}

/// [`aggregate`] with the precondition turned into an error
pub fn try_aggregate(txns: &[Transaction], income: f64) -> Result<MonthlyProfile> {
    if !is_ready(txns) {
        return Err(BudgetError::MissingData);
    }
    Ok(aggregate(txns, income))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn single_month() -> Vec<Transaction> {
        vec![
            Transaction::new(d(2024, 3, 1), "", "Rent", 1500.0),
            Transaction::new(d(2024, 3, 4), "", "Groceries", 400.0),
            Transaction::new(d(2024, 3, 9), "", "Dining", 300.0),
        ]
    }

    #[test]
    fn test_single_month_equals_raw_sums() {
        let p = aggregate(&single_month(), 6000.0);
        assert_eq!(p.months_observed, 1);
        assert_eq!(p.monthly(Bucket::Needs), 1900.0);
        assert_eq!(p.monthly(Bucket::Wants), 300.0);
        assert_eq!(p.raw_monthly(Bucket::Savings), 0.0);
        assert_eq!(p.leftover, 3800.0);
        assert_eq!(p.monthly(Bucket::Savings), 3800.0);
        assert_eq!(p.spend_by_category["Rent"], 1500.0);
    }

    #[test]
    fn test_multi_month_normalization() {
        let txns = vec![
            Transaction::new(d(2024, 1, 1), "", "Rent", 1000.0),
            Transaction::new(d(2024, 2, 1), "", "Rent", 1000.0),
            Transaction::new(d(2024, 2, 14), "", "Dining", 200.0),
            Transaction::new(d(2024, 2, 20), "", "Roth IRA", 400.0),
        ];
        let p = aggregate(&txns, 3000.0);
        assert_eq!(p.months_observed, 2);
        assert_eq!(p.spend_by_category["Rent"], 1000.0);
        assert_eq!(p.raw_monthly(Bucket::Wants), 100.0);
        assert_eq!(p.total_monthly_spend, 1300.0);
        assert_eq!(p.leftover, 1700.0);
        // 200 explicit + 1700 leftover
        assert_eq!(p.monthly(Bucket::Savings), 1900.0);
    }

    #[test]
    fn test_undated_defaults_to_one_month() {
        let txns = vec![Transaction::undated("Rent", 900.0), Transaction::undated("Movies", 50.0)];
        let p = aggregate(&txns, 1000.0);
        assert_eq!(p.months_observed, 1);
        assert_eq!(p.total_monthly_spend, 950.0);
        assert!(p.daily_trend.is_empty());
    }

    #[test]
    fn test_negative_leftover_adds_nothing_to_savings() {
        let txns = vec![Transaction::undated("Rent", 2500.0), Transaction::undated("Stock buy", 100.0)];
        let p = aggregate(&txns, 2000.0);
        assert_eq!(p.leftover, -600.0);
        assert_eq!(p.monthly(Bucket::Savings), 100.0);
    }

    #[test]
    fn test_bucket_sum_conserves_total() {
        let txns = vec![
            Transaction::new(d(2023, 11, 2), "", "Rent", 1234.56),
            Transaction::new(d(2023, 12, 2), "", "Electric", 98.76),
            Transaction::new(d(2024, 1, 2), "", "Concerts", 77.7),
            Transaction::new(d(2024, 1, 9), "", "Transfer to brokerage", 333.3),
        ];
        let p = aggregate(&txns, 4000.0);
        let bucket_sum: f64 = p.raw_by_bucket.values().sum();
        assert!((bucket_sum - p.total_monthly_spend).abs() < 1e-9);
    }

    #[test]
    fn test_daily_trend_sums_per_date() {
        let txns = vec![
            Transaction::new(d(2024, 3, 2), "", "Dining", 10.0),
            Transaction::new(d(2024, 3, 1), "", "Rent", 1000.0),
            Transaction::new(d(2024, 3, 2), "", "Groceries", 40.0),
            Transaction::undated("Misc", 5.0),
        ];
        let p = aggregate(&txns, 2000.0);
        assert_eq!(p.daily_trend, vec![(d(2024, 3, 1), 1000.0), (d(2024, 3, 2), 50.0)]);
    }

    #[test]
    fn test_top_category_and_ordering() {
        let p = aggregate(&single_month(), 6000.0);
        assert_eq!(p.top_category(), Some(("Rent", 1500.0)));
        let names: Vec<&str> = p.categories_by_amount().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Rent", "Groceries", "Dining"]);
    }

    #[test]
    fn test_idempotent() {
        let txns = single_month();
        assert_eq!(aggregate(&txns, 6000.0), aggregate(&txns, 6000.0));
    }

    #[test]
    fn test_try_aggregate_empty() {
        assert!(matches!(try_aggregate(&[], 6000.0), Err(BudgetError::MissingData)));
        assert!(try_aggregate(&single_month(), 6000.0).is_ok());
    }
}
