//! Presentation boundary: everything a dashboard or prompt needs, rounded
//! to cents once, here.

use chrono::NaiveDate;
use serde::Serialize;
use tally_core::{Bucket, fmt_usd, round2};

use crate::aggregate::MonthlyProfile;
use crate::grade::{Grade, Scorecard};
use crate::simulate::{Simulation, simulate};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketPoint {
    pub bucket: Bucket,
    pub amount: f64,
    pub target_ratio: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPoint {
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Rounded view of a [`MonthlyProfile`] plus its grade
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetReport {
    pub income: f64,
    pub months_observed: u32,
    pub monthly_spend: f64,
    pub leftover: f64,
    pub grade: Grade,
    pub score: f64,
    /// Needs, Wants, Savings in that order
    pub buckets: Vec<BucketPoint>,
    /// Largest first
    pub categories: Vec<CategoryPoint>,
    /// Ascending by date; empty when no transaction is dated
    pub trend: Vec<TrendPoint>,
}

impl BudgetReport {
    pub fn build(profile: &MonthlyProfile) -> Self {
        let card = Scorecard::from_profile(profile);

        let buckets = Bucket::ALL
            .iter()
            .map(|b| BucketPoint {
                bucket: *b,
                amount: round2(profile.monthly(*b)),
                target_ratio: b.target_ratio(),
                color: b.color(),
            })
            .collect();

        let categories = profile
            .categories_by_amount()
            .into_iter()
            .map(|(name, amount)| CategoryPoint {
                category: name.to_string(),
                amount: round2(amount),
            })
            .collect();

        let trend = profile
            .daily_trend
            .iter()
            .map(|(date, amount)| TrendPoint {
                date: *date,
                amount: round2(*amount),
            })
            .collect();

        Self {
            income: round2(profile.income),
            months_observed: profile.months_observed,
            monthly_spend: round2(profile.total_monthly_spend),
            leftover: round2(profile.leftover),
            grade: card.grade,
            score: round2(card.score),
            buckets,
            categories,
            trend,
        }
    }

    pub fn bucket(&self, bucket: Bucket) -> f64 {
        self.buckets
            .iter()
            .find(|p| p.bucket == bucket)
            .map(|p| p.amount)
            .unwrap_or(0.0)
    }

    /// "On average, your biggest expense is Rent ($1,500.00/mo)."
    pub fn insight(&self) -> Option<String> {
        self.categories.first().map(|top| {
            format!(
                "On average, your biggest expense is {} ({}/mo).",
                top.category,
                fmt_usd(top.amount)
            )
        })
    }

    /// Project savings from cutting this report's Wants
    pub fn simulate(&self, cut_percentage: u8) -> Simulation {
        let sim = simulate(self.bucket(Bucket::Wants), cut_percentage);
        Simulation {
            monthly_savings: round2(sim.monthly_savings),
            annual_savings: round2(sim.annual_savings),
            ..sim
        }
    }

    /// One `Category  $amount` line per category, for prompts and terminals
    pub fn category_lines(&self) -> String {
        let width = self
            .categories
            .iter()
            .map(|c| c.category.chars().count())
            .max()
            .unwrap_or(0);
        self.categories
            .iter()
            .map(|c| format!("{:<width$}  {}", c.category, fmt_usd(c.amount)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use tally_core::Transaction;

    fn report() -> BudgetReport {
        let txns = vec![
            Transaction::undated("Rent", 1500.0),
            Transaction::undated("Groceries", 400.0),
            Transaction::undated("Dining", 300.0),
        ];
        BudgetReport::build(&aggregate(&txns, 6000.0))
    }

    #[test]
    fn test_bucket_series_order_and_values() {
        let r = report();
        let order: Vec<Bucket> = r.buckets.iter().map(|b| b.bucket).collect();
        assert_eq!(order, Bucket::ALL.to_vec());
        assert_eq!(r.bucket(Bucket::Needs), 1900.0);
        assert_eq!(r.bucket(Bucket::Wants), 300.0);
        assert_eq!(r.bucket(Bucket::Savings), 3800.0);
        assert_eq!(r.buckets[0].color, "#EF553B");
    }

    #[test]
    fn test_rounds_at_boundary() {
        let txns = vec![
            Transaction::new(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(), "", "Dining", 100.0),
            Transaction::new(NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(), "", "Dining", 100.0),
            Transaction::new(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(), "", "Dining", 100.0),
            Transaction::new(NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(), "", "Rent", 1.0),
        ];
        let r = BudgetReport::build(&aggregate(&txns, 1000.0));
        assert_eq!(r.months_observed, 3);
        assert_eq!(r.monthly_spend, 100.33);
        assert_eq!(r.leftover, 899.67);
        assert_eq!(r.categories[1].amount, 0.33);
        assert_eq!(r.trend.len(), 4);
    }

    #[test]
    fn test_insight_and_lines() {
        let r = report();
        assert_eq!(
            r.insight().as_deref(),
            Some("On average, your biggest expense is Rent ($1,500.00/mo).")
        );
        assert_eq!(
            r.category_lines(),
            "Rent       $1,500.00\nGroceries  $400.00\nDining     $300.00"
        );
    }

    #[test]
    fn test_simulate_from_report() {
        let sim = report().simulate(10);
        assert_eq!(sim.monthly_savings, 30.0);
        assert_eq!(sim.annual_savings, 360.0);
    }

    #[test]
    fn test_grade_carried() {
        let r = report();
        assert_eq!(r.grade, Grade::Excellent);
        assert_eq!(r.score, 100.0);
    }
}
