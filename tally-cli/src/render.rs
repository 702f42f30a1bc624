//! Plain-text views of the report. Formatting only; every number arrives
//! already rounded from `BudgetReport`.

use std::fmt::Write;

use tally_core::{Bucket, Message, Role, fmt_usd};
use tally_finance::{BenchmarkTable, BudgetReport, Comparison, Simulation};

const BAR_WIDTH: usize = 30;

fn bar(amount: f64, max: f64) -> String {
    if max <= 0.0 || amount <= 0.0 {
        return String::new();
    }
    let n = ((amount / max) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(n.clamp(1, BAR_WIDTH))
}

pub fn dashboard(
    report: &BudgetReport,
    benchmarks: Option<&BenchmarkTable>,
    comparisons: &[Comparison],
) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "Monthly Income      {}", fmt_usd(report.income));
    let _ = writeln!(s, "Monthly Avg Spent   {}", fmt_usd(report.monthly_spend));
    let _ = writeln!(s, "Avg Remaining       {}", fmt_usd(report.leftover));
    let _ = writeln!(s, "Grade               {}  (score {:.2})", report.grade, report.score);
    let _ = writeln!(s, "Data period         {} month(s)", report.months_observed);

    if let Some(insight) = report.insight() {
        let _ = writeln!(s, "\nInsight: {insight}");
    }

    let _ = writeln!(s, "\n50/30/20 rule (monthly averages)");
    for p in &report.buckets {
        let share = if report.income > 0.0 { p.amount / report.income * 100.0 } else { 0.0 };
        let _ = writeln!(
            s,
            "  {:<8} {:>12}  {:>5.1}% of income (target {:.0}%)",
            p.bucket.label(),
            fmt_usd(p.amount),
            share,
            p.target_ratio * 100.0
        );
    }

    let _ = writeln!(s, "\nMonthly spending by category");
    let max = report.categories.first().map(|c| c.amount).unwrap_or(0.0);
    let width = report.categories.iter().map(|c| c.category.chars().count()).max().unwrap_or(0);
    for c in &report.categories {
        let _ = writeln!(s, "  {:<width$}  {:>12}  {}", c.category, fmt_usd(c.amount), bar(c.amount, max));
    }

    let _ = writeln!(s, "\nSpending trend (daily)");
    if report.trend.is_empty() {
        let _ = writeln!(s, "  Upload a CSV with a 'Date' column to see trends.");
    } else {
        let max = report.trend.iter().map(|t| t.amount).fold(0.0, f64::max);
        for t in &report.trend {
            let _ = writeln!(s, "  {}  {:>12}  {}", t.date, fmt_usd(t.amount), bar(t.amount, max));
        }
    }

    let _ = writeln!(s, "\nYou vs. national average");
    match benchmarks {
        None => {
            let _ = writeln!(s, "  Benchmark data missing. Run: tally benchmarks fetch");
        }
        Some(_) if comparisons.is_empty() => {
            let _ = writeln!(s, "  Spending categories didn't match national benchmark labels exactly.");
        }
        Some(_) => {
            for c in comparisons {
                let marker = if c.is_over() { "over" } else { "under" };
                let _ = writeln!(
                    s,
                    "  {:<14} you {:>11}  avg {:>11}  ({marker} by {})",
                    c.category,
                    fmt_usd(c.user_monthly),
                    fmt_usd(c.average_monthly_cost),
                    fmt_usd(c.difference.abs())
                );
                if c.is_over() && !c.advice_tip.is_empty() {
                    let _ = writeln!(s, "  {:<14} tip: {}", "", c.advice_tip);
                }
            }
        }
    }
    s
}

pub fn simulator(report: &BudgetReport, sim: &Simulation) -> String {
    format!(
        "Savings simulator: cut Wants ({}/mo) by {}%\n  Monthly Savings  {}\n  Yearly Savings   {}\n",
        fmt_usd(report.bucket(Bucket::Wants)),
        sim.cut_percentage,
        fmt_usd(sim.monthly_savings),
        fmt_usd(sim.annual_savings)
    )
}

pub fn messages(msgs: &[Message]) -> String {
    let mut s = String::new();
    for m in msgs {
        let tag = match m.role {
            Role::User => "you",
            Role::Assistant => "agent",
        };
        let _ = writeln!(s, "{tag}: {}\n", m.content);
    }
    s
}

pub fn benchmark_table(table: &BenchmarkTable) -> String {
    format!("{}\n", table.render())
}
