//! Benchmark reference table: national average monthly cost per category.
//!
//! The table never feeds grading; it only backs the "you vs. national
//! average" comparison and the assistant's external knowledge. When it is
//! missing, both degrade to "no data".

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tally_ingest::{BenchmarkEntry, read_benchmarks_csv};
use tracing::warn;

use crate::aggregate::MonthlyProfile;

/// Heading used when the table is quoted to the assistant
pub const SOURCE_LABEL: &str = "OFFICIAL US BENCHMARKS (BLS 2023)";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BenchmarkTable {
    entries: Vec<BenchmarkEntry>,
}

/// One category present in both the user's data and the table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub category: String,
    pub user_monthly: f64,
    pub average_monthly_cost: f64,
    /// user - average; positive means above the national average
    pub difference: f64,
    pub advice_tip: String,
}

impl Comparison {
    pub fn is_over(&self) -> bool {
        self.difference > 0.0
    }
}

impl BenchmarkTable {
    pub fn new(entries: Vec<BenchmarkEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[BenchmarkEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, category: &str) -> Option<&BenchmarkEntry> {
        self.entries.iter().find(|e| e.category == category)
    }

    /// Inner join on exact category text, in table order.
    pub fn compare(&self, profile: &MonthlyProfile) -> Vec<Comparison> {
        self.entries
            .iter()
            .filter_map(|e| {
                profile.spend_by_category.get(&e.category).map(|user| Comparison {
                    category: e.category.clone(),
                    user_monthly: *user,
                    average_monthly_cost: e.average_monthly_cost,
                    difference: user - e.average_monthly_cost,
                    advice_tip: e.advice_tip.clone(),
                })
            })
            .collect()
    }

    /// Plain-text table, columns padded to the widest cell.
    pub fn render(&self) -> String {
        let headers = ["Category", "Average_Monthly_Cost", "Advice_Tip"];
        let rows: Vec<[String; 3]> = self
            .entries
            .iter()
            .map(|e| {
                [
                    e.category.clone(),
                    format!("{:.1}", e.average_monthly_cost),
                    e.advice_tip.clone(),
                ]
            })
            .collect();

        let mut widths = headers.map(str::len);
        for row in &rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let mut out = format!(
            "{:>w0$} {:>w1$} {:<w2$}",
            headers[0],
            headers[1],
            headers[2],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2]
        )
        .trim_end()
        .to_string();
        for row in &rows {
            out.push('\n');
            let line = format!(
                "{:>w0$} {:>w1$} {:<w2$}",
                row[0],
                row[1],
                row[2],
                w0 = widths[0],
                w1 = widths[1],
                w2 = widths[2]
            );
            out.push_str(line.trim_end());
        }
        out
    }
}

/// US Consumer Expenditure Survey 2023 averages, the default dataset
/// written by `tally benchmarks fetch`.
pub fn national_averages() -> BenchmarkTable {
    let rows = [
        ("Rent", 1300.00, "National avg for shelter. Aim for <30% of income."),
        ("Groceries", 475.00, "Avg for food at home. Buying bulk reduces this."),
        ("Dining", 325.00, "Avg for eating out. High impact area for savings."),
        ("Utilities", 360.00, "Includes electricity, water, gas, and phone."),
        ("Transport", 915.00, "Includes gas, insurance, and car payments."),
        ("Insurance", 520.00, "Includes health, life, and vehicle insurance."),
        ("Healthcare", 490.00, "Out-of-pocket costs and premiums."),
        ("Entertainment", 290.00, "Streaming, hobbies, and events."),
        ("Apparel", 160.00, "Clothing and footwear."),
        ("Education", 120.00, "Tuition and books."),
    ];
    BenchmarkTable::new(
        rows.into_iter()
            .map(|(c, cost, tip)| BenchmarkEntry::new(c, cost, tip))
            .collect(),
    )
}

/// Write a table as `Category,Average_Monthly_Cost,Advice_Tip` CSV.
pub fn write_benchmarks_csv(table: &BenchmarkTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    wtr.write_record(["Category", "Average_Monthly_Cost", "Advice_Tip"])?;
    for e in &table.entries {
        wtr.write_record([
            e.category.as_str(),
            &format!("{:.2}", e.average_monthly_cost),
            e.advice_tip.as_str(),
        ])?;
    }
    wtr.flush().with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Load the benchmark table, degrading to `None` (with a warning) when the
/// file is absent or unreadable.
pub fn load_benchmarks(path: impl AsRef<Path>) -> Option<BenchmarkTable> {
    let path = path.as_ref();
    match read_benchmarks_csv(path) {
        Ok(Some(entries)) if !entries.is_empty() => Some(BenchmarkTable::new(entries)),
        Ok(Some(_)) => {
            warn!(path = %path.display(), "benchmark table is empty; comparisons disabled");
            None
        }
        Ok(None) => {
            warn!(path = %path.display(), "benchmark data missing; run `tally benchmarks fetch`");
            None
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "benchmark table unreadable; comparisons disabled");
            None
        }
    }
}
