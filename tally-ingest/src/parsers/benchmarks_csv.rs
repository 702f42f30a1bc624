//! Benchmark reference table parser
//!
//! Expected columns: Category,Average_Monthly_Cost,Advice_Tip
//! (`Advice_Tip` may be absent). Problems here only ever disable the
//! comparison feature, so they surface as `BudgetError::Configuration`.

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tally_core::{BudgetError, Result};
use tracing::debug;

use super::parse_amount;
use crate::types::{BenchmarkEntry, Columns};

pub fn parse_benchmarks<R: Read>(reader: R) -> Result<Vec<BenchmarkEntry>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| BudgetError::Configuration(format!("benchmark header: {e}")))?
        .clone();
    let cols = Columns::from_headers(&headers);

    let category_idx = cols
        .index_of("Category")
        .ok_or_else(|| BudgetError::Configuration("benchmark table has no Category column".into()))?;
    let cost_idx = cols.index_of("Average_Monthly_Cost").ok_or_else(|| {
        BudgetError::Configuration("benchmark table has no Average_Monthly_Cost column".into())
    })?;
    let tip_idx = cols.index_of("Advice_Tip");

    let mut out = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let row = i + 1;
        let record =
            result.map_err(|e| BudgetError::Configuration(format!("benchmark row {row}: {e}")))?;
        let cost_raw = record.get(cost_idx).unwrap_or("");
        let cost = parse_amount(cost_raw).ok_or_else(|| {
            BudgetError::Configuration(format!("benchmark row {row}: bad cost '{cost_raw}'"))
        })?;

        out.push(BenchmarkEntry {
            category: record.get(category_idx).unwrap_or("").to_string(),
            average_monthly_cost: cost,
            advice_tip: tip_idx
                .and_then(|idx| record.get(idx))
                .unwrap_or("")
                .to_string(),
        });
    }

    debug!(rows = out.len(), "parsed benchmark table");
    Ok(out)
}

/// Read a benchmark CSV. `Ok(None)` when the file does not exist.
pub fn read_benchmarks_csv(path: impl AsRef<Path>) -> Result<Option<Vec<BenchmarkEntry>>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    let file = std::fs::File::open(path)
        .map_err(|e| BudgetError::Configuration(format!("opening {}: {e}", path.display())))?;
    parse_benchmarks(file).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_benchmarks() {
        let text = "\
Category,Average_Monthly_Cost,Advice_Tip
Rent,1300.0,\"National avg for shelter. Aim for <30% of income.\"
Dining,325,Avg for eating out.
";
        let rows = parse_benchmarks(text.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], BenchmarkEntry::new("Rent", 1300.0, "National avg for shelter. Aim for <30% of income."));
        assert_eq!(rows[1].average_monthly_cost, 325.0);
    }

    #[test]
    fn test_tip_column_optional() {
        let rows = parse_benchmarks("category,average_monthly_cost\nApparel,160\n".as_bytes()).unwrap();
        assert_eq!(rows[0].category, "Apparel");
        assert!(rows[0].advice_tip.is_empty());
    }

    #[test]
    fn test_missing_cost_column() {
        let err = parse_benchmarks("Category,Tip\nRent,x\n".as_bytes()).unwrap_err();
        assert!(matches!(err, BudgetError::Configuration(_)));
    }

    #[test]
    fn test_absent_file_is_none() {
        assert!(read_benchmarks_csv("/no/such/benchmarks.csv").unwrap().is_none());
    }
}
