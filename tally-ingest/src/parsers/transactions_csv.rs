//! Generic transaction CSV parser
//!
//! Expected columns (any case, any order, surrounding spaces ignored):
//!   Date,Description,Category,Amount
//!
//! `Category` and `Amount` are required; `Date` and `Description` are optional.
//! A single bad row rejects the whole file.

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tally_core::{BudgetError, Result, Transaction, parse_date};
use tracing::debug;

use super::parse_amount;
use crate::types::Columns;

/// Parse transactions from any reader holding CSV text.
pub fn parse_transactions<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| BudgetError::Ingestion(format!("reading header: {e}")))?
        .clone();
    let cols = Columns::from_headers(&headers);

    let (Some(category_idx), Some(amount_idx)) = (cols.index_of("Category"), cols.index_of("Amount"))
    else {
        debug!(columns = ?cols.names(), "CSV lacks Category/Amount columns");
        return Err(BudgetError::MissingData);
    };
    let date_idx = cols.index_of("Date");
    let description_idx = cols.index_of("Description");

    let mut out = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let row = i + 1;
        let record = result.map_err(|e| BudgetError::row(row, e))?;

        let amount_raw = record.get(amount_idx).unwrap_or("");
        let amount = parse_amount(amount_raw)
            .ok_or_else(|| BudgetError::row(row, format!("bad amount '{amount_raw}'")))?;

        let date = match date_idx.map(|idx| record.get(idx).unwrap_or("")) {
            Some(raw) if !raw.is_empty() => Some(
                parse_date(raw).ok_or_else(|| BudgetError::row(row, format!("bad date '{raw}'")))?,
            ),
            _ => None,
        };

        out.push(Transaction {
            date,
            description: description_idx
                .and_then(|idx| record.get(idx))
                .unwrap_or("")
                .to_string(),
            category: record.get(category_idx).unwrap_or("").to_string(),
            amount,
        });
    }

    debug!(
        rows = out.len(),
        dated = out.iter().filter(|t| t.date.is_some()).count(),
        "parsed transaction CSV"
    );
    Ok(out)
}

/// Parse a transaction CSV file.
pub fn parse_transactions_csv(path: impl AsRef<Path>) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .map_err(|e| BudgetError::Ingestion(format!("opening {}: {e}", path.display())))?;
    parse_transactions(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parses_basic_rows() {
        let text = "\
date , description,CATEGORY, amount
2024-01-01,Landlord,Rent,1500
2024-01-03,Trader Joes,Groceries,\"$1,040.25\"
01/20/2024,,Dining,-12.50
";
        let txns = parse_transactions(text.as_bytes()).unwrap();
        assert_eq!(txns.len(), 3);
        assert_eq!(txns[0].date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(txns[0].description, "Landlord");
        assert_eq!(txns[1].amount, 1040.25);
        assert_eq!(txns[2].date, NaiveDate::from_ymd_opt(2024, 1, 20));
        assert_eq!(txns[2].amount, -12.5);
        assert!(txns[2].description.is_empty());
    }

    #[test]
    fn test_date_column_is_optional() {
        let text = "Category,Amount\nRent,1500\nDining,300\n";
        let txns = parse_transactions(text.as_bytes()).unwrap();
        assert_eq!(txns.len(), 2);
        assert!(txns.iter().all(|t| t.date.is_none()));
    }

    #[test]
    fn test_empty_date_cell_is_undated() {
        let text = "Date,Category,Amount\n,Rent,1500\n";
        let txns = parse_transactions(text.as_bytes()).unwrap();
        assert_eq!(txns[0].date, None);
    }

    #[test]
    fn test_missing_required_column_is_missing_data() {
        let text = "Date,Description,Amount\n2024-01-01,Rent,1500\n";
        let err = parse_transactions(text.as_bytes()).unwrap_err();
        assert!(matches!(err, BudgetError::MissingData));
    }

    #[test]
    fn test_bad_amount_rejects_file() {
        let text = "Category,Amount\nRent,1500\nDining,lots\n";
        let err = parse_transactions(text.as_bytes()).unwrap_err();
        match err {
            BudgetError::Ingestion(msg) => assert!(msg.contains("row 2"), "{msg}"),
            other => panic!("expected ingestion error, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_date_rejects_file() {
        let text = "Date,Category,Amount\nsoon,Rent,1500\n";
        assert!(matches!(
            parse_transactions(text.as_bytes()),
            Err(BudgetError::Ingestion(_))
        ));
    }

    #[test]
    fn test_ragged_row_rejects_file() {
        let text = "Category,Amount\nRent,1500,extra\n";
        assert!(matches!(
            parse_transactions(text.as_bytes()),
            Err(BudgetError::Ingestion(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_transactions_csv("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, BudgetError::Ingestion(_)));
    }
}
