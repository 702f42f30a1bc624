use csv::StringRecord;
use serde::{Deserialize, Serialize};

/// One row of the benchmark reference table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkEntry {
    pub category: String,
    pub average_monthly_cost: f64,
    pub advice_tip: String,
}

impl BenchmarkEntry {
    pub fn new(category: impl Into<String>, average_monthly_cost: f64, advice_tip: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            average_monthly_cost,
            advice_tip: advice_tip.into(),
        }
    }
}

/// Title-case a header the way spreadsheet tools do:
/// a letter is upper-cased when it does not follow another letter.
///
/// `" amount "` -> `"Amount"`, `"average_monthly_cost"` -> `"Average_Monthly_Cost"`
pub fn normalize_header(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_alpha = false;
    for c in raw.trim().chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Column positions located by normalized header name
#[derive(Debug, Clone)]
pub struct Columns {
    names: Vec<String>,
}

impl Columns {
    pub fn from_headers(headers: &StringRecord) -> Self {
        Self {
            names: headers.iter().map(normalize_header).collect(),
        }
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}
