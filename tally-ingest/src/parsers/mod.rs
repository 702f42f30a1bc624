pub mod benchmarks_csv;
pub mod transactions_csv;

use regex::Regex;
use std::sync::LazyLock;

static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<neg>-)|(?P<open>\())?\s*\$?\s*(?P<num>\d[\d,]*(?:\.\d+)?|\.\d+)\s*(?P<close>\))?$")
        .expect("amount regex is valid")
});

/// Parse a currency cell: `1500`, `$1,500.00`, `-12.50`, `-$12.50`,
/// and accounting negatives like `($12.50)`
pub(crate) fn parse_amount(s: &str) -> Option<f64> {
    let caps = AMOUNT_RE.captures(s.trim())?;
    let parenthesized = caps.name("open").is_some();
    if parenthesized != caps.name("close").is_some() {
        return None;
    }
    let value: f64 = caps["num"].replace(',', "").parse().ok()?;
    if parenthesized || caps.name("neg").is_some() {
        Some(-value)
    } else {
        Some(value)
    }
}
