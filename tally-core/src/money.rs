//! Output-boundary rounding and currency formatting.
//!
//! Everything upstream of the report keeps full `f64` precision; only the
//! values handed to a renderer pass through here.

/// Round to cents
pub fn round2(value: f64) -> f64 {
    let r = (value * 100.0).round() / 100.0;
    // avoid "-0.00"
    if r == 0.0 { 0.0 } else { r }
}

/// Format as `$1,234.56` (negative values as `-$1,234.56`)
pub fn fmt_usd(value: f64) -> String {
    let cents = (round2(value).abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    let sign = if round2(value) < 0.0 { "-" } else { "" };
    format!("{sign}${whole}.{:02}", cents % 100)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
