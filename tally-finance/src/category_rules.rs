//! Deterministic keyword rules mapping free-text category labels
//! to 50/30/20 buckets.
//!
//! Rules are evaluated in ascending `priority`; the first rule with a
//! keyword contained in the lower-cased label wins. Anything unmatched
//! lands in Wants.

use tally_core::Bucket;

/// One row of the rule table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketRule {
    pub priority: u8,
    pub bucket: Bucket,
    pub keywords: &'static [&'static str],
}

/// Savings is tested before Needs, so "health investment" is Savings.
pub const RULES: [BucketRule; 2] = [
    BucketRule {
        priority: 0,
        bucket: Bucket::Savings,
        keywords: &["save", "investment", "stock", "401k", "roth", "transfer"],
    },
    BucketRule {
        priority: 1,
        bucket: Bucket::Needs,
        keywords: &[
            "rent", "mortgage", "utilities", "groceries", "insurance", "medical", "transport",
            "gas", "electric", "water", "bill", "health", "education",
        ],
    },
];

/// Bucket assigned when no rule matches
pub const FALLBACK: Bucket = Bucket::Wants;

/// Result of categorization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Categorized {
    pub bucket: Bucket,
    pub target_ratio: f64,
    pub color: &'static str,
}

impl BucketRule {
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

fn first_match<'a>(rules: impl IntoIterator<Item = &'a BucketRule>, category: &str) -> Categorized {
    let lowered = category.to_lowercase();
    let bucket = rules
        .into_iter()
        .find(|r| r.matches(&lowered))
        .map(|r| r.bucket)
        .unwrap_or(FALLBACK);
    categorized(bucket)
}

/// Categorize a label against an arbitrary rule table, in any order.
pub fn categorize_with(rules: &[BucketRule], category: &str) -> Categorized {
    let mut ordered: Vec<&BucketRule> = rules.iter().collect();
    ordered.sort_by_key(|r| r.priority);
    first_match(ordered, category)
}

/// Categorize a label with the built-in 50/30/20 rules.
/// `RULES` is declared in priority order, so it is scanned as-is.
pub fn categorize(category: &str) -> Categorized {
    first_match(&RULES, category)
}

fn categorized(bucket: Bucket) -> Categorized {
    Categorized {
        bucket,
        target_ratio: bucket.target_ratio(),
        color: bucket.color(),
    }
}
