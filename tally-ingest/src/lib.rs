//! tally-ingest: transaction CSV parsing, manual entry, and the benchmark table reader.

pub mod manual;
pub mod parsers;
pub mod types;

pub use manual::{ManualEntry, SUGGESTED_CATEGORIES};
pub use parsers::benchmarks_csv::{parse_benchmarks, read_benchmarks_csv};
pub use parsers::transactions_csv::{parse_transactions, parse_transactions_csv};
pub use types::{BenchmarkEntry, normalize_header};
