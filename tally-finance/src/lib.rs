//! tally-finance: 50/30/20 categorizer, monthly aggregator, grader, simulator,
//! benchmark comparison, report and assistant prompt.

pub mod aggregate;
pub mod assistant;
pub mod benchmarks;
pub mod category_rules;
pub mod grade;
pub mod prompt;
pub mod report;
pub mod simulate;

pub use aggregate::{MonthlyProfile, aggregate, is_ready, try_aggregate};
pub use assistant::{Completion, ask, session_report};
pub use benchmarks::{BenchmarkTable, Comparison, load_benchmarks, national_averages};
pub use category_rules::{Categorized, categorize};
pub use grade::{Grade, Scorecard, grade};
pub use prompt::build_prompt;
pub use report::BudgetReport;
pub use simulate::{Simulation, simulate};
