//! Builds the single text prompt handed to the chat collaborator.

use tally_core::{Bucket, fmt_usd};

use crate::benchmarks::{BenchmarkTable, SOURCE_LABEL};
use crate::report::BudgetReport;

pub const NO_DATA_CONTEXT: &str =
    "User has NOT uploaded specific data yet. Answer general financial questions.";

const PERSONA: &str = "You are an expert Financial Agent.";

const INSTRUCTIONS: &str = "\
INSTRUCTIONS:
1. FORMATTING: Use Markdown. Bullet points for lists.
2. NO BOLDING: Do NOT bold currency values (e.g., write $500.00).
3. CITATION: Cite specific numbers from the data context.
4. TONE: Professional and helpful.";

/// The user's numbers, as the assistant should quote them
pub fn data_context(report: &BudgetReport) -> String {
    format!(
        "DATA PERIOD: {months} Months
USER MONTHLY INCOME: {income}
USER AVG MONTHLY SPEND: {spend}
GRADE: {grade}
MONTHLY 50/30/20 BREAKDOWN (Averages):
- NEEDS: {needs}
- WANTS: {wants}
- SAVINGS: {savings}
CATEGORY BREAKDOWN (Monthly Averages):
{categories}",
        months = report.months_observed,
        income = fmt_usd(report.income),
        spend = fmt_usd(report.monthly_spend),
        grade = report.grade,
        needs = fmt_usd(report.bucket(Bucket::Needs)),
        wants = fmt_usd(report.bucket(Bucket::Wants)),
        savings = fmt_usd(report.bucket(Bucket::Savings)),
        categories = report.category_lines(),
    )
}

/// Benchmark rows as external knowledge; empty when no table is loaded
pub fn rag_context(benchmarks: Option<&BenchmarkTable>) -> String {
    match benchmarks {
        Some(t) if !t.is_empty() => format!("{SOURCE_LABEL}:\n{}", t.render()),
        _ => String::new(),
    }
}

pub fn build_prompt(
    report: Option<&BudgetReport>,
    benchmarks: Option<&BenchmarkTable>,
    question: &str,
) -> String {
    let data = report.map(data_context).unwrap_or_else(|| NO_DATA_CONTEXT.to_string());
    format!(
        "{PERSONA}

DATA CONTEXT (Use these exact numbers):
{data}

EXTERNAL KNOWLEDGE (RAG):
{rag}

USER QUESTION: {question}

{INSTRUCTIONS}
",
        rag = rag_context(benchmarks),
        question = question.trim(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::benchmarks::national_averages;
    use tally_core::Transaction;

    fn report() -> BudgetReport {
        let txns = vec![
            Transaction::undated("Rent", 1500.0),
            Transaction::undated("Groceries", 400.0),
            Transaction::undated("Dining", 300.0),
        ];
        BudgetReport::build(&aggregate(&txns, 6000.0))
    }

    #[test]
    fn test_prompt_with_data_and_benchmarks() {
        let r = report();
        let table = national_averages();
        let p = build_prompt(Some(&r), Some(&table), "  Where can I save money? ");

        assert!(p.contains("DATA PERIOD: 1 Months"));
        assert!(p.contains("USER MONTHLY INCOME: $6,000.00"));
        assert!(p.contains("USER AVG MONTHLY SPEND: $2,200.00"));
        assert!(p.contains("GRADE: A+ (Excellent)"));
        assert!(p.contains("- NEEDS: $1,900.00"));
        assert!(p.contains("- SAVINGS: $3,800.00"));
        assert!(p.contains("Rent       $1,500.00"));
        assert!(p.contains("OFFICIAL US BENCHMARKS (BLS 2023):"));
        assert!(p.contains("Tuition and books."));
        assert!(p.contains("USER QUESTION: Where can I save money?\n"));
        assert!(p.contains("2. NO BOLDING"));
        assert!(!p.contains(NO_DATA_CONTEXT));
    }

    #[test]
    fn test_prompt_without_data_or_benchmarks() {
        let p = build_prompt(None, None, "Is a Roth IRA worth it?");
        assert!(p.contains(NO_DATA_CONTEXT));
        assert!(!p.contains("DATA PERIOD"));
        assert!(!p.contains(SOURCE_LABEL));
        assert!(p.contains("EXTERNAL KNOWLEDGE (RAG):\n\n"));
    }

    #[test]
    fn test_empty_table_is_no_rag() {
        assert!(rag_context(Some(&BenchmarkTable::default())).is_empty());
    }
}
