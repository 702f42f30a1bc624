//! "What if I cut my Wants?" projection.

use serde::Serialize;

/// Upper bound of the cut slider
pub const MAX_CUT_PERCENT: u8 = 50;
pub const DEFAULT_CUT_PERCENT: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Simulation {
    pub cut_percentage: u8,
    pub monthly_savings: f64,
    pub annual_savings: f64,
}

/// Linear projection of savings from cutting Wants by `cut_percentage`.
/// Percentages above [`MAX_CUT_PERCENT`] are clamped.
pub fn simulate(wants_monthly: f64, cut_percentage: u8) -> Simulation {
    let cut = cut_percentage.min(MAX_CUT_PERCENT);
    let monthly_savings = wants_monthly * (f64::from(cut) / 100.0);
    Simulation {
        cut_percentage: cut,
        monthly_savings,
        annual_savings: monthly_savings * 12.0,
    }
}
