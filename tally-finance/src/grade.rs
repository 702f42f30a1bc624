//! 50/30/20 grading.
//!
//! Score starts at 100 and loses one point per percentage point of income
//! that Needs or Wants run over target, or that Savings falls short.
//! There is no floor; a very negative score is still "Needs Work".

use serde::Serialize;
use tally_core::{Bucket, round2};

use crate::aggregate::MonthlyProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    Excellent,
    Great,
    Good,
    Fair,
    NeedsWork,
}

impl Grade {
    /// Inclusive lower bounds: a score of exactly 90 is an A+.
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Grade::Excellent
        } else if score >= 80.0 {
            Grade::Great
        } else if score >= 70.0 {
            Grade::Good
        } else if score >= 60.0 {
            Grade::Fair
        } else {
            Grade::NeedsWork
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::Excellent => "A+ (Excellent)",
            Grade::Great => "A (Great)",
            Grade::Good => "B (Good)",
            Grade::Fair => "C (Fair)",
            Grade::NeedsWork => "Needs Work",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw score for three income ratios
pub fn score(needs_ratio: f64, wants_ratio: f64, savings_ratio: f64) -> f64 {
    let needs_target = Bucket::Needs.target_ratio();
    let wants_target = Bucket::Wants.target_ratio();
    let savings_target = Bucket::Savings.target_ratio();

    let mut score = 100.0;
    if needs_ratio > needs_target {
        score -= (needs_ratio - needs_target) * 100.0;
    }
    if wants_ratio > wants_target {
        score -= (wants_ratio - wants_target) * 100.0;
    }
    if savings_ratio < savings_target {
        score -= (savings_target - savings_ratio) * 100.0;
    }
    score
}

pub fn grade(needs_ratio: f64, wants_ratio: f64, savings_ratio: f64) -> Grade {
    Grade::from_score(score(needs_ratio, wants_ratio, savings_ratio))
}

/// A grade together with the score and ratios behind it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scorecard {
    pub needs_ratio: f64,
    pub wants_ratio: f64,
    pub savings_ratio: f64,
    pub score: f64,
    pub grade: Grade,
}

impl Scorecard {
    pub fn from_ratios(needs_ratio: f64, wants_ratio: f64, savings_ratio: f64) -> Self {
        let score = score(needs_ratio, wants_ratio, savings_ratio);
        Self {
            needs_ratio,
            wants_ratio,
            savings_ratio,
            score,
            grade: Grade::from_score(score),
        }
    }

    /// Grade a profile. Ratios use the cent-rounded bucket figures, the same
    /// numbers the dashboard shows. Income <= 0 (or not a finite number)
    /// leaves nothing to divide by and grades as "Needs Work" with a score of 0.
    pub fn from_profile(profile: &MonthlyProfile) -> Self {
        if !profile.income.is_finite() || profile.income <= 0.0 {
            return Self {
                needs_ratio: 0.0,
                wants_ratio: 0.0,
                savings_ratio: 0.0,
                score: 0.0,
                grade: Grade::NeedsWork,
            };
        }
        let ratio = |b: Bucket| round2(profile.monthly(b)) / profile.income;
        Self::from_ratios(ratio(Bucket::Needs), ratio(Bucket::Wants), ratio(Bucket::Savings))
    }
}
