//! Independent scoring dimensions consumed by the decision engine.
//!
//! Every scorer degrades instead of failing: a malformed section or a misbehaving model
//! yields the zeroed structure with its `error` field set, and the pipeline keeps going.

mod credit;
mod esg;
mod social;

pub use credit::{
    CreditComponents, CreditFactorModel, CreditScore, CreditScorer, RuleBasedCreditFactors,
};
pub use esg::{EsgAssessor, EsgScore, EsgScorer, PracticeBasedEsgAssessor};
pub use social::{SocialScore, SocialSignalAnalyzer};

use super::domain::SectionError;
use super::sentiment::SentimentError;

/// Reasons a scorer falls back to its zeroed structure.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error(transparent)]
    Section(#[from] SectionError),
    #[error(transparent)]
    Sentiment(#[from] SentimentError),
    #[error("{0} score is not a finite number")]
    NonFinite(&'static str),
}

pub(crate) fn finite(component: &'static str, value: f64) -> Result<f64, ScoringError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScoringError::NonFinite(component))
    }
}

/// `min(value / ceiling, 1)` floored at zero.
pub(crate) fn saturating_ratio(value: f64, ceiling: f64) -> f64 {
    if ceiling <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    (value / ceiling).clamp(0.0, 1.0)
}
