use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{finite, saturating_ratio, ScoringError};
use crate::underwriting::config::EsgPolicy;
use crate::underwriting::domain::{BusinessData, LoanApplication};

/// Environmental, social and governance sub-scores for a business.
pub trait EsgAssessor: Send + Sync {
    fn environmental(&self, business: &BusinessData) -> f64;
    fn social(&self, business: &BusinessData) -> f64;
    fn governance(&self, business: &BusinessData) -> f64;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EsgScore {
    pub environmental: f64,
    pub social: f64,
    pub governance: f64,
    pub total: f64,
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone)]
pub struct EsgScorer {
    assessor: Arc<dyn EsgAssessor>,
    policy: EsgPolicy,
}

impl EsgScorer {
    pub fn new(assessor: Arc<dyn EsgAssessor>, policy: EsgPolicy) -> Self {
        Self { assessor, policy }
    }

    pub fn score(&self, application: &LoanApplication) -> EsgScore {
        match self.try_score(application) {
            Ok(score) => score,
            Err(err) => {
                warn!(error = %err, "esg scoring degraded to zero");
                EsgScore {
                    error: Some(err.to_string()),
                    ..EsgScore::default()
                }
            }
        }
    }

    fn try_score(&self, application: &LoanApplication) -> Result<EsgScore, ScoringError> {
        let business = application.business()?;

        let environmental = finite("environmental", self.assessor.environmental(&business))?;
        let social = finite("social", self.assessor.social(&business))?;
        let governance = finite("governance", self.assessor.governance(&business))?;
        let total = (environmental + social + governance) / 3.0;

        let threshold = self.policy.recommendation_threshold;
        let recommendations = [
            (environmental, "Improve environmental practices"),
            (social, "Enhance social responsibility"),
            (governance, "Strengthen governance structures"),
        ]
        .into_iter()
        .filter(|(score, _)| *score < threshold)
        .map(|(_, advice)| advice.to_string())
        .collect();

        Ok(EsgScore {
            environmental,
            social,
            governance,
            total,
            recommendations,
            error: None,
        })
    }
}

const PRACTICE_WEIGHT: f64 = 0.25;
const ESTABLISHED_AFTER_YEARS: f64 = 5.0;

/// Scores each dimension by the number of declared practices.
#[derive(Debug, Clone, Copy, Default)]
pub struct PracticeBasedEsgAssessor;

fn practice_score(practices: &[String]) -> f64 {
    (PRACTICE_WEIGHT * practices.len() as f64).min(1.0)
}

impl EsgAssessor for PracticeBasedEsgAssessor {
    fn environmental(&self, business: &BusinessData) -> f64 {
        practice_score(&business.environmental_practices)
    }

    fn social(&self, business: &BusinessData) -> f64 {
        practice_score(&business.social_initiatives)
    }

    fn governance(&self, business: &BusinessData) -> f64 {
        0.5 * saturating_ratio(business.age, ESTABLISHED_AFTER_YEARS)
            + 0.5 * practice_score(&business.governance_practices)
    }
}
