use serde::{Deserialize, Serialize};

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Underwriting policy: blend weights, flag thresholds and the loan-term ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnderwritingConfig {
    pub credit_weights: CreditWeights,
    pub decision_weights: DecisionWeights,
    pub esg: EsgPolicy,
    pub social: SocialPolicy,
    pub tiers: Vec<LoanTier>,
    pub rejection_reason: String,
}

impl Default for UnderwritingConfig {
    fn default() -> Self {
        Self {
            credit_weights: CreditWeights::default(),
            decision_weights: DecisionWeights::default(),
            esg: EsgPolicy::default(),
            social: SocialPolicy::default(),
            tiers: LoanTier::standard_ladder(),
            rejection_reason: "Low credit score".to_string(),
        }
    }
}

impl UnderwritingConfig {
    pub fn validate(&self) -> Result<(), PolicyError> {
        check_weights(
            "credit",
            &[
                self.credit_weights.traditional,
                self.credit_weights.bank,
                self.credit_weights.business,
            ],
        )?;
        check_weights(
            "decision",
            &[
                self.decision_weights.credit,
                self.decision_weights.esg,
                self.decision_weights.social,
            ],
        )?;

        if !self.esg.recommendation_threshold.is_finite() {
            return Err(PolicyError::NonFiniteThreshold("esg.recommendation_threshold"));
        }
        for (name, value) in self.social.thresholds() {
            if !value.is_finite() {
                return Err(PolicyError::NonFiniteThreshold(name));
            }
        }

        if self.tiers.is_empty() {
            return Err(PolicyError::EmptyLadder);
        }
        for tier in &self.tiers {
            if !tier.min_score.is_finite() || !tier.interest_rate.is_finite() {
                return Err(PolicyError::NonFiniteThreshold("tiers"));
            }
        }
        for pair in self.tiers.windows(2) {
            if pair[1].min_score >= pair[0].min_score {
                return Err(PolicyError::UnorderedLadder {
                    higher: pair[0].name.clone(),
                    lower: pair[1].name.clone(),
                });
            }
        }

        Ok(())
    }
}

fn check_weights(group: &'static str, weights: &[f64]) -> Result<(), PolicyError> {
    if weights.iter().any(|weight| !weight.is_finite() || *weight < 0.0) {
        return Err(PolicyError::NegativeWeight(group));
    }
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
        return Err(PolicyError::UnbalancedWeights { group, sum });
    }
    Ok(())
}

/// Invalid underwriting policy.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("{group} weights must sum to 1.0 (found {sum:.4})")]
    UnbalancedWeights { group: &'static str, sum: f64 },
    #[error("{0} weights must be finite and non-negative")]
    NegativeWeight(&'static str),
    #[error("{0} must be a finite number")]
    NonFiniteThreshold(&'static str),
    #[error("at least one loan tier is required")]
    EmptyLadder,
    #[error("tier {lower} must have a lower minimum score than {higher}")]
    UnorderedLadder { higher: String, lower: String },
}

/// Component weights of the credit score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreditWeights {
    pub traditional: f64,
    pub bank: f64,
    pub business: f64,
}

impl Default for CreditWeights {
    fn default() -> Self {
        Self {
            traditional: 0.4,
            bank: 0.3,
            business: 0.3,
        }
    }
}

/// Blend of the three dimension scores into the final score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionWeights {
    pub credit: f64,
    pub esg: f64,
    pub social: f64,
}

impl Default for DecisionWeights {
    fn default() -> Self {
        Self {
            credit: 0.5,
            esg: 0.3,
            social: 0.2,
        }
    }
}

impl DecisionWeights {
    pub fn blend(&self, credit: f64, esg: f64, social_sentiment: f64) -> f64 {
        credit * self.credit + esg * self.esg + social_sentiment * self.social
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EsgPolicy {
    /// Sub-scores strictly below this value produce an improvement recommendation.
    pub recommendation_threshold: f64,
}

impl Default for EsgPolicy {
    fn default() -> Self {
        Self {
            recommendation_threshold: 0.6,
        }
    }
}

/// Flag thresholds and activity keywords for the social signal analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialPolicy {
    pub negative_sentiment_below: f64,
    pub low_activity_below: f64,
    pub positive_sentiment_above: f64,
    pub high_activity_above: f64,
    pub business_keywords: Vec<String>,
}

impl Default for SocialPolicy {
    fn default() -> Self {
        Self {
            negative_sentiment_below: -0.2,
            low_activity_below: 0.3,
            positive_sentiment_above: 0.6,
            high_activity_above: 0.7,
            business_keywords: ["business", "customer", "product", "service", "growth"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

impl SocialPolicy {
    fn thresholds(&self) -> [(&'static str, f64); 4] {
        [
            ("social.negative_sentiment_below", self.negative_sentiment_below),
            ("social.low_activity_below", self.low_activity_below),
            ("social.positive_sentiment_above", self.positive_sentiment_above),
            ("social.high_activity_above", self.high_activity_above),
        ]
    }
}

/// Approved loan-term band; applies when the final score is at least `min_score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTier {
    pub name: String,
    pub min_score: f64,
    pub loan_amount: u64,
    /// Annual rate in percent.
    pub interest_rate: f64,
    pub term_months: u32,
    #[serde(default)]
    pub requirements: Vec<String>,
}

impl LoanTier {
    pub fn standard_ladder() -> Vec<LoanTier> {
        vec![
            LoanTier {
                name: "tier1".to_string(),
                min_score: 0.7,
                loan_amount: 500_000,
                interest_rate: 12.0,
                term_months: 24,
                requirements: Vec::new(),
            },
            LoanTier {
                name: "tier2".to_string(),
                min_score: 0.5,
                loan_amount: 300_000,
                interest_rate: 15.0,
                term_months: 18,
                requirements: vec!["Monthly business review".to_string()],
            },
            LoanTier {
                name: "tier3".to_string(),
                min_score: 0.3,
                loan_amount: 100_000,
                interest_rate: 18.0,
                term_months: 12,
                requirements: vec![
                    "Collateral".to_string(),
                    "Monthly business review".to_string(),
                ],
            },
        ]
    }
}
