mod policy;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::config::UnderwritingConfig;
use super::kyc::VerificationResult;
use super::scoring::{CreditScore, EsgScore, SocialScore};
use policy::{select_tier, TierOutcome};

pub(crate) const KYC_REJECTION_REASON: &str = "KYC verification failed";

/// Terminal state of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    Approved,
    Rejected,
    Pending,
    Error,
}

impl DecisionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            DecisionStatus::Approved => "approved",
            DecisionStatus::Rejected => "rejected",
            DecisionStatus::Pending => "pending",
            DecisionStatus::Error => "error",
        }
    }
}

/// The three dimension scores handed to the engine once the KYC gate passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub credit: CreditScore,
    pub esg: EsgScore,
    pub social: SocialScore,
}

/// Audit trail of the scores behind a decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub final_score: f64,
    pub credit: CreditScore,
    pub esg: EsgScore,
    pub social: SocialScore,
}

/// Loan offer or rejection returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanDecision {
    pub status: DecisionStatus,
    pub loan_amount: u64,
    /// Annual rate in percent.
    pub interest_rate: f64,
    pub term_months: u32,
    pub requirements: Vec<String>,
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment: Option<Assessment>,
}

impl LoanDecision {
    pub fn pending() -> Self {
        Self {
            status: DecisionStatus::Pending,
            loan_amount: 0,
            interest_rate: 0.0,
            term_months: 0,
            requirements: Vec::new(),
            recommendations: Vec::new(),
            tier: None,
            reason: None,
            details: Vec::new(),
            error: None,
            message: None,
            assessment: None,
        }
    }

    pub fn kyc_rejected(verification: &VerificationResult) -> Self {
        Self {
            status: DecisionStatus::Rejected,
            reason: Some(KYC_REJECTION_REASON.to_string()),
            details: verification.errors.clone(),
            ..Self::pending()
        }
    }

    /// Failure while turning scores into terms.
    pub fn failed(err: &DecisionError) -> Self {
        Self {
            status: DecisionStatus::Error,
            error: Some(err.to_string()),
            ..Self::pending()
        }
    }

    /// Failure before the pipeline could run at all.
    pub fn processing_error(message: impl std::fmt::Display) -> Self {
        Self {
            status: DecisionStatus::Error,
            message: Some(format!("Error processing application: {message}")),
            ..Self::pending()
        }
    }

    pub fn is_approved(&self) -> bool {
        self.status == DecisionStatus::Approved
    }

    pub fn summary(&self) -> String {
        match self.status {
            DecisionStatus::Approved => {
                let mut summary = format!(
                    "approved {} at {}% over {} months",
                    self.loan_amount, self.interest_rate, self.term_months
                );
                if !self.requirements.is_empty() {
                    summary.push_str(&format!(" (requires {})", self.requirements.join(", ")));
                }
                summary
            }
            DecisionStatus::Rejected => {
                let reason = self.reason.as_deref().unwrap_or("unknown reason");
                if self.details.is_empty() {
                    format!("rejected: {reason}")
                } else {
                    format!("rejected: {reason} ({})", self.details.join("; "))
                }
            }
            DecisionStatus::Pending => "pending evaluation".to_string(),
            DecisionStatus::Error => {
                let detail = self
                    .error
                    .as_deref()
                    .or(self.message.as_deref())
                    .unwrap_or("unknown error");
                format!("error: {detail}")
            }
        }
    }
}

/// Failure while mapping scores onto loan terms.
#[derive(Debug, thiserror::Error)]
pub enum DecisionError {
    #[error("final score is not a finite number")]
    NonFiniteScore,
}

/// Stateless engine applying the KYC gate, score blend and tier ladder.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    config: UnderwritingConfig,
}

impl DecisionEngine {
    pub fn new(config: UnderwritingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &UnderwritingConfig {
        &self.config
    }

    /// Gate on KYC, then score lazily so that rejected applications are never scored.
    pub fn decide<F>(&self, verification: &VerificationResult, score: F) -> LoanDecision
    where
        F: FnOnce() -> ScoreCard,
    {
        if !verification.verified {
            info!(errors = ?verification.errors, "kyc gate rejected application");
            return LoanDecision::kyc_rejected(verification);
        }

        let card = score();
        match self.evaluate(card) {
            Ok(decision) => decision,
            Err(err) => LoanDecision::failed(&err),
        }
    }

    pub fn evaluate(&self, card: ScoreCard) -> Result<LoanDecision, DecisionError> {
        let final_score = self.config.decision_weights.blend(
            card.credit.score,
            card.esg.total,
            card.social.sentiment_score,
        );
        if !final_score.is_finite() {
            return Err(DecisionError::NonFiniteScore);
        }
        debug!(final_score, "blended dimension scores");

        let mut decision = match select_tier(&self.config.tiers, final_score) {
            TierOutcome::Approved(tier) => LoanDecision {
                status: DecisionStatus::Approved,
                loan_amount: tier.loan_amount,
                interest_rate: tier.interest_rate,
                term_months: tier.term_months,
                requirements: tier.requirements.clone(),
                tier: Some(tier.name.clone()),
                ..LoanDecision::pending()
            },
            TierOutcome::BelowLadder => LoanDecision {
                status: DecisionStatus::Rejected,
                reason: Some(self.config.rejection_reason.clone()),
                ..LoanDecision::pending()
            },
        };

        // Only ESG advice is surfaced; credit and social findings stay in the assessment.
        decision
            .recommendations
            .extend(card.esg.recommendations.iter().cloned());
        decision.assessment = Some(Assessment {
            final_score,
            credit: card.credit,
            esg: card.esg,
            social: card.social,
        });

        Ok(decision)
    }
}
