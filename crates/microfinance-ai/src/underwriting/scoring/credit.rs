use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{finite, saturating_ratio, ScoringError};
use crate::underwriting::config::CreditWeights;
use crate::underwriting::domain::{BankStatements, BusinessData, LoanApplication, PersonalData};

/// Per-factor scores, each nominally in `[0, 1]`.
///
/// Implementations are where a trained classifier would plug in; the scorer only needs
/// three deterministic sub-scores.
pub trait CreditFactorModel: Send + Sync {
    fn traditional(&self, personal: &PersonalData) -> f64;
    fn bank(&self, statements: &BankStatements) -> f64;
    fn business(&self, business: &BusinessData) -> f64;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditComponents {
    pub traditional_score: f64,
    pub bank_score: f64,
    pub business_score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditScore {
    pub score: f64,
    pub components: CreditComponents,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CreditScore {
    fn degraded(err: ScoringError) -> Self {
        Self {
            error: Some(err.to_string()),
            ..Self::default()
        }
    }
}

/// Weighted blend of traditional, bank-statement and business-performance factors.
#[derive(Clone)]
pub struct CreditScorer {
    model: Arc<dyn CreditFactorModel>,
    weights: CreditWeights,
}

impl CreditScorer {
    pub fn new(model: Arc<dyn CreditFactorModel>, weights: CreditWeights) -> Self {
        Self { model, weights }
    }

    pub fn weights(&self) -> CreditWeights {
        self.weights
    }

    pub fn score(&self, application: &LoanApplication) -> CreditScore {
        match self.try_score(application) {
            Ok(score) => score,
            Err(err) => {
                warn!(error = %err, "credit scoring degraded to zero");
                CreditScore::degraded(err)
            }
        }
    }

    fn try_score(&self, application: &LoanApplication) -> Result<CreditScore, ScoringError> {
        let personal = application.personal()?;
        let bank = application.bank()?;
        let business = application.business()?;

        let components = CreditComponents {
            traditional_score: finite("traditional", self.model.traditional(&personal))?,
            bank_score: finite("bank", self.model.bank(&bank))?,
            business_score: finite("business", self.model.business(&business))?,
        };

        let score = components.traditional_score * self.weights.traditional
            + components.bank_score * self.weights.bank
            + components.business_score * self.weights.business;

        Ok(CreditScore {
            score,
            components,
            error: None,
        })
    }
}

const SAVINGS_RATIO_TARGET: f64 = 0.5;
const PRIME_AGE: std::ops::RangeInclusive<f64> = 25.0..=60.0;
const BALANCE_TARGET: f64 = 100_000.0;
const TRANSACTIONS_TARGET: f64 = 50.0;
const BOUNCED_CHECK_PENALTY: f64 = 0.1;
const BUSINESS_AGE_TARGET: f64 = 10.0;
const REVENUE_TARGET: f64 = 500_000.0;
const HEADCOUNT_TARGET: f64 = 10.0;

/// Formula-based factor model used when no trained model is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedCreditFactors;

impl CreditFactorModel for RuleBasedCreditFactors {
    fn traditional(&self, personal: &PersonalData) -> f64 {
        if personal.is_empty() {
            return 0.0;
        }

        let savings = if personal.income > 0.0 {
            let ratio = (personal.income - personal.expenses) / personal.income;
            saturating_ratio(ratio, SAVINGS_RATIO_TARGET)
        } else {
            0.0
        };

        let age = match personal.age {
            Some(age) if PRIME_AGE.contains(&age) => 1.0,
            Some(_) => 0.6,
            None => 0.5,
        };

        (0.7 * savings + 0.3 * age).clamp(0.0, 1.0)
    }

    fn bank(&self, statements: &BankStatements) -> f64 {
        let balance = saturating_ratio(statements.average_balance, BALANCE_TARGET);
        let activity = saturating_ratio(statements.monthly_transactions, TRANSACTIONS_TARGET);
        let penalty = BOUNCED_CHECK_PENALTY * statements.bounced_checks.max(0.0);

        (0.5 * balance + 0.5 * activity - penalty).clamp(0.0, 1.0)
    }

    fn business(&self, business: &BusinessData) -> f64 {
        let age = saturating_ratio(business.age, BUSINESS_AGE_TARGET);
        let revenue = saturating_ratio(business.revenue, REVENUE_TARGET);
        let headcount = saturating_ratio(business.employees, HEADCOUNT_TARGET);

        (0.4 * age + 0.4 * revenue + 0.2 * headcount).clamp(0.0, 1.0)
    }
}
