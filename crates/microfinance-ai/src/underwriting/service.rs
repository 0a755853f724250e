use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use super::config::{PolicyError, UnderwritingConfig};
use super::decision::{DecisionEngine, LoanDecision, ScoreCard};
use super::domain::LoanApplication;
use super::kyc::{DocumentValidator, KycVerifier, VerificationResult};
use super::scoring::{
    CreditFactorModel, CreditScorer, EsgAssessor, EsgScorer, PracticeBasedEsgAssessor,
    RuleBasedCreditFactors, SocialSignalAnalyzer,
};
use super::sentiment::{LexiconSentimentScorer, SentimentScorer};

/// Pipeline composing the KYC gate, the three scorers and the decision engine.
#[derive(Clone)]
pub struct LoanUnderwritingService {
    verifier: KycVerifier,
    credit: CreditScorer,
    esg: EsgScorer,
    social: SocialSignalAnalyzer,
    engine: DecisionEngine,
}

impl LoanUnderwritingService {
    /// Build the pipeline with the bundled rule-based models.
    pub fn new(config: UnderwritingConfig) -> Result<Self, PolicyError> {
        config.validate()?;

        Ok(Self {
            verifier: KycVerifier::default(),
            credit: CreditScorer::new(Arc::new(RuleBasedCreditFactors), config.credit_weights),
            esg: EsgScorer::new(Arc::new(PracticeBasedEsgAssessor), config.esg),
            social: SocialSignalAnalyzer::new(
                Arc::new(LexiconSentimentScorer),
                config.social.clone(),
            ),
            engine: DecisionEngine::new(config),
        })
    }

    pub fn with_document_validator(mut self, validator: Arc<dyn DocumentValidator>) -> Self {
        self.verifier = KycVerifier::with_validator(validator);
        self
    }

    pub fn with_credit_model(mut self, model: Arc<dyn CreditFactorModel>) -> Self {
        self.credit = CreditScorer::new(model, self.credit.weights());
        self
    }

    pub fn with_esg_assessor(mut self, assessor: Arc<dyn EsgAssessor>) -> Self {
        self.esg = EsgScorer::new(assessor, self.engine.config().esg);
        self
    }

    pub fn with_sentiment_scorer(mut self, sentiment: Arc<dyn SentimentScorer>) -> Self {
        self.social = SocialSignalAnalyzer::new(sentiment, self.engine.config().social.clone());
        self
    }

    pub fn config(&self) -> &UnderwritingConfig {
        self.engine.config()
    }

    /// Run only the document gate.
    pub fn verify_kyc(&self, application: &LoanApplication) -> VerificationResult {
        self.verifier.verify(application.kyc_documents.as_ref())
    }

    /// Score every dimension without applying the gate.
    pub fn score(&self, application: &LoanApplication) -> ScoreCard {
        ScoreCard {
            credit: self.credit.score(application),
            esg: self.esg.score(application),
            social: self.social.analyze(application),
        }
    }

    /// Evaluate an application end to end.
    pub fn process(&self, application: &LoanApplication) -> LoanDecision {
        let verification = self.verify_kyc(application);
        let decision = self
            .engine
            .decide(&verification, || self.score(application));

        info!(
            status = decision.status.label(),
            tier = decision.tier.as_deref().unwrap_or("-"),
            "loan application processed"
        );
        decision
    }

    /// Evaluate a raw JSON payload; payloads that are not an application yield an error decision.
    pub fn process_json(&self, payload: Value) -> LoanDecision {
        match LoanApplication::from_value(payload) {
            Ok(application) => self.process(&application),
            Err(err) => {
                warn!(error = %err, "rejecting unreadable application payload");
                LoanDecision::processing_error(err)
            }
        }
    }
}
