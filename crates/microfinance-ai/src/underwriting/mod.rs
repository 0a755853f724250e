//! Loan underwriting: KYC gate, credit/ESG/social scoring and the tiered loan decision.

pub mod config;
pub mod decision;
pub mod domain;
pub mod kyc;
pub mod router;
pub mod scoring;
pub mod sentiment;
pub mod service;

#[cfg(test)]
mod tests;

pub use config::{
    CreditWeights, DecisionWeights, EsgPolicy, LoanTier, PolicyError, SocialPolicy,
    UnderwritingConfig,
};
pub use decision::{
    Assessment, DecisionEngine, DecisionError, DecisionStatus, LoanDecision, ScoreCard,
};
pub use domain::{
    BankStatements, BusinessData, DocumentKind, LoanApplication, PersonalData, SectionError,
    SocialData,
};
pub use kyc::{
    DocumentCheckError, DocumentValidator, KycVerifier, ReferencePresenceValidator,
    VerificationDetail, VerificationResult,
};
pub use router::underwriting_router;
pub use scoring::{
    CreditComponents, CreditFactorModel, CreditScore, CreditScorer, EsgAssessor, EsgScore,
    EsgScorer, PracticeBasedEsgAssessor, RuleBasedCreditFactors, ScoringError, SocialScore,
    SocialSignalAnalyzer,
};
pub use sentiment::{LexiconSentimentScorer, SentimentError, SentimentScorer};
pub use service::LoanUnderwritingService;
