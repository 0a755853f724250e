use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use serde_json::{json, Value};

use crate::underwriting::domain::{BankStatements, BusinessData, LoanApplication, PersonalData};
use crate::underwriting::kyc::{DocumentCheckError, DocumentValidator, VerificationDetail};
use crate::underwriting::scoring::{CreditFactorModel, EsgAssessor};
use crate::underwriting::sentiment::{SentimentError, SentimentScorer};
use crate::underwriting::{DocumentKind, LoanUnderwritingService, UnderwritingConfig};

pub(super) const EPSILON: f64 = 1e-9;

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn kyc_documents() -> Value {
    json!({
        "id_proof": "path_to_id_image",
        "address_proof": "path_to_address_image",
        "income_proof": "path_to_income_docs"
    })
}

pub(super) fn application_json() -> Value {
    json!({
        "kyc_documents": kyc_documents(),
        "personal_data": {
            "name": "John Doe",
            "age": 35,
            "income": 50000,
            "expenses": 30000
        },
        "business_data": {
            "type": "Retail Store",
            "age": 5,
            "revenue": 200000,
            "employees": 3,
            "environmental_practices": ["waste_recycling", "energy_efficient"],
            "social_initiatives": ["local_employment", "community_support"]
        },
        "bank_statements": {
            "average_balance": 75000,
            "monthly_transactions": 45,
            "bounced_checks": 0
        },
        "social_data": {
            "posts": [
                "Excited to expand my business!",
                "Great customer feedback today",
                "New inventory arriving next week"
            ]
        }
    })
}

pub(super) fn application() -> LoanApplication {
    LoanApplication::from_value(application_json()).expect("sample application parses")
}

pub(super) fn application_with(section: &str, value: Value) -> LoanApplication {
    let mut payload = application_json();
    payload[section] = value;
    LoanApplication::from_value(payload).expect("application parses")
}

pub(super) fn service() -> LoanUnderwritingService {
    LoanUnderwritingService::new(UnderwritingConfig::default()).expect("default policy is valid")
}

/// Credit model returning fixed components and counting invocations.
#[derive(Default)]
pub(super) struct FixedCreditFactors {
    pub(super) traditional: f64,
    pub(super) bank: f64,
    pub(super) business: f64,
    pub(super) calls: AtomicUsize,
}

impl FixedCreditFactors {
    pub(super) fn new(traditional: f64, bank: f64, business: f64) -> Self {
        Self {
            traditional,
            bank,
            business,
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CreditFactorModel for FixedCreditFactors {
    fn traditional(&self, _personal: &PersonalData) -> f64 {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.traditional
    }

    fn bank(&self, _statements: &BankStatements) -> f64 {
        self.bank
    }

    fn business(&self, _business: &BusinessData) -> f64 {
        self.business
    }
}

pub(super) struct FixedEsg {
    pub(super) environmental: f64,
    pub(super) social: f64,
    pub(super) governance: f64,
}

impl EsgAssessor for FixedEsg {
    fn environmental(&self, _business: &BusinessData) -> f64 {
        self.environmental
    }

    fn social(&self, _business: &BusinessData) -> f64 {
        self.social
    }

    fn governance(&self, _business: &BusinessData) -> f64 {
        self.governance
    }
}

pub(super) struct FixedSentiment(pub(super) f64);

impl SentimentScorer for FixedSentiment {
    fn polarity(&self, _text: &str) -> Result<f64, SentimentError> {
        Ok(self.0)
    }
}

pub(super) struct UnavailableSentiment;

impl SentimentScorer for UnavailableSentiment {
    fn polarity(&self, _text: &str) -> Result<f64, SentimentError> {
        Err(SentimentError::Unavailable("nlp service timed out".to_string()))
    }
}

/// Validator that rejects one document type and accepts the rest.
pub(super) struct RejectingValidator(pub(super) DocumentKind);

impl DocumentValidator for RejectingValidator {
    fn validate(
        &self,
        kind: DocumentKind,
        reference: &str,
    ) -> Result<VerificationDetail, DocumentCheckError> {
        if kind == self.0 {
            return Err(DocumentCheckError::Rejected(format!(
                "{} is unreadable",
                kind.submission_key()
            )));
        }
        Ok(VerificationDetail {
            document: kind,
            valid: true,
            reference: reference.to_string(),
        })
    }
}

pub(super) fn service_with_fixed_scores(
    credit: Arc<FixedCreditFactors>,
    esg: FixedEsg,
    sentiment: f64,
) -> LoanUnderwritingService {
    service()
        .with_credit_model(credit)
        .with_esg_assessor(Arc::new(esg))
        .with_sentiment_scorer(Arc::new(FixedSentiment(sentiment)))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body readable");
    serde_json::from_slice(&body).expect("body is json")
}
