use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain::DocumentKind;

/// Outcome of the KYC document gate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub verified: bool,
    pub errors: Vec<String>,
    pub details: BTreeMap<String, VerificationDetail>,
}

/// Per-document record produced by a [`DocumentValidator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationDetail {
    pub document: DocumentKind,
    pub valid: bool,
    pub reference: String,
}

/// Errors raised while checking an individual document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentCheckError {
    #[error("{0} reference is empty")]
    EmptyReference(&'static str),
    #[error("{0} reference must be a string")]
    UnsupportedReference(&'static str),
    #[error("kyc_documents must be a mapping of document type to reference")]
    NotAMapping,
    #[error("{0}")]
    Rejected(String),
}

/// Type-specific validity check for a submitted document (OCR, registry lookups, ...).
pub trait DocumentValidator: Send + Sync {
    fn validate(
        &self,
        kind: DocumentKind,
        reference: &str,
    ) -> Result<VerificationDetail, DocumentCheckError>;
}

/// Accepts any non-empty reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferencePresenceValidator;

impl DocumentValidator for ReferencePresenceValidator {
    fn validate(
        &self,
        kind: DocumentKind,
        reference: &str,
    ) -> Result<VerificationDetail, DocumentCheckError> {
        if reference.trim().is_empty() {
            return Err(DocumentCheckError::EmptyReference(kind.submission_key()));
        }

        Ok(VerificationDetail {
            document: kind,
            valid: true,
            reference: reference.to_string(),
        })
    }
}

/// Hard gate checking that identity, address and income proofs are present and valid.
#[derive(Clone)]
pub struct KycVerifier {
    validator: Arc<dyn DocumentValidator>,
}

impl Default for KycVerifier {
    fn default() -> Self {
        Self::with_validator(Arc::new(ReferencePresenceValidator))
    }
}

impl KycVerifier {
    pub fn with_validator(validator: Arc<dyn DocumentValidator>) -> Self {
        Self { validator }
    }

    pub fn verify(&self, documents: Option<&Value>) -> VerificationResult {
        let mut verification = VerificationResult::default();

        let documents = match documents {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => Some(map),
            Some(_) => {
                verification.errors.push(verification_error(&DocumentCheckError::NotAMapping));
                return verification;
            }
        };

        for kind in DocumentKind::REQUIRED {
            let Some(raw) = documents.and_then(|map| map.get(kind.submission_key())) else {
                verification
                    .errors
                    .push(format!("Missing {}", kind.submission_key()));
                continue;
            };

            let checked = match raw {
                Value::String(reference) => self.validator.validate(kind, reference),
                _ => Err(DocumentCheckError::UnsupportedReference(
                    kind.submission_key(),
                )),
            };

            match checked {
                Ok(detail) => {
                    verification
                        .details
                        .insert(kind.detail_key().to_string(), detail);
                }
                Err(err) => verification.errors.push(verification_error(&err)),
            }
        }

        verification.verified = verification.errors.is_empty();
        verification
    }
}

fn verification_error(err: &DocumentCheckError) -> String {
    format!("Verification error: {err}")
}
