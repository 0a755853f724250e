use super::common::*;
use serde_json::json;
use std::sync::Arc;

use crate::underwriting::kyc::KycVerifier;
use crate::underwriting::DocumentKind;

#[test]
fn verifier_accepts_complete_document_set() {
    let verification = KycVerifier::default().verify(Some(&kyc_documents()));

    assert!(verification.verified);
    assert!(verification.errors.is_empty());
    let keys: Vec<&str> = verification.details.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["address", "id", "income"]);
    assert_eq!(
        verification.details["id"].reference,
        "path_to_id_image".to_string()
    );
}

#[test]
fn verifier_lists_every_missing_document_in_order() {
    let verification = KycVerifier::default().verify(Some(&json!({
        "address_proof": "utility-bill.png"
    })));

    assert!(!verification.verified);
    assert_eq!(
        verification.errors,
        vec!["Missing id_proof".to_string(), "Missing income_proof".to_string()]
    );
    assert!(verification.details.contains_key("address"));
}

#[test]
fn verifier_treats_absent_section_as_all_missing() {
    let verification = KycVerifier::default().verify(None);

    assert!(!verification.verified);
    assert_eq!(verification.errors.len(), 3);
    assert!(verification.details.is_empty());
}

#[test]
fn verifier_reports_empty_reference_as_verification_error() {
    let verification = KycVerifier::default().verify(Some(&json!({
        "id_proof": "  ",
        "address_proof": "utility-bill.png",
        "income_proof": "payslip.pdf"
    })));

    assert!(!verification.verified);
    assert_eq!(
        verification.errors,
        vec!["Verification error: id_proof reference is empty".to_string()]
    );
    assert_eq!(verification.details.len(), 2);
}

#[test]
fn verifier_keeps_checking_after_a_validator_failure() {
    let verifier = KycVerifier::with_validator(Arc::new(RejectingValidator(DocumentKind::Address)));
    let verification = verifier.verify(Some(&json!({
        "id_proof": "passport.png",
        "address_proof": "blurry.png"
    })));

    assert_eq!(
        verification.errors,
        vec![
            "Verification error: address_proof is unreadable".to_string(),
            "Missing income_proof".to_string(),
        ]
    );
    assert!(verification.details.contains_key("id"));
}

#[test]
fn verifier_rejects_non_mapping_section() {
    let verification = KycVerifier::default().verify(Some(&json!(["id_proof"])));

    assert!(!verification.verified);
    assert_eq!(verification.errors.len(), 1);
    assert!(verification.errors[0].starts_with("Verification error:"));
}

#[test]
fn verifier_rejects_non_string_reference() {
    let verification = KycVerifier::default().verify(Some(&json!({
        "id_proof": 42,
        "address_proof": "utility-bill.png",
        "income_proof": "payslip.pdf"
    })));

    assert_eq!(
        verification.errors,
        vec!["Verification error: id_proof reference must be a string".to_string()]
    );
}

#[test]
fn verifier_ignores_unrelated_documents() {
    let mut documents = kyc_documents();
    documents["selfie"] = json!("selfie.jpg");

    let verification = KycVerifier::default().verify(Some(&documents));

    assert!(verification.verified);
    assert_eq!(verification.details.len(), 3);
}
