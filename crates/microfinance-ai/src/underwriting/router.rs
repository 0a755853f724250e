use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use super::decision::DecisionStatus;
use super::domain::LoanApplication;
use super::service::LoanUnderwritingService;

/// Router builder exposing HTTP endpoints for evaluation and KYC checks.
pub fn underwriting_router(service: Arc<LoanUnderwritingService>) -> Router {
    Router::new()
        .route(
            "/api/v1/loans/applications/evaluate",
            post(evaluate_handler),
        )
        .route("/api/v1/loans/kyc/verify", post(verify_handler))
        .route("/api/v1/loans/policy", get(policy_handler))
        .with_state(service)
}

pub(crate) async fn evaluate_handler(
    State(service): State<Arc<LoanUnderwritingService>>,
    Json(payload): Json<Value>,
) -> Response {
    let decision = service.process_json(payload);
    let status = match decision.status {
        DecisionStatus::Error => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::OK,
    };
    (status, Json(decision)).into_response()
}

pub(crate) async fn verify_handler(
    State(service): State<Arc<LoanUnderwritingService>>,
    Json(payload): Json<Value>,
) -> Response {
    match LoanApplication::from_value(payload) {
        Ok(application) => {
            let verification = service.verify_kyc(&application);
            (StatusCode::OK, Json(verification)).into_response()
        }
        Err(err) => {
            let payload = json!({
                "error": err.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn policy_handler(
    State(service): State<Arc<LoanUnderwritingService>>,
) -> Response {
    (StatusCode::OK, Json(service.config().clone())).into_response()
}
