use metrics_exporter_prometheus::PrometheusHandle;
use microfinance_ai::config::AppConfig;
use microfinance_ai::error::AppError;
use microfinance_ai::underwriting::LoanUnderwritingService;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Resolve the underwriting policy and assemble the pipeline with the bundled models.
pub(crate) fn build_service(config: &AppConfig) -> Result<LoanUnderwritingService, AppError> {
    let policy = config.underwriting.policy()?;
    if let Some(path) = &config.underwriting.policy_path {
        info!(path = %path.display(), "loaded underwriting policy");
    }
    Ok(LoanUnderwritingService::new(policy)?)
}
