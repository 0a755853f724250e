use crate::infra::build_service;
use clap::Args;
use microfinance_ai::config::AppConfig;
use microfinance_ai::error::AppError;
use microfinance_ai::telemetry;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Path to a JSON loan application
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Underwriting policy JSON (overrides UNDERWRITING_POLICY_PATH)
    #[arg(long)]
    pub(crate) policy: Option<PathBuf>,
    /// Print the human-readable summary instead of the JSON decision
    #[arg(long)]
    pub(crate) summary: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(policy) = args.policy {
        config.underwriting.policy_path = Some(policy);
    }

    telemetry::init(&config.telemetry)?;

    let service = build_service(&config)?;
    let raw = fs::read_to_string(&args.input)?;
    let payload: Value = serde_json::from_str(&raw)?;
    let decision = service.process_json(payload);

    if args.summary {
        println!("{}", decision.summary());
    } else {
        println!("{}", serde_json::to_string_pretty(&decision)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn evaluate_installs_tracing_before_scoring() {
        let input = std::env::temp_dir().join(format!(
            "microfinance-ai-api-{}-application.json",
            std::process::id()
        ));
        let application = json!({
            "kyc_documents": {
                "id_proof": "id.png",
                "address_proof": "address.png",
                "income_proof": "income.png"
            },
            "bank_statements": "statement.pdf"
        });
        fs::write(&input, application.to_string()).expect("application written");

        let result = run_evaluate(EvaluateArgs {
            input: input.clone(),
            policy: None,
            summary: true,
        });
        fs::remove_file(input).ok();

        result.expect("evaluation succeeds");
        assert!(tracing::dispatcher::has_been_set());
    }
}
