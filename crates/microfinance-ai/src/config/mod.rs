use std::env;
use std::fmt;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use crate::underwriting::{PolicyError, UnderwritingConfig};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the underwriting service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub underwriting: UnderwritingSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let policy_path = env::var("UNDERWRITING_POLICY_PATH")
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            underwriting: UnderwritingSettings { policy_path },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the underwriting policy (weights, thresholds, tiers) comes from.
#[derive(Debug, Clone, Default)]
pub struct UnderwritingSettings {
    pub policy_path: Option<PathBuf>,
}

impl UnderwritingSettings {
    /// Resolve the policy, falling back to the built-in defaults when no file is configured.
    pub fn policy(&self) -> Result<UnderwritingConfig, ConfigError> {
        match &self.policy_path {
            Some(path) => load_policy_file(path),
            None => Ok(UnderwritingConfig::default()),
        }
    }
}

/// Read and validate a JSON underwriting policy.
pub fn load_policy_file(path: &Path) -> Result<UnderwritingConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::PolicyFile {
        path: path.to_path_buf(),
        source,
    })?;

    let policy: UnderwritingConfig =
        serde_json::from_str(&raw).map_err(|source| ConfigError::PolicyFormat {
            path: path.to_path_buf(),
            source,
        })?;

    policy.validate().map_err(ConfigError::InvalidPolicy)?;
    Ok(policy)
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    PolicyFile {
        path: PathBuf,
        source: std::io::Error,
    },
    PolicyFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidPolicy(PolicyError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::PolicyFile { path, .. } => {
                write!(f, "unable to read underwriting policy {}", path.display())
            }
            ConfigError::PolicyFormat { path, source } => {
                write!(
                    f,
                    "underwriting policy {} is not valid JSON: {}",
                    path.display(),
                    source
                )
            }
            ConfigError::InvalidPolicy(err) => write!(f, "invalid underwriting policy: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::PolicyFile { source, .. } => Some(source),
            ConfigError::PolicyFormat { source, .. } => Some(source),
            ConfigError::InvalidPolicy(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("UNDERWRITING_POLICY_PATH");
    }

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("microfinance-ai-{}-{name}", std::process::id()));
        fs::write(&path, contents).expect("scratch policy written");
        path
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.underwriting.policy_path.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn rejects_non_numeric_port() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PORT", "eighty");
        let err = AppConfig::load().expect_err("port must be numeric");
        assert!(matches!(err, ConfigError::InvalidPort));
        reset_env();
    }

    #[test]
    fn missing_policy_path_falls_back_to_defaults() {
        let settings = UnderwritingSettings::default();
        let policy = settings.policy().expect("defaults resolve");
        assert_eq!(policy, UnderwritingConfig::default());
    }

    #[test]
    fn policy_file_overrides_decision_weights() {
        let mut policy = UnderwritingConfig::default();
        policy.decision_weights.credit = 0.6;
        policy.decision_weights.esg = 0.2;
        let path = scratch_file(
            "override.json",
            &serde_json::to_string(&policy).expect("policy serializes"),
        );

        let loaded = load_policy_file(&path).expect("policy loads");
        assert_eq!(loaded.decision_weights.credit, 0.6);
        assert_eq!(loaded.decision_weights.esg, 0.2);
        fs::remove_file(path).ok();
    }

    #[test]
    fn policy_file_with_unbalanced_weights_is_rejected() {
        let mut policy = UnderwritingConfig::default();
        policy.credit_weights.traditional = 0.9;
        let path = scratch_file(
            "unbalanced.json",
            &serde_json::to_string(&policy).expect("policy serializes"),
        );

        let err = load_policy_file(&path).expect_err("weights must sum to one");
        assert!(matches!(err, ConfigError::InvalidPolicy(_)));
        fs::remove_file(path).ok();
    }

    #[test]
    fn unreadable_policy_file_reports_path() {
        let path = PathBuf::from("/nonexistent/underwriting-policy.json");
        let err = load_policy_file(&path).expect_err("file is missing");
        assert!(err.to_string().contains("underwriting-policy.json"));
    }
}
