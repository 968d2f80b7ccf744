use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub model: ModelConfig,
    pub limits: SubmissionLimits,
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

        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|value| !value.trim().is_empty());
        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let api_base =
            env::var("GEMINI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let timeout_secs = parse_number::<u64>("GEMINI_TIMEOUT_SECS", 60)?;

        let min_chars = parse_number::<usize>("AUDIT_MIN_CHARS", 100)?;
        let max_chars = parse_number::<usize>("AUDIT_MAX_CHARS", 8000)?;
        if max_chars < min_chars {
            return Err(ConfigError::InvalidLimits {
                min_chars,
                max_chars,
            });
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            model: ModelConfig {
                api_key,
                model,
                api_base,
                timeout: Duration::from_secs(timeout_secs),
            },
            limits: SubmissionLimits {
                min_chars,
                max_chars,
            },
        })
    }
}

fn parse_number<T: std::str::FromStr>(
    variable: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match env::var(variable) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { variable, raw }),
        Err(_) => Ok(default),
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Connection settings for the generative model.
#[derive(Clone)]
pub struct ModelConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub timeout: Duration,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

// Keeps the credential out of logs.
impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Length bounds applied to assessment text before it reaches the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionLimits {
    pub min_chars: usize,
    pub max_chars: usize,
}

impl Default for SubmissionLimits {
    fn default() -> Self {
        Self {
            min_chars: 100,
            max_chars: 8000,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { variable: &'static str, raw: String },
    InvalidLimits { min_chars: usize, max_chars: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { variable, raw } => {
                write!(f, "{variable} must be a non-negative integer, got '{raw}'")
            }
            ConfigError::InvalidLimits {
                min_chars,
                max_chars,
            } => write!(
                f,
                "AUDIT_MAX_CHARS ({max_chars}) must not be smaller than AUDIT_MIN_CHARS ({min_chars})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::InvalidLimits { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for variable in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "GEMINI_API_KEY",
            "GEMINI_MODEL",
            "GEMINI_API_BASE",
            "GEMINI_TIMEOUT_SECS",
            "AUDIT_MIN_CHARS",
            "AUDIT_MAX_CHARS",
        ] {
            env::remove_var(variable);
        }
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
        assert!(config.model.api_key.is_none());
        assert_eq!(config.model.model, DEFAULT_MODEL);
        assert_eq!(config.model.timeout, Duration::from_secs(60));
        assert_eq!(config.limits, SubmissionLimits::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn reads_model_and_limit_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "production");
        env::set_var("GEMINI_API_KEY", "secret-key");
        env::set_var("GEMINI_MODEL", "gemini-2.0-flash");
        env::set_var("GEMINI_TIMEOUT_SECS", "15");
        env::set_var("AUDIT_MIN_CHARS", "50");
        env::set_var("AUDIT_MAX_CHARS", "4000");

        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.model.api_key.as_deref(), Some("secret-key"));
        assert_eq!(config.model.model, "gemini-2.0-flash");
        assert_eq!(config.model.timeout, Duration::from_secs(15));
        assert_eq!(
            config.limits,
            SubmissionLimits {
                min_chars: 50,
                max_chars: 4000
            }
        );
        assert!(!format!("{:?}", config.model).contains("secret-key"));
        reset_env();
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("GEMINI_API_KEY", "   ");
        let config = AppConfig::load().expect("config loads");
        assert!(config.model.api_key.is_none());
        reset_env();
    }

    #[test]
    fn rejects_non_numeric_limits() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("AUDIT_MAX_CHARS", "lots");
        let error = AppConfig::load().expect_err("invalid number");
        assert!(matches!(
            error,
            ConfigError::InvalidNumber {
                variable: "AUDIT_MAX_CHARS",
                ..
            }
        ));
        reset_env();
    }

    #[test]
    fn rejects_inverted_limits() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("AUDIT_MIN_CHARS", "500");
        env::set_var("AUDIT_MAX_CHARS", "200");
        let error = AppConfig::load().expect_err("inverted limits");
        assert!(matches!(error, ConfigError::InvalidLimits { .. }));
        reset_env();
    }
}
