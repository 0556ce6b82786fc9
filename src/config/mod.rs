use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::workflows::lottery::{DrawStrategy, UnknownResidentPolicy};

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
    pub lottery: LotteryConfig,
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
        let ansi = env::var("APP_LOG_ANSI")
            .map(|value| matches!(value.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level, ansi },
            lottery: LotteryConfig::from_env()?,
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
    pub ansi: bool,
}

/// Where the roster and inventory come from and how draws behave by default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LotteryConfig {
    pub residents_csv: Option<PathBuf>,
    pub spaces_csv: Option<PathBuf>,
    pub default_strategy: DrawStrategy,
    pub unknown_residents: UnknownResidentPolicy,
    /// Fixed seed for reproducible sessions; entropy-seeded when unset.
    pub seed: Option<u64>,
}

impl LotteryConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let residents_csv = non_empty_var("LOTTERY_RESIDENTS_CSV").map(PathBuf::from);
        let spaces_csv = non_empty_var("LOTTERY_SPACES_CSV").map(PathBuf::from);

        let default_strategy = match non_empty_var("LOTTERY_DEFAULT_STRATEGY") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidStrategy { value })?,
            None => DrawStrategy::default(),
        };

        let unknown_residents = match non_empty_var("LOTTERY_UNKNOWN_RESIDENTS") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidUnknownResidentPolicy { value })?,
            None => UnknownResidentPolicy::default(),
        };

        let seed = match non_empty_var("LOTTERY_SEED") {
            Some(value) => Some(
                value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidSeed { value })?,
            ),
            None => None,
        };

        Ok(Self {
            residents_csv,
            spaces_csv,
            default_strategy,
            unknown_residents,
            seed,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidStrategy { value: String },
    InvalidUnknownResidentPolicy { value: String },
    InvalidSeed { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidStrategy { value } => write!(
                f,
                "LOTTERY_DEFAULT_STRATEGY must be 'matched' or 'direct', got '{}'",
                value
            ),
            ConfigError::InvalidUnknownResidentPolicy { value } => write!(
                f,
                "LOTTERY_UNKNOWN_RESIDENTS must be 'ignore' or 'reject', got '{}'",
                value
            ),
            ConfigError::InvalidSeed { value } => {
                write!(f, "LOTTERY_SEED must be a valid u64, got '{}'", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidStrategy { .. }
            | ConfigError::InvalidUnknownResidentPolicy { .. }
            | ConfigError::InvalidSeed { .. } => None,
        }
    }
}
