use crate::alerts::domain::ExpiryBoundary;
use crate::alerts::windows::{ValidationError, WindowSettings, DEFAULT_WINDOWS};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

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
    pub alerts: AlertConfig,
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
        let log_format = LogFormat::from_str(
            &env::var("APP_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string()),
        );

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                log_format,
            },
            alerts: AlertConfig::from_env()?,
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
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Compact,
        }
    }
}

/// Global alert defaults applied to tenants without an override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertConfig {
    pub default_windows: WindowSettings,
    pub expiry_boundary: ExpiryBoundary,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            default_windows: DEFAULT_WINDOWS,
            expiry_boundary: ExpiryBoundary::default(),
        }
    }
}

impl AlertConfig {
    /// Reads only the alert variables; server and telemetry settings are not
    /// consulted.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    fn from_env() -> Result<Self, ConfigError> {
        let default_windows = WindowSettings {
            window30: window_var("CRONOS_WINDOW_30", DEFAULT_WINDOWS.window30)?,
            window60: window_var("CRONOS_WINDOW_60", DEFAULT_WINDOWS.window60)?,
            window90: window_var("CRONOS_WINDOW_90", DEFAULT_WINDOWS.window90)?,
        };
        default_windows
            .validate()
            .map_err(ConfigError::InvalidDefaultWindows)?;

        let expiry_boundary = match env::var("CRONOS_EXPIRY_BOUNDARY") {
            Ok(value) => ExpiryBoundary::from_code(&value)
                .ok_or(ConfigError::InvalidExpiryBoundary { value })?,
            Err(_) => ExpiryBoundary::default(),
        };

        Ok(Self {
            default_windows,
            expiry_boundary,
        })
    }
}

fn window_var(name: &'static str, default: i64) -> Result<i64, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<i64>()
            .map_err(|_| ConfigError::InvalidWindow { name, value }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidWindow { name: &'static str, value: String },
    InvalidDefaultWindows(ValidationError),
    InvalidExpiryBoundary { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidWindow { name, value } => {
                write!(f, "{name} must be a whole number of days, got '{value}'")
            }
            ConfigError::InvalidDefaultWindows(err) => {
                write!(f, "default alert windows rejected: {err}")
            }
            ConfigError::InvalidExpiryBoundary { value } => write!(
                f,
                "CRONOS_EXPIRY_BOUNDARY must be 'after_due_date' or 'on_due_date', got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidDefaultWindows(err) => Some(err),
            ConfigError::InvalidPort
            | ConfigError::InvalidWindow { .. }
            | ConfigError::InvalidExpiryBoundary { .. } => None,
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
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_LOG_FORMAT");
        env::remove_var("CRONOS_WINDOW_30");
        env::remove_var("CRONOS_WINDOW_60");
        env::remove_var("CRONOS_WINDOW_90");
        env::remove_var("CRONOS_EXPIRY_BOUNDARY");
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
        assert_eq!(config.telemetry.log_format, LogFormat::Compact);
        assert_eq!(config.alerts, AlertConfig::default());
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
    fn reads_alert_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("CRONOS_WINDOW_30", "15");
        env::set_var("CRONOS_WINDOW_90", "120");
        env::set_var("CRONOS_EXPIRY_BOUNDARY", "on_due_date");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(
            config.alerts.default_windows,
            WindowSettings {
                window30: 15,
                window60: 60,
                window90: 120,
            }
        );
        assert_eq!(config.alerts.expiry_boundary, ExpiryBoundary::OnDueDate);
        reset_env();
    }

    #[test]
    fn rejects_non_positive_default_windows() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("CRONOS_WINDOW_60", "0");
        let error = AppConfig::load().expect_err("zero window rejected");
        assert!(matches!(error, ConfigError::InvalidDefaultWindows(_)));
        reset_env();
    }

    #[test]
    fn rejects_unknown_expiry_boundary() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("CRONOS_EXPIRY_BOUNDARY", "sometimes");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidExpiryBoundary { .. })
        ));
        reset_env();
    }

    #[test]
    fn alert_config_loads_without_valid_server_settings() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PORT", "not-a-port");
        env::set_var("CRONOS_WINDOW_30", "20");

        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidPort)));
        let alerts = AlertConfig::load().expect("alert settings load");
        assert_eq!(alerts.default_windows.window30, 20);
        assert_eq!(alerts.expiry_boundary, ExpiryBoundary::AfterDueDate);
        reset_env();
    }
}
