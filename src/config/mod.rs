use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::appraisal::PricingConfig;

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
    pub pricing: PricingConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            pricing: load_pricing()?,
        })
    }
}

fn load_pricing() -> Result<PricingConfig, ConfigError> {
    let mut pricing = PricingConfig::default();

    if let Some(rate) = read_rate("APP_EXCHANGE_RATE")? {
        if rate <= 0.0 {
            return Err(ConfigError::InvalidRate {
                name: "APP_EXCHANGE_RATE",
            });
        }
        pricing.exchange_rate = rate;
    }

    if let Some(rate) = read_rate("APP_DEPRECIATION_RATE")? {
        if !(0.0..1.0).contains(&rate) {
            return Err(ConfigError::InvalidRate {
                name: "APP_DEPRECIATION_RATE",
            });
        }
        pricing.depreciation_rate = rate;
    }

    if let Some(premium) = read_rate("APP_COLLECTOR_PREMIUM")? {
        if premium < 0.0 {
            return Err(ConfigError::InvalidRate {
                name: "APP_COLLECTOR_PREMIUM",
            });
        }
        pricing.collector_premium = premium;
    }

    if let Ok(raw) = env::var("APP_REFERENCE_YEAR") {
        let year = raw
            .trim()
            .parse::<i32>()
            .map_err(|_| ConfigError::InvalidYear)?;
        pricing.reference_year = Some(year);
    }

    Ok(pricing)
}

fn read_rate(name: &'static str) -> Result<Option<f64>, ConfigError> {
    match env::var(name) {
        Ok(raw) => {
            let value = raw
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidRate { name })?;
            if !value.is_finite() {
                return Err(ConfigError::InvalidRate { name });
            }
            Ok(Some(value))
        }
        Err(_) => Ok(None),
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

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidRate { name: &'static str },
    InvalidYear,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidRate { name } => {
                write!(f, "{name} must be a finite number in its valid range")
            }
            ConfigError::InvalidYear => write!(f, "APP_REFERENCE_YEAR must be a valid year"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
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
        env::remove_var("APP_EXCHANGE_RATE");
        env::remove_var("APP_DEPRECIATION_RATE");
        env::remove_var("APP_COLLECTOR_PREMIUM");
        env::remove_var("APP_REFERENCE_YEAR");
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
        assert_eq!(config.pricing, PricingConfig::default());
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
    fn pricing_overrides_are_applied() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_EXCHANGE_RATE", "15500");
        env::set_var("APP_DEPRECIATION_RATE", "0.08");
        env::set_var("APP_REFERENCE_YEAR", "2024");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.pricing.exchange_rate, 15_500.0);
        assert_eq!(config.pricing.depreciation_rate, 0.08);
        assert_eq!(config.pricing.reference_year, Some(2024));
    }

    #[test]
    fn rejects_depreciation_rate_of_one_or_more() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_DEPRECIATION_RATE", "1.0");
        let err = AppConfig::load().expect_err("full depreciation is rejected");
        assert!(matches!(
            err,
            ConfigError::InvalidRate {
                name: "APP_DEPRECIATION_RATE"
            }
        ));
    }
}
