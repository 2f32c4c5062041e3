//! Configuration module for loading and parsing TOML configuration files.

use crate::market::SessionHours;
use chrono::NaiveTime;
use chrono_tz::Tz;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse TOML configuration.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Invalid configuration value.
    #[error("invalid config value: {0}")]
    InvalidValue(String),
    /// Provider client could not be built from the configuration.
    #[error("failed to build provider client: {0}")]
    Client(#[from] market_data_client::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Upstream data provider configuration.
    pub provider: ProviderConfig,
    /// Exchange calendar configuration.
    pub market: MarketConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port number to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Upstream data provider configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base URL of the options endpoint.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// User-Agent sent upstream.
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query2.finance.yahoo.com".to_string(),
            timeout_secs: 10,
            user_agent: concat!("option-quote-lookup/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ProviderConfig {
    /// Request timeout as a `Duration`.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Exchange calendar configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// IANA timezone of the exchange.
    pub timezone: String,
    /// Session open, `HH:MM` local time.
    pub open: String,
    /// Session close, `HH:MM` local time.
    pub close: String,
    /// Absolute tolerance when matching strikes.
    pub strike_tolerance: f64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            timezone: "America/New_York".to_string(),
            open: "09:30".to_string(),
            close: "16:00".to_string(),
            strike_tolerance: 1e-6,
        }
    }
}

impl MarketConfig {
    /// Parses the configured timezone.
    ///
    /// # Errors
    /// Returns error if the name is not a known IANA zone.
    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ConfigError::InvalidValue(format!("unknown timezone {}", self.timezone)))
    }

    /// Parses the configured session bounds.
    ///
    /// # Errors
    /// Returns error if either bound is not `HH:MM` or open is after close.
    pub fn session_hours(&self) -> Result<SessionHours, ConfigError> {
        let open = parse_hhmm(&self.open)?;
        let close = parse_hhmm(&self.close)?;
        if open >= close {
            return Err(ConfigError::InvalidValue(format!(
                "market open {} must be before close {}",
                self.open, self.close
            )));
        }
        Ok(SessionHours { open, close })
    }
}

fn parse_hhmm(value: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| ConfigError::InvalidValue(format!("expected HH:MM, got {}", value)))
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file.
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Arguments
    /// * `content` - TOML content as string.
    ///
    /// # Errors
    /// Returns error if content cannot be parsed.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration values.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "provider base_url cannot be empty".to_string(),
            ));
        }
        if self.provider.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "provider timeout_secs must be positive".to_string(),
            ));
        }
        if !self.market.strike_tolerance.is_finite() || self.market.strike_tolerance < 0.0 {
            return Err(ConfigError::InvalidValue(
                "market strike_tolerance must be a non-negative number".to_string(),
            ));
        }
        self.market.tz()?;
        self.market.session_hours()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[server]
host = "127.0.0.1"
port = 3000

[provider]
base_url = "http://localhost:9000"
timeout_secs = 5
user_agent = "test-agent"

[market]
timezone = "America/Chicago"
open = "08:30"
close = "15:00"
strike_tolerance = 0.001
"#;

        let config = Config::parse(toml_content).expect("should parse");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.provider.base_url, "http://localhost:9000");
        assert_eq!(config.provider.timeout(), Duration::from_secs(5));
        assert_eq!(config.market.tz().unwrap(), chrono_tz::America::Chicago);
        let hours = config.market.session_hours().unwrap();
        assert_eq!(hours.open, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        assert_eq!(hours.close, NaiveTime::from_hms_opt(15, 0, 0).unwrap());
        assert_eq!(config.market.strike_tolerance, 0.001);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").expect("should parse");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.provider.timeout_secs, 10);
        assert_eq!(config.market.tz().unwrap(), chrono_tz::America::New_York);
        assert_eq!(config.market.session_hours().unwrap(), SessionHours::default());
    }

    #[test]
    fn test_partial_section() {
        let config = Config::parse("[server]\nport = 9999\n").expect("should parse");
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_validation_unknown_timezone() {
        let result = Config::parse("[market]\ntimezone = \"Mars/Olympus\"\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_validation_open_after_close() {
        let result = Config::parse("[market]\nopen = \"17:00\"\nclose = \"09:00\"\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_validation_bad_time_format() {
        let result = Config::parse("[market]\nopen = \"9.30am\"\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_validation_zero_timeout() {
        let mut config = Config::default();
        config.provider.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sample_config_file() {
        let config = Config::parse(include_str!("../config.toml")).expect("should parse");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.market.session_hours().unwrap(), SessionHours::default());
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("/nonexistent/quotes.toml");
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }
}
