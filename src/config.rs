//! Configuration loading and logging initialization.
//!
//! Settings come from an optional `config.toml` plus environment variables.
//! A missing config file falls back to defaults so the relay can run from
//! environment variables alone (the usual deployment on a PaaS host).

use std::path::Path;

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

/// Fallback webhook secret, matching the value documented in the
/// TradingView alert template. Override with `WEBHOOK_SECRET`.
const DEFAULT_WEBHOOK_SECRET: &str = "tradingview_secret_2026";

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub webhook: WebhookConfig,
    pub telegram: TelegramSettings,
    pub logging: LoggingConfig,
}

/// HTTP server bind settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

/// Webhook validation settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct WebhookConfig {
    /// Shared secret expected in every alert payload.
    pub secret: Option<String>,
}

/// Telegram delivery settings. Credentials come from the environment
/// (`TELEGRAM_BOT_TOKEN`, `TELEGRAM_CHAT_ID`), not the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramSettings {
    /// Deliver alerts to Telegram. When disabled, alerts are logged only.
    pub enabled: bool,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// A missing file yields the default configuration; read or parse
    /// failures on an existing file are reported as errors.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        Ok(config)
    }

    /// Initialize the tracing subscriber from the logging section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Resolve the webhook secret: `WEBHOOK_SECRET` env var, then the
    /// config file, then the documented default.
    #[must_use]
    pub fn webhook_secret(&self) -> String {
        std::env::var("WEBHOOK_SECRET")
            .ok()
            .or_else(|| self.webhook.secret.clone())
            .unwrap_or_else(|| DEFAULT_WEBHOOK_SECRET.to_string())
    }

    /// Socket address string for the HTTP server.
    #[must_use]
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".into(),
            port: 5000,
        }
    }
}

impl Default for TelegramSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_binds_all_interfaces() {
        let config = Config::default();
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn default_config_enables_telegram() {
        let config = Config::default();
        assert!(config.telegram.enabled);
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let config = Config::load("does-not-exist.toml").unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [server]
            bind_address = "127.0.0.1"
            port = 8080

            [webhook]
            secret = "s3cret"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.webhook.secret.as_deref(), Some("s3cret"));
        // Unspecified sections keep their defaults
        assert!(config.telegram.enabled);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn parse_telegram_disabled() {
        let config: Config = toml::from_str(
            r#"
            [telegram]
            enabled = false
            "#,
        )
        .unwrap();

        assert!(!config.telegram.enabled);
    }
}
