//! Configuration management for the `Nimbus` backend
//!
//! Handles loading configuration from files and environment variables, and
//! validates all settings. The orchestrator credential is environment-only
//! and required: startup fails without it.

use crate::NimbusError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the required orchestrator credential
pub const CREDENTIAL_VAR: &str = "GEMINI_API_KEY";

/// Root configuration structure for the `Nimbus` backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NimbusConfig {
    /// Upstream API configuration
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Tool provider server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Agent profile configuration
    #[serde(default)]
    pub agent: AgentConfig,
}

/// Upstream API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL for the National Weather Service API
    #[serde(default = "default_nws_base_url")]
    pub nws_base_url: String,
    /// Base URL for the Nominatim geocoding API
    #[serde(default = "default_nominatim_base_url")]
    pub nominatim_base_url: String,
    /// Request timeout in seconds, applied to every outbound call
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// User-Agent sent to both upstreams
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Tool provider server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the sidecar listens on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or compact)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Agent profile settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Model name the orchestrator drives
    #[serde(default = "default_model")]
    pub model: String,
}

// Default value functions
fn default_nws_base_url() -> String {
    crate::nws::NWS_BASE.to_string()
}

fn default_nominatim_base_url() -> String {
    crate::geocoding::NOMINATIM_BASE.to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_user_agent() -> String {
    format!("nimbus/{}", crate::VERSION)
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            nws_base_url: default_nws_base_url(),
            nominatim_base_url: default_nominatim_base_url(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
        }
    }
}

impl Default for NimbusConfig {
    fn default() -> Self {
        Self {
            upstream: UpstreamConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            agent: AgentConfig::default(),
        }
    }
}

impl NimbusConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from the specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with NIMBUS_ prefix
        builder = builder.add_source(
            Environment::with_prefix("NIMBUS")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: NimbusConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("nimbus").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(NimbusError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "compact"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(NimbusError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if self.upstream.timeout_seconds == 0 || self.upstream.timeout_seconds > 300 {
            return Err(NimbusError::config(
                "Upstream timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        for url in [
            &self.upstream.nws_base_url,
            &self.upstream.nominatim_base_url,
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(NimbusError::config(format!(
                    "Upstream base URL must be a valid HTTP or HTTPS URL, got '{url}'"
                ))
                .into());
            }
        }

        if self.upstream.user_agent.is_empty() {
            return Err(NimbusError::config("User agent must not be empty").into());
        }

        Ok(())
    }
}

/// Read the required orchestrator credential from the environment.
/// Absence is a fatal startup error, never a defaultable setting.
pub fn require_credential() -> Result<String> {
    match std::env::var(CREDENTIAL_VAR) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(NimbusError::config(format!(
            "{CREDENTIAL_VAR} environment variable is required"
        ))
        .into()),
    }
}
