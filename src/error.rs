//! Error types and handling for the `Nimbus` backend
//!
//! These errors cover process-level faults: configuration, validation, and
//! startup. Upstream degradation during a tool call is carried by
//! [`crate::outcome::Outcome`] instead, so it never surfaces as an `Err`.

use thiserror::Error;

/// Main error type for the `Nimbus` backend
#[derive(Error, Debug)]
pub enum NimbusError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl NimbusError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            NimbusError::Config { .. } => {
                "Configuration error. Please check your config file and environment.".to_string()
            }
            NimbusError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            NimbusError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            NimbusError::General { message } => message.clone(),
        }
    }
}
