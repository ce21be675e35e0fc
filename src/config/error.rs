//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid socket address {0}")]
    InvalidSocketAddr(String),

    #[error("{0} must not be blank when set")]
    BlankOverride(&'static str),

    #[error("AI base URL must start with http:// or https://")]
    InvalidBaseUrl,

    #[error("Rate limit requests_per_window must be at least 1")]
    InvalidRateLimit,

    #[error("Rate limit window_secs must be between 1 and 86400")]
    InvalidRateWindow,
}
