//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `FEEL_FORWARD` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use feel_forward::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod ai;
mod error;
mod rate_limit;
mod server;

pub use ai::{AiConfig, AiProvider, OPENAI_API_KEY_ENV};
pub use error::{ConfigError, ValidationError};
pub use rate_limit::RateLimitConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// service in fallback mode.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Language model provider configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// Per-client request limits
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `FEEL_FORWARD` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    /// 5. Falls back to plain `OPENAI_API_KEY` for the OpenAI credential
    ///
    /// # Environment Variable Format
    ///
    /// - `FEEL_FORWARD__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `FEEL_FORWARD__AI__PRIMARY_PROVIDER=anthropic` -> `ai.primary_provider`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config: AppConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("FEEL_FORWARD")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.ai.apply_env_fallback();
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found, section by section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.rate_limit.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "FEEL_FORWARD__SERVER__PORT",
        "FEEL_FORWARD__SERVER__ENVIRONMENT",
        "FEEL_FORWARD__AI__OPENAI_API_KEY",
        "FEEL_FORWARD__AI__PRIMARY_PROVIDER",
        "FEEL_FORWARD__RATE_LIMIT__REQUESTS_PER_WINDOW",
        "FEEL_FORWARD__RATE_LIMIT__TRUST_FORWARDED_HEADERS",
        OPENAI_API_KEY_ENV,
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_empty_environment_loads_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.rate_limit, RateLimitConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_values_override_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("FEEL_FORWARD__SERVER__PORT", "3000");
        env::set_var("FEEL_FORWARD__SERVER__ENVIRONMENT", "production");
        env::set_var("FEEL_FORWARD__RATE_LIMIT__REQUESTS_PER_WINDOW", "5");
        env::set_var("FEEL_FORWARD__AI__PRIMARY_PROVIDER", "anthropic");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
        assert_eq!(config.rate_limit.requests_per_window, 5);
        assert_eq!(config.ai.primary_provider, AiProvider::Anthropic);
    }

    #[test]
    fn test_forwarded_headers_are_trusted_only_when_enabled() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        assert!(!AppConfig::load().unwrap().rate_limit.trust_forwarded_headers);

        env::set_var("FEEL_FORWARD__RATE_LIMIT__TRUST_FORWARDED_HEADERS", "true");
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().rate_limit.trust_forwarded_headers);
    }

    #[test]
    fn test_plain_openai_key_is_honoured() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var(OPENAI_API_KEY_ENV, "sk-plain");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.ai.has_openai());
        assert!(config.ai.is_configured());
    }

    #[test]
    fn test_missing_ai_key_is_not_a_validation_error() {
        let config = AppConfig::default();
        assert!(!config.ai.is_configured());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_reports_first_failing_section() {
        let mut config = AppConfig::default();
        config.rate_limit.window_secs = 0;
        assert_eq!(config.validate(), Err(ValidationError::InvalidRateWindow));

        config.server.port = 0;
        assert_eq!(config.validate(), Err(ValidationError::InvalidPort));
    }
}
