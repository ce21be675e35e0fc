//! Language model provider configuration

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::adapters::ai::{AnthropicConfig, AnthropicProvider, OpenAIConfig, OpenAIProvider};
use crate::ports::AIProvider;

use super::error::ValidationError;

/// Plain environment variable honoured when no prefixed OpenAI key is set.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// AI provider configuration
///
/// Every field is optional. With no key for the primary provider the service
/// runs on the deterministic fallbacks alone.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AiConfig {
    /// OpenAI API key
    pub openai_api_key: Option<SecretString>,

    /// Anthropic API key
    pub anthropic_api_key: Option<SecretString>,

    /// Which provider the gateway talks to
    #[serde(default)]
    pub primary_provider: AiProvider,

    /// Model name override for the primary provider
    pub model: Option<String>,

    /// API base URL override for the primary provider
    pub base_url: Option<String>,
}

/// AI provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    OpenAI,
    Anthropic,
}

impl AiConfig {
    /// Fills `openai_api_key` from `OPENAI_API_KEY` when it was not set via the prefix.
    pub fn apply_env_fallback(&mut self) {
        if self.has_openai() {
            return;
        }
        if let Ok(key) = std::env::var(OPENAI_API_KEY_ENV) {
            let key = key.trim();
            if !key.is_empty() {
                self.openai_api_key = Some(SecretString::new(key.to_string()));
            }
        }
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        has_key(&self.openai_api_key)
    }

    /// Check if Anthropic is configured
    pub fn has_anthropic(&self) -> bool {
        has_key(&self.anthropic_api_key)
    }

    /// True when the primary provider has a credential.
    pub fn is_configured(&self) -> bool {
        match self.primary_provider {
            AiProvider::OpenAI => self.has_openai(),
            AiProvider::Anthropic => self.has_anthropic(),
        }
    }

    /// Builds the primary provider, or `None` when it has no credential.
    ///
    /// A provider whose HTTP client cannot be built is logged and treated as
    /// absent so the service still starts in fallback mode.
    pub fn build_provider(&self) -> Option<Arc<dyn AIProvider>> {
        let built: Result<Arc<dyn AIProvider>, _> = match self.primary_provider {
            AiProvider::OpenAI => {
                let key = self.openai_api_key.as_ref().filter(|k| !k.expose_secret().is_empty())?;
                let mut config = OpenAIConfig::new(key.expose_secret().clone());
                if let Some(model) = &self.model {
                    config = config.with_model(model.clone());
                }
                if let Some(url) = &self.base_url {
                    config = config.with_base_url(url.clone());
                }
                OpenAIProvider::new(config).map(|p| Arc::new(p) as Arc<dyn AIProvider>)
            }
            AiProvider::Anthropic => {
                let key = self
                    .anthropic_api_key
                    .as_ref()
                    .filter(|k| !k.expose_secret().is_empty())?;
                let mut config = AnthropicConfig::new(key.expose_secret().clone());
                if let Some(model) = &self.model {
                    config = config.with_model(model.clone());
                }
                if let Some(url) = &self.base_url {
                    config = config.with_base_url(url.clone());
                }
                AnthropicProvider::new(config).map(|p| Arc::new(p) as Arc<dyn AIProvider>)
            }
        };

        match built {
            Ok(provider) => Some(provider),
            Err(err) => {
                tracing::error!(error = %err, "failed to build language model provider");
                None
            }
        }
    }

    /// Validate AI configuration
    ///
    /// A missing key is fine. Overrides, when given, must not be blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.model.as_ref().is_some_and(|m| m.trim().is_empty()) {
            return Err(ValidationError::BlankOverride("ai.model"));
        }
        if let Some(url) = &self.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ValidationError::InvalidBaseUrl);
            }
        }
        Ok(())
    }
}

fn has_key(key: &Option<SecretString>) -> bool {
    key.as_ref().is_some_and(|k| !k.expose_secret().trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> Option<SecretString> {
        Some(SecretString::new(s.to_string()))
    }

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.primary_provider, AiProvider::OpenAI);
        assert!(!config.is_configured());
        assert!(config.build_provider().is_none());
    }

    #[test]
    fn test_has_provider_checks() {
        let config = AiConfig {
            openai_api_key: secret("sk-xxx"),
            anthropic_api_key: secret("  "),
            ..Default::default()
        };
        assert!(config.has_openai());
        assert!(!config.has_anthropic());
    }

    #[test]
    fn test_primary_without_key_is_not_configured() {
        let config = AiConfig {
            primary_provider: AiProvider::Anthropic,
            openai_api_key: secret("sk-xxx"),
            ..Default::default()
        };
        assert!(!config.is_configured());
        assert!(config.build_provider().is_none());
    }

    #[test]
    fn test_builds_primary_provider_with_overrides() {
        let config = AiConfig {
            openai_api_key: secret("sk-xxx"),
            model: Some("gpt-4o-mini".to_string()),
            ..Default::default()
        };
        let provider = config.build_provider().expect("provider");
        let info = provider.provider_info();
        assert_eq!(info.name, "openai");
        assert_eq!(info.model, "gpt-4o-mini");
    }

    #[test]
    fn test_missing_key_is_valid() {
        assert!(AiConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_blank_model_and_bad_url() {
        let config = AiConfig {
            model: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AiConfig {
            base_url: Some("api.openai.com".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
