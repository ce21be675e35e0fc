//! Language model gateway.
//!
//! The single seam between the reflection phases and whichever provider is
//! configured. One call is one request: no retries, no streaming. The phase
//! deadline is enforced here with `tokio::time::timeout`, independent of any
//! HTTP client timeout inside the provider.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

use crate::domain::reflection::Phase;
use crate::ports::{AIError, AIProvider, CompletionRequest, FinishReason, RequestMetadata};

/// Why a generative call produced nothing usable.
///
/// Phase handlers never surface this; it selects the deterministic path.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("no language model credential configured")]
    NotConfigured,

    #[error("model call exceeded {0:?}")]
    Timeout(Duration),

    #[error("provider error: {0}")]
    Provider(#[from] AIError),

    #[error("malformed model output: {0}")]
    MalformedOutput(String),
}

impl ModelError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        ModelError::MalformedOutput(reason.into())
    }
}

/// Sampling and deadline settings for one call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub timeout: Duration,
}

impl CompletionOptions {
    /// Defaults tuned per phase.
    pub fn for_phase(phase: Phase) -> Self {
        match phase {
            Phase::FactorDiscovery => Self {
                temperature: None,
                max_tokens: None,
                timeout: Duration::from_secs(10),
            },
            Phase::PreferenceDetailing => Self {
                temperature: Some(0.7),
                max_tokens: None,
                timeout: Duration::from_secs(30),
            },
            Phase::ScenarioGeneration => Self {
                temperature: Some(0.8),
                max_tokens: None,
                timeout: Duration::from_secs(30),
            },
            Phase::ReactionCapture => Self {
                temperature: Some(0.7),
                max_tokens: Some(150),
                timeout: Duration::from_secs(10),
            },
            Phase::InsightSynthesis => Self {
                temperature: Some(0.7),
                max_tokens: Some(500),
                timeout: Duration::from_secs(15),
            },
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Wraps an optional provider. Absence is a normal operating mode.
#[derive(Clone, Default)]
pub struct LanguageModelGateway {
    provider: Option<Arc<dyn AIProvider>>,
}

impl std::fmt::Debug for LanguageModelGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageModelGateway")
            .field("provider", &self.provider.as_ref().map(|p| p.provider_info().name))
            .finish()
    }
}

impl LanguageModelGateway {
    pub fn new(provider: Option<Arc<dyn AIProvider>>) -> Self {
        Self { provider }
    }

    pub fn with_provider(provider: Arc<dyn AIProvider>) -> Self {
        Self::new(Some(provider))
    }

    /// Gateway that always fails with `NotConfigured`.
    pub fn unconfigured() -> Self {
        Self::new(None)
    }

    /// True when a credential is configured.
    pub fn available(&self) -> bool {
        self.provider.is_some()
    }

    /// Sends one system prompt plus one user message and returns the trimmed reply.
    pub async fn complete(
        &self,
        phase: Phase,
        system_prompt: Option<&str>,
        user_content: &str,
        options: &CompletionOptions,
    ) -> Result<String, ModelError> {
        let provider = self.provider.as_ref().ok_or(ModelError::NotConfigured)?;

        let trace_id = Uuid::new_v4().to_string();
        let mut request =
            CompletionRequest::new(RequestMetadata::new(phase, trace_id.clone()), user_content);
        if let Some(system) = system_prompt {
            request = request.with_system_prompt(system);
        }
        if let Some(temperature) = options.temperature {
            request = request.with_temperature(temperature);
        }
        if let Some(max_tokens) = options.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }

        tracing::debug!(phase = phase.label(), trace_id = %trace_id, "calling language model");

        let response = tokio::time::timeout(options.timeout, provider.complete(request))
            .await
            .map_err(|_| ModelError::Timeout(options.timeout))??;

        tracing::debug!(
            phase = phase.label(),
            trace_id = %trace_id,
            tokens = response.usage.total_tokens,
            finish_reason = ?response.finish_reason,
            "language model replied"
        );

        match response.finish_reason {
            FinishReason::ContentFilter => {
                return Err(ModelError::malformed("reply withheld by content filter"))
            }
            FinishReason::Length => {
                tracing::warn!(phase = phase.label(), trace_id = %trace_id, "reply hit max_tokens");
            }
            FinishReason::Stop => {}
        }

        Ok(response.content.trim().to_string())
    }
}
