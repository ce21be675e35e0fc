//! AI Provider Port - the one completion call a reflection phase makes.
//!
//! Every phase sends a single-turn exchange: an optional system prompt and one
//! block of user text. Vendors (OpenAI, Anthropic, the scripted mock used in
//! tests) translate that into their own wire format.
//!
//! Providers never retry and never stream. A failed call is reported as an
//! [`AIError`] and the calling phase switches to its rule-based output.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::reflection::Phase;

/// Port for language model completions.
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Sends one single-turn request.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError>;

    /// Vendor and model, for logs.
    fn provider_info(&self) -> ProviderInfo;
}

/// One single-turn completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Instructions placed ahead of the user text.
    pub system_prompt: Option<String>,
    /// The phase prompt: topic, preferences, scenario and so on.
    pub user_content: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub metadata: RequestMetadata,
}

impl CompletionRequest {
    pub fn new(metadata: RequestMetadata, user_content: impl Into<String>) -> Self {
        Self {
            system_prompt: None,
            user_content: user_content.into(),
            max_tokens: None,
            temperature: None,
            metadata,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// Which phase asked, and the id that ties its log lines together.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    pub phase: Phase,
    pub trace_id: String,
}

impl RequestMetadata {
    pub fn new(phase: Phase, trace_id: impl Into<String>) -> Self {
        Self {
            phase,
            trace_id: trace_id.into(),
        }
    }
}

/// Reply from a provider.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub content: String,
    pub usage: TokenUsage,
    pub model: String,
    pub finish_reason: FinishReason,
}

/// Token counts as reported by the vendor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Why generation ended.
///
/// The gateway logs truncated replies and rejects filtered ones, so a phase
/// never parses text the vendor withheld.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    /// Hit the max_tokens cap.
    Length,
    /// Vendor safety filter withheld the reply.
    ContentFilter,
}

/// Vendor and model name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub name: String,
    pub model: String,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// AI provider errors.
#[derive(Debug, thiserror::Error)]
pub enum AIError {
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// 5xx or vendor overload.
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("network error: {0}")]
    Network(String),

    /// Body did not match the vendor's documented shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Vendor rejected the request (400), or the client could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// HTTP client timeout, distinct from the phase deadline.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl AIError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
