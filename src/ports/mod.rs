//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the reflection core and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - language model completions
//! - `RateLimiter` - per-client request quotas
//! - `Clock` - current time for window arithmetic

mod ai_provider;
mod clock;
mod rate_limiter;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    RequestMetadata, TokenUsage,
};
pub use clock::Clock;
pub use rate_limiter::{
    RateLimitDenied, RateLimitError, RateLimitKey, RateLimitResult, RateLimitStatus,
    RateLimiter,
};
