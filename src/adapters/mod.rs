//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - language model providers (OpenAI, Anthropic, mock)
//! - `clock` - system and manual clocks
//! - `http` - axum router over the phase handlers
//! - `rate_limiter` - in-memory fixed-window limiter

pub mod ai;
pub mod clock;
pub mod http;
pub mod rate_limiter;
