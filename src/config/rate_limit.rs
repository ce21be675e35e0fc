//! Rate limit configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Fixed-window limits applied per client IP.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Requests allowed in one window
    #[serde(default = "default_requests_per_window")]
    pub requests_per_window: u32,

    /// Window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u32,

    /// Key clients by X-Forwarded-For / X-Real-IP instead of the socket peer.
    /// Only safe behind a proxy that overwrites those headers.
    #[serde(default)]
    pub trust_forwarded_headers: bool,
}

impl RateLimitConfig {
    pub fn new(requests_per_window: u32, window_secs: u32) -> Self {
        Self {
            requests_per_window,
            window_secs,
            trust_forwarded_headers: false,
        }
    }

    pub fn with_trust_forwarded_headers(mut self, trust: bool) -> Self {
        self.trust_forwarded_headers = trust;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.requests_per_window == 0 {
            return Err(ValidationError::InvalidRateLimit);
        }
        if self.window_secs == 0 || self.window_secs > 86_400 {
            return Err(ValidationError::InvalidRateWindow);
        }
        Ok(())
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_window: default_requests_per_window(),
            window_secs: default_window_secs(),
            trust_forwarded_headers: false,
        }
    }
}

fn default_requests_per_window() -> u32 {
    60
}

fn default_window_secs() -> u32 {
    60
}
