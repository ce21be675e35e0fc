//! Rate limiting port for protecting the phase endpoints.
//!
//! Every phase call may reach a paid language model, so each client IP is held
//! to a fixed number of requests per window. Implementations decide where the
//! counters live.

use async_trait::async_trait;
use std::fmt;

use crate::domain::foundation::Timestamp;

/// Port for rate limiting operations.
///
/// Implementations must be safe for concurrent use and count with a
/// fixed-window algorithm.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Check if request is allowed, consuming one unit of quota if so.
    async fn check(&self, key: RateLimitKey) -> Result<RateLimitResult, RateLimitError>;
}

/// The client a quota is counted against.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct RateLimitKey {
    pub client_ip: String,
}

impl RateLimitKey {
    pub fn ip(ip: &str) -> Self {
        Self {
            client_ip: ip.to_string(),
        }
    }
}

impl fmt::Display for RateLimitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ip:{}", self.client_ip)
    }
}

/// Result of a rate limit check.
#[derive(Debug, Clone)]
pub enum RateLimitResult {
    /// Request is allowed; includes current status.
    Allowed(RateLimitStatus),
    /// Request is denied; includes when to come back.
    Denied(RateLimitDenied),
}

/// Quota left after an allowed request.
#[derive(Debug, Clone)]
pub struct RateLimitStatus {
    /// Maximum requests allowed in the window.
    pub limit: u32,
    /// Remaining requests in the current window.
    pub remaining: u32,
    /// When the current window resets.
    pub reset_at: Timestamp,
}

/// Details of a rate limit denial.
#[derive(Debug, Clone)]
pub struct RateLimitDenied {
    pub limit: u32,
    /// Seconds until the current window closes, at least 1.
    pub retry_after_secs: u32,
}

/// Errors that can occur during rate limiting operations.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    /// The key cannot identify a client.
    #[error("invalid key: {0}")]
    InvalidKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ip_key_displays_scope_prefix() {
        let key = RateLimitKey::ip("192.168.1.1");
        assert_eq!(key.client_ip, "192.168.1.1");
        assert_eq!(key.to_string(), "ip:192.168.1.1");
    }

    #[test]
    fn keys_for_the_same_ip_are_equal() {
        assert_eq!(RateLimitKey::ip("10.0.0.1"), RateLimitKey::ip("10.0.0.1"));
        assert_ne!(RateLimitKey::ip("10.0.0.1"), RateLimitKey::ip("10.0.0.2"));
    }
}
