//! In-memory rate limiter.
//!
//! Uses a fixed-window counter per key held in a HashMap. Counters live in
//! process memory, so each server instance limits independently. Windows that
//! have closed are swept out once the map grows past a threshold, so one-off
//! clients do not accumulate.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::RateLimitConfig;
use crate::domain::foundation::Timestamp;
use crate::ports::{
    Clock, RateLimitDenied, RateLimitError, RateLimitKey, RateLimitResult, RateLimitStatus,
    RateLimiter,
};

/// Tracked keys above which expired windows are swept on the next check.
pub const DEFAULT_SWEEP_THRESHOLD: usize = 1024;

/// Fixed-window rate limiter backed by process memory.
///
/// The clock is injected so window expiry can be driven in tests.
pub struct InMemoryRateLimiter {
    config: RateLimitConfig,
    clock: Arc<dyn Clock>,
    windows: Arc<RwLock<HashMap<RateLimitKey, WindowState>>>,
    sweep_threshold: usize,
}

#[derive(Debug, Clone, Copy)]
struct WindowState {
    /// Requests counted in the current window.
    count: u32,
    /// Unix seconds when the current window opened.
    window_start: u64,
}

impl WindowState {
    fn ends_at(&self, window_secs: u32) -> u64 {
        self.window_start + u64::from(window_secs)
    }
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            windows: Arc::new(RwLock::new(HashMap::new())),
            sweep_threshold: DEFAULT_SWEEP_THRESHOLD,
        }
    }

    /// Overrides how many keys may be tracked before expired ones are swept.
    pub fn with_sweep_threshold(mut self, threshold: usize) -> Self {
        self.sweep_threshold = threshold;
        self
    }

    /// Number of clients currently holding a window.
    pub async fn tracked_keys(&self) -> usize {
        self.windows.read().await.len()
    }

    fn now_secs(&self) -> u64 {
        self.clock.now().as_unix_secs()
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: RateLimitKey) -> Result<RateLimitResult, RateLimitError> {
        if key.client_ip.is_empty() {
            return Err(RateLimitError::InvalidKey(key.to_string()));
        }

        let limit = self.config.requests_per_window;
        let window_secs = self.config.window_secs;
        let now = self.now_secs();

        let mut windows = self.windows.write().await;

        if windows.len() >= self.sweep_threshold && !windows.contains_key(&key) {
            let before = windows.len();
            windows.retain(|_, state| now < state.ends_at(window_secs));
            tracing::debug!(evicted = before - windows.len(), "swept expired rate limit windows");
        }

        let state = windows.entry(key.clone()).or_insert(WindowState {
            count: 0,
            window_start: now,
        });

        if now >= state.ends_at(window_secs) {
            state.count = 0;
            state.window_start = now;
        }

        if state.count >= limit {
            let retry_after = state.ends_at(window_secs).saturating_sub(now) as u32;
            tracing::debug!(key = %key, retry_after, "rate limit denied");

            return Ok(RateLimitResult::Denied(RateLimitDenied {
                limit,
                retry_after_secs: retry_after.max(1),
            }));
        }

        state.count += 1;

        Ok(RateLimitResult::Allowed(RateLimitStatus {
            limit,
            remaining: limit.saturating_sub(state.count),
            reset_at: Timestamp::from_unix_secs(state.ends_at(window_secs)),
        }))
    }
}
