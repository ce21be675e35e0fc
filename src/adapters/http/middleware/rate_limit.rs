//! Rate limiting middleware for axum.
//!
//! Each client IP gets a fixed number of phase calls per window. The client is
//! the socket peer unless forwarded headers are explicitly trusted, since any
//! caller can write X-Forwarded-For. Status is reported in standard HTTP
//! headers:
//! - `X-RateLimit-Limit`: Maximum requests allowed in the window
//! - `X-RateLimit-Remaining`: Requests remaining in the current window
//! - `X-RateLimit-Reset`: Unix timestamp when the window resets
//! - `Retry-After`: Seconds to wait (only on 429 response)

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header::RETRY_AFTER, HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::ports::{RateLimitKey, RateLimitResult, RateLimitStatus, RateLimiter};

/// Rate limiter middleware state.
#[derive(Clone)]
pub struct RateLimiterState {
    limiter: Arc<dyn RateLimiter>,
    trust_forwarded_headers: bool,
}

impl RateLimiterState {
    /// Keys clients by socket address only.
    pub fn new(limiter: Arc<dyn RateLimiter>) -> Self {
        Self {
            limiter,
            trust_forwarded_headers: false,
        }
    }

    /// Keys clients by X-Forwarded-For / X-Real-IP when present. Enable only
    /// behind a proxy that sets those headers itself.
    pub fn with_trusted_forwarded_headers(mut self, trust: bool) -> Self {
        self.trust_forwarded_headers = trust;
        self
    }
}

/// Standard rate limit header names.
pub mod headers {
    use super::HeaderName;

    /// Maximum requests allowed in the window.
    pub static X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
    /// Requests remaining in the current window.
    pub static X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
    /// Unix timestamp when the window resets.
    pub static X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");
}

/// Per-IP rate limiting.
///
/// Requests with no identifiable client are passed through, as are requests
/// arriving while the limiter itself is failing.
pub async fn rate_limit_middleware(
    State(state): State<RateLimiterState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    let client_ip = if state.trust_forwarded_headers {
        extract_client_ip(&request, connect_info.as_ref())
    } else {
        connect_info.map(|ci| ci.0.ip().to_string())
    };
    let Some(client_ip) = client_ip else {
        return next.run(request).await;
    };

    let status = match state.limiter.check(RateLimitKey::ip(&client_ip)).await {
        Ok(RateLimitResult::Allowed(status)) => Some(status),
        Ok(RateLimitResult::Denied(denied)) => {
            tracing::info!(
                client_ip = %client_ip,
                retry_after_secs = denied.retry_after_secs,
                "rate limit exceeded"
            );
            return rate_limit_response(denied.limit, denied.retry_after_secs);
        }
        Err(e) => {
            tracing::warn!(client_ip = %client_ip, "rate limiter check failed: {}", e);
            None
        }
    };

    let mut response = next.run(request).await;
    if let Some(status) = status {
        add_rate_limit_headers(&mut response, &status);
    }
    response
}

/// Extract client IP from a request that came through a trusted proxy.
///
/// Order of precedence:
/// 1. X-Forwarded-For header (first IP in list)
/// 2. X-Real-IP header
/// 3. ConnectInfo socket address
fn extract_client_ip<B>(
    request: &axum::http::Request<B>,
    connect_info: Option<&ConnectInfo<SocketAddr>>,
) -> Option<String> {
    if let Some(forwarded) = request
        .headers()
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
    {
        // first entry is the originating client
        if let Some(first_ip) = forwarded.split(',').next().map(str::trim) {
            if !first_ip.is_empty() {
                return Some(first_ip.to_string());
            }
        }
    }

    if let Some(real_ip) = request
        .headers()
        .get("X-Real-IP")
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
    {
        return Some(real_ip.to_string());
    }

    connect_info.map(|ci| ci.0.ip().to_string())
}

/// Create a 429 Too Many Requests response.
fn rate_limit_response(limit: u32, retry_after_secs: u32) -> Response {
    let mut response = (
        StatusCode::TOO_MANY_REQUESTS,
        Json(ErrorResponse::new("Rate limit exceeded")),
    )
        .into_response();

    let headers = response.headers_mut();
    headers.insert(headers::X_RATELIMIT_LIMIT.clone(), HeaderValue::from(limit));
    headers.insert(headers::X_RATELIMIT_REMAINING.clone(), HeaderValue::from(0u32));
    headers.insert(RETRY_AFTER, HeaderValue::from(retry_after_secs));

    response
}

fn add_rate_limit_headers(response: &mut Response, status: &RateLimitStatus) {
    let headers = response.headers_mut();
    headers.insert(headers::X_RATELIMIT_LIMIT.clone(), HeaderValue::from(status.limit));
    headers.insert(
        headers::X_RATELIMIT_REMAINING.clone(),
        HeaderValue::from(status.remaining),
    );
    headers.insert(
        headers::X_RATELIMIT_RESET.clone(),
        HeaderValue::from(status.reset_at.as_unix_secs()),
    );
}
