//! HTTP adapter - the JSON API over the reflection phases.
//!
//! One POST endpoint per phase plus a health check. The phase routes sit
//! behind the per-IP rate limiter; `/health` does not.

pub mod error;
pub mod middleware;
pub mod phases;

use axum::{
    http::{HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::application::LanguageModelGateway;
use crate::config::ServerConfig;

pub use error::{ApiError, ErrorResponse};
pub use middleware::{rate_limit_middleware, RateLimiterState};
pub use phases::{phase_routes, PhaseHandlers};

/// Builds the full application router.
pub fn router(
    server: &ServerConfig,
    gateway: LanguageModelGateway,
    limiter: RateLimiterState,
) -> Router {
    let phases = phase_routes(PhaseHandlers::new(gateway))
        .route_layer(from_fn_with_state(limiter, rate_limit_middleware));

    Router::new()
        .route("/health", get(phases::health))
        .merge(phases)
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TraceLayer::new_for_http())
}

/// Any origin when none are configured, otherwise exactly the listed ones.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}
