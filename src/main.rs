//! Feel Forward HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use feel_forward::adapters::clock::SystemClock;
use feel_forward::adapters::http::{router, RateLimiterState};
use feel_forward::adapters::rate_limiter::InMemoryRateLimiter;
use feel_forward::application::LanguageModelGateway;
use feel_forward::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let gateway = LanguageModelGateway::new(config.ai.build_provider());
    if gateway.available() {
        tracing::info!(provider = ?config.ai.primary_provider, "language model configured");
    } else {
        tracing::warn!("no language model credential, serving deterministic fallbacks only");
    }

    let limiter = RateLimiterState::new(Arc::new(InMemoryRateLimiter::new(
        config.rate_limit,
        Arc::new(SystemClock),
    )))
    .with_trusted_forwarded_headers(config.rate_limit.trust_forwarded_headers);
    if config.rate_limit.trust_forwarded_headers {
        tracing::info!("rate limiter keys clients by forwarded headers");
    }

    let app = router(&config.server, gateway, limiter);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// `RUST_LOG` wins over the configured level. Production logs are JSON lines.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
