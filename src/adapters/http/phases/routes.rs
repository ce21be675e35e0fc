//! HTTP routes for the phase endpoints.

use axum::{routing::post, Router};

use super::handlers::{
    discover_factors, enrich_preferences, generate_scenarios, record_reaction,
    synthesize_insights, PhaseHandlers,
};

/// Creates the router with one POST endpoint per phase.
pub fn phase_routes(handlers: PhaseHandlers) -> Router {
    Router::new()
        .route("/phase0/factors", post(discover_factors))
        .route("/phase1/preferences", post(enrich_preferences))
        .route("/phase2/scenarios", post(generate_scenarios))
        .route("/phase3/reactions", post(record_reaction))
        .route("/phase4/summary", post(synthesize_insights))
        .with_state(handlers)
}
