//! HTTP handlers for the phase endpoints.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::adapters::http::error::ApiError;
use crate::application::{
    DiscoverFactorsCommand, DiscoverFactorsHandler, EnrichPreferencesCommand,
    EnrichPreferencesHandler, GenerateScenariosCommand, GenerateScenariosHandler,
    LanguageModelGateway, ReactionAggregator, RecordReactionCommand, SynthesizeInsightsCommand,
    SynthesizeInsightsHandler,
};

use super::dto::{
    FactorsRequest, FactorsResponse, HealthResponse, PreferencesRequest, PreferencesResponse,
    ReactionRequest, ScenariosRequest, ScenariosResponse, StatusResponse, SummaryRequest,
    SummaryResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct PhaseHandlers {
    gateway: LanguageModelGateway,
    discover_handler: Arc<DiscoverFactorsHandler>,
    enrich_handler: Arc<EnrichPreferencesHandler>,
    scenarios_handler: Arc<GenerateScenariosHandler>,
    insights_handler: Arc<SynthesizeInsightsHandler>,
}

impl PhaseHandlers {
    /// Builds every phase handler around one shared gateway.
    pub fn new(gateway: LanguageModelGateway) -> Self {
        Self {
            discover_handler: Arc::new(DiscoverFactorsHandler::new(gateway.clone())),
            enrich_handler: Arc::new(EnrichPreferencesHandler::new(gateway.clone())),
            scenarios_handler: Arc::new(GenerateScenariosHandler::new(gateway.clone())),
            insights_handler: Arc::new(SynthesizeInsightsHandler::new(gateway.clone())),
            gateway,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// POST /phase0/factors
pub async fn discover_factors(
    State(handlers): State<PhaseHandlers>,
    payload: Result<Json<FactorsRequest>, JsonRejection>,
) -> Result<Json<FactorsResponse>, ApiError> {
    let Json(req) = payload?;
    let cmd = DiscoverFactorsCommand::new(req.topic);

    let factors = handlers.discover_handler.handle(cmd).await;
    Ok(Json(FactorsResponse { factors }))
}

/// POST /phase1/preferences
pub async fn enrich_preferences(
    State(handlers): State<PhaseHandlers>,
    payload: Result<Json<PreferencesRequest>, JsonRejection>,
) -> Result<Json<PreferencesResponse>, ApiError> {
    let Json(req) = payload?;
    let cmd = EnrichPreferencesCommand::new(req.preferences, req.topic)?;

    let preferences = handlers.enrich_handler.handle(cmd).await;
    Ok(Json(PreferencesResponse { preferences }))
}

/// POST /phase2/scenarios
pub async fn generate_scenarios(
    State(handlers): State<PhaseHandlers>,
    payload: Result<Json<ScenariosRequest>, JsonRejection>,
) -> Result<Json<ScenariosResponse>, ApiError> {
    let Json(req) = payload?;
    let cmd = GenerateScenariosCommand::new(req.preferences, req.topic)?;

    let scenarios = handlers.scenarios_handler.handle(cmd).await;
    Ok(Json(ScenariosResponse { scenarios }))
}

/// POST /phase3/reactions
///
/// The endpoint is stateless: each call records into a fresh aggregator and
/// returns only the narration for this reaction.
pub async fn record_reaction(
    State(handlers): State<PhaseHandlers>,
    payload: Result<Json<ReactionRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Json(req) = payload?;
    let cmd = RecordReactionCommand::new(req.into_reaction()?, None)?;

    let mut aggregator = ReactionAggregator::new(handlers.gateway.clone());
    let status = aggregator.record(cmd).await;
    Ok(Json(StatusResponse { status }))
}

/// POST /phase4/summary
pub async fn synthesize_insights(
    State(handlers): State<PhaseHandlers>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let Json(req) = payload?;
    let cmd =
        SynthesizeInsightsCommand::new(req.reactions, req.preferences, req.scenarios, req.topic)?;

    let summary = handlers.insights_handler.handle(cmd).await;
    Ok(Json(SummaryResponse { summary }))
}
