//! HTTP adapter for the five reflection phases.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    FactorsRequest, FactorsResponse, HealthResponse, PreferencesRequest, PreferencesResponse,
    ReactionRequest, ScenariosRequest, ScenariosResponse, StatusResponse, SummaryRequest,
    SummaryResponse,
};
pub use handlers::{health, PhaseHandlers};
pub use routes::phase_routes;
