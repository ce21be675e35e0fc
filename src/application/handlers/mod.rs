//! Phase handlers.
//!
//! Each handler owns one phase. It tries the language model when one is
//! configured and otherwise, or on any `ModelError`, returns the
//! deterministic result. Handlers never fail.

mod discover_factors;
mod enrich_preferences;
mod generate_scenarios;
mod record_reaction;
mod synthesize_insights;

pub use discover_factors::{DiscoverFactorsCommand, DiscoverFactorsHandler};
pub use enrich_preferences::{EnrichPreferencesCommand, EnrichPreferencesHandler};
pub use generate_scenarios::{
    preference_summary, GenerateScenariosCommand, GenerateScenariosHandler, GENERATIVE_BATCH_SIZE,
};
pub use record_reaction::{ReactionAggregator, RecordReactionCommand};
pub use synthesize_insights::{
    analysis_context, SynthesizeInsightsCommand, SynthesizeInsightsHandler,
};

use crate::domain::reflection::Phase;

use super::gateway::ModelError;

fn log_fallback(phase: Phase, err: &ModelError) {
    tracing::warn!(phase = phase.label(), error = %err, "model unavailable, using fallback");
}
