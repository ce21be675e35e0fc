//! Reflection module - the values flowing through the five phases and the
//! deterministic rules each phase falls back to.
//!
//! Nothing here talks to a language model; the application handlers decide
//! between the generative path and these rules.

mod factor;
mod insight_rules;
mod phase;
mod preference;
mod preference_defaults;
mod reaction;
mod scenario;
mod scenario_rules;

pub use factor::{default_catalog, total_factors, FactorCategory};
pub use insight_rules::{
    fallback_insights, EmotionalAverages, EngagementLevel, PreferenceReactionAlignment,
    NO_REACTIONS_INSIGHT,
};
pub use phase::Phase;
pub use preference::{
    by_importance, join_factors, Preference, PriorityTier, HIGH_PRIORITY_MIN, MEDIUM_PRIORITY_MIN,
};
pub use preference_defaults::{
    enrich_one, fallback_enrichment, lookup as lookup_factor_default, FactorDefault,
    FACTOR_DEFAULTS, KNOWN_FACTOR_TRADEOFF, UNKNOWN_FACTOR_LIMIT, UNKNOWN_FACTOR_TRADEOFF,
};
pub use reaction::{
    latest_for, mean_scores, round1, EmotionalTendency, Reaction, ReactionHistory,
    ReactionPatternSummary, ReactionReading,
};
pub use scenario::{ensure_unique_ids, Scenario, ScenarioKind};
pub use scenario_rules::{fallback_scenarios, is_job_topic};
