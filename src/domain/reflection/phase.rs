//! Phase enum representing the five reflection phases.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five Feel Forward phases, numbered 0 through 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    FactorDiscovery,
    PreferenceDetailing,
    ScenarioGeneration,
    ReactionCapture,
    InsightSynthesis,
}

impl Phase {
    /// Returns all phases in canonical order.
    pub fn all() -> &'static [Phase] {
        &[
            Phase::FactorDiscovery,
            Phase::PreferenceDetailing,
            Phase::ScenarioGeneration,
            Phase::ReactionCapture,
            Phase::InsightSynthesis,
        ]
    }

    /// Returns the phase number (0-based, as used in route names).
    pub fn number(&self) -> u8 {
        match self {
            Phase::FactorDiscovery => 0,
            Phase::PreferenceDetailing => 1,
            Phase::ScenarioGeneration => 2,
            Phase::ReactionCapture => 3,
            Phase::InsightSynthesis => 4,
        }
    }

    /// Returns the next phase, if any.
    pub fn next(&self) -> Option<Phase> {
        Self::all().get(self.number() as usize + 1).copied()
    }

    /// Stable label used in logs and snapshots.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::FactorDiscovery => "factor_discovery",
            Phase::PreferenceDetailing => "preference_detailing",
            Phase::ScenarioGeneration => "scenario_generation",
            Phase::ReactionCapture => "reaction_capture",
            Phase::InsightSynthesis => "insight_synthesis",
        }
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::FactorDiscovery => "Factor Discovery",
            Phase::PreferenceDetailing => "Preference Detailing",
            Phase::ScenarioGeneration => "Scenario Generation",
            Phase::ReactionCapture => "Emotional Reactions",
            Phase::InsightSynthesis => "Insight Synthesis",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Phase {} - {}", self.number(), self.display_name())
    }
}
