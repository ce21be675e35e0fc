//! Serializable snapshot of a reflection session.
//!
//! The core never persists snapshots itself. Callers store the JSON wherever
//! they like and hand it back to resume.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::foundation::{SessionId, SessionStatus, Timestamp};
use crate::domain::reflection::{total_factors, FactorCategory, Phase, Preference, Reaction, Scenario};

/// Format version written into every snapshot.
pub const SNAPSHOT_VERSION: &str = "1.0";

/// Counts shown alongside a snapshot without decoding its contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSummary {
    pub total_factors: usize,
    pub preferences_count: usize,
    pub scenarios_count: usize,
    pub reactions_count: usize,
}

/// Everything a session has produced so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub session_id: SessionId,
    pub timestamp: Timestamp,
    pub topic: String,
    #[serde(default)]
    pub factors: Vec<FactorCategory>,
    #[serde(default)]
    pub preferences: Vec<Preference>,
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    /// Saved as `null` by sessions interrupted before synthesis.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub insights: String,
    #[serde(default)]
    pub summary: SnapshotSummary,
    /// Snapshots written before status existed were always complete.
    #[serde(default = "legacy_status")]
    pub status: SessionStatus,
}

fn default_version() -> String {
    SNAPSHOT_VERSION.to_string()
}

fn legacy_status() -> SessionStatus {
    SessionStatus::Completed
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl SessionSnapshot {
    /// Builds a snapshot stamped now, with the summary computed from the contents.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        session_id: SessionId,
        topic: impl Into<String>,
        factors: Vec<FactorCategory>,
        preferences: Vec<Preference>,
        scenarios: Vec<Scenario>,
        reactions: Vec<Reaction>,
        insights: impl Into<String>,
        status: SessionStatus,
    ) -> Self {
        let mut snapshot = Self {
            version: default_version(),
            session_id,
            timestamp: Timestamp::now(),
            topic: topic.into(),
            factors,
            preferences,
            scenarios,
            reactions,
            insights: insights.into(),
            summary: SnapshotSummary::default(),
            status,
        };
        snapshot.refresh_summary();
        snapshot
    }

    /// Recomputes the summary counts from the contents.
    pub fn refresh_summary(&mut self) {
        self.summary = SnapshotSummary {
            total_factors: total_factors(&self.factors),
            preferences_count: self.preferences.len(),
            scenarios_count: self.scenarios.len(),
            reactions_count: self.reactions.len(),
        };
    }

    pub fn has_insights(&self) -> bool {
        !self.insights.trim().is_empty()
    }

    /// First phase whose output is missing; `None` once insights exist.
    pub fn next_phase(&self) -> Option<Phase> {
        if self.factors.is_empty() {
            Some(Phase::FactorDiscovery)
        } else if self.preferences.is_empty() {
            Some(Phase::PreferenceDetailing)
        } else if self.scenarios.is_empty() {
            Some(Phase::ScenarioGeneration)
        } else if self.reactions.is_empty() {
            Some(Phase::ReactionCapture)
        } else if !self.has_insights() {
            Some(Phase::InsightSynthesis)
        } else {
            None
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
