//! Scenario value object.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::ScenarioId;

/// A short hypothetical situation the user reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: ScenarioId,
    pub title: String,
    pub text: String,
}

impl Scenario {
    pub fn new(id: impl Into<String>, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: ScenarioId::new(id),
            title: title.into(),
            text: text.into(),
        }
    }
}

/// Archetypes of the rule-based batch, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioKind {
    /// Satisfies the top priorities.
    Ideal,
    /// Pits the two highest priorities against each other.
    Tradeoff,
    /// Breaks a stated limit.
    Challenge,
    /// Excels on a medium priority.
    Medium,
    /// Outside the stated framework entirely.
    Wildcard,
}

impl ScenarioKind {
    /// Stable id used for scenarios of this kind.
    pub fn id(&self) -> &'static str {
        match self {
            ScenarioKind::Ideal => "ideal",
            ScenarioKind::Tradeoff => "tradeoff",
            ScenarioKind::Challenge => "challenge",
            ScenarioKind::Medium => "medium",
            ScenarioKind::Wildcard => "wildcard",
        }
    }
}

/// Replaces blank or repeated ids with fresh tokens, keeping the first occurrence.
pub fn ensure_unique_ids(scenarios: &mut [Scenario]) {
    let mut seen: HashSet<ScenarioId> = HashSet::new();
    for scenario in scenarios.iter_mut() {
        while scenario.id.is_blank() || seen.contains(&scenario.id) {
            scenario.id = ScenarioId::generate();
        }
        seen.insert(scenario.id.clone());
    }
}
