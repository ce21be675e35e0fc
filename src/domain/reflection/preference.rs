//! Preference value object and priority tiers.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Score, ValidationError};

/// Importance at or above which a preference is a top priority.
pub const HIGH_PRIORITY_MIN: u8 = 8;

/// Lowest importance that still counts as a medium priority.
pub const MEDIUM_PRIORITY_MIN: u8 = 5;

/// A factor the user cares about, with how much and where their line is.
///
/// Fresh selections carry importance 0 and no limit; enrichment replaces
/// them wholesale rather than editing in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    pub factor: String,
    #[serde(default)]
    pub importance: Score,
    #[serde(rename = "hasLimit", default)]
    pub has_limit: bool,
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub tradeoff: Option<String>,
}

/// Coarse grouping of importance scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriorityTier {
    /// Importance 8-10.
    High,
    /// Importance 5-7.
    Medium,
    /// Importance 0-4.
    Low,
}

impl Preference {
    /// A raw user selection: importance 0, no limit, no trade-off.
    pub fn selection(factor: impl Into<String>) -> Self {
        Self {
            factor: factor.into(),
            importance: Score::MIN,
            has_limit: false,
            limit: None,
            tradeoff: None,
        }
    }

    /// Sets the importance.
    pub fn with_importance(mut self, importance: Score) -> Self {
        self.importance = importance;
        self
    }

    /// Marks the preference as having a hard limit.
    pub fn with_limit(mut self, limit: impl Into<String>) -> Self {
        self.has_limit = true;
        self.limit = Some(limit.into());
        self
    }

    /// Sets the trade-off note.
    pub fn with_tradeoff(mut self, tradeoff: impl Into<String>) -> Self {
        self.tradeoff = Some(tradeoff.into());
        self
    }

    /// Checks the factor name is present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.factor.trim().is_empty() {
            return Err(ValidationError::empty_field("factor"));
        }
        Ok(())
    }

    /// Returns the tier of this preference's importance.
    pub fn tier(&self) -> PriorityTier {
        match self.importance.value() {
            v if v >= HIGH_PRIORITY_MIN => PriorityTier::High,
            v if v >= MEDIUM_PRIORITY_MIN => PriorityTier::Medium,
            _ => PriorityTier::Low,
        }
    }

    pub fn is_high_priority(&self) -> bool {
        self.tier() == PriorityTier::High
    }

    pub fn is_medium_priority(&self) -> bool {
        self.tier() == PriorityTier::Medium
    }

    /// The limit text, only when the preference declares one and it is non-empty.
    pub fn stated_limit(&self) -> Option<&str> {
        if !self.has_limit {
            return None;
        }
        self.limit.as_deref().filter(|l| !l.is_empty())
    }

    /// Factor name lowercased, as it appears inside narrative text.
    pub fn factor_lower(&self) -> String {
        self.factor.to_lowercase()
    }
}

/// Preferences ordered by importance, highest first. Ties keep input order.
pub fn by_importance(preferences: &[Preference]) -> Vec<&Preference> {
    let mut sorted: Vec<&Preference> = preferences.iter().collect();
    sorted.sort_by(|a, b| b.importance.cmp(&a.importance));
    sorted
}

/// Joins the lowercased factor names of at most `n` preferences with ", ".
pub fn join_factors(preferences: &[&Preference], n: usize) -> String {
    preferences
        .iter()
        .take(n)
        .map(|p| p.factor_lower())
        .collect::<Vec<_>>()
        .join(", ")
}
