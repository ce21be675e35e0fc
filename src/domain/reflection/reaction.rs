//! Emotional reactions and the statistics derived from them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ScenarioId, Score, ValidationError};

/// Gut response to one scenario. Immutable once captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub scenario_id: ScenarioId,
    pub excitement: Score,
    pub anxiety: Score,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub freeform: Option<String>,
}

impl Reaction {
    pub fn new(scenario_id: impl Into<String>, excitement: Score, anxiety: Score) -> Self {
        Self {
            scenario_id: ScenarioId::new(scenario_id),
            excitement,
            anxiety,
            body: None,
            freeform: None,
        }
    }

    /// Sets where in the body the reaction was felt.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the free-text thoughts.
    pub fn with_freeform(mut self, freeform: impl Into<String>) -> Self {
        self.freeform = Some(freeform.into());
        self
    }

    /// Checks the reaction points at a scenario.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.scenario_id.is_blank() {
            return Err(ValidationError::empty_field("scenario_id"));
        }
        Ok(())
    }

    /// Classifies this reaction into one of the five readings.
    pub fn reading(&self) -> ReactionReading {
        ReactionReading::classify(self.excitement, self.anxiety)
    }
}

/// Rule-based interpretation of a single reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionReading {
    /// Excitement high, anxiety not.
    StrongPositive,
    /// Anxiety high, excitement not.
    HighAnxiety,
    /// Both high.
    Mixed,
    /// Both at 3 or below.
    LowEngagement,
    Moderate,
}

impl ReactionReading {
    pub fn classify(excitement: Score, anxiety: Score) -> Self {
        match (excitement.is_high(), anxiety.is_high()) {
            (true, false) => ReactionReading::StrongPositive,
            (false, true) => ReactionReading::HighAnxiety,
            (true, true) => ReactionReading::Mixed,
            (false, false) if excitement.is_low() && anxiety.is_low() => {
                ReactionReading::LowEngagement
            }
            (false, false) => ReactionReading::Moderate,
        }
    }

    /// Fixed narration shown when the model is not consulted.
    pub fn narration(&self) -> &'static str {
        match self {
            ReactionReading::StrongPositive => {
                "Strong positive response - this scenario aligns well with your core values and desires."
            }
            ReactionReading::HighAnxiety => {
                "High anxiety suggests this scenario conflicts with important needs or boundaries."
            }
            ReactionReading::Mixed => {
                "Mixed emotions indicate a complex scenario that both attracts and concerns you - worth deeper exploration."
            }
            ReactionReading::LowEngagement => {
                "Low emotional response suggests this scenario doesn't strongly connect with your priorities."
            }
            ReactionReading::Moderate => {
                "Moderate reaction - this scenario is acceptable but doesn't strongly pull you in either direction."
            }
        }
    }
}

/// Overall lean of a set of reactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalTendency {
    Positive,
    Cautious,
}

impl EmotionalTendency {
    /// Positive only when excitement strictly outweighs anxiety.
    pub fn from_averages(avg_excitement: f64, avg_anxiety: f64) -> Self {
        if avg_excitement > avg_anxiety {
            EmotionalTendency::Positive
        } else {
            EmotionalTendency::Cautious
        }
    }
}

impl fmt::Display for EmotionalTendency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmotionalTendency::Positive => write!(f, "Positive"),
            EmotionalTendency::Cautious => write!(f, "Cautious"),
        }
    }
}

/// Raw mean excitement and anxiety, unrounded. `None` for an empty slice.
pub fn mean_scores(reactions: &[Reaction]) -> Option<(f64, f64)> {
    if reactions.is_empty() {
        return None;
    }
    let n = reactions.len() as f64;
    let excitement: f64 = reactions.iter().map(|r| r.excitement.as_f64()).sum();
    let anxiety: f64 = reactions.iter().map(|r| r.anxiety.as_f64()).sum();
    Some((excitement / n, anxiety / n))
}

/// Rounds to one decimal place, ties to even on the exact binary value.
///
/// Decimal formatting rounds the exact value of `value`, so 2.25 becomes 2.2
/// and 1.15 (stored just below the tie) becomes 1.1.
pub fn round1(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Aggregate statistics over a reaction history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionPatternSummary {
    pub avg_excitement: f64,
    pub avg_anxiety: f64,
    pub high_excitement_scenarios: usize,
    pub high_anxiety_scenarios: usize,
    pub total_reactions: usize,
    pub emotional_tendency: EmotionalTendency,
}

impl ReactionPatternSummary {
    /// Computes the summary. Depends only on the multiset of reactions, not their order.
    pub fn from_reactions(reactions: &[Reaction]) -> Option<Self> {
        let (avg_excitement, avg_anxiety) = mean_scores(reactions)?;

        Some(Self {
            avg_excitement: round1(avg_excitement),
            avg_anxiety: round1(avg_anxiety),
            high_excitement_scenarios: reactions.iter().filter(|r| r.excitement.is_high()).count(),
            high_anxiety_scenarios: reactions.iter().filter(|r| r.anxiety.is_high()).count(),
            total_reactions: reactions.len(),
            emotional_tendency: EmotionalTendency::from_averages(avg_excitement, avg_anxiety),
        })
    }
}

/// Append-only record of the reactions captured in one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionHistory {
    reactions: Vec<Reaction>,
}

impl ReactionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a history from previously captured reactions.
    pub fn from_reactions(reactions: Vec<Reaction>) -> Self {
        Self { reactions }
    }

    /// Appends a reaction. Repeats for the same scenario are kept.
    pub fn push(&mut self, reaction: Reaction) {
        self.reactions.push(reaction);
    }

    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    pub fn len(&self) -> usize {
        self.reactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }

    /// Most recent reaction for a scenario.
    pub fn latest_for(&self, scenario_id: &ScenarioId) -> Option<&Reaction> {
        latest_for(&self.reactions, scenario_id)
    }

    pub fn patterns(&self) -> Option<ReactionPatternSummary> {
        ReactionPatternSummary::from_reactions(&self.reactions)
    }

    /// Drops every reaction. Only a session reset should call this.
    pub fn clear(&mut self) {
        self.reactions.clear();
    }
}

/// Most recent reaction for a scenario within a slice.
pub fn latest_for<'a>(reactions: &'a [Reaction], scenario_id: &ScenarioId) -> Option<&'a Reaction> {
    reactions.iter().rev().find(|r| &r.scenario_id == scenario_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn reaction(id: &str, excitement: u8, anxiety: u8) -> Reaction {
        Reaction::new(id, Score::new(excitement), Score::new(anxiety))
    }

    #[test]
    fn readings_cover_all_five_branches() {
        assert_eq!(reaction("s", 8, 2).reading(), ReactionReading::StrongPositive);
        assert_eq!(reaction("s", 2, 9).reading(), ReactionReading::HighAnxiety);
        assert_eq!(reaction("s", 7, 7).reading(), ReactionReading::Mixed);
        assert_eq!(reaction("s", 3, 3).reading(), ReactionReading::LowEngagement);
        assert_eq!(reaction("s", 4, 3).reading(), ReactionReading::Moderate);
        assert_eq!(reaction("s", 6, 6).reading(), ReactionReading::Moderate);
    }

    #[test]
    fn narration_for_strong_positive() {
        assert!(ReactionReading::StrongPositive
            .narration()
            .starts_with("Strong positive response"));
    }

    #[test]
    fn patterns_for_mixed_pair() {
        let summary =
            ReactionPatternSummary::from_reactions(&[reaction("a", 7, 2), reaction("b", 3, 8)])
                .unwrap();

        assert_eq!(summary.avg_excitement, 5.0);
        assert_eq!(summary.avg_anxiety, 5.0);
        assert_eq!(summary.high_excitement_scenarios, 1);
        assert_eq!(summary.high_anxiety_scenarios, 1);
        assert_eq!(summary.total_reactions, 2);
        assert_eq!(summary.emotional_tendency, EmotionalTendency::Cautious);
    }

    #[test]
    fn patterns_round_to_one_decimal() {
        let summary = ReactionPatternSummary::from_reactions(&[
            reaction("a", 7, 1),
            reaction("b", 8, 2),
            reaction("c", 8, 2),
        ])
        .unwrap();
        assert_eq!(summary.avg_excitement, 7.7);
        assert_eq!(summary.avg_anxiety, 1.7);
        assert_eq!(summary.emotional_tendency, EmotionalTendency::Positive);
    }

    #[test]
    fn empty_history_has_no_patterns() {
        assert!(ReactionHistory::new().patterns().is_none());
    }

    #[test]
    fn history_keeps_duplicates_and_latest_wins() {
        let mut history = ReactionHistory::new();
        history.push(reaction("ideal", 9, 1));
        history.push(reaction("wildcard", 4, 4));
        history.push(reaction("ideal", 2, 8));

        assert_eq!(history.len(), 3);
        let latest = history.latest_for(&ScenarioId::new("ideal")).unwrap();
        assert_eq!(latest.excitement.value(), 2);
        assert!(history.latest_for(&ScenarioId::new("medium")).is_none());
    }

    #[test]
    fn patterns_are_idempotent() {
        let mut history = ReactionHistory::new();
        history.push(reaction("a", 9, 3));
        history.push(reaction("b", 5, 7));

        assert_eq!(history.patterns(), history.patterns());
    }

    #[test]
    fn clear_empties_history() {
        let mut history = ReactionHistory::from_reactions(vec![reaction("a", 1, 1)]);
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn tendency_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&EmotionalTendency::Cautious).unwrap(),
            "\"cautious\""
        );
    }

    #[test]
    fn reaction_rejects_out_of_range_scores() {
        let json = r#"{"scenario_id": "ideal", "excitement": 11, "anxiety": 2}"#;
        assert!(serde_json::from_str::<Reaction>(json).is_err());
    }

    #[test]
    fn reaction_rejects_blank_scenario() {
        assert!(reaction(" ", 5, 5).validate().is_err());
    }

    proptest! {
        #[test]
        fn patterns_ignore_order(
            scores in proptest::collection::vec((0u8..=10, 0u8..=10), 1..20),
            seed in any::<u64>(),
        ) {
            let reactions: Vec<_> = scores
                .iter()
                .enumerate()
                .map(|(i, (e, a))| reaction(&format!("s{i}"), *e, *a))
                .collect();

            let mut shuffled = reactions.clone();
            let len = shuffled.len();
            shuffled.rotate_left((seed as usize) % len);
            shuffled.reverse();

            prop_assert_eq!(
                ReactionPatternSummary::from_reactions(&reactions),
                ReactionPatternSummary::from_reactions(&shuffled)
            );
        }
    }

    #[test]
    fn round1_ties_go_to_even() {
        assert_eq!(round1(9.0 / 4.0), 2.2);
        assert_eq!(round1(23.0 / 20.0), 1.1);
        assert_eq!(round1(2.75), 2.8);
        assert_eq!(round1(17.0 / 3.0), 5.7);
    }

    #[test]
    fn pattern_averages_round_like_the_cli_reports() {
        let quarter = [
            reaction("a", 2, 1),
            reaction("b", 2, 1),
            reaction("c", 2, 1),
            reaction("d", 3, 1),
        ];
        let summary = ReactionPatternSummary::from_reactions(&quarter).unwrap();
        assert_eq!(summary.avg_excitement, 2.2);

        let mut twentieths: Vec<Reaction> = (0..17).map(|i| reaction(&format!("s{i}"), 1, 0)).collect();
        twentieths.extend((17..20).map(|i| reaction(&format!("s{i}"), 2, 0)));
        let summary = ReactionPatternSummary::from_reactions(&twentieths).unwrap();
        assert_eq!(summary.avg_excitement, 1.1);
    }
}
