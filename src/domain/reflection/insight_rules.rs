//! Rule-based insight synthesis and preference/reaction alignment.

use serde::{Deserialize, Serialize};

use super::preference::{join_factors, Preference};
use super::reaction::{mean_scores, round1, EmotionalTendency, Reaction};

/// Returned when there are no reactions to reason about.
pub const NO_REACTIONS_INSIGHT: &str = "Based on your preferences and reactions, continue to pay attention to both your logical analysis and emotional responses as you move forward with this decision.";

const ENGAGED: &str = "Your emotional responses show strong engagement with these scenarios, suggesting you're excited about the possibilities ahead.";
const ANXIOUS: &str = "Your reactions reveal some anxiety about this decision, which may indicate you're concerned about making the wrong choice or that important needs aren't being met.";
const OPEN_TO_PATHS: &str = "You had strong positive reactions to multiple scenarios, suggesting you're open to different paths as long as core needs are met.";
const OPTIMISTIC_CLOSE: &str = "Overall, you seem optimistic about your options. Trust your positive reactions as they likely point toward choices that align with your authentic preferences.";
const CAUTIOUS_CLOSE: &str = "Your caution suggests this is a significant decision for you. Pay attention to what specifically triggers anxiety - those concerns may reveal important boundaries or unmet needs.";

/// Average above which a feeling counts as dominant.
const STRONG_AVERAGE: f64 = 6.0;

/// Composes the rule-based synthesis from fixed sentences.
pub fn fallback_insights(reactions: &[Reaction], preferences: &[Preference]) -> String {
    let Some((avg_excitement, avg_anxiety)) = mean_scores(reactions) else {
        return NO_REACTIONS_INSIGHT.to_string();
    };

    let mut sentences: Vec<String> = Vec::new();

    if avg_excitement > STRONG_AVERAGE {
        sentences.push(ENGAGED.to_string());
    } else if avg_anxiety > STRONG_AVERAGE {
        sentences.push(ANXIOUS.to_string());
    }

    if reactions.iter().filter(|r| r.excitement.is_high()).count() >= 2 {
        sentences.push(OPEN_TO_PATHS.to_string());
    }

    let high: Vec<&Preference> = preferences.iter().filter(|p| p.is_high_priority()).collect();
    if !high.is_empty() {
        sentences.push(format!(
            "Your top priorities appear to be {}, and your emotional responses will help clarify which of these truly drives your satisfaction.",
            join_factors(&high, 3)
        ));
    }

    sentences.push(
        match EmotionalTendency::from_averages(avg_excitement, avg_anxiety) {
            EmotionalTendency::Positive => OPTIMISTIC_CLOSE,
            EmotionalTendency::Cautious => CAUTIOUS_CLOSE,
        }
        .to_string(),
    );

    sentences.join(" ")
}

/// Average excitement and anxiety, rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionalAverages {
    pub excitement: f64,
    pub anxiety: f64,
}

/// How strongly the user engaged with the scenarios overall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementLevel {
    High,
    Moderate,
}

/// How felt reactions line up against stated priorities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceReactionAlignment {
    pub stated_high_priorities: usize,
    pub avg_emotional_response: EmotionalAverages,
    pub emotional_tendency: EmotionalTendency,
    pub engagement_level: EngagementLevel,
}

impl PreferenceReactionAlignment {
    /// `None` when either side is empty.
    pub fn analyze(reactions: &[Reaction], preferences: &[Preference]) -> Option<Self> {
        if preferences.is_empty() {
            return None;
        }
        let (avg_excitement, avg_anxiety) = mean_scores(reactions)?;

        let engagement_level = if avg_excitement > STRONG_AVERAGE || avg_anxiety > STRONG_AVERAGE {
            EngagementLevel::High
        } else {
            EngagementLevel::Moderate
        };

        Some(Self {
            stated_high_priorities: preferences.iter().filter(|p| p.is_high_priority()).count(),
            avg_emotional_response: EmotionalAverages {
                excitement: round1(avg_excitement),
                anxiety: round1(avg_anxiety),
            },
            emotional_tendency: EmotionalTendency::from_averages(avg_excitement, avg_anxiety),
            engagement_level,
        })
    }
}
