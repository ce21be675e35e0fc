//! Phase 4: insight synthesis.

use std::fmt::Write;

use crate::application::gateway::{CompletionOptions, LanguageModelGateway, ModelError};
use crate::domain::foundation::ValidationError;
use crate::domain::reflection::{
    fallback_insights, Phase, Preference, Reaction, ReactionPatternSummary, Scenario,
};

use super::log_fallback;

const PHASE: Phase = Phase::InsightSynthesis;

const DEFAULT_TOPIC: &str = "Important life choice";

const SYSTEM_PROMPT: &str = "You are an expert decision-making coach who helps people understand their true priorities through emotional pattern analysis.

Analyze the complete decision journey and provide insights that:
1. Reveal contradictions between stated and felt preferences
2. Identify emotional patterns that suggest hidden priorities
3. Highlight which factors truly drive their decision-making
4. Point out any blind spots or areas for deeper reflection
5. Offer 1-2 specific recommendations for how to approach this decision

Be insightful, empathetic, and actionable. Focus on self-awareness rather than prescriptive advice.";

/// Command to synthesize the closing insight of a session.
#[derive(Debug, Clone)]
pub struct SynthesizeInsightsCommand {
    pub reactions: Vec<Reaction>,
    pub preferences: Vec<Preference>,
    pub scenarios: Vec<Scenario>,
    pub topic: Option<String>,
}

impl SynthesizeInsightsCommand {
    pub fn new(
        reactions: Vec<Reaction>,
        preferences: Vec<Preference>,
        scenarios: Vec<Scenario>,
        topic: Option<String>,
    ) -> Result<Self, ValidationError> {
        for reaction in &reactions {
            reaction.validate()?;
        }
        for pref in &preferences {
            pref.validate()?;
        }
        Ok(Self {
            reactions,
            preferences,
            scenarios,
            topic,
        })
    }

    fn topic(&self) -> &str {
        self.topic
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_TOPIC)
    }
}

/// Renders stated preferences, emotional aggregates and reaction details
/// as the plain-text block the model reasons over.
pub fn analysis_context(
    reactions: &[Reaction],
    preferences: &[Preference],
    scenarios: &[Scenario],
) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_context(&mut out, reactions, preferences, scenarios);
    out
}

fn write_context(
    out: &mut String,
    reactions: &[Reaction],
    preferences: &[Preference],
    scenarios: &[Scenario],
) -> std::fmt::Result {
    let high: Vec<&Preference> = preferences.iter().filter(|p| p.is_high_priority()).collect();
    let medium: Vec<&Preference> = preferences.iter().filter(|p| p.is_medium_priority()).collect();

    writeln!(out, "STATED PREFERENCES:")?;
    writeln!(out, "High Priority ({} factors):", high.len())?;
    for pref in &high {
        write!(out, "  - {}: {}", pref.factor, pref.importance)?;
        if let Some(limit) = pref.stated_limit() {
            write!(out, " (Requirement: {limit})")?;
        }
        writeln!(out)?;
    }

    if !medium.is_empty() {
        writeln!(out, "\nMedium Priority ({} factors):", medium.len())?;
        for pref in &medium {
            writeln!(out, "  - {}: {}", pref.factor, pref.importance)?;
        }
    }

    if let Some(patterns) = ReactionPatternSummary::from_reactions(reactions) {
        writeln!(out, "\nEMOTIONAL PATTERNS:")?;
        writeln!(out, "Average excitement: {:.1}/10", patterns.avg_excitement)?;
        writeln!(out, "Average anxiety: {:.1}/10", patterns.avg_anxiety)?;
        writeln!(out, "High excitement scenarios: {}", patterns.high_excitement_scenarios)?;
        writeln!(out, "High anxiety scenarios: {}", patterns.high_anxiety_scenarios)?;

        writeln!(out, "\nREACTION DETAILS:")?;
        for (i, reaction) in reactions.iter().enumerate() {
            match scenarios.iter().find(|s| s.id == reaction.scenario_id) {
                Some(scenario) => write!(out, "Scenario \"{}\"", scenario.title)?,
                None => write!(out, "Reaction {}", i + 1)?,
            }
            writeln!(
                out,
                ": Excitement {}, Anxiety {}",
                reaction.excitement, reaction.anxiety
            )?;
            if let Some(thoughts) = reaction.freeform.as_deref().filter(|t| !t.is_empty()) {
                writeln!(out, "  Thoughts: {thoughts}")?;
            }
        }
    }

    Ok(())
}

/// Produces the closing narrative from everything the session captured.
#[derive(Debug, Clone)]
pub struct SynthesizeInsightsHandler {
    gateway: LanguageModelGateway,
}

impl SynthesizeInsightsHandler {
    pub fn new(gateway: LanguageModelGateway) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self, cmd: SynthesizeInsightsCommand) -> String {
        if self.gateway.available() {
            match self.generate(&cmd).await {
                Ok(summary) => {
                    tracing::info!(
                        phase = PHASE.label(),
                        path = "generative",
                        reactions = cmd.reactions.len(),
                        preferences = cmd.preferences.len(),
                        "insights synthesized"
                    );
                    return summary;
                }
                Err(err) => log_fallback(PHASE, &err),
            }
        }

        tracing::info!(
            phase = PHASE.label(),
            path = "fallback",
            reactions = cmd.reactions.len(),
            preferences = cmd.preferences.len(),
            "insights synthesized"
        );
        fallback_insights(&cmd.reactions, &cmd.preferences)
    }

    async fn generate(&self, cmd: &SynthesizeInsightsCommand) -> Result<String, ModelError> {
        let user_content = format!(
            "Decision Topic: {topic}\n\n{context}\n\n\
             Provide deep insights about this person's decision-making patterns and what their \
             emotional responses reveal about their true priorities.",
            topic = cmd.topic(),
            context = analysis_context(&cmd.reactions, &cmd.preferences, &cmd.scenarios),
        );

        let summary = self
            .gateway
            .complete(
                PHASE,
                Some(SYSTEM_PROMPT),
                &user_content,
                &CompletionOptions::for_phase(PHASE),
            )
            .await?;

        if summary.is_empty() {
            return Err(ModelError::malformed("empty summary"));
        }
        Ok(summary)
    }
}
