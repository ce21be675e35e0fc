//! Phase 2: scenario synthesis.

use std::time::Duration;

use serde::Deserialize;

use crate::application::gateway::{CompletionOptions, LanguageModelGateway, ModelError};
use crate::application::model_output::parse_model_json;
use crate::domain::foundation::ValidationError;
use crate::domain::reflection::{
    by_importance, ensure_unique_ids, fallback_scenarios, Phase, Preference, Scenario,
};

use super::log_fallback;

const PHASE: Phase = Phase::ScenarioGeneration;

/// Size of a generative batch: ideal, two trade-offs, a limit challenge, a wildcard.
pub const GENERATIVE_BATCH_SIZE: usize = 5;

const UNTITLED: &str = "Untitled Scenario";
const NO_DESCRIPTION: &str = "Description not available";

const SYSTEM_PROMPT: &str = r#"You are an expert scenario generator for decision-making. Create realistic scenarios that test the user's stated preferences through trade-offs and conflicts.

Generate exactly 5 scenarios that:
1. One "ideal" scenario that meets most high-importance preferences
2. Two scenarios that force trade-offs between important preferences
3. One scenario that challenges their stated limits/thresholds
4. One "wildcard" scenario that's unexpected but relevant

Each scenario should:
- Be realistic and specific to the topic
- Create emotional tension through trade-offs
- Be 2-3 sentences that paint a vivid picture
- Have a compelling title

Return ONLY a JSON object with this exact structure:
{
  "scenarios": [
    {"id": "unique_id", "title": "Scenario Title", "text": "Detailed scenario description..."}
  ]
}"#;

/// Command to build scenarios from enriched preferences.
#[derive(Debug, Clone)]
pub struct GenerateScenariosCommand {
    pub preferences: Vec<Preference>,
    pub topic: String,
}

impl GenerateScenariosCommand {
    pub fn new(preferences: Vec<Preference>, topic: impl Into<String>) -> Result<Self, ValidationError> {
        for pref in &preferences {
            pref.validate()?;
        }
        Ok(Self {
            preferences,
            topic: topic.into(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ScenariosReply {
    scenarios: Vec<ScenarioReply>,
}

#[derive(Debug, Deserialize)]
struct ScenarioReply {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

impl From<ScenarioReply> for Scenario {
    fn from(reply: ScenarioReply) -> Self {
        // blank ids are replaced by ensure_unique_ids
        Scenario::new(
            reply.id.unwrap_or_default(),
            reply.title.unwrap_or_else(|| UNTITLED.to_string()),
            reply.text.unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        )
    }
}

/// One line per preference, most important first.
pub fn preference_summary(preferences: &[Preference]) -> String {
    by_importance(preferences)
        .into_iter()
        .map(|pref| {
            let mut line = format!("- {}: Importance {}", pref.factor, pref.importance);
            if let Some(limit) = pref.stated_limit() {
                line.push_str(&format!(" (Requirement: {limit})"));
            }
            if let Some(tradeoff) = &pref.tradeoff {
                line.push_str(&format!(" (Trade-off consideration: {tradeoff})"));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Produces the scenarios the user will react to. Ids are unique within a batch.
#[derive(Debug, Clone)]
pub struct GenerateScenariosHandler {
    gateway: LanguageModelGateway,
    options: CompletionOptions,
}

impl GenerateScenariosHandler {
    pub fn new(gateway: LanguageModelGateway) -> Self {
        Self {
            gateway,
            options: CompletionOptions::for_phase(PHASE),
        }
    }

    /// Replaces the phase deadline; a slower reply selects the rule-based batch.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.options = self.options.with_timeout(deadline);
        self
    }

    pub async fn handle(&self, cmd: GenerateScenariosCommand) -> Vec<Scenario> {
        if self.gateway.available() {
            match self.generate(&cmd).await {
                Ok(scenarios) => {
                    tracing::info!(
                        phase = PHASE.label(),
                        path = "generative",
                        count = scenarios.len(),
                        "scenarios generated"
                    );
                    return scenarios;
                }
                Err(err) => log_fallback(PHASE, &err),
            }
        }

        let scenarios = fallback_scenarios(&cmd.preferences, &cmd.topic);
        tracing::info!(
            phase = PHASE.label(),
            path = "fallback",
            count = scenarios.len(),
            "scenarios generated"
        );
        scenarios
    }

    async fn generate(&self, cmd: &GenerateScenariosCommand) -> Result<Vec<Scenario>, ModelError> {
        let user_content = format!(
            "Topic: {topic}\n\n\
             User's detailed preferences:\n{summary}\n\n\
             Create 5 scenarios that will help reveal the user's true priorities through their \
             emotional reactions.",
            topic = cmd.topic,
            summary = preference_summary(&cmd.preferences),
        );

        let raw = self
            .gateway
            .complete(
                PHASE,
                Some(SYSTEM_PROMPT),
                &user_content,
                &self.options,
            )
            .await?;

        let reply: ScenariosReply = parse_model_json(&raw)?;
        if reply.scenarios.len() != GENERATIVE_BATCH_SIZE {
            return Err(ModelError::malformed(format!(
                "expected {GENERATIVE_BATCH_SIZE} scenarios, got {}",
                reply.scenarios.len()
            )));
        }

        let mut scenarios: Vec<Scenario> = reply.scenarios.into_iter().map(Scenario::from).collect();
        ensure_unique_ids(&mut scenarios);
        Ok(scenarios)
    }
}
