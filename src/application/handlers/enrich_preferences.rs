//! Phase 1: preference enrichment.
//!
//! The generative reply is accepted only when it lines up one-to-one with
//! the selections: same length, same order, same factors (ignoring case).
//! Anything else is treated as malformed and the keyword table is used.

use serde::Deserialize;

use crate::application::gateway::{CompletionOptions, LanguageModelGateway, ModelError};
use crate::application::model_output::parse_model_json;
use crate::domain::foundation::{Score, ValidationError};
use crate::domain::reflection::{fallback_enrichment, Phase, Preference};

use super::log_fallback;

const PHASE: Phase = Phase::PreferenceDetailing;

const DEFAULT_TOPIC: &str = "life decision";

/// Importance given to a reply element that omits it.
const DEFAULT_IMPORTANCE: u8 = 5;

const SYSTEM_PROMPT: &str = r#"You are a preference detailing assistant helping users clarify their decision criteria.

For each preference, you should:
1. Assign an importance score (1-10) based on context
2. Determine if there should be limits/thresholds
3. Define specific limits if applicable
4. Identify potential trade-offs with other preferences

Return a JSON array of preferences with this exact structure:
[{
    "factor": "original factor name",
    "importance": 1-10,
    "hasLimit": true/false,
    "limit": "specific threshold or range if hasLimit is true, null otherwise",
    "tradeoff": "what they might sacrifice this for, or null"
}]"#;

/// Command to enrich the user's selected factors.
#[derive(Debug, Clone)]
pub struct EnrichPreferencesCommand {
    pub preferences: Vec<Preference>,
    pub topic: Option<String>,
}

impl EnrichPreferencesCommand {
    pub fn new(
        preferences: Vec<Preference>,
        topic: Option<String>,
    ) -> Result<Self, ValidationError> {
        for pref in &preferences {
            pref.validate()?;
        }
        Ok(Self { preferences, topic })
    }

    fn topic(&self) -> &str {
        self.topic
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_TOPIC)
    }
}

/// One element of the model's array. Every field may be missing.
#[derive(Debug, Deserialize)]
struct EnrichedPreferenceReply {
    #[serde(default)]
    factor: Option<String>,
    #[serde(default)]
    importance: Option<i64>,
    #[serde(rename = "hasLimit", default)]
    has_limit: Option<bool>,
    #[serde(default)]
    limit: Option<String>,
    #[serde(default)]
    tradeoff: Option<String>,
}

/// Assigns importance, limits and trade-offs to each selected factor.
#[derive(Debug, Clone)]
pub struct EnrichPreferencesHandler {
    gateway: LanguageModelGateway,
}

impl EnrichPreferencesHandler {
    pub fn new(gateway: LanguageModelGateway) -> Self {
        Self { gateway }
    }

    /// Output has the input's length, order and factor names.
    pub async fn handle(&self, cmd: EnrichPreferencesCommand) -> Vec<Preference> {
        if cmd.preferences.is_empty() {
            return Vec::new();
        }

        if self.gateway.available() {
            match self.generate(&cmd).await {
                Ok(enriched) => {
                    tracing::info!(
                        phase = PHASE.label(),
                        path = "generative",
                        count = enriched.len(),
                        "preferences enriched"
                    );
                    return enriched;
                }
                Err(err) => log_fallback(PHASE, &err),
            }
        }

        let enriched = fallback_enrichment(&cmd.preferences);
        tracing::info!(
            phase = PHASE.label(),
            path = "fallback",
            count = enriched.len(),
            "preferences enriched"
        );
        enriched
    }

    async fn generate(&self, cmd: &EnrichPreferencesCommand) -> Result<Vec<Preference>, ModelError> {
        let listed = serde_json::to_string_pretty(&cmd.preferences)
            .map_err(|e| ModelError::malformed(format!("cannot list preferences: {e}")))?;

        let user_content = format!(
            "Topic: {topic}\n\n\
             User's selected preferences:\n{listed}\n\n\
             For each preference above, enrich it with:\n\
             - Importance (1-10 scale)\n\
             - Whether it has limits/thresholds\n\
             - Specific limits (e.g., \"minimum $80k\", \"max 45 min commute\", \"at least 3 days remote\")\n\
             - Trade-offs (what might be sacrificed for this)\n\n\
             Consider the topic context when assigning importance and defining limits.\n\
             Return ONLY the JSON array.",
            topic = cmd.topic(),
        );

        let raw = self
            .gateway
            .complete(
                PHASE,
                Some(SYSTEM_PROMPT),
                &user_content,
                &CompletionOptions::for_phase(PHASE),
            )
            .await?;

        let reply: Vec<EnrichedPreferenceReply> = parse_model_json(&raw)?;
        correspond(&cmd.preferences, reply)
    }
}

/// Pairs each reply element with its selection, rejecting the batch on any mismatch.
fn correspond(
    selections: &[Preference],
    reply: Vec<EnrichedPreferenceReply>,
) -> Result<Vec<Preference>, ModelError> {
    if reply.len() != selections.len() {
        return Err(ModelError::malformed(format!(
            "expected {} preferences, got {}",
            selections.len(),
            reply.len()
        )));
    }

    selections
        .iter()
        .zip(reply)
        .map(|(selection, item)| {
            if let Some(factor) = &item.factor {
                if factor.trim().to_lowercase() != selection.factor.trim().to_lowercase() {
                    return Err(ModelError::malformed(format!(
                        "factor {:?} does not match {:?}",
                        factor, selection.factor
                    )));
                }
            }

            let importance = match item.importance {
                Some(value) => Score::try_new(value)
                    .map_err(|e| ModelError::malformed(e.to_string()))?,
                None => Score::new(DEFAULT_IMPORTANCE),
            };

            Ok(Preference {
                factor: selection.factor.clone(),
                importance,
                has_limit: item.has_limit.unwrap_or(false),
                limit: item.limit,
                tradeoff: item.tradeoff,
            })
        })
        .collect()
}
