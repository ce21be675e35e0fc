//! Phase 3: reaction capture.
//!
//! The aggregator owns the only mutable state in the pipeline: the
//! append-only reaction history of one session.

use crate::application::gateway::{CompletionOptions, LanguageModelGateway, ModelError};
use crate::domain::foundation::{ScenarioId, ValidationError};
use crate::domain::reflection::{
    Phase, Reaction, ReactionHistory, ReactionPatternSummary, Scenario,
};

use super::log_fallback;

const PHASE: Phase = Phase::ReactionCapture;

const SYSTEM_PROMPT: &str = "You are an emotional intelligence coach analyzing someone's gut reactions to decision scenarios.

Provide a brief (1-2 sentence) insight about what this emotional reaction reveals about their priorities and decision-making patterns. Focus on:
- What the intensity levels suggest about their true priorities
- Any contradictions between stated vs. felt preferences
- Patterns that might help them understand themselves better

Be empathetic but insightful.";

/// Command to record one reaction, optionally with the scenario it answers.
#[derive(Debug, Clone)]
pub struct RecordReactionCommand {
    pub reaction: Reaction,
    pub scenario: Option<Scenario>,
}

impl RecordReactionCommand {
    pub fn new(reaction: Reaction, scenario: Option<Scenario>) -> Result<Self, ValidationError> {
        reaction.validate()?;
        Ok(Self { reaction, scenario })
    }
}

/// Session-scoped reaction history plus per-reaction narration.
#[derive(Debug, Clone)]
pub struct ReactionAggregator {
    gateway: LanguageModelGateway,
    history: ReactionHistory,
}

impl ReactionAggregator {
    pub fn new(gateway: LanguageModelGateway) -> Self {
        Self::with_history(gateway, ReactionHistory::new())
    }

    /// Resumes with reactions captured earlier in the session.
    pub fn with_history(gateway: LanguageModelGateway, history: ReactionHistory) -> Self {
        Self { gateway, history }
    }

    /// Appends the reaction, then narrates it.
    ///
    /// The model is consulted only when the scenario is known; otherwise,
    /// or on any model failure, one of the five fixed readings is returned.
    pub async fn record(&mut self, cmd: RecordReactionCommand) -> String {
        let RecordReactionCommand { reaction, scenario } = cmd;
        self.history.push(reaction.clone());

        if let Some(scenario) = scenario.as_ref().filter(|_| self.gateway.available()) {
            match self.narrate(&reaction, scenario).await {
                Ok(insight) => {
                    tracing::info!(
                        phase = PHASE.label(),
                        path = "generative",
                        scenario_id = %reaction.scenario_id,
                        total_reactions = self.history.len(),
                        "reaction recorded"
                    );
                    return insight;
                }
                Err(err) => log_fallback(PHASE, &err),
            }
        }

        let reading = reaction.reading();
        tracing::info!(
            phase = PHASE.label(),
            path = "fallback",
            scenario_id = %reaction.scenario_id,
            reading = ?reading,
            total_reactions = self.history.len(),
            "reaction recorded"
        );
        reading.narration().to_string()
    }

    async fn narrate(&self, reaction: &Reaction, scenario: &Scenario) -> Result<String, ModelError> {
        let user_content = format!(
            "Scenario: \"{title}\"\n\
             Description: {text}\n\n\
             Emotional Response:\n\
             - Excitement level: {excitement}\n\
             - Anxiety level: {anxiety}\n\
             - Body sensation: {body}\n\
             - Thoughts: {thoughts}\n\n\
             What does this reaction pattern reveal about their decision-making?",
            title = scenario.title,
            text = scenario.text,
            excitement = reaction.excitement,
            anxiety = reaction.anxiety,
            body = reaction.body.as_deref().unwrap_or("not noted"),
            thoughts = reaction.freeform.as_deref().unwrap_or("not noted"),
        );

        let insight = self
            .gateway
            .complete(
                PHASE,
                Some(SYSTEM_PROMPT),
                &user_content,
                &CompletionOptions::for_phase(PHASE),
            )
            .await?;

        if insight.is_empty() {
            return Err(ModelError::malformed("empty insight"));
        }
        Ok(insight)
    }

    /// Aggregate statistics, or `None` before the first reaction.
    pub fn patterns(&self) -> Option<ReactionPatternSummary> {
        self.history.patterns()
    }

    pub fn reactions(&self) -> &[Reaction] {
        self.history.reactions()
    }

    /// The current reaction for a scenario when it was answered more than once.
    pub fn latest_for(&self, scenario_id: &ScenarioId) -> Option<&Reaction> {
        self.history.latest_for(scenario_id)
    }

    /// Clears the history for a new session.
    pub fn reset(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::domain::foundation::Score;
    use crate::domain::reflection::{EmotionalTendency, ReactionReading};
    use std::sync::Arc;

    fn reaction(id: &str, excitement: u8, anxiety: u8) -> Reaction {
        Reaction::new(id, Score::new(excitement), Score::new(anxiety))
    }

    fn record(reaction: Reaction, scenario: Option<Scenario>) -> RecordReactionCommand {
        RecordReactionCommand::new(reaction, scenario).unwrap()
    }

    fn scenario() -> Scenario {
        Scenario::new("ideal", "The Dream Opportunity", "A role that checks every box.")
    }

    #[test]
    fn reaction_without_scenario_id_is_rejected() {
        assert!(RecordReactionCommand::new(reaction("  ", 5, 5), None).is_err());
    }

    #[tokio::test]
    async fn without_model_returns_rule_narration() {
        let mut agg = ReactionAggregator::new(LanguageModelGateway::unconfigured());

        let status = agg.record(record(reaction("ideal", 9, 2), Some(scenario()))).await;

        assert_eq!(status, ReactionReading::StrongPositive.narration());
        assert_eq!(agg.reactions().len(), 1);
    }

    #[tokio::test]
    async fn model_is_skipped_without_scenario() {
        let mock = MockAIProvider::new().with_response("unused");
        let mut agg =
            ReactionAggregator::new(LanguageModelGateway::with_provider(Arc::new(mock.clone())));

        let status = agg.record(record(reaction("ideal", 2, 2), None)).await;

        assert_eq!(status, ReactionReading::LowEngagement.narration());
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn model_insight_is_returned_with_scenario() {
        let mock = MockAIProvider::new().with_response("You crave stability more than you admit.");
        let mut agg =
            ReactionAggregator::new(LanguageModelGateway::with_provider(Arc::new(mock.clone())));

        let status = agg
            .record(record(reaction("ideal", 8, 8).with_body("tight chest"), Some(scenario())))
            .await;

        assert_eq!(status, "You crave stability more than you admit.");
        let call = &mock.get_calls()[0];
        assert!(call.user_content.contains("- Excitement level: 8/10"));
        assert!(call.user_content.contains("- Body sensation: tight chest"));
        assert_eq!(call.max_tokens, Some(150));
    }

    #[tokio::test]
    async fn model_failure_still_appends_and_narrates() {
        let mock = MockAIProvider::new().with_error(MockError::Network {
            message: "reset".to_string(),
        });
        let mut agg = ReactionAggregator::new(LanguageModelGateway::with_provider(Arc::new(mock)));

        let status = agg.record(record(reaction("ideal", 8, 8), Some(scenario()))).await;

        assert_eq!(status, ReactionReading::Mixed.narration());
        assert_eq!(agg.reactions().len(), 1);
    }

    #[tokio::test]
    async fn duplicates_are_kept_and_latest_wins() {
        let mut agg = ReactionAggregator::new(LanguageModelGateway::unconfigured());
        agg.record(record(reaction("ideal", 9, 1), None)).await;
        agg.record(record(reaction("ideal", 3, 6), None)).await;
        agg.record(record(reaction("wildcard", 5, 5), None)).await;

        assert_eq!(agg.reactions().len(), 3);
        let latest = agg.latest_for(&ScenarioId::new("ideal")).unwrap();
        assert_eq!(latest.excitement, Score::new(3));

        let patterns = agg.patterns().unwrap();
        assert_eq!(patterns.total_reactions, 3);
        assert_eq!(patterns.avg_excitement, 5.7);
        assert_eq!(patterns.avg_anxiety, 4.0);
        assert_eq!(patterns.emotional_tendency, EmotionalTendency::Positive);
    }

    #[tokio::test]
    async fn reset_clears_history() {
        let mut agg = ReactionAggregator::new(LanguageModelGateway::unconfigured());
        agg.record(record(reaction("ideal", 9, 1), None)).await;

        agg.reset();

        assert!(agg.reactions().is_empty());
        assert!(agg.patterns().is_none());
    }
}
