//! Reflection session orchestrator.
//!
//! Owns everything a session accumulates and drives the five phases in
//! order through the phase handlers. Persistence is left to the caller via
//! [`SessionSnapshot`].

use crate::domain::foundation::{SessionId, SessionStatus, ValidationError};
use crate::domain::reflection::{
    FactorCategory, Phase, Preference, PreferenceReactionAlignment, Reaction, ReactionHistory,
    ReactionPatternSummary, Scenario,
};
use crate::domain::session::{render_markdown_report, SessionSnapshot};

use super::gateway::LanguageModelGateway;
use super::handlers::{
    DiscoverFactorsCommand, DiscoverFactorsHandler, EnrichPreferencesCommand,
    EnrichPreferencesHandler, GenerateScenariosCommand, GenerateScenariosHandler,
    ReactionAggregator, RecordReactionCommand, SynthesizeInsightsCommand,
    SynthesizeInsightsHandler,
};

/// One user's walk through the five phases.
#[derive(Debug)]
pub struct ReflectionSession {
    id: SessionId,
    topic: String,
    status: SessionStatus,
    factors: Vec<FactorCategory>,
    preferences: Vec<Preference>,
    scenarios: Vec<Scenario>,
    insights: String,
    aggregator: ReactionAggregator,
    gateway: LanguageModelGateway,
}

impl ReflectionSession {
    /// Starts a fresh session on a topic.
    pub fn new(gateway: LanguageModelGateway, topic: impl Into<String>) -> Self {
        Self {
            id: SessionId::new(),
            topic: topic.into(),
            status: SessionStatus::InProgress,
            factors: Vec::new(),
            preferences: Vec::new(),
            scenarios: Vec::new(),
            insights: String::new(),
            aggregator: ReactionAggregator::new(gateway.clone()),
            gateway,
        }
    }

    /// Rebuilds a session from a stored snapshot. Interrupted sessions resume as in progress.
    pub fn from_snapshot(gateway: LanguageModelGateway, snapshot: SessionSnapshot) -> Self {
        let status = if snapshot.status.can_transition_to(&SessionStatus::InProgress) {
            SessionStatus::InProgress
        } else {
            snapshot.status
        };

        Self {
            id: snapshot.session_id,
            topic: snapshot.topic,
            status,
            factors: snapshot.factors,
            preferences: snapshot.preferences,
            scenarios: snapshot.scenarios,
            insights: snapshot.insights,
            aggregator: ReactionAggregator::with_history(
                gateway.clone(),
                ReactionHistory::from_reactions(snapshot.reactions),
            ),
            gateway,
        }
    }

    pub fn to_snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(
            self.id,
            self.topic.clone(),
            self.factors.clone(),
            self.preferences.clone(),
            self.scenarios.clone(),
            self.aggregator.reactions().to_vec(),
            self.insights.clone(),
            self.status,
        )
    }

    /// Phase 0.
    pub async fn discover_factors(&mut self) -> &[FactorCategory] {
        let cmd = DiscoverFactorsCommand {
            topic: self.topic.clone(),
        };
        self.factors = DiscoverFactorsHandler::new(self.gateway.clone()).handle(cmd).await;
        &self.factors
    }

    /// Phase 1. Replaces any earlier preferences with the enriched selections.
    pub async fn enrich_preferences(
        &mut self,
        selections: Vec<Preference>,
    ) -> Result<&[Preference], ValidationError> {
        let cmd = EnrichPreferencesCommand::new(selections, Some(self.topic.clone()))?;
        self.preferences = EnrichPreferencesHandler::new(self.gateway.clone()).handle(cmd).await;
        Ok(&self.preferences)
    }

    /// Phase 2.
    pub async fn generate_scenarios(&mut self) -> &[Scenario] {
        let cmd = GenerateScenariosCommand {
            preferences: self.preferences.clone(),
            topic: self.topic.clone(),
        };
        self.scenarios = GenerateScenariosHandler::new(self.gateway.clone()).handle(cmd).await;
        &self.scenarios
    }

    /// Phase 3. The scenario is looked up by id so the model sees its text.
    pub async fn record_reaction(&mut self, reaction: Reaction) -> Result<String, ValidationError> {
        let scenario = self
            .scenarios
            .iter()
            .find(|s| s.id == reaction.scenario_id)
            .cloned();
        let cmd = RecordReactionCommand::new(reaction, scenario)?;
        Ok(self.aggregator.record(cmd).await)
    }

    /// Phase 4. Marks the session completed.
    pub async fn synthesize_insights(&mut self) -> &str {
        let cmd = SynthesizeInsightsCommand {
            reactions: self.aggregator.reactions().to_vec(),
            preferences: self.preferences.clone(),
            scenarios: self.scenarios.clone(),
            topic: Some(self.topic.clone()),
        };
        self.insights = SynthesizeInsightsHandler::new(self.gateway.clone())
            .handle(cmd)
            .await;
        if self.status.can_transition_to(&SessionStatus::Completed) {
            self.status = SessionStatus::Completed;
        }
        tracing::info!(session_id = %self.id, "session completed");
        &self.insights
    }

    /// Marks the session as left part-way.
    pub fn interrupt(&mut self) {
        if self.status.can_transition_to(&SessionStatus::Interrupted) {
            self.status = SessionStatus::Interrupted;
        }
    }

    /// Starts over on a new topic with a new id and an empty history.
    pub fn reset(&mut self, topic: impl Into<String>) {
        self.id = SessionId::new();
        self.topic = topic.into();
        self.status = SessionStatus::InProgress;
        self.factors.clear();
        self.preferences.clear();
        self.scenarios.clear();
        self.insights.clear();
        self.aggregator.reset();
    }

    /// Phase to run next, or `None` when insights exist.
    pub fn next_phase(&self) -> Option<Phase> {
        self.to_snapshot().next_phase()
    }

    pub fn patterns(&self) -> Option<ReactionPatternSummary> {
        self.aggregator.patterns()
    }

    pub fn alignment(&self) -> Option<PreferenceReactionAlignment> {
        PreferenceReactionAlignment::analyze(self.aggregator.reactions(), &self.preferences)
    }

    /// Markdown report of the session so far.
    pub fn report(&self) -> String {
        render_markdown_report(&self.to_snapshot())
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn factors(&self) -> &[FactorCategory] {
        &self.factors
    }

    pub fn preferences(&self) -> &[Preference] {
        &self.preferences
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn reactions(&self) -> &[Reaction] {
        self.aggregator.reactions()
    }

    pub fn insights(&self) -> &str {
        &self.insights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::domain::foundation::Score;
    use crate::domain::reflection::{EngagementLevel, ReactionReading};
    use std::sync::Arc;

    fn offline(topic: &str) -> ReflectionSession {
        ReflectionSession::new(LanguageModelGateway::unconfigured(), topic)
    }

    fn selections() -> Vec<Preference> {
        ["Salary", "Remote work", "Commute time"]
            .into_iter()
            .map(Preference::selection)
            .collect()
    }

    #[tokio::test]
    async fn blank_topic_session_runs_discovery() {
        let mut session = offline(" ");
        assert_eq!(session.topic(), " ");

        assert_eq!(session.discover_factors().await.len(), 3);
        assert_eq!(session.next_phase(), Some(Phase::PreferenceDetailing));
    }

    #[tokio::test]
    async fn full_offline_run_completes_all_phases() {
        let mut session = offline("choosing a job");
        assert_eq!(session.next_phase(), Some(Phase::FactorDiscovery));

        assert_eq!(session.discover_factors().await.len(), 3);
        assert_eq!(session.next_phase(), Some(Phase::PreferenceDetailing));

        let prefs = session.enrich_preferences(selections()).await.unwrap();
        assert_eq!(prefs.len(), 3);
        assert_eq!(prefs[0].importance, Score::new(8));

        let ids: Vec<String> = session
            .generate_scenarios()
            .await
            .iter()
            .map(|s| s.id.to_string())
            .collect();
        // one high priority: no tradeoff, two medium ones: a medium focus
        assert_eq!(ids, vec!["ideal", "challenge", "medium", "wildcard"]);

        let status = session
            .record_reaction(Reaction::new("ideal", Score::new(9), Score::new(2)))
            .await
            .unwrap();
        assert_eq!(status, ReactionReading::StrongPositive.narration());
        session
            .record_reaction(Reaction::new("medium", Score::new(8), Score::new(7)))
            .await
            .unwrap();
        assert_eq!(session.next_phase(), Some(Phase::InsightSynthesis));

        let insights = session.synthesize_insights().await.to_string();
        assert!(insights.starts_with("Your emotional responses show strong engagement"));
        assert_eq!(session.status(), SessionStatus::Completed);
        assert_eq!(session.next_phase(), None);

        let alignment = session.alignment().unwrap();
        assert_eq!(alignment.stated_high_priorities, 1);
        assert_eq!(alignment.engagement_level, EngagementLevel::High);
    }

    #[tokio::test]
    async fn reaction_to_known_scenario_reaches_model_with_its_text() {
        let mock = MockAIProvider::new()
            .with_response(
                r#"{"scenarios": [
                    {"id": "s1", "title": "Big City", "text": "Skyline views."},
                    {"id": "s2", "title": "B", "text": "b"},
                    {"id": "s3", "title": "C", "text": "c"},
                    {"id": "s4", "title": "D", "text": "d"},
                    {"id": "s5", "title": "E", "text": "e"}
                ]}"#,
            )
            .with_response("You light up at density.");
        let gateway = LanguageModelGateway::with_provider(Arc::new(mock.clone()));
        let mut session = ReflectionSession::new(gateway, "moving cities");

        session.generate_scenarios().await;
        let status = session
            .record_reaction(Reaction::new("s1", Score::new(9), Score::new(1)))
            .await
            .unwrap();

        assert_eq!(status, "You light up at density.");
        let calls = mock.get_calls();
        assert!(calls[1].user_content.contains("Scenario: \"Big City\""));
        assert!(calls[1].user_content.contains("Skyline views."));
    }

    #[tokio::test]
    async fn snapshot_round_trip_resumes_where_it_left_off() {
        let mut session = offline("choosing a job");
        session.discover_factors().await;
        session.enrich_preferences(selections()).await.unwrap();
        session.interrupt();

        let snapshot = session.to_snapshot();
        assert_eq!(snapshot.status, SessionStatus::Interrupted);

        let json = snapshot.to_json().unwrap();
        let restored = ReflectionSession::from_snapshot(
            LanguageModelGateway::unconfigured(),
            SessionSnapshot::from_json(&json).unwrap(),
        );

        assert_eq!(restored.id(), session.id());
        assert_eq!(restored.status(), SessionStatus::InProgress);
        assert_eq!(restored.preferences(), session.preferences());
        assert_eq!(restored.next_phase(), Some(Phase::ScenarioGeneration));
    }

    #[tokio::test]
    async fn reset_clears_everything_and_issues_new_id() {
        let mut session = offline("choosing a job");
        let first_id = session.id();
        session.discover_factors().await;
        session
            .record_reaction(Reaction::new("ideal", Score::new(5), Score::new(5)))
            .await
            .unwrap();

        session.reset("moving to Denver");

        assert_ne!(session.id(), first_id);
        assert_eq!(session.topic(), "moving to Denver");
        assert!(session.factors().is_empty());
        assert!(session.reactions().is_empty());
        assert!(session.patterns().is_none());
    }

    #[tokio::test]
    async fn report_reflects_session_contents() {
        let mut session = offline("choosing a job");
        session.enrich_preferences(selections()).await.unwrap();

        let report = session.report();

        assert!(report.contains("**Decision Topic:** choosing a job"));
        assert!(report.contains("1. **Salary** (Importance: 8/10)"));
    }
}
