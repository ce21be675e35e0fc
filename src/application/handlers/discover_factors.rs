//! Phase 0: factor discovery.

use serde::Deserialize;

use crate::application::gateway::{CompletionOptions, LanguageModelGateway, ModelError};
use crate::application::model_output::parse_model_json;
use crate::domain::reflection::{default_catalog, total_factors, FactorCategory, Phase};

use super::log_fallback;

const PHASE: Phase = Phase::FactorDiscovery;

const FORMAT_INSTRUCTION: &str = "List decision factors for the topic as JSON with format: \
{\"factors\": [{\"category\": str, \"items\": [str]}]}";

/// Command to discover the factors relevant to a decision topic.
#[derive(Debug, Clone)]
pub struct DiscoverFactorsCommand {
    pub topic: String,
}

impl DiscoverFactorsCommand {
    /// Any text is a topic, including an empty one.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FactorsReply {
    factors: Vec<FactorCategory>,
}

/// Turns a topic into categorized factors. Never returns an empty list.
#[derive(Debug, Clone)]
pub struct DiscoverFactorsHandler {
    gateway: LanguageModelGateway,
}

impl DiscoverFactorsHandler {
    pub fn new(gateway: LanguageModelGateway) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self, cmd: DiscoverFactorsCommand) -> Vec<FactorCategory> {
        if self.gateway.available() {
            match self.generate(&cmd.topic).await {
                Ok(factors) => {
                    tracing::info!(
                        phase = PHASE.label(),
                        path = "generative",
                        categories = factors.len(),
                        factors = total_factors(&factors),
                        "factors discovered"
                    );
                    return factors;
                }
                Err(err) => log_fallback(PHASE, &err),
            }
        }

        let factors = default_catalog();
        tracing::info!(
            phase = PHASE.label(),
            path = "fallback",
            categories = factors.len(),
            "factors discovered"
        );
        factors
    }

    async fn generate(&self, topic: &str) -> Result<Vec<FactorCategory>, ModelError> {
        let user_content = format!("Topic: {topic}. {FORMAT_INSTRUCTION}");
        let raw = self
            .gateway
            .complete(PHASE, None, &user_content, &CompletionOptions::for_phase(PHASE))
            .await?;

        let reply: FactorsReply = parse_model_json(&raw)?;
        if reply.factors.is_empty() {
            return Err(ModelError::malformed("empty factor list"));
        }
        Ok(reply.factors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use std::sync::Arc;

    fn handler(mock: &MockAIProvider) -> DiscoverFactorsHandler {
        DiscoverFactorsHandler::new(LanguageModelGateway::with_provider(Arc::new(mock.clone())))
    }

    fn cmd() -> DiscoverFactorsCommand {
        DiscoverFactorsCommand::new("moving to Denver")
    }

    #[tokio::test]
    async fn blank_topic_still_gets_the_catalog() {
        let handler = DiscoverFactorsHandler::new(LanguageModelGateway::unconfigured());

        let factors = handler.handle(DiscoverFactorsCommand::new("   ")).await;

        assert_eq!(factors, default_catalog());
    }

    #[tokio::test]
    async fn without_model_returns_fixed_catalog() {
        let handler = DiscoverFactorsHandler::new(LanguageModelGateway::unconfigured());

        let factors = handler.handle(cmd()).await;

        assert_eq!(factors, default_catalog());
        assert_eq!(factors.len(), 3);
        assert_eq!(total_factors(&factors), 12);
    }

    #[tokio::test]
    async fn adopts_well_formed_model_reply() {
        let mock = MockAIProvider::new().with_response(
            r#"{"factors": [{"category": "Lifestyle", "items": ["Outdoor access", "Nightlife"]}]}"#,
        );

        let factors = handler(&mock).handle(cmd()).await;

        assert_eq!(
            factors,
            vec![FactorCategory::new("Lifestyle", ["Outdoor access", "Nightlife"])]
        );
        let calls = mock.get_calls();
        assert!(calls[0].user_content.starts_with("Topic: moving to Denver. "));
        assert!(calls[0].system_prompt.is_none());
    }

    #[tokio::test]
    async fn empty_factor_list_falls_back() {
        let mock = MockAIProvider::new().with_response(r#"{"factors": []}"#);
        assert_eq!(handler(&mock).handle(cmd()).await, default_catalog());
    }

    #[tokio::test]
    async fn malformed_reply_is_never_partly_adopted() {
        let mock = MockAIProvider::new().with_response(
            r#"{"factors": [{"category": "Lifestyle", "items": ["ok"]}, {"category": "Broken"}]}"#,
        );
        assert_eq!(handler(&mock).handle(cmd()).await, default_catalog());
    }

    #[tokio::test]
    async fn provider_failure_falls_back() {
        let mock = MockAIProvider::new().with_error(MockError::Unavailable {
            message: "503".to_string(),
        });
        assert_eq!(handler(&mock).handle(cmd()).await, default_catalog());
    }
}
