//! HTTP DTOs for the phase endpoints.
//!
//! Field names follow the public JSON contract; domain types that already
//! serialize in that shape are used directly.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Score, ValidationError};
use crate::domain::reflection::{FactorCategory, Preference, Reaction, Scenario};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Phase 0 request.
#[derive(Debug, Clone, Deserialize)]
pub struct FactorsRequest {
    pub topic: String,
}

/// Phase 1 request.
#[derive(Debug, Clone, Deserialize)]
pub struct PreferencesRequest {
    pub preferences: Vec<Preference>,
    #[serde(default)]
    pub topic: Option<String>,
}

/// Phase 2 request.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenariosRequest {
    pub preferences: Vec<Preference>,
    pub topic: String,
}

/// Phase 3 request. Scores arrive as plain integers and are range-checked here
/// so the error names the offending field.
#[derive(Debug, Clone, Deserialize)]
pub struct ReactionRequest {
    pub scenario_id: String,
    pub excitement: i64,
    pub anxiety: i64,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub freeform: Option<String>,
}

impl ReactionRequest {
    pub fn into_reaction(self) -> Result<Reaction, ValidationError> {
        let excitement = score_field("excitement", self.excitement)?;
        let anxiety = score_field("anxiety", self.anxiety)?;

        let mut reaction = Reaction::new(self.scenario_id, excitement, anxiety);
        reaction.body = self.body;
        reaction.freeform = self.freeform;
        Ok(reaction)
    }
}

fn score_field(field: &str, value: i64) -> Result<Score, ValidationError> {
    Score::try_new(value).map_err(|_| ValidationError::out_of_range(field, 0, 10, value))
}

/// Phase 4 request.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryRequest {
    pub reactions: Vec<Reaction>,
    pub preferences: Vec<Preference>,
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
    #[serde(default)]
    pub topic: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorsResponse {
    pub factors: Vec<FactorCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesResponse {
    pub preferences: Vec<Preference>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenariosResponse {
    pub scenarios: Vec<Scenario>,
}

/// Phase 3 response: the per-reaction narration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferences_request_topic_is_optional() {
        let req: PreferencesRequest =
            serde_json::from_str(r#"{"preferences": [{"factor": "Salary"}]}"#).unwrap();
        assert_eq!(req.preferences.len(), 1);
        assert_eq!(req.preferences[0].importance, Score::MIN);
        assert!(req.topic.is_none());
    }

    #[test]
    fn reaction_request_converts_with_notes() {
        let req: ReactionRequest = serde_json::from_str(
            r#"{"scenario_id": "ideal", "excitement": 8, "anxiety": 2, "body": "chest"}"#,
        )
        .unwrap();

        let reaction = req.into_reaction().unwrap();
        assert_eq!(reaction.scenario_id.as_str(), "ideal");
        assert_eq!(reaction.excitement.value(), 8);
        assert_eq!(reaction.body.as_deref(), Some("chest"));
        assert!(reaction.freeform.is_none());
    }

    #[test]
    fn out_of_range_score_names_the_field() {
        let req = ReactionRequest {
            scenario_id: "ideal".to_string(),
            excitement: 5,
            anxiety: 11,
            body: None,
            freeform: None,
        };

        let err = req.into_reaction().unwrap_err();
        assert_eq!(err.field(), "anxiety");
    }

    #[test]
    fn summary_request_scenarios_default_to_empty() {
        let req: SummaryRequest =
            serde_json::from_str(r#"{"reactions": [], "preferences": []}"#).unwrap();
        assert!(req.scenarios.is_empty());
        assert!(req.topic.is_none());
    }
}
