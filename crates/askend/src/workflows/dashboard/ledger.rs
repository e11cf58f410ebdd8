use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields;
use crate::workflows::columns::{normalize_json_column, RawColumn};

/// A `survey_responses` row belonging to the signed-in filler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletedResponseRecord {
    #[serde(default, deserialize_with = "fields::optional_identifier")]
    pub survey_id: Option<String>,
    #[serde(default)]
    pub response_data: RawColumn,
    #[serde(default, deserialize_with = "fields::number")]
    pub reward_amount: Option<f64>,
}

/// What the filler has already submitted, and what it earned them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompletionLedger {
    completed: BTreeSet<String>,
    responses: BTreeMap<String, Value>,
    total_reward: f64,
}

impl CompletionLedger {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a CompletedResponseRecord>) -> Self {
        let mut ledger = Self::default();

        for record in records {
            if let Some(survey_id) = &record.survey_id {
                ledger.completed.insert(survey_id.clone());
                ledger.responses.insert(
                    survey_id.clone(),
                    normalize_json_column(&record.response_data, Value::Array(Vec::new())),
                );
            }
            // Rows without a survey id still paid out.
            ledger.total_reward += record.reward_amount.unwrap_or(0.0);
        }

        ledger
    }

    pub fn is_completed(&self, survey_id: &str) -> bool {
        self.completed.contains(survey_id)
    }

    /// Answers the filler submitted, or an empty list when none were stored.
    pub fn saved_responses(&self, survey_id: &str) -> Value {
        self.responses
            .get(survey_id)
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()))
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }
}
