use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::fields;
use crate::workflows::columns::{normalize_filters, normalize_questions, RawColumn};
use crate::workflows::eligibility::{CandidateProfile, EligibilityEngine};

const PUBLISHED: &str = "published";
const DEFAULT_TOTAL_RESPONSES: u64 = 100;

/// A `surveys` row as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyRecord {
    #[serde(deserialize_with = "fields::identifier")]
    pub id: String,
    #[serde(default, deserialize_with = "fields::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "fields::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "fields::text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "fields::number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "fields::number")]
    pub responses_collected: Option<f64>,
    #[serde(default, deserialize_with = "fields::number")]
    pub total_responses: Option<f64>,
    #[serde(default, deserialize_with = "fields::text")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "fields::flag")]
    pub is_public_form: bool,
    #[serde(default, deserialize_with = "fields::text")]
    pub status: Option<String>,
    #[serde(default)]
    pub questions: RawColumn,
    #[serde(default)]
    pub demographic_filters: RawColumn,
    #[serde(default, deserialize_with = "fields::optional_identifier")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "fields::text")]
    pub plan: Option<String>,
    #[serde(default, deserialize_with = "fields::text")]
    pub plan_name: Option<String>,
}

impl SurveyRecord {
    /// Rows without a status are assumed to come from the published-only query.
    pub fn is_published(&self) -> bool {
        self.status.as_deref().map_or(true, |status| status == PUBLISHED)
    }
}

/// Survey as shown on the filler dashboard, with defaults filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyListing {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub responses_collected: u64,
    pub total_responses: u64,
    pub created_at: String,
    pub is_public_form: bool,
    pub status: String,
    pub questions: Vec<Value>,
    pub demographic_filters: Map<String, Value>,
    pub user_id: Option<String>,
    pub plan: String,
    pub plan_name: String,
}

fn or_default(value: &Option<String>, default: &str) -> String {
    value
        .as_deref()
        .filter(|text| !text.is_empty())
        .unwrap_or(default)
        .to_string()
}

fn count_or(value: Option<f64>, default: u64) -> u64 {
    match value {
        Some(count) if count > 0.0 => count.round() as u64,
        _ => default,
    }
}

impl SurveyListing {
    pub fn from_record(record: &SurveyRecord, loaded_at: DateTime<Utc>) -> Self {
        Self::with_filters(record, normalize_filters(&record.demographic_filters), loaded_at)
    }

    fn with_filters(
        record: &SurveyRecord,
        demographic_filters: Map<String, Value>,
        loaded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: record.id.clone(),
            title: or_default(&record.title, "Untitled Survey"),
            description: or_default(&record.description, "No description provided"),
            category: or_default(&record.category, "General"),
            price: record.price.unwrap_or(0.0),
            responses_collected: count_or(record.responses_collected, 0),
            total_responses: count_or(record.total_responses, DEFAULT_TOTAL_RESPONSES),
            created_at: record
                .created_at
                .clone()
                .filter(|stamp| !stamp.is_empty())
                .unwrap_or_else(|| loaded_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            is_public_form: record.is_public_form,
            status: PUBLISHED.to_string(),
            questions: normalize_questions(&record.questions),
            demographic_filters,
            user_id: record.user_id.clone(),
            plan: or_default(&record.plan, "basic"),
            plan_name: or_default(&record.plan_name, "Basic Plan"),
        }
    }

    pub fn progress_percent(&self) -> f64 {
        if self.total_responses == 0 {
            return 0.0;
        }
        self.responses_collected as f64 / self.total_responses as f64 * 100.0
    }

    pub fn has_filters(&self) -> bool {
        !self.demographic_filters.is_empty()
    }
}

/// Published surveys the filler may see: public forms always, targeted forms only when the
/// filler has a profile that passes the survey's demographic filters.
pub fn available_surveys(
    records: &[SurveyRecord],
    candidate: Option<&CandidateProfile>,
    engine: &EligibilityEngine,
    loaded_at: DateTime<Utc>,
) -> Vec<SurveyListing> {
    let listings: Vec<SurveyListing> = records
        .iter()
        .filter(|record| record.is_published())
        .filter_map(|record| {
            let filters = normalize_filters(&record.demographic_filters);

            let visible = if record.is_public_form {
                true
            } else if let Some(candidate) = candidate {
                let outcome = engine.evaluate_mapping(candidate, &filters);
                debug!(
                    survey_id = %record.id,
                    decision = %outcome.decision.summary(),
                    "screened targeted survey"
                );
                outcome.is_eligible()
            } else {
                debug!(survey_id = %record.id, "hiding targeted survey from filler without profile");
                false
            };

            visible.then(|| SurveyListing::with_filters(record, filters, loaded_at))
        })
        .collect();

    debug!(
        published = records.len(),
        available = listings.len(),
        "filtered surveys for filler"
    );
    listings
}
