use serde_json::{Map, Value};

use crate::workflows::eligibility::{
    CandidateProfile, EligibilityConfig, EligibilityEngine, SurveyFilterSpec,
};

pub(super) fn candidate() -> CandidateProfile {
    CandidateProfile {
        gender: Some("female".to_string()),
        age: Some(30),
        education: Some("Bachelors".to_string()),
        profession: Some("Teacher / Academic".to_string()),
        marital_status: Some("Married".to_string()),
        city: Some("Lahore".to_string()),
        monthly_income: Some(85_000.0),
    }
}

pub(super) fn fail_open_engine() -> EligibilityEngine {
    EligibilityEngine::new(EligibilityConfig { fail_open: true })
}

pub(super) fn fail_closed_engine() -> EligibilityEngine {
    EligibilityEngine::new(EligibilityConfig { fail_open: false })
}

pub(super) fn mapping(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(entries) => entries,
        other => panic!("expected a JSON object, got {other}"),
    }
}

pub(super) fn spec(value: Value) -> SurveyFilterSpec {
    SurveyFilterSpec::from_mapping(&mapping(value)).expect("filters decode")
}
