use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::{json, Value};

use crate::workflows::dashboard::{
    CompletedResponseRecord, DashboardInputs, SurveyRecord, UserProfileRecord,
};
use crate::workflows::signup::UserRole;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date")
}

pub(super) fn loaded_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

/// A complete filler profile: 29 years old on [`today`].
pub(super) fn profile_row() -> Value {
    json!({
        "full_name": "Ayesha Khan",
        "gender": "Female",
        "date_of_birth": "1995-03-10",
        "marital_status": "Married",
        "mobile_number": "03001234567",
        "cnic_number": "35202-1234567-1",
        "education": "Masters",
        "profession": "Teacher / Academic",
        "city": "Lahore",
        "monthly_income": "85000",
        "reward_reason": null,
        "wallet_balance": 150
    })
}

pub(super) fn profile() -> UserProfileRecord {
    serde_json::from_value(profile_row()).expect("profile row decodes")
}

pub(super) fn survey(value: Value) -> SurveyRecord {
    serde_json::from_value(value).expect("survey row decodes")
}

pub(super) fn response(value: Value) -> CompletedResponseRecord {
    serde_json::from_value(value).expect("response row decodes")
}

/// One public survey, one the profile qualifies for, one it does not.
pub(super) fn surveys() -> Vec<SurveyRecord> {
    vec![
        survey(json!({
            "id": 1,
            "title": "Commuting habits",
            "is_public_form": true,
            "demographic_filters": "{\"gender\":\"male\"}",
            "price": 40
        })),
        survey(json!({
            "id": 2,
            "title": "Teaching tools",
            "demographic_filters": { "profession": ["Teacher / Academic"], "min_age": 25 },
            "questions": "[{\"type\":\"text\",\"label\":\"Which tools?\"}]"
        })),
        survey(json!({
            "id": "3",
            "title": "Retirement planning",
            "demographic_filters": { "min_age": 55 }
        })),
    ]
}

pub(super) fn inputs() -> DashboardInputs {
    DashboardInputs {
        profile: Some(profile()),
        auth_full_name: Some("Ayesha K".to_string()),
        role: Some(UserRole::Filler),
        surveys: surveys(),
        responses: vec![response(json!({
            "survey_id": 2,
            "response_data": "[\"Slides\",\"Quizzes\"]",
            "reward_amount": "25"
        }))],
    }
}
