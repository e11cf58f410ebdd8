//! Integration specifications for survey targeting.
//!
//! Scenarios drive the public evaluator with filter columns shaped the way the backend returns
//! them, native JSON or JSON-encoded text, so the normalizer and evaluator are checked together.

mod common {
    use askend::workflows::eligibility::CandidateProfile;

    pub(super) fn teacher_in_lahore() -> CandidateProfile {
        CandidateProfile {
            gender: Some("female".to_string()),
            age: Some(34),
            education: Some("Masters".to_string()),
            profession: Some("Teacher / Academic".to_string()),
            marital_status: Some("Single".to_string()),
            city: Some("Lahore".to_string()),
            monthly_income: Some(120_000.0),
        }
    }
}

use askend::workflows::columns::RawColumn;
use askend::workflows::eligibility::{
    AxisStatus, CandidateProfile, EligibilityConfig, EligibilityDecision, EligibilityEngine,
    ExclusionReason,
};
use common::teacher_in_lahore;
use serde_json::json;

#[test]
fn encoded_and_native_columns_agree() {
    let engine = EligibilityEngine::default();
    let candidate = teacher_in_lahore();
    let filters = json!({
        "gender": "Female",
        "min_age": "30",
        "education": "bachelors",
        "location": ["Karachi", "lahore"],
        "min_income": 50000
    });

    let native = engine.evaluate_column(&candidate, &RawColumn::from(filters.clone()));
    let encoded = engine.evaluate_column(&candidate, &RawColumn::Encoded(filters.to_string()));

    assert_eq!(native, encoded);
    assert_eq!(native.decision, EligibilityDecision::Eligible);
    assert!(native
        .checks
        .iter()
        .all(|check| check.status == AxisStatus::Satisfied));
}

#[test]
fn first_failing_axis_names_the_reason() {
    let engine = EligibilityEngine::default();
    let filters = RawColumn::from(json!({ "max_income": 100000, "profession": ["Doctor"] }));

    let outcome = engine.evaluate_column(&teacher_in_lahore(), &filters);

    match outcome.decision {
        EligibilityDecision::Ineligible {
            reason: ExclusionReason::NotTargeted { allowed, .. },
        } => assert_eq!(allowed, "Doctor"),
        other => panic!("expected profession exclusion, got {other:?}"),
    }
}

#[test]
fn unreadable_filters_respect_the_configured_policy() {
    let garbled = RawColumn::from(json!({ "profession": { "any": true } }));
    let candidate = teacher_in_lahore();

    let open = EligibilityEngine::new(EligibilityConfig { fail_open: true });
    let closed = EligibilityEngine::new(EligibilityConfig { fail_open: false });

    assert!(matches!(
        open.evaluate_column(&candidate, &garbled).decision,
        EligibilityDecision::FailedOpen { .. }
    ));
    assert!(!closed.evaluate_column(&candidate, &garbled).is_eligible());
}

#[test]
fn malformed_keys_never_override_an_exclusion() {
    let engine = EligibilityEngine::default();
    let men_only = RawColumn::Encoded(r#"{"gender":"male","profession":42}"#.to_string());

    assert!(matches!(
        engine.evaluate_column(&teacher_in_lahore(), &men_only).decision,
        EligibilityDecision::Ineligible {
            reason: ExclusionReason::GenderMismatch { .. }
        }
    ));

    let retirees = RawColumn::from(json!({ "min_age": 60, "max_income": "plenty" }));
    assert!(!engine
        .evaluate_column(&teacher_in_lahore(), &retirees)
        .is_eligible());
}

#[test]
fn malformed_keys_on_missing_profile_values_are_skipped() {
    let closed = EligibilityEngine::new(EligibilityConfig { fail_open: false });
    let candidate = CandidateProfile {
        marital_status: None,
        ..teacher_in_lahore()
    };
    let filters = RawColumn::from(json!({ "gender": "female", "marital_status": 3 }));

    let outcome = closed.evaluate_column(&candidate, &filters);

    assert_eq!(outcome.decision, EligibilityDecision::Eligible);
    assert!(outcome
        .checks
        .iter()
        .any(|check| check.status == AxisStatus::Skipped));
}

#[test]
fn fractional_age_bounds_compare_numerically() {
    let engine = EligibilityEngine::default();
    let candidate = CandidateProfile {
        age: Some(34),
        ..CandidateProfile::default()
    };

    let narrow = RawColumn::from(json!({ "min_age": 34.5 }));
    assert!(!engine.evaluate_column(&candidate, &narrow).is_eligible());

    let wide = RawColumn::from(json!({ "min_age": 33.5, "max_age": "34.5" }));
    assert_eq!(
        engine.evaluate_column(&candidate, &wide).decision,
        EligibilityDecision::Eligible
    );
}

#[test]
fn missing_or_unparsable_columns_target_everyone() {
    let engine = EligibilityEngine::default();

    for column in [
        RawColumn::Absent,
        RawColumn::from(""),
        RawColumn::from("{not json"),
        RawColumn::from(json!([])),
    ] {
        assert_eq!(
            engine
                .evaluate_column(&teacher_in_lahore(), &column)
                .decision,
            EligibilityDecision::Unrestricted
        );
    }
}
