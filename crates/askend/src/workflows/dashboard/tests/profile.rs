use chrono::NaiveDate;
use serde_json::json;

use super::common::*;
use crate::workflows::dashboard::{
    age_on, display_name, parse_birth_date, ProfileCompleteness, ProfileField,
    UserProfileRecord,
};
use crate::workflows::signup::UserRole;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[test]
fn age_counts_whole_years() {
    let born = date(1995, 6, 15);

    assert_eq!(age_on(born, date(2024, 6, 14)), Some(28));
    assert_eq!(age_on(born, date(2024, 6, 15)), Some(29));
    assert_eq!(age_on(born, date(2024, 12, 1)), Some(29));
    assert_eq!(age_on(born, date(1995, 6, 15)), Some(0));
    assert_eq!(age_on(born, date(1990, 1, 1)), None);
}

#[test]
fn birth_dates_parse_in_common_formats() {
    let expected = Some(date(1995, 3, 10));

    assert_eq!(parse_birth_date("1995-03-10"), expected);
    assert_eq!(parse_birth_date("1995-03-10T00:00:00Z"), expected);
    assert_eq!(parse_birth_date("1995-03-10T08:15:00.000"), expected);
    assert_eq!(parse_birth_date("10/03/1995"), None);
}

#[test]
fn candidate_snapshot_from_profile_row() {
    let candidate = profile().candidate(today());

    assert_eq!(candidate.gender.as_deref(), Some("Female"));
    assert_eq!(candidate.age, Some(29));
    assert_eq!(candidate.city.as_deref(), Some("Lahore"));
    assert_eq!(candidate.monthly_income, Some(85_000.0));
}

#[test]
fn blank_values_are_absent_in_the_snapshot() {
    let record: UserProfileRecord = serde_json::from_value(json!({
        "gender": "",
        "date_of_birth": "not a date",
        "city": null,
        "monthly_income": 0
    }))
    .expect("row decodes");

    let candidate = record.candidate(today());

    assert_eq!(candidate.gender, None);
    assert_eq!(candidate.age, None);
    assert_eq!(candidate.city, None);
    assert_eq!(candidate.monthly_income, None);
}

#[test]
fn display_name_prefers_profile_then_auth_metadata() {
    assert_eq!(display_name(Some("Ayesha Khan"), Some("Someone Else")), "Ayesha");
    assert_eq!(display_name(Some("   "), Some("Bilal Ahmed")), "Bilal");
    assert_eq!(display_name(None, None), "User");
}

#[test]
fn completeness_lists_blank_required_fields() {
    assert!(ProfileCompleteness::assess(&profile()).is_complete());

    let mut record = profile();
    record.cnic_number = Some("  ".to_string());
    record.date_of_birth = None;
    record.city = None;

    let completeness = ProfileCompleteness::assess(&record);

    assert_eq!(
        completeness.missing,
        vec![ProfileField::DateOfBirth, ProfileField::CnicNumber]
    );
}

#[test]
fn completion_bonus_is_offered_once_to_fillers() {
    let mut record = profile();
    assert!(record.completion_bonus_due(Some(UserRole::Filler)));
    assert!(!record.completion_bonus_due(Some(UserRole::Creator)));
    assert!(!record.completion_bonus_due(None));

    record.reward_reason = Some("Profile completion bonus (Rs 50)".to_string());
    assert!(!record.completion_bonus_due(Some(UserRole::Filler)));
}
