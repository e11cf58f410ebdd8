use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::fields;
use crate::workflows::eligibility::CandidateProfile;
use crate::workflows::signup::UserRole;

const COMPLETION_BONUS_MARKER: &str = "Profile completion bonus";
const FALLBACK_DISPLAY_NAME: &str = "User";

/// A `user_profiles` row as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfileRecord {
    #[serde(default, deserialize_with = "fields::text")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "fields::text")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "fields::text")]
    pub date_of_birth: Option<String>,
    #[serde(default, deserialize_with = "fields::text")]
    pub marital_status: Option<String>,
    #[serde(default, deserialize_with = "fields::text")]
    pub mobile_number: Option<String>,
    #[serde(default, deserialize_with = "fields::text")]
    pub cnic_number: Option<String>,
    #[serde(default, deserialize_with = "fields::text")]
    pub education: Option<String>,
    #[serde(default, deserialize_with = "fields::text")]
    pub profession: Option<String>,
    #[serde(default, deserialize_with = "fields::text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "fields::number")]
    pub monthly_income: Option<f64>,
    #[serde(default, deserialize_with = "fields::text")]
    pub reward_reason: Option<String>,
    #[serde(default, deserialize_with = "fields::number")]
    pub wallet_balance: Option<f64>,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|text| !text.is_empty()).cloned()
}

impl UserProfileRecord {
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        let born = self.date_of_birth.as_deref().and_then(parse_birth_date)?;
        age_on(born, today)
    }

    /// Demographic snapshot used for survey targeting.
    pub fn candidate(&self, today: NaiveDate) -> CandidateProfile {
        CandidateProfile {
            gender: non_empty(&self.gender),
            age: self.age_on(today),
            education: non_empty(&self.education),
            profession: non_empty(&self.profession),
            marital_status: non_empty(&self.marital_status),
            city: non_empty(&self.city),
            monthly_income: self.monthly_income.filter(|income| *income != 0.0),
        }
    }

    pub fn field(&self, field: ProfileField) -> Option<&str> {
        let value = match field {
            ProfileField::FullName => &self.full_name,
            ProfileField::Gender => &self.gender,
            ProfileField::DateOfBirth => &self.date_of_birth,
            ProfileField::MaritalStatus => &self.marital_status,
            ProfileField::MobileNumber => &self.mobile_number,
            ProfileField::CnicNumber => &self.cnic_number,
            ProfileField::Education => &self.education,
            ProfileField::Profession => &self.profession,
        };
        value.as_deref()
    }

    pub fn received_completion_bonus(&self) -> bool {
        self.reward_reason
            .as_deref()
            .is_some_and(|reason| reason.contains(COMPLETION_BONUS_MARKER))
    }

    /// The one-off completion card is offered to fillers with a complete profile who have
    /// not been paid the bonus yet.
    pub fn completion_bonus_due(&self, role: Option<UserRole>) -> bool {
        role == Some(UserRole::Filler)
            && ProfileCompleteness::assess(self).is_complete()
            && !self.received_completion_bonus()
    }
}

/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, and naive ISO timestamps.
pub fn parse_birth_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|stamp| stamp.date_naive())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|stamp| stamp.date())
        })
}

/// Whole years between `born` and `today`; `None` for dates in the future.
pub fn age_on(born: NaiveDate, today: NaiveDate) -> Option<u32> {
    if born > today {
        return None;
    }

    let mut years = today.year() - born.year();
    if (today.month(), today.day()) < (born.month(), born.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

/// First word of the profile name, then of the auth metadata name, then "User".
pub fn display_name(profile_full_name: Option<&str>, auth_full_name: Option<&str>) -> String {
    [profile_full_name, auth_full_name]
        .into_iter()
        .flatten()
        .find_map(|name| name.split_whitespace().next())
        .unwrap_or(FALLBACK_DISPLAY_NAME)
        .to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    FullName,
    Gender,
    DateOfBirth,
    MaritalStatus,
    MobileNumber,
    CnicNumber,
    Education,
    Profession,
}

impl ProfileField {
    pub const REQUIRED_FOR_FILLER: [ProfileField; 8] = [
        ProfileField::FullName,
        ProfileField::Gender,
        ProfileField::DateOfBirth,
        ProfileField::MaritalStatus,
        ProfileField::MobileNumber,
        ProfileField::CnicNumber,
        ProfileField::Education,
        ProfileField::Profession,
    ];

    pub fn column(self) -> &'static str {
        match self {
            ProfileField::FullName => "full_name",
            ProfileField::Gender => "gender",
            ProfileField::DateOfBirth => "date_of_birth",
            ProfileField::MaritalStatus => "marital_status",
            ProfileField::MobileNumber => "mobile_number",
            ProfileField::CnicNumber => "cnic_number",
            ProfileField::Education => "education",
            ProfileField::Profession => "profession",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileCompleteness {
    pub missing: Vec<ProfileField>,
}

impl ProfileCompleteness {
    pub fn assess(profile: &UserProfileRecord) -> Self {
        let missing = ProfileField::REQUIRED_FOR_FILLER
            .into_iter()
            .filter(|field| {
                profile
                    .field(*field)
                    .map_or(true, |value| value.trim().is_empty())
            })
            .collect();
        Self { missing }
    }

    /// Without a profile row every required field is missing.
    pub fn for_missing_profile() -> Self {
        Self {
            missing: ProfileField::REQUIRED_FOR_FILLER.to_vec(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}
