use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::decode;
use super::EvalError;

/// Demographic snapshot of a filler, taken once per dashboard load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(default)]
    pub marital_status: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub monthly_income: Option<f64>,
}

/// Ordered education ladder used by the `education` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    MatricOLevels,
    IntermediateALevels,
    Bachelors,
    Masters,
    Phd,
}

impl EducationLevel {
    pub const ALL: [EducationLevel; 5] = [
        EducationLevel::MatricOLevels,
        EducationLevel::IntermediateALevels,
        EducationLevel::Bachelors,
        EducationLevel::Masters,
        EducationLevel::Phd,
    ];

    /// Case-insensitive lookup; anything outside the ladder is not comparable.
    pub fn parse(value: &str) -> Option<Self> {
        let lowered = value.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.key() == lowered.as_str())
    }

    pub const fn key(self) -> &'static str {
        match self {
            EducationLevel::MatricOLevels => "matric/o-levels",
            EducationLevel::IntermediateALevels => "intermediate/a-levels",
            EducationLevel::Bachelors => "bachelors",
            EducationLevel::Masters => "masters",
            EducationLevel::Phd => "phd",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            EducationLevel::MatricOLevels => "Matric/O-Levels",
            EducationLevel::IntermediateALevels => "Intermediate/A-Levels",
            EducationLevel::Bachelors => "Bachelors",
            EducationLevel::Masters => "Masters",
            EducationLevel::Phd => "PhD",
        }
    }
}

/// A targeting value that is either a single accepted option or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Scalar(String),
    List(Vec<String>),
}

impl FilterValue {
    pub fn admits(&self, candidate: &str) -> bool {
        let candidate = candidate.to_lowercase();
        match self {
            FilterValue::Scalar(expected) => expected.to_lowercase() == candidate,
            FilterValue::List(options) => options
                .iter()
                .any(|option| option.to_lowercase() == candidate),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            FilterValue::Scalar(expected) => expected.clone(),
            FilterValue::List(options) => options.join(" | "),
        }
    }
}

/// Survey targeting constraints. Every field is optional; an all-`None` spec admits everyone.
///
/// Decoding treats null, `false`, `0` and `""` as "no constraint". Bounds that are not numeric
/// are dropped; text and choice fields of the wrong type are a decode error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyFilterSpec {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "decode::text"
    )]
    pub gender: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "decode::bound"
    )]
    pub min_age: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "decode::bound"
    )]
    pub max_age: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "decode::text"
    )]
    pub education: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "decode::choice"
    )]
    pub profession: Option<FilterValue>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "decode::choice"
    )]
    pub marital_status: Option<FilterValue>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "decode::choice"
    )]
    pub location: Option<FilterValue>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "decode::bound"
    )]
    pub min_income: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "decode::bound"
    )]
    pub max_income: Option<f64>,
}

impl SurveyFilterSpec {
    /// Decode a normalized `demographic_filters` mapping. Unknown keys are ignored.
    pub fn from_mapping(filters: &Map<String, Value>) -> Result<Self, EvalError> {
        if filters.is_empty() {
            return Ok(Self::default());
        }

        Ok(serde_json::from_value(Value::Object(filters.clone()))?)
    }
}

/// Demographic dimensions a survey can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemographicAxis {
    Gender,
    Age,
    Education,
    Profession,
    MaritalStatus,
    Location,
    Income,
}

impl DemographicAxis {
    pub const fn label(self) -> &'static str {
        match self {
            DemographicAxis::Gender => "gender",
            DemographicAxis::Age => "age",
            DemographicAxis::Education => "education",
            DemographicAxis::Profession => "profession",
            DemographicAxis::MaritalStatus => "marital status",
            DemographicAxis::Location => "location",
            DemographicAxis::Income => "income",
        }
    }
}
