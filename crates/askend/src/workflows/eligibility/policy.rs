use super::config::EligibilityConfig;
use super::domain::{DemographicAxis, EducationLevel};
use super::EvalError;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Final answer for one candidate and one survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum EligibilityDecision {
    /// The survey declares no constraints.
    Unrestricted,
    Eligible,
    Ineligible { reason: ExclusionReason },
    /// The filters could not be decoded and the engine admitted the candidate anyway.
    FailedOpen { detail: String },
}

impl EligibilityDecision {
    pub fn is_eligible(&self) -> bool {
        !matches!(self, EligibilityDecision::Ineligible { .. })
    }

    pub fn summary(&self) -> String {
        match self {
            EligibilityDecision::Unrestricted => "open to every filler".to_string(),
            EligibilityDecision::Eligible => "matches every targeted demographic".to_string(),
            EligibilityDecision::Ineligible { reason } => reason.summary(),
            EligibilityDecision::FailedOpen { detail } => {
                format!("shown despite unreadable filters ({detail})")
            }
        }
    }
}

/// Why a candidate was kept away from a survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExclusionReason {
    GenderMismatch {
        required: String,
        found: String,
    },
    BelowMinimumAge {
        minimum: f64,
        age: u32,
    },
    AboveMaximumAge {
        maximum: f64,
        age: u32,
    },
    InsufficientEducation {
        required: EducationLevel,
        found: EducationLevel,
    },
    NotTargeted {
        axis: DemographicAxis,
        allowed: String,
        found: String,
    },
    BelowMinimumIncome {
        minimum: f64,
        income: f64,
    },
    AboveMaximumIncome {
        maximum: f64,
        income: f64,
    },
    /// Only produced when the engine is configured to fail closed.
    UnreadableFilters {
        detail: String,
    },
}

impl ExclusionReason {
    pub fn summary(&self) -> String {
        match self {
            ExclusionReason::GenderMismatch { required, found } => {
                format!("targets {required}, filler is {found}")
            }
            ExclusionReason::BelowMinimumAge { minimum, age } => {
                format!("age {age} below minimum {minimum}")
            }
            ExclusionReason::AboveMaximumAge { maximum, age } => {
                format!("age {age} above maximum {maximum}")
            }
            ExclusionReason::InsufficientEducation { required, found } => format!(
                "requires {} or higher, filler has {}",
                required.label(),
                found.label()
            ),
            ExclusionReason::NotTargeted {
                axis,
                allowed,
                found,
            } => format!("{} {found} not in [{allowed}]", axis.label()),
            ExclusionReason::BelowMinimumIncome { minimum, income } => {
                format!("income {income:.0} below minimum {minimum:.0}")
            }
            ExclusionReason::AboveMaximumIncome { maximum, income } => {
                format!("income {income:.0} above maximum {maximum:.0}")
            }
            ExclusionReason::UnreadableFilters { detail } => {
                format!("hidden because filters are unreadable ({detail})")
            }
        }
    }
}

pub(crate) fn decide_outcome(
    unrestricted: bool,
    exclusion: Option<ExclusionReason>,
) -> EligibilityDecision {
    match exclusion {
        Some(reason) => EligibilityDecision::Ineligible { reason },
        None if unrestricted => EligibilityDecision::Unrestricted,
        None => EligibilityDecision::Eligible,
    }
}

/// Turn an unreadable constraint into a decision according to the configured stance.
pub(crate) fn absorb_error(error: &EvalError, config: &EligibilityConfig) -> EligibilityDecision {
    let detail = error.to_string();
    if config.fail_open {
        warn!(error = %detail, "demographic filters unreadable; showing survey");
        EligibilityDecision::FailedOpen { detail }
    } else {
        warn!(error = %detail, "demographic filters unreadable; hiding survey");
        EligibilityDecision::Ineligible {
            reason: ExclusionReason::UnreadableFilters { detail },
        }
    }
}
