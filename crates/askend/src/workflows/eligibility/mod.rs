//! Demographic eligibility: decides whether a filler may see a survey given the survey's
//! targeting filters.
//!
//! Axes are checked in a fixed order and the first exclusion wins. Raw filter mappings are read
//! one axis at a time, so a malformed constraint only matters once the candidate has a value to
//! compare it with and no earlier axis has excluded them. Such failures surface as [`EvalError`]
//! through [`EligibilityEngine::try_evaluate_mapping`]; the non-`try` entry points absorb them
//! according to [`EligibilityConfig::fail_open`].

mod config;
mod decode;
mod domain;
mod policy;
mod rules;

#[cfg(test)]
mod tests;

pub use config::EligibilityConfig;
pub use domain::{
    CandidateProfile, DemographicAxis, EducationLevel, FilterValue, SurveyFilterSpec,
};
pub use policy::{EligibilityDecision, ExclusionReason};

use crate::workflows::columns::{normalize_filters, RawColumn};
use policy::{absorb_error, decide_outcome};
use rules::Screening;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Errors raised while preparing a survey's filters for evaluation.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("malformed demographic filters: {0}")]
    MalformedFilters(#[from] serde_json::Error),
    #[error("malformed demographic filter `{key}`: {detail}")]
    MalformedFilter { key: &'static str, detail: String },
}

/// Stateless evaluator applying the targeting rules to a candidate.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEngine {
    config: EligibilityConfig,
}

impl EligibilityEngine {
    pub fn new(config: EligibilityConfig) -> Self {
        Self { config }
    }

    pub fn evaluate(
        &self,
        candidate: &CandidateProfile,
        filters: &SurveyFilterSpec,
    ) -> EligibilityOutcome {
        self.conclude(rules::screen_profile(candidate, filters))
    }

    pub fn try_evaluate_mapping(
        &self,
        candidate: &CandidateProfile,
        filters: &Map<String, Value>,
    ) -> Result<EligibilityOutcome, EvalError> {
        let Screening { checks, verdict } = rules::screen_profile(candidate, filters);
        let exclusion = verdict?;
        Ok(EligibilityOutcome {
            decision: decide_outcome(checks.is_empty(), exclusion),
            checks,
        })
    }

    /// Evaluate a normalized filter mapping; never fails.
    pub fn evaluate_mapping(
        &self,
        candidate: &CandidateProfile,
        filters: &Map<String, Value>,
    ) -> EligibilityOutcome {
        self.conclude(rules::screen_profile(candidate, filters))
    }

    /// Evaluate a raw `demographic_filters` column as stored on the survey record.
    pub fn evaluate_column(
        &self,
        candidate: &CandidateProfile,
        filters: &RawColumn,
    ) -> EligibilityOutcome {
        self.evaluate_mapping(candidate, &normalize_filters(filters))
    }

    /// Settle the decision. A screening that recorded no checks met no targeted axis.
    fn conclude(&self, screening: Screening) -> EligibilityOutcome {
        let Screening { checks, verdict } = screening;
        let decision = match verdict {
            Ok(exclusion) => decide_outcome(checks.is_empty(), exclusion),
            Err(error) => absorb_error(&error, &self.config),
        };

        EligibilityOutcome { decision, checks }
    }
}

/// Outcome plus the per-axis audit trail, in evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityOutcome {
    pub decision: EligibilityDecision,
    pub checks: Vec<AxisCheck>,
}

impl EligibilityOutcome {
    pub fn is_eligible(&self) -> bool {
        self.decision.is_eligible()
    }
}

/// Result of checking a single targeted axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisCheck {
    pub axis: DemographicAxis,
    pub status: AxisStatus,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisStatus {
    Satisfied,
    /// The filler has no usable value for this axis, so it cannot exclude them.
    Skipped,
    Rejected,
}

pub fn is_eligible(candidate: &CandidateProfile, filters: &SurveyFilterSpec) -> bool {
    EligibilityEngine::default()
        .evaluate(candidate, filters)
        .is_eligible()
}

/// Like [`is_eligible`], for filters that have not been decoded yet. Fails open.
pub fn is_eligible_mapping(candidate: &CandidateProfile, filters: &Map<String, Value>) -> bool {
    EligibilityEngine::default()
        .evaluate_mapping(candidate, filters)
        .is_eligible()
}
