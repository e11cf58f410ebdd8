use serde_json::{Map, Value};

use super::decode;
use super::domain::{
    CandidateProfile, DemographicAxis, EducationLevel, FilterValue, SurveyFilterSpec,
};
use super::policy::ExclusionReason;
use super::{AxisCheck, AxisStatus, EvalError};

/// Where the screening reads each axis's constraint from.
///
/// Axes are read one at a time, in screening order, and only once the candidate has a value
/// to compare. A malformed constraint therefore cannot override an earlier exclusion.
pub(crate) trait AxisFilters {
    fn gender(&self) -> Result<Option<String>, EvalError>;
    fn age_bounds(&self) -> Bounds;
    fn education(&self) -> Result<Option<String>, EvalError>;
    fn profession(&self) -> Result<Option<FilterValue>, EvalError>;
    fn marital_status(&self) -> Result<Option<FilterValue>, EvalError>;
    fn location(&self) -> Result<Option<FilterValue>, EvalError>;
    fn income_bounds(&self) -> Bounds;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Bounds {
    pub(crate) minimum: Option<f64>,
    pub(crate) maximum: Option<f64>,
}

impl Bounds {
    fn is_set(self) -> bool {
        self.minimum.is_some() || self.maximum.is_some()
    }
}

impl AxisFilters for SurveyFilterSpec {
    fn gender(&self) -> Result<Option<String>, EvalError> {
        Ok(self.gender.clone())
    }

    fn age_bounds(&self) -> Bounds {
        Bounds {
            minimum: self.min_age,
            maximum: self.max_age,
        }
    }

    fn education(&self) -> Result<Option<String>, EvalError> {
        Ok(self.education.clone())
    }

    fn profession(&self) -> Result<Option<FilterValue>, EvalError> {
        Ok(self.profession.clone())
    }

    fn marital_status(&self) -> Result<Option<FilterValue>, EvalError> {
        Ok(self.marital_status.clone())
    }

    fn location(&self) -> Result<Option<FilterValue>, EvalError> {
        Ok(self.location.clone())
    }

    fn income_bounds(&self) -> Bounds {
        Bounds {
            minimum: self.min_income,
            maximum: self.max_income,
        }
    }
}

/// A normalized `demographic_filters` mapping, decoded key by key as axes are screened.
impl AxisFilters for Map<String, Value> {
    fn gender(&self) -> Result<Option<String>, EvalError> {
        read_key(self, "gender", decode::read_text)
    }

    fn age_bounds(&self) -> Bounds {
        read_bounds(self, "min_age", "max_age")
    }

    fn education(&self) -> Result<Option<String>, EvalError> {
        read_key(self, "education", decode::read_text)
    }

    fn profession(&self) -> Result<Option<FilterValue>, EvalError> {
        read_key(self, "profession", decode::read_choice)
    }

    fn marital_status(&self) -> Result<Option<FilterValue>, EvalError> {
        read_key(self, "marital_status", decode::read_choice)
    }

    fn location(&self) -> Result<Option<FilterValue>, EvalError> {
        read_key(self, "location", decode::read_choice)
    }

    fn income_bounds(&self) -> Bounds {
        read_bounds(self, "min_income", "max_income")
    }
}

fn read_key<T>(
    filters: &Map<String, Value>,
    key: &'static str,
    read: fn(&Value) -> Result<Option<T>, String>,
) -> Result<Option<T>, EvalError> {
    match filters.get(key) {
        Some(value) => read(value).map_err(|detail| EvalError::MalformedFilter { key, detail }),
        None => Ok(None),
    }
}

fn read_bounds(filters: &Map<String, Value>, minimum: &str, maximum: &str) -> Bounds {
    Bounds {
        minimum: filters.get(minimum).and_then(decode::read_bound),
        maximum: filters.get(maximum).and_then(decode::read_bound),
    }
}

/// Audit trail of one screening plus its verdict. An error means a constraint the candidate
/// could be compared against was unreadable before any axis excluded them.
pub(crate) struct Screening {
    pub(crate) checks: Vec<AxisCheck>,
    pub(crate) verdict: Result<Option<ExclusionReason>, EvalError>,
}

enum Halt {
    Excluded(ExclusionReason),
    Unreadable(EvalError),
}

impl From<EvalError> for Halt {
    fn from(error: EvalError) -> Self {
        Halt::Unreadable(error)
    }
}

/// Run every configured axis in order, stopping at the first one that excludes the candidate.
pub(crate) fn screen_profile<F>(candidate: &CandidateProfile, filters: &F) -> Screening
where
    F: AxisFilters + ?Sized,
{
    let mut checks = Vec::new();
    let verdict = match run_axes(candidate, filters, &mut checks) {
        Ok(()) => Ok(None),
        Err(Halt::Excluded(reason)) => Ok(Some(reason)),
        Err(Halt::Unreadable(error)) => Err(error),
    };
    Screening { checks, verdict }
}

fn run_axes<F>(
    candidate: &CandidateProfile,
    filters: &F,
    checks: &mut Vec<AxisCheck>,
) -> Result<(), Halt>
where
    F: AxisFilters + ?Sized,
{
    gender(candidate, filters, checks)?;
    age(candidate, filters, checks)?;
    education(candidate, filters, checks)?;
    membership(
        DemographicAxis::Profession,
        || filters.profession(),
        present(&candidate.profession),
        checks,
    )?;
    membership(
        DemographicAxis::MaritalStatus,
        || filters.marital_status(),
        present(&candidate.marital_status),
        checks,
    )?;
    membership(
        DemographicAxis::Location,
        || filters.location(),
        present(&candidate.city),
        checks,
    )?;
    income(candidate, filters, checks)
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}

/// Whether the survey targets an axis at all; unreadable constraints count as targeted.
fn is_targeted<T>(filter: Result<Option<T>, EvalError>) -> bool {
    !matches!(filter, Ok(None))
}

fn satisfied(checks: &mut Vec<AxisCheck>, axis: DemographicAxis, notes: String) {
    checks.push(AxisCheck {
        axis,
        status: AxisStatus::Satisfied,
        notes,
    });
}

fn skipped(checks: &mut Vec<AxisCheck>, axis: DemographicAxis, notes: String) {
    checks.push(AxisCheck {
        axis,
        status: AxisStatus::Skipped,
        notes,
    });
}

fn rejected(
    checks: &mut Vec<AxisCheck>,
    axis: DemographicAxis,
    reason: ExclusionReason,
) -> Result<(), Halt> {
    checks.push(AxisCheck {
        axis,
        status: AxisStatus::Rejected,
        notes: reason.summary(),
    });
    Err(Halt::Excluded(reason))
}

fn gender<F>(
    candidate: &CandidateProfile,
    filters: &F,
    checks: &mut Vec<AxisCheck>,
) -> Result<(), Halt>
where
    F: AxisFilters + ?Sized,
{
    let Some(found) = present(&candidate.gender) else {
        if is_targeted(filters.gender()) {
            skipped(
                checks,
                DemographicAxis::Gender,
                "no gender on file".to_string(),
            );
        }
        return Ok(());
    };
    let Some(required) = filters.gender()? else {
        return Ok(());
    };

    if required.to_lowercase() == found.to_lowercase() {
        satisfied(
            checks,
            DemographicAxis::Gender,
            format!("gender {found} matches"),
        );
        Ok(())
    } else {
        rejected(
            checks,
            DemographicAxis::Gender,
            ExclusionReason::GenderMismatch {
                required,
                found: found.to_string(),
            },
        )
    }
}

fn age<F>(
    candidate: &CandidateProfile,
    filters: &F,
    checks: &mut Vec<AxisCheck>,
) -> Result<(), Halt>
where
    F: AxisFilters + ?Sized,
{
    let bounds = filters.age_bounds();
    if !bounds.is_set() {
        return Ok(());
    }
    let Some(age) = candidate.age else {
        skipped(checks, DemographicAxis::Age, "age unknown".to_string());
        return Ok(());
    };

    let years = f64::from(age);
    if let Some(minimum) = bounds.minimum {
        if years < minimum {
            return rejected(
                checks,
                DemographicAxis::Age,
                ExclusionReason::BelowMinimumAge { minimum, age },
            );
        }
    }
    if let Some(maximum) = bounds.maximum {
        if years > maximum {
            return rejected(
                checks,
                DemographicAxis::Age,
                ExclusionReason::AboveMaximumAge { maximum, age },
            );
        }
    }

    satisfied(
        checks,
        DemographicAxis::Age,
        format!("age {age} within targeted range"),
    );
    Ok(())
}

fn education<F>(
    candidate: &CandidateProfile,
    filters: &F,
    checks: &mut Vec<AxisCheck>,
) -> Result<(), Halt>
where
    F: AxisFilters + ?Sized,
{
    let Some(found_raw) = present(&candidate.education) else {
        if is_targeted(filters.education()) {
            skipped(
                checks,
                DemographicAxis::Education,
                "no education on file".to_string(),
            );
        }
        return Ok(());
    };
    let Some(required_raw) = filters.education()? else {
        return Ok(());
    };

    let (Some(required), Some(found)) = (
        EducationLevel::parse(&required_raw),
        EducationLevel::parse(found_raw),
    ) else {
        skipped(
            checks,
            DemographicAxis::Education,
            format!("cannot rank '{found_raw}' against '{required_raw}'"),
        );
        return Ok(());
    };

    if found < required {
        return rejected(
            checks,
            DemographicAxis::Education,
            ExclusionReason::InsufficientEducation { required, found },
        );
    }

    satisfied(
        checks,
        DemographicAxis::Education,
        format!("{} meets {}", found.label(), required.label()),
    );
    Ok(())
}

fn membership(
    axis: DemographicAxis,
    read_filter: impl Fn() -> Result<Option<FilterValue>, EvalError>,
    found: Option<&str>,
    checks: &mut Vec<AxisCheck>,
) -> Result<(), Halt> {
    let Some(found) = found else {
        if is_targeted(read_filter()) {
            skipped(checks, axis, format!("no {} on file", axis.label()));
        }
        return Ok(());
    };
    let Some(filter) = read_filter()? else {
        return Ok(());
    };

    if filter.admits(found) {
        satisfied(checks, axis, format!("{found} is targeted"));
        Ok(())
    } else {
        rejected(
            checks,
            axis,
            ExclusionReason::NotTargeted {
                axis,
                allowed: filter.describe(),
                found: found.to_string(),
            },
        )
    }
}

fn income<F>(
    candidate: &CandidateProfile,
    filters: &F,
    checks: &mut Vec<AxisCheck>,
) -> Result<(), Halt>
where
    F: AxisFilters + ?Sized,
{
    let bounds = filters.income_bounds();
    if !bounds.is_set() {
        return Ok(());
    }
    // Zero is what the profile form stores when income is left blank.
    let Some(income) = candidate.monthly_income.filter(|amount| *amount != 0.0) else {
        skipped(
            checks,
            DemographicAxis::Income,
            "income not provided".to_string(),
        );
        return Ok(());
    };

    if let Some(minimum) = bounds.minimum {
        if income < minimum {
            return rejected(
                checks,
                DemographicAxis::Income,
                ExclusionReason::BelowMinimumIncome { minimum, income },
            );
        }
    }
    if let Some(maximum) = bounds.maximum {
        if income > maximum {
            return rejected(
                checks,
                DemographicAxis::Income,
                ExclusionReason::AboveMaximumIncome { maximum, income },
            );
        }
    }

    satisfied(
        checks,
        DemographicAxis::Income,
        format!("income {income:.0} within targeted range"),
    );
    Ok(())
}
