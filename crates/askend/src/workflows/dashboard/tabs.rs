use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ledger::CompletionLedger;
use super::surveys::SurveyListing;
use crate::workflows::eligibility::CandidateProfile;

pub const LOCKED_TITLE: &str = "Surveys Locked";
pub const LOCKED_MESSAGE: &str = "Complete your profile to unlock available surveys";
const COMPLETED_BLURB: &str = "You have completed this survey. Thank you!";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurveyTab {
    #[default]
    Available,
    Filled,
}

impl SurveyTab {
    /// Anything other than "filled" selects the available tab.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("filled") {
            SurveyTab::Filled
        } else {
            SurveyTab::Available
        }
    }

    pub fn chip_label(self) -> &'static str {
        match self {
            SurveyTab::Available => "Available",
            SurveyTab::Filled => "Filled",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SurveyTab::Available => "Available Surveys",
            SurveyTab::Filled => "Filled Surveys",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabCounts {
    pub available: usize,
    pub filled: usize,
}

/// Visible surveys split into those still to answer and those already submitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurveyBoard {
    upcoming: Vec<SurveyListing>,
    filled: Vec<SurveyListing>,
}

impl SurveyBoard {
    pub fn partition(listings: Vec<SurveyListing>, ledger: &CompletionLedger) -> Self {
        let (filled, upcoming): (Vec<_>, Vec<_>) = listings
            .into_iter()
            .partition(|listing| ledger.is_completed(&listing.id));
        Self { upcoming, filled }
    }

    pub fn listings(&self, tab: SurveyTab) -> &[SurveyListing] {
        match tab {
            SurveyTab::Available => &self.upcoming,
            SurveyTab::Filled => &self.filled,
        }
    }

    pub fn find(&self, survey_id: &str) -> Option<&SurveyListing> {
        self.upcoming
            .iter()
            .chain(&self.filled)
            .find(|listing| listing.id == survey_id)
    }

    pub fn counts(&self) -> TabCounts {
        TabCounts {
            available: self.upcoming.len(),
            filled: self.filled.len(),
        }
    }
}

/// What tapping a survey card does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SurveyAction {
    Start { survey_id: String },
    AlreadyCompleted { message: String },
    ViewSubmission { survey_id: String, responses: Value },
}

impl SurveyAction {
    /// Submissions can only be reopened from the filled tab.
    pub fn resolve(tab: SurveyTab, listing: &SurveyListing, ledger: &CompletionLedger) -> Self {
        let completed = ledger.is_completed(&listing.id);
        match (tab, completed) {
            (SurveyTab::Filled, true) => SurveyAction::ViewSubmission {
                survey_id: listing.id.clone(),
                responses: ledger.saved_responses(&listing.id),
            },
            (_, true) => SurveyAction::AlreadyCompleted {
                message: "You have already completed this survey.".to_string(),
            },
            (_, false) => SurveyAction::Start {
                survey_id: listing.id.clone(),
            },
        }
    }
}

/// A survey card as rendered in either tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyCard {
    #[serde(flatten)]
    pub listing: SurveyListing,
    pub completed: bool,
    pub blurb: String,
    pub progress_percent: f64,
    pub has_filters: bool,
}

impl SurveyCard {
    pub fn new(listing: &SurveyListing, ledger: &CompletionLedger) -> Self {
        let completed = ledger.is_completed(&listing.id);
        let blurb = if completed {
            COMPLETED_BLURB.to_string()
        } else {
            listing.description.clone()
        };

        Self {
            listing: listing.clone(),
            completed,
            blurb,
            progress_percent: listing.progress_percent(),
            has_filters: listing.has_filters(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyState {
    pub title: String,
    pub message: String,
}

fn profile_summary(candidate: &CandidateProfile) -> String {
    let gender = candidate.gender.as_deref().unwrap_or("unknown");
    let age = candidate
        .age
        .map_or_else(|| "unknown".to_string(), |age| age.to_string());
    format!("{gender}, {age} yrs")
}

impl EmptyState {
    pub fn for_tab(tab: SurveyTab, candidate: Option<&CandidateProfile>) -> Self {
        match tab {
            SurveyTab::Available => Self {
                title: "No matching surveys found".to_string(),
                message: match candidate {
                    Some(candidate) => format!(
                        "No surveys match your profile criteria ({}).",
                        profile_summary(candidate)
                    ),
                    None => "Complete your profile to see available surveys.".to_string(),
                },
            },
            SurveyTab::Filled => Self {
                title: "No filled surveys yet".to_string(),
                message: "Completed surveys will appear here once you submit responses."
                    .to_string(),
            },
        }
    }
}

pub fn profile_banner(candidate: &CandidateProfile) -> String {
    format!(
        "Showing surveys matching your profile: {}",
        profile_summary(candidate)
    )
}
