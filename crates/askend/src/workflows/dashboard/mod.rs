//! Filler dashboard: assembles the signed-in filler's profile state, the surveys they may
//! answer, and what they have already submitted.
//!
//! The backend rows arrive as loosely typed JSON; [`FillerDashboard::build`] takes them as
//! plain inputs so the same assembly runs behind the HTTP handler, the CLI and the tests.

mod fields;
mod ledger;
mod profile;
mod surveys;
mod tabs;

#[cfg(test)]
mod tests;

pub use ledger::{CompletedResponseRecord, CompletionLedger};
pub use profile::{
    age_on, display_name, parse_birth_date, ProfileCompleteness, ProfileField,
    UserProfileRecord,
};
pub use surveys::{available_surveys, SurveyListing, SurveyRecord};
pub use tabs::{
    profile_banner, EmptyState, SurveyAction, SurveyBoard, SurveyCard, SurveyTab, TabCounts,
    LOCKED_MESSAGE, LOCKED_TITLE,
};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::workflows::eligibility::{CandidateProfile, EligibilityEngine};
use crate::workflows::signup::UserRole;

/// Everything fetched for one dashboard load.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DashboardInputs {
    pub profile: Option<UserProfileRecord>,
    /// `full_name` from the auth account's metadata.
    pub auth_full_name: Option<String>,
    pub role: Option<UserRole>,
    pub surveys: Vec<SurveyRecord>,
    pub responses: Vec<CompletedResponseRecord>,
}

#[derive(Debug, Clone)]
pub struct FillerDashboard {
    pub display_name: String,
    pub wallet_balance: f64,
    pub completeness: ProfileCompleteness,
    pub completion_bonus_due: bool,
    pub candidate: Option<CandidateProfile>,
    pub board: SurveyBoard,
    pub ledger: CompletionLedger,
}

impl FillerDashboard {
    pub fn build(
        inputs: &DashboardInputs,
        engine: &EligibilityEngine,
        today: NaiveDate,
        loaded_at: DateTime<Utc>,
    ) -> Self {
        let profile = inputs.profile.as_ref();
        let candidate = profile.map(|profile| profile.candidate(today));
        let completeness = profile
            .map(ProfileCompleteness::assess)
            .unwrap_or_else(ProfileCompleteness::for_missing_profile);

        let listings = available_surveys(&inputs.surveys, candidate.as_ref(), engine, loaded_at);
        let ledger = CompletionLedger::from_records(&inputs.responses);
        let board = SurveyBoard::partition(listings, &ledger);

        let dashboard = Self {
            display_name: display_name(
                profile.and_then(|profile| profile.full_name.as_deref()),
                inputs.auth_full_name.as_deref(),
            ),
            wallet_balance: profile
                .and_then(|profile| profile.wallet_balance)
                .unwrap_or(0.0),
            completion_bonus_due: profile
                .is_some_and(|profile| profile.completion_bonus_due(inputs.role)),
            completeness,
            candidate,
            board,
            ledger,
        };

        let counts = dashboard.board.counts();
        info!(
            available = counts.available,
            filled = counts.filled,
            profile_complete = dashboard.surveys_unlocked(),
            "assembled filler dashboard"
        );
        dashboard
    }

    /// Survey lists stay locked until every required profile field is filled.
    pub fn surveys_unlocked(&self) -> bool {
        self.completeness.is_complete()
    }

    pub fn listings(&self, tab: SurveyTab) -> &[SurveyListing] {
        self.board.listings(tab)
    }

    pub fn select(&self, tab: SurveyTab, survey_id: &str) -> Option<SurveyAction> {
        self.board
            .find(survey_id)
            .map(|listing| SurveyAction::resolve(tab, listing, &self.ledger))
    }

    pub fn view(&self, tab: SurveyTab) -> DashboardView {
        let unlocked = self.surveys_unlocked();
        let cards: Vec<SurveyCard> = if unlocked {
            self.listings(tab)
                .iter()
                .map(|listing| SurveyCard::new(listing, &self.ledger))
                .collect()
        } else {
            Vec::new()
        };

        let empty_state = (unlocked && cards.is_empty())
            .then(|| EmptyState::for_tab(tab, self.candidate.as_ref()));
        let locked = (!unlocked).then(|| EmptyState {
            title: LOCKED_TITLE.to_string(),
            message: LOCKED_MESSAGE.to_string(),
        });
        let banner = match tab {
            SurveyTab::Available if unlocked => self.candidate.as_ref().map(profile_banner),
            _ => None,
        };

        DashboardView {
            welcome: format!("Welcome, {}", self.display_name),
            wallet_balance: self.wallet_balance,
            total_reward: self.ledger.total_reward(),
            profile_complete: unlocked,
            missing_fields: self.completeness.missing.clone(),
            completion_bonus_due: self.completion_bonus_due,
            tab,
            title: tab.title().to_string(),
            counts: self.board.counts(),
            banner,
            surveys: cards,
            empty_state,
            locked,
        }
    }
}

/// Serializable rendering of one dashboard tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub welcome: String,
    pub wallet_balance: f64,
    pub total_reward: f64,
    pub profile_complete: bool,
    pub missing_fields: Vec<ProfileField>,
    pub completion_bonus_due: bool,
    pub tab: SurveyTab,
    pub title: String,
    pub counts: TabCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    pub surveys: Vec<SurveyCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<EmptyState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<EmptyState>,
}
