use crate::infra::{parse_date, read_json_file};
use askend::config::AppConfig;
use askend::error::AppError;
use askend::workflows::columns::RawColumn;
use askend::workflows::dashboard::{
    CompletedResponseRecord, DashboardInputs, DashboardView, FillerDashboard, SurveyRecord,
    SurveyTab, UserProfileRecord,
};
use askend::workflows::eligibility::{AxisStatus, EligibilityEngine, EligibilityOutcome};
use askend::workflows::signup::{format_income, UserRole};
use chrono::{Local, NaiveDate, Utc};
use clap::Args;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EligibilityArgs {
    /// JSON file holding a `user_profiles` row
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// JSON file holding the survey's demographic filters
    #[arg(long)]
    pub(crate) filters: PathBuf,
    /// Date used to compute the filler's age (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct DashboardArgs {
    /// JSON file holding a `user_profiles` row
    #[arg(long)]
    pub(crate) profile: Option<PathBuf>,
    /// JSON file holding the published `surveys` rows
    #[arg(long)]
    pub(crate) surveys: PathBuf,
    /// JSON file holding the filler's `survey_responses` rows
    #[arg(long)]
    pub(crate) responses: Option<PathBuf>,
    /// Name from the auth account, used when the profile has none
    #[arg(long)]
    pub(crate) auth_name: Option<String>,
    /// Account role (filler or creator)
    #[arg(long, value_parser = parse_role, default_value = "filler")]
    pub(crate) role: UserRole,
    /// Reporting date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Tab to render: available or filled
    #[arg(long, default_value = "available")]
    pub(crate) tab: String,
}

fn parse_role(raw: &str) -> Result<UserRole, String> {
    UserRole::from_name(raw)
        .ok_or_else(|| format!("unknown role '{raw}' (expected filler or creator)"))
}

fn configured_engine() -> Result<EligibilityEngine, AppError> {
    let config = AppConfig::load()?;
    Ok(EligibilityEngine::new(config.eligibility))
}

pub(crate) fn run_eligibility(args: EligibilityArgs) -> Result<(), AppError> {
    let EligibilityArgs {
        profile,
        filters,
        today,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let profile: UserProfileRecord = read_json_file(&profile)?;
    let filters: Value = read_json_file(&filters)?;

    let engine = configured_engine()?;
    let candidate = profile.candidate(today);
    let outcome = engine.evaluate_column(&candidate, &RawColumn::from(filters));

    println!("Eligibility check ({today})");
    println!(
        "  Candidate: gender {}, age {}, city {}, income {}",
        candidate.gender.as_deref().unwrap_or("-"),
        candidate
            .age
            .map_or_else(|| "-".to_string(), |age| age.to_string()),
        candidate.city.as_deref().unwrap_or("-"),
        format_income(candidate.monthly_income),
    );
    render_outcome(&outcome);
    Ok(())
}

fn render_outcome(outcome: &EligibilityOutcome) {
    println!("  Decision: {}", outcome.decision.summary());
    if outcome.checks.is_empty() {
        println!("  Axis checks: none");
        return;
    }

    println!("  Axis checks:");
    for check in &outcome.checks {
        let status = match check.status {
            AxisStatus::Satisfied => "ok",
            AxisStatus::Skipped => "skipped",
            AxisStatus::Rejected => "rejected",
        };
        println!("    - {:<15} {:<9} {}", check.axis.label(), status, check.notes);
    }
}

pub(crate) fn run_dashboard(args: DashboardArgs) -> Result<(), AppError> {
    let DashboardArgs {
        profile,
        surveys,
        responses,
        auth_name,
        role,
        today,
        tab,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let inputs = DashboardInputs {
        profile: profile
            .map(|path| read_json_file::<UserProfileRecord>(&path))
            .transpose()?,
        auth_full_name: auth_name,
        role: Some(role),
        surveys: read_json_file::<Vec<SurveyRecord>>(&surveys)?,
        responses: responses
            .map(|path| read_json_file::<Vec<CompletedResponseRecord>>(&path))
            .transpose()?
            .unwrap_or_default(),
    };

    let engine = configured_engine()?;
    let dashboard = FillerDashboard::build(&inputs, &engine, today, Utc::now());
    render_dashboard(&dashboard.view(SurveyTab::from_name(&tab)));
    Ok(())
}

fn render_dashboard(view: &DashboardView) {
    println!("{}", view.welcome);
    println!(
        "  Wallet: Rs {} (earned from surveys: Rs {})",
        view.wallet_balance, view.total_reward
    );
    if view.completion_bonus_due {
        println!("  Profile complete: completion bonus ready to claim");
    }

    if let Some(locked) = &view.locked {
        println!("\n{}", locked.title);
        println!("  {}", locked.message);
        let missing: Vec<_> = view
            .missing_fields
            .iter()
            .map(|field| field.column())
            .collect();
        println!("  Missing: {}", missing.join(", "));
        return;
    }

    println!(
        "\n{} ({} {}, {} {})",
        view.title,
        SurveyTab::Available.chip_label(),
        view.counts.available,
        SurveyTab::Filled.chip_label(),
        view.counts.filled
    );
    if let Some(banner) = &view.banner {
        println!("  {banner}");
    }

    if let Some(empty) = &view.empty_state {
        println!("  {}", empty.title);
        println!("  {}", empty.message);
        return;
    }

    for card in &view.surveys {
        let listing = &card.listing;
        println!(
            "  - [{}] {} ({}) Rs {} | {}/{} responses ({:.0}%)",
            listing.id,
            listing.title,
            listing.category,
            listing.price,
            listing.responses_collected,
            listing.total_responses,
            card.progress_percent,
        );
        println!("      {}", card.blurb);
    }
}
