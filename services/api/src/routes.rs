use crate::infra::{deserialize_optional_date, AppState};
use askend::workflows::columns::RawColumn;
use askend::workflows::dashboard::{
    DashboardInputs, DashboardView, FillerDashboard, SurveyTab, UserProfileRecord,
};
use askend::workflows::eligibility::{CandidateProfile, EligibilityOutcome};
use askend::workflows::signup::{FormField, PasswordCriteria, SignUpForm, ValidatedSignUp};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;

pub(crate) fn app_router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/eligibility", post(eligibility_endpoint))
        .route("/api/v1/dashboard", post(dashboard_endpoint))
        .route("/api/v1/signup/validate", post(signup_validate_endpoint))
}

#[derive(Debug, Deserialize)]
pub(crate) struct EligibilityRequest {
    pub(crate) profile: UserProfileRecord,
    /// The survey's `demographic_filters` column, native or JSON-encoded.
    #[serde(default)]
    pub(crate) demographic_filters: RawColumn,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EligibilityResponse {
    pub(crate) eligible: bool,
    pub(crate) candidate: CandidateProfile,
    pub(crate) outcome: EligibilityOutcome,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DashboardRequest {
    #[serde(flatten)]
    pub(crate) inputs: DashboardInputs,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) tab: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SignUpValidation {
    pub(crate) accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) message: Option<String>,
    pub(crate) criteria: PasswordCriteria,
    pub(crate) field_errors: BTreeMap<FormField, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) account: Option<ValidatedSignUp>,
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn eligibility_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<EligibilityRequest>,
) -> Json<EligibilityResponse> {
    let today = payload.today.unwrap_or_else(|| Local::now().date_naive());
    let candidate = payload.profile.candidate(today);
    let outcome = state
        .engine
        .evaluate_column(&candidate, &payload.demographic_filters);

    Json(EligibilityResponse {
        eligible: outcome.is_eligible(),
        candidate,
        outcome,
    })
}

pub(crate) async fn dashboard_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<DashboardRequest>,
) -> Json<DashboardView> {
    let today = payload.today.unwrap_or_else(|| Local::now().date_naive());
    let tab = payload
        .tab
        .as_deref()
        .map(SurveyTab::from_name)
        .unwrap_or_default();

    let dashboard = FillerDashboard::build(&payload.inputs, &state.engine, today, Utc::now());
    Json(dashboard.view(tab))
}

pub(crate) async fn signup_validate_endpoint(
    Json(form): Json<SignUpForm>,
) -> (StatusCode, Json<SignUpValidation>) {
    let criteria = PasswordCriteria::assess(&form.password);

    match form.validate() {
        Ok(account) => (
            StatusCode::OK,
            Json(SignUpValidation {
                accepted: true,
                title: None,
                message: None,
                criteria,
                field_errors: BTreeMap::new(),
                account: Some(account),
            }),
        ),
        Err(rejection) => {
            let field_errors = rejection
                .field_errors()
                .iter()
                .map(|(field, error)| (*field, error.to_string()))
                .collect();

            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(SignUpValidation {
                    accepted: false,
                    title: Some(rejection.title().to_string()),
                    message: Some(rejection.to_string()),
                    criteria,
                    field_errors,
                    account: None,
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askend::workflows::eligibility::EligibilityEngine;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app_state(ready: bool) -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            engine: Arc::new(EligibilityEngine::default()),
        }
    }

    async fn post_json(path: &str, body: Value) -> (StatusCode, Value) {
        let router = app_router().layer(Extension(app_state(true)));
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(path)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        (status, serde_json::from_slice(&bytes).expect("json"))
    }

    #[tokio::test]
    async fn readiness_reports_initializing_until_bound() {
        let response = readiness_endpoint(Extension(app_state(false)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = readiness_endpoint(Extension(app_state(true)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn health_route_responds() {
        let router = app_router().layer(Extension(app_state(true)));
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn eligibility_route_evaluates_encoded_filters() {
        let (status, payload) = post_json(
            "/api/v1/eligibility",
            json!({
                "profile": { "gender": "female", "date_of_birth": "2008-01-01" },
                "demographic_filters": "{\"min_age\": 18}",
                "today": "2024-06-15"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["eligible"], json!(false));
        assert_eq!(payload["candidate"]["age"], json!(16));
        assert_eq!(
            payload["outcome"]["decision"]["reason"]["kind"],
            json!("below_minimum_age")
        );
    }

    #[tokio::test]
    async fn dashboard_route_renders_requested_tab() {
        let (status, payload) = post_json(
            "/api/v1/dashboard",
            json!({
                "profile": {
                    "full_name": "Ayesha Khan",
                    "gender": "Female",
                    "date_of_birth": "1995-03-10",
                    "marital_status": "Married",
                    "mobile_number": "03001234567",
                    "cnic_number": "35202-1234567-1",
                    "education": "Masters",
                    "profession": "Consultant"
                },
                "role": "filler",
                "surveys": [
                    { "id": 1, "title": "Open to all", "is_public_form": true },
                    { "id": 2, "title": "Over 60s", "demographic_filters": { "min_age": 60 } }
                ],
                "responses": [{ "survey_id": 1, "response_data": [], "reward_amount": 20 }],
                "today": "2024-06-15",
                "tab": "filled"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["welcome"], json!("Welcome, Ayesha"));
        assert_eq!(payload["tab"], json!("filled"));
        assert_eq!(payload["counts"], json!({ "available": 0, "filled": 1 }));
        assert_eq!(payload["surveys"][0]["id"], json!("1"));
        assert_eq!(payload["completion_bonus_due"], json!(true));
    }

    #[tokio::test]
    async fn signup_validation_reports_field_errors() {
        let (status, payload) = post_json(
            "/api/v1/signup/validate",
            json!({
                "full_name": "Ayesha",
                "email": "ayesha@mailinator.com",
                "password": "Sunny.Lahore42",
                "confirm_password": "Sunny.Lahore42",
                "agreed_to_terms": true
            }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            payload["field_errors"]["email"],
            json!("Disposable email domains are not allowed.")
        );
        assert_eq!(
            payload["message"],
            json!("Please correct the highlighted errors in the form.")
        );
    }

    #[tokio::test]
    async fn signup_validation_accepts_complete_forms() {
        let (status, payload) = post_json(
            "/api/v1/signup/validate",
            json!({
                "full_name": "ayesha khan",
                "email": "ayesha@example.pk",
                "password": "Sunny.Lahore42",
                "confirm_password": "Sunny.Lahore42",
                "agreed_to_terms": true,
                "role": "creator"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["account"]["full_name"], json!("Ayesha Khan"));
        assert_eq!(payload["account"]["role"], json!("creator"));
        assert!(payload["account"].get("password").is_none());
    }
}
