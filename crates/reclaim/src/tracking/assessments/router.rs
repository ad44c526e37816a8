use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{AnswerValue, CheckinContext, RiskLevel, Track, UserId, UserProfile};
use super::repository::{CheckinLog, ProfileStore, ResultHistory};
use super::service::{AssessmentError, AssessmentService};

const DEFAULT_HISTORY_LIMIT: usize = 30;

/// Router builder exposing the engine's two operations plus the thin
/// profile/track/history reads around them.
pub fn assessment_router<P, H, C>(service: Arc<AssessmentService<P, H, C>>) -> Router
where
    P: ProfileStore + 'static,
    H: ResultHistory + 'static,
    C: CheckinLog + 'static,
{
    Router::new()
        .route("/api/v1/tests/next", get(next_handler::<P, H, C>))
        .route("/api/v1/tests/submit", post(submit_handler::<P, H, C>))
        .route("/api/v1/tests/track", post(track_handler::<P, H, C>))
        .route("/api/v1/tests/profile", get(profile_handler::<P, H, C>))
        .route("/api/v1/tests/history", get(history_handler::<P, H, C>))
        .with_state(service)
}

/// One answer as submitted by the client.
#[derive(Debug, Deserialize)]
pub struct SubmittedAnswer {
    pub question_code: String,
    pub value: AnswerValue,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub test_code: String,
    pub answers: Vec<SubmittedAnswer>,
}

#[derive(Debug, Deserialize)]
pub struct TrackRequest {
    pub track: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Sanitized profile view for API responses.
#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub onboarding_completed: bool,
    pub onboarding_day: u8,
    pub track: Option<&'static str>,
    pub risk_level: &'static str,
}

impl From<UserProfile> for ProfileView {
    fn from(profile: UserProfile) -> Self {
        Self {
            onboarding_completed: profile.onboarding_completed,
            onboarding_day: profile.onboarding_day,
            track: profile.track.map(Track::label),
            risk_level: RiskLevel::label(profile.risk_level),
        }
    }
}

pub(crate) async fn next_handler<P, H, C>(
    State(service): State<Arc<AssessmentService<P, H, C>>>,
    headers: HeaderMap,
    Query(context): Query<CheckinContext>,
) -> Response
where
    P: ProfileStore + 'static,
    H: ResultHistory + 'static,
    C: CheckinLog + 'static,
{
    let Some(user_id) = user_id_from(&headers) else {
        return missing_user_response();
    };

    let now = Local::now().naive_local();
    match service.next_test(&user_id, &context, now) {
        Ok(Some(descriptor)) => {
            (StatusCode::OK, axum::Json(json!({ "test": descriptor }))).into_response()
        }
        Ok(None) => {
            let payload = json!({
                "test": serde_json::Value::Null,
                "message": "No tests available right now",
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<P, H, C>(
    State(service): State<Arc<AssessmentService<P, H, C>>>,
    headers: HeaderMap,
    axum::Json(request): axum::Json<SubmitRequest>,
) -> Response
where
    P: ProfileStore + 'static,
    H: ResultHistory + 'static,
    C: CheckinLog + 'static,
{
    let Some(user_id) = user_id_from(&headers) else {
        return missing_user_response();
    };

    let score: i64 = request
        .answers
        .iter()
        .map(|answer| answer.value.score_contribution())
        .sum();
    let answers = request
        .answers
        .into_iter()
        .map(|answer| (answer.question_code, answer.value))
        .collect();

    let now = Local::now().naive_local();
    match service.submit(&user_id, &request.test_code, answers, score as i32, now) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn track_handler<P, H, C>(
    State(service): State<Arc<AssessmentService<P, H, C>>>,
    headers: HeaderMap,
    axum::Json(request): axum::Json<TrackRequest>,
) -> Response
where
    P: ProfileStore + 'static,
    H: ResultHistory + 'static,
    C: CheckinLog + 'static,
{
    let Some(user_id) = user_id_from(&headers) else {
        return missing_user_response();
    };

    let Some(track) = Track::parse(&request.track) else {
        let payload = json!({ "error": format!("invalid track '{}'", request.track) });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    };

    match service.select_track(&user_id, track) {
        Ok(profile) => {
            let payload = json!({
                "success": true,
                "track": track.label(),
                "onboarding_completed": profile.onboarding_completed,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn profile_handler<P, H, C>(
    State(service): State<Arc<AssessmentService<P, H, C>>>,
    headers: HeaderMap,
) -> Response
where
    P: ProfileStore + 'static,
    H: ResultHistory + 'static,
    C: CheckinLog + 'static,
{
    let Some(user_id) = user_id_from(&headers) else {
        return missing_user_response();
    };

    match service.profile(&user_id) {
        Ok(profile) => {
            (StatusCode::OK, axum::Json(ProfileView::from(profile))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn history_handler<P, H, C>(
    State(service): State<Arc<AssessmentService<P, H, C>>>,
    headers: HeaderMap,
    Query(query): Query<HistoryQuery>,
) -> Response
where
    P: ProfileStore + 'static,
    H: ResultHistory + 'static,
    C: CheckinLog + 'static,
{
    let Some(user_id) = user_id_from(&headers) else {
        return missing_user_response();
    };

    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    match service.history(&user_id, limit) {
        Ok(results) => (StatusCode::OK, axum::Json(results)).into_response(),
        Err(error) => error_response(error),
    }
}

/// The identity layer hands the opaque user id through this header.
pub(crate) fn user_id_from(headers: &HeaderMap) -> Option<UserId> {
    headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(|value| UserId(value.to_string()))
}

pub(crate) fn missing_user_response() -> Response {
    let payload = json!({ "error": "missing x-user-id header" });
    (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
}

fn error_response(error: AssessmentError) -> Response {
    match error {
        AssessmentError::UnknownTest(code) => {
            let payload = json!({ "error": format!("unknown test code '{code}'") });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
