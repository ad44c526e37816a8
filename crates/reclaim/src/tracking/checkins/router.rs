use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;

use super::domain::NewCheckin;
use super::repository::CheckinStore;
use super::service::{CheckinError, CheckinService};
use crate::tracking::assessments::router::{missing_user_response, user_id_from};

const DEFAULT_HISTORY_LIMIT: usize = 30;

/// Router builder for check-in recording and streak reads.
pub fn checkin_router<S>(service: Arc<CheckinService<S>>) -> Router
where
    S: CheckinStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/checkins",
            post(record_handler::<S>).get(recent_handler::<S>),
        )
        .route("/api/v1/checkins/today", get(today_handler::<S>))
        .route("/api/v1/streak", get(streak_handler::<S>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

pub(crate) async fn record_handler<S>(
    State(service): State<Arc<CheckinService<S>>>,
    headers: HeaderMap,
    axum::Json(new_checkin): axum::Json<NewCheckin>,
) -> Response
where
    S: CheckinStore + 'static,
{
    let Some(user_id) = user_id_from(&headers) else {
        return missing_user_response();
    };

    let now = Local::now().naive_local();
    match service.record(&user_id, new_checkin, now) {
        Ok(receipt) => (StatusCode::CREATED, axum::Json(receipt)).into_response(),
        Err(CheckinError::OutOfRange { .. }) => {
            let payload = json!({ "error": "urge, stress, and mood must be between 0 and 10" });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn recent_handler<S>(
    State(service): State<Arc<CheckinService<S>>>,
    headers: HeaderMap,
    Query(query): Query<RecentQuery>,
) -> Response
where
    S: CheckinStore + 'static,
{
    let Some(user_id) = user_id_from(&headers) else {
        return missing_user_response();
    };

    match service.recent(&user_id, query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT)) {
        Ok(checkins) => (StatusCode::OK, axum::Json(checkins)).into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn today_handler<S>(
    State(service): State<Arc<CheckinService<S>>>,
    headers: HeaderMap,
) -> Response
where
    S: CheckinStore + 'static,
{
    let Some(user_id) = user_id_from(&headers) else {
        return missing_user_response();
    };

    let today = Local::now().date_naive();
    match service.today(&user_id, today) {
        Ok(Some(checkin)) => {
            let payload = json!({ "has_checkin": true, "checkin": checkin });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Ok(None) => {
            let payload = json!({ "has_checkin": false, "checkin": serde_json::Value::Null });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn streak_handler<S>(
    State(service): State<Arc<CheckinService<S>>>,
    headers: HeaderMap,
) -> Response
where
    S: CheckinStore + 'static,
{
    let Some(user_id) = user_id_from(&headers) else {
        return missing_user_response();
    };

    match service.streak(&user_id) {
        Ok(streak) => (StatusCode::OK, axum::Json(streak)).into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
