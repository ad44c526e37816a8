use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;
use serde_json::Value;

use super::common::*;
use crate::tracking::assessments::domain::AnswerValue;
use crate::tracking::assessments::router::{
    next_handler, profile_handler, submit_handler, track_handler, SubmitRequest, SubmittedAnswer,
    TrackRequest,
};

fn headers_for(user: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("x-user-id", HeaderValue::from_str(user).expect("header"));
    headers
}

async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

fn shared_service() -> Arc<TestService> {
    let (service, _, _, _) = service();
    Arc::new(service)
}

#[tokio::test]
async fn next_endpoint_returns_the_first_onboarding_screen() {
    let service = shared_service();

    let response = next_handler(
        State(service),
        headers_for("router-user"),
        Query(quiet()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["test"]["code"], "A1");
    assert_eq!(body["test"]["level"], "A");
    assert!(body["test"]["questions"].is_array());
}

#[tokio::test]
async fn next_endpoint_requires_the_user_header() {
    let service = shared_service();

    let response = next_handler(State(service), HeaderMap::new(), Query(quiet())).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn submit_endpoint_scores_answers_and_signals_track_selection() {
    let service = shared_service();

    let request = SubmitRequest {
        test_code: "A1".to_string(),
        answers: vec![
            SubmittedAnswer {
                question_code: "A1_Q1".to_string(),
                value: AnswerValue::Number(3),
            },
            SubmittedAnswer {
                question_code: "A1_Q2".to_string(),
                value: AnswerValue::Number(2),
            },
            SubmittedAnswer {
                question_code: "A1_Q3".to_string(),
                value: AnswerValue::Flag(true),
            },
        ],
    };

    let response = submit_handler(
        State(service),
        headers_for("router-user"),
        axum::Json(request),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    // 3 + 2 + 3 (affirmative flag) = 8
    assert_eq!(body["interpretation"]["score"], 8);
    assert_eq!(body["show_track_selection"], true);
}

#[tokio::test]
async fn submit_endpoint_rejects_unknown_codes() {
    let service = shared_service();

    let request = SubmitRequest {
        test_code: "Z9".to_string(),
        answers: Vec::new(),
    };

    let response = submit_handler(
        State(service),
        headers_for("router-user"),
        axum::Json(request),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert!(body["error"].as_str().expect("error string").contains("Z9"));
}

#[tokio::test]
async fn track_endpoint_validates_the_track_name() {
    let service = shared_service();

    let response = track_handler(
        State(service.clone()),
        headers_for("router-user"),
        axum::Json(TrackRequest {
            track: "lottery".to_string(),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = track_handler(
        State(service),
        headers_for("router-user"),
        axum::Json(TrackRequest {
            track: "trading".to_string(),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["track"], "trading");
}

#[tokio::test]
async fn profile_endpoint_reports_onboarding_state() {
    let service = shared_service();

    let response = profile_handler(State(service), headers_for("router-user")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["onboarding_completed"], false);
    assert_eq!(body["onboarding_day"], 1);
    assert_eq!(body["risk_level"], "unknown");
}
