// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! HTTP tests driving the router in-process.
//!
//! Every test builds the full application from the default configuration,
//! so the requests run through the real workflows backed by the simulated
//! LLM provider.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use edhub_core::domain::events::GenerationEvent;
use edhub_core::domain::service_config::ServiceConfig;
use edhub_core::infrastructure::event_bus::{spawn_event_logger, DomainEvent, EventBus};
use edhub_core::presentation::{app, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn router_with_bus(event_bus: EventBus) -> Router {
    let config = ServiceConfig::default();
    let state = AppState::from_config(&config, event_bus).unwrap();
    app(state, &config.cors)
}

fn router() -> Router {
    router_with_bus(EventBus::default())
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read(response).await
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    read(response).await
}

async fn read(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(router(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_echo_returns_text() {
    let (status, body) = get(router(), "/ai/echo?text=hello").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"result": "hello"}));
}

#[tokio::test]
async fn test_echo_accepts_empty_text() {
    let (status, body) = get(router(), "/ai/echo?text=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"result": ""}));
}

#[tokio::test]
async fn test_echo_decodes_percent_encoding() {
    let (status, body) = get(router(), "/ai/echo?text=a%26b%3Dc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"result": "a&b=c"}));
}

#[tokio::test]
async fn test_echo_round_trips_unicode() {
    let (status, body) = get(router(), "/ai/echo?text=h%C3%A9llo%20%F0%9F%9A%80").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"result": "héllo 🚀"}));
}

#[tokio::test]
async fn test_echo_requires_text() {
    let (status, body) = get(router(), "/ai/echo").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_echo_publishes_event() {
    let event_bus = EventBus::new(8);
    let mut events = event_bus.subscribe();

    let (status, _) = get(router_with_bus(event_bus), "/ai/echo?text=hello").await;
    assert_eq!(status, StatusCode::OK);
    assert!(matches!(
        events.try_recv().unwrap(),
        DomainEvent::Generation(GenerationEvent::EchoCompleted { length: 5, .. })
    ));
}

#[tokio::test]
async fn test_event_logger_sees_handler_events() {
    let event_bus = EventBus::new(8);
    let logger = spawn_event_logger(&event_bus);

    let (status, _) = get(router_with_bus(event_bus), "/ai/echo?text=hello").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(logger.await.unwrap(), 1);
}

#[tokio::test]
async fn test_generate_course() {
    let (status, body) = post_json(
        router(),
        "/api/courses/generate",
        json!({"topic": "Rust", "model": "gpt-4"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["error"].is_null());
    assert_eq!(body["course"]["topic"], "Rust");
    let modules = body["course"]["modules"].as_array().unwrap();
    assert_eq!(modules.len(), 2);
    assert_eq!(modules[1]["lessons"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_generate_course_failure_is_reported_in_body() {
    let (status, body) = post_json(router(), "/api/courses/generate", json!({"topic": ""})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert!(body["course"].is_null());
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to generate course: "));
}

#[tokio::test]
async fn test_generate_course_rejects_malformed_body() {
    let (status, body) = post_json(router(), "/api/courses/generate", json!({"subject": "Rust"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_generate_lesson() {
    let (status, body) = post_json(
        router(),
        "/lessons/generate",
        json!({"topic": "Ownership", "difficulty": "advanced", "context": "Systems programmers"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["topic"], "Ownership");
    assert_eq!(body["difficulty"], "advanced");
    assert_eq!(body["sections"].as_array().unwrap().len(), 3);
    assert_eq!(body["examples"].as_array().unwrap().len(), 2);
    assert_eq!(body["quiz_questions"].as_array().unwrap().len(), 3);
    assert_eq!(body["estimated_duration_minutes"], 60);
    assert_eq!(body["metadata"]["version"], "1.0.0");
    assert_eq!(body["metadata"]["model"], "gpt-4");
    assert!(body["metadata"]["generated_at"].is_string());
}

#[tokio::test]
async fn test_generate_lesson_without_extras() {
    let (status, body) = post_json(
        router(),
        "/lessons/generate",
        json!({"topic": "Iterators", "include_quiz": false, "include_examples": false}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["examples"].as_array().unwrap().is_empty());
    assert!(body["quiz_questions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_generate_lesson_invalid_topic() {
    let (status, body) = post_json(router(), "/lessons/generate", json!({"topic": "?!"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("Invalid topic"));
}

#[tokio::test]
async fn test_generate_lesson_failure_is_500() {
    let (status, body) = post_json(router(), "/lessons/generate", json!({"topic": "   "})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .starts_with("Failed to generate lesson: "));
}

#[tokio::test]
async fn test_openapi_document() {
    let (status, body) = get(router(), "/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["openapi"], "3.0.3");
    assert_eq!(body["info"]["title"], "EdHub Course Generator");
    assert!(body["paths"]["/lessons/generate"]["post"].is_object());
}

async fn get_html(uri: &str) -> (StatusCode, String) {
    let response = router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

#[tokio::test]
async fn test_docs_page() {
    let (status, page) = get_html("/docs").await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("swagger-ui"));
    assert!(page.contains("/openapi.json"));
}

#[tokio::test]
async fn test_redoc_page() {
    let (status, page) = get_html("/redoc").await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("<redoc spec-url=\"/openapi.json\">"));
}
