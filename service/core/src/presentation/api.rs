// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! HTTP API
//!
//! Route handlers and dependency wiring for the service. Workflows are built
//! once in [`AppState::from_config`] and shared by every request.
//!
//! # Architecture
//!
//! - **Layer:** Presentation
//! - **Purpose:** Translate HTTP requests into application calls and their
//!   results into JSON responses

use anyhow::{Context, Result};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use super::docs::{openapi_document, redoc, swagger_ui, OPENAPI_PATH};
use super::middleware::{cors_layer, handle_panic, ApiError};
use super::schemas::{
    EchoQuery, EchoResponse, GenerateCourseRequest, GenerateCourseResponse,
    GenerateLessonRequest, GenerateLessonResponse, HealthResponse,
};
use crate::application::agent::AgentRuntime;
use crate::application::course_generation::CourseGenerationWorkflow;
use crate::application::echo::EchoWorkflow;
use crate::application::generate_course::GenerateCourseContentUseCase;
use crate::application::lesson_content::{LessonContentWorkflow, LessonError, LessonRequest};
use crate::domain::events::GenerationEvent;
use crate::domain::llm::LLMProvider;
use crate::domain::service_config::{CorsConfig, ServiceConfig};
use crate::infrastructure::event_bus::EventBus;
use crate::infrastructure::llm::ProviderRegistry;

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub echo: Arc<EchoWorkflow>,
    pub generate_course: Arc<GenerateCourseContentUseCase>,
    pub lessons: Arc<LessonContentWorkflow>,
    pub event_bus: EventBus,
}

impl AppState {
    /// Wire the LLM provider, agents and workflows described by `config`
    pub fn from_config(config: &ServiceConfig, event_bus: EventBus) -> Result<Self> {
        let registry = ProviderRegistry::from_config(&config.llm);
        info!(
            provider = registry.name(),
            model = registry.default_model(),
            "LLM provider ready"
        );
        let runtime = AgentRuntime::new(Arc::new(registry));

        let echo = EchoWorkflow::new().context("Failed to build echo workflow")?;
        let course_workflow = CourseGenerationWorkflow::new(runtime.clone(), config)
            .context("Failed to build course generation workflow")?;
        let lessons = LessonContentWorkflow::new(runtime, config)
            .context("Failed to build lesson content workflow")?;

        Ok(Self {
            app_name: config.app_name.clone(),
            echo: Arc::new(echo),
            generate_course: Arc::new(GenerateCourseContentUseCase::new(
                Arc::new(course_workflow),
                event_bus.clone(),
                config.llm.default_model.clone(),
            )),
            lessons: Arc::new(lessons),
            event_bus,
        })
    }
}

pub fn app(state: AppState, cors: &CorsConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ai/echo", get(echo))
        .route("/api/courses/generate", post(generate_course))
        .route("/lessons/generate", post(generate_lesson))
        .route("/docs", get(swagger_ui))
        .route("/redoc", get(redoc))
        .route(OPENAPI_PATH, get(openapi))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer(cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

async fn echo(
    State(state): State<AppState>,
    query: Result<Query<EchoQuery>, QueryRejection>,
) -> Result<Json<EchoResponse>, ApiError> {
    let Query(query) = query?;
    let result = state
        .echo
        .run(&query.text)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    debug!(length = result.len(), "Echo completed");
    state
        .event_bus
        .publish(GenerationEvent::EchoCompleted {
            length: result.len(),
            completed_at: Utc::now(),
        });
    Ok(Json(EchoResponse { result }))
}

async fn generate_course(
    State(state): State<AppState>,
    payload: Result<Json<GenerateCourseRequest>, JsonRejection>,
) -> Result<Json<GenerateCourseResponse>, ApiError> {
    let Json(request) = payload?;
    let response = match state
        .generate_course
        .execute(&request.topic, request.model.as_deref())
        .await
    {
        Ok(course) => GenerateCourseResponse::ok(course),
        Err(e) => GenerateCourseResponse::failed(e.to_string()),
    };
    Ok(Json(response))
}

async fn generate_lesson(
    State(state): State<AppState>,
    payload: Result<Json<GenerateLessonRequest>, JsonRejection>,
) -> Result<Json<GenerateLessonResponse>, ApiError> {
    let Json(request) = payload?;
    let request: LessonRequest = request.into();

    let lesson = state
        .lessons
        .generate_lesson(request)
        .await
        .map_err(|e| match e {
            LessonError::InvalidTopic { .. } => ApiError::unprocessable(e.to_string()),
            LessonError::Generation(_) => ApiError::internal(e.to_string()),
        })?;

    state
        .event_bus
        .publish(GenerationEvent::LessonGenerated {
            topic: lesson.topic.clone(),
            difficulty: lesson.difficulty,
            generated_at: Utc::now(),
        });
    Ok(Json(GenerateLessonResponse::from_lesson(
        lesson,
        state.lessons.model(),
    )))
}

async fn openapi(State(state): State<AppState>) -> Json<Value> {
    Json(openapi_document(&state.app_name, env!("CARGO_PKG_VERSION")))
}
