// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Generate Course Content Use Case
//!
//! # DDD Pattern: Application Service
//!
//! - **Layer:** Application
//! - **Responsibility:** Run the course generation graph for a topic and hand
//!   back a finished `Course`
//! - **Collaborators:**
//!   - Application: `CourseGenerationWorkflow`
//!   - Infrastructure: EventBus

use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};

use crate::application::course_generation::CourseGenerationWorkflow;
use crate::domain::course::Course;
use crate::domain::events::GenerationEvent;
use crate::infrastructure::event_bus::EventBus;

const WORKFLOW_NAME: &str = "course_generation";

#[derive(Debug, thiserror::Error)]
#[error("Failed to generate course: {0}")]
pub struct CourseGenerationError(pub String);

pub struct GenerateCourseContentUseCase {
    workflow: Arc<CourseGenerationWorkflow>,
    event_bus: EventBus,
    default_model: String,
}

impl GenerateCourseContentUseCase {
    pub fn new(
        workflow: Arc<CourseGenerationWorkflow>,
        event_bus: EventBus,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            workflow,
            event_bus,
            default_model: default_model.into(),
        }
    }

    pub async fn execute(
        &self,
        topic: &str,
        model: Option<&str>,
    ) -> Result<Course, CourseGenerationError> {
        let model = model
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(&self.default_model);

        match self.generate(topic, model).await {
            Ok((course, validation_errors)) => {
                info!(
                    topic,
                    modules = course.modules.len(),
                    lessons = course.lesson_count(),
                    review_notes = validation_errors,
                    "Course generated"
                );
                self.event_bus
                    .publish(GenerationEvent::CourseGenerated {
                        topic: course.topic.clone(),
                        module_count: course.modules.len(),
                        lesson_count: course.lesson_count(),
                        validation_errors,
                        generated_at: Utc::now(),
                    });
                Ok(course)
            }
            Err(cause) => {
                let err = CourseGenerationError(cause);
                error!(topic, error = %err, "Course generation failed");
                self.event_bus
                    .publish(GenerationEvent::failed(WORKFLOW_NAME, &err.0));
                Err(err)
            }
        }
    }

    async fn generate(&self, topic: &str, model: &str) -> Result<(Course, usize), String> {
        let run = self
            .workflow
            .run(topic, model)
            .await
            .map_err(|e| e.to_string())?;

        let mut course = run
            .state
            .course_structure
            .filter(|course| !course.modules.is_empty())
            .ok_or_else(|| "No course structure was generated".to_string())?;

        for module in &mut course.modules {
            if module.description.trim().is_empty() {
                module.description = format!("Module on {}", module.title);
            }
        }

        Ok((course, run.state.validation_errors.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::agent::AgentRuntime;
    use crate::domain::service_config::ServiceConfig;
    use crate::infrastructure::event_bus::DomainEvent;
    use crate::infrastructure::llm::SimulatedProvider;

    fn use_case(event_bus: EventBus) -> GenerateCourseContentUseCase {
        let config = ServiceConfig::default();
        let runtime = AgentRuntime::new(Arc::new(SimulatedProvider::new("gpt-4")));
        let workflow = CourseGenerationWorkflow::new(runtime, &config).unwrap();
        GenerateCourseContentUseCase::new(Arc::new(workflow), event_bus, "gpt-4")
    }

    #[tokio::test]
    async fn test_generates_course_and_publishes_event() {
        let event_bus = EventBus::new(8);
        let mut events = event_bus.subscribe();

        let course = use_case(event_bus).execute("Rust", None).await.unwrap();
        assert_eq!(course.topic, "Rust");
        assert_eq!(course.modules.len(), 2);
        assert_eq!(course.modules[0].description, "Introduction to Rust");

        match events.try_recv().unwrap() {
            DomainEvent::Generation(GenerationEvent::CourseGenerated {
                module_count,
                lesson_count,
                ..
            }) => {
                assert_eq!(module_count, 2);
                assert_eq!(lesson_count, 7);
            }
            other => panic!("Unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failures_are_wrapped() {
        let event_bus = EventBus::new(8);
        let mut events = event_bus.subscribe();

        let err = use_case(event_bus).execute("", None).await.unwrap_err();
        assert!(err.to_string().starts_with("Failed to generate course: "));
        assert!(err.to_string().contains("Topic is required"));

        assert!(matches!(
            events.try_recv().unwrap(),
            DomainEvent::Generation(GenerationEvent::GenerationFailed { .. })
        ));
    }
}
