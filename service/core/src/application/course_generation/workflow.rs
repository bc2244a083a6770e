// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use tracing::info;

use super::agents::{ContentGeneratorAgent, PlannerAgent, ReviewerAgent};
use super::state::{CourseState, MAX_LESSONS_PER_MODULE, MAX_MODULES};
use crate::application::agent::AgentRuntime;
use crate::domain::service_config::ServiceConfig;
use crate::domain::workflow::{CompiledGraph, GraphRun, StateGraph, WorkflowError, END};

pub const PLAN_COURSE: &str = "plan_course";
pub const GENERATE_CONTENT: &str = "generate_content";
pub const REVIEW_CONTENT: &str = "review_content";

/// Node runs needed by the largest plan the planner accepts: one planning
/// step, then a generate and a review step per lesson.
pub const MAX_COURSE_STEPS: usize = 1 + 2 * MAX_MODULES * MAX_LESSONS_PER_MODULE as usize;

fn route_after_step(state: &CourseState) -> &'static str {
    if state.is_complete {
        "complete"
    } else {
        "continue"
    }
}

/// plan -> (generate -> review)* over every lesson of the planned course
pub struct CourseGenerationWorkflow {
    graph: CompiledGraph<CourseState>,
}

impl CourseGenerationWorkflow {
    pub fn new(runtime: AgentRuntime, config: &ServiceConfig) -> Result<Self, WorkflowError> {
        let llm = &config.llm;
        let mut graph = StateGraph::new();
        graph
            .add_node(PLAN_COURSE, PlannerAgent::new(runtime.clone(), llm.temperature))?
            .add_node(
                GENERATE_CONTENT,
                ContentGeneratorAgent::new(runtime.clone(), llm.temperature),
            )?
            .add_node(
                REVIEW_CONTENT,
                ReviewerAgent::new(runtime, llm.review_temperature),
            )?;

        graph
            .add_conditional_edges(
                PLAN_COURSE,
                route_after_step,
                &[("continue", GENERATE_CONTENT), ("complete", END)],
            )?
            .add_edge(GENERATE_CONTENT, REVIEW_CONTENT)?
            .add_conditional_edges(
                REVIEW_CONTENT,
                route_after_step,
                &[("continue", GENERATE_CONTENT), ("complete", END)],
            )?;
        graph.set_entry_point(PLAN_COURSE);

        // Never below the step count of the largest accepted plan
        let recursion_limit = config.workflow.recursion_limit.max(MAX_COURSE_STEPS);

        Ok(Self {
            graph: graph.compile()?.with_recursion_limit(recursion_limit),
        })
    }

    pub fn recursion_limit(&self) -> usize {
        self.graph.recursion_limit()
    }

    pub async fn run(&self, topic: &str, model: &str) -> Result<GraphRun<CourseState>, WorkflowError> {
        info!(topic, model, "Starting course generation");
        self.graph.invoke(CourseState::new(topic, model)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::{
        GenerationOptions, GenerationResponse, LLMError, LLMProvider, StructuredRequest,
    };
    use crate::infrastructure::llm::SimulatedProvider;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Arc;

    /// Plans the largest course the planner accepts
    struct MaxPlanProvider(SimulatedProvider);

    #[async_trait]
    impl LLMProvider for MaxPlanProvider {
        fn name(&self) -> &str {
            "max-plan"
        }

        async fn generate(
            &self,
            prompt: &str,
            options: &GenerationOptions,
        ) -> Result<GenerationResponse, LLMError> {
            self.0.generate(prompt, options).await
        }

        async fn generate_structured(&self, request: &StructuredRequest) -> Result<Value, LLMError> {
            if request.schema == "course_plan" {
                let modules: Vec<Value> = (1..=MAX_MODULES)
                    .map(|n| {
                        json!({
                            "title": format!("Module {}", n),
                            "description": format!("Part {} of the course", n),
                            "learning_objectives": ["Practice"],
                            "num_lessons": MAX_LESSONS_PER_MODULE
                        })
                    })
                    .collect();
                return Ok(json!({
                    "course_title": "Rust Course",
                    "course_description": "Everything about Rust",
                    "modules": modules
                }));
            }
            self.0.generate_structured(request).await
        }

        async fn health_check(&self) -> Result<(), LLMError> {
            Ok(())
        }
    }

    fn workflow(config: &ServiceConfig) -> CourseGenerationWorkflow {
        let runtime = AgentRuntime::new(Arc::new(SimulatedProvider::new("gpt-4")));
        CourseGenerationWorkflow::new(runtime, config).unwrap()
    }

    #[tokio::test]
    async fn test_every_lesson_is_generated_and_reviewed() {
        let run = workflow(&ServiceConfig::default())
            .run("Rust", "gpt-4")
            .await
            .unwrap();

        let course = run.state.course_structure.unwrap();
        assert_eq!(course.lesson_count(), 7);
        assert!(run.state.is_complete);
        assert!(run.state.validation_errors.is_empty());
        assert!(course
            .modules
            .iter()
            .flat_map(|m| &m.lessons)
            .all(|l| l.summary.starts_with("This is a detailed summary")));

        assert_eq!(run.path.len(), 1 + 2 * 7);
        assert_eq!(run.path[0], PLAN_COURSE);
        assert_eq!(run.path.last().map(String::as_str), Some(REVIEW_CONTENT));
    }

    #[tokio::test]
    async fn test_largest_plan_fits_default_limit() {
        let provider = MaxPlanProvider(SimulatedProvider::new("gpt-4"));
        let runtime = AgentRuntime::new(Arc::new(provider));
        let workflow = CourseGenerationWorkflow::new(runtime, &ServiceConfig::default()).unwrap();

        let run = workflow.run("Rust", "gpt-4").await.unwrap();

        let lessons = MAX_MODULES * MAX_LESSONS_PER_MODULE as usize;
        assert_eq!(run.state.course_structure.unwrap().lesson_count(), lessons);
        assert!(run.state.is_complete);
        assert_eq!(run.path.len(), MAX_COURSE_STEPS);
    }

    #[test]
    fn test_recursion_limit_from_config() {
        let mut config = ServiceConfig::default();
        assert_eq!(workflow(&config).recursion_limit(), MAX_COURSE_STEPS);

        config.workflow.recursion_limit = 5;
        assert_eq!(workflow(&config).recursion_limit(), MAX_COURSE_STEPS);

        config.workflow.recursion_limit = 500;
        assert_eq!(workflow(&config).recursion_limit(), 500);
    }
}
