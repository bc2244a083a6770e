// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use tracing::{error, info};

use super::error::LessonError;
use super::example_generator::ExampleGeneratorAgent;
use super::learning_objectives::LearningObjectivesAgent;
use super::lesson_assembler::LessonAssembler;
use super::lesson_body::LessonBodyAgent;
use super::quiz_creator::QuizCreatorAgent;
use super::state::{LessonRequest, LessonState};
use super::topic_validator::TopicValidatorAgent;
use crate::application::agent::AgentRuntime;
use crate::domain::lesson::LessonContent;
use crate::domain::service_config::ServiceConfig;
use crate::domain::workflow::{CompiledGraph, StateGraph, WorkflowError, END};

pub const VALIDATE_TOPIC: &str = "validate_topic";
pub const GENERATE_OBJECTIVES: &str = "generate_objectives";
pub const GENERATE_CONTENT: &str = "generate_content";
pub const GENERATE_EXAMPLES: &str = "generate_examples";
pub const CREATE_QUIZ: &str = "create_quiz";
pub const ASSEMBLE_LESSON: &str = "assemble_lesson";

const PIPELINE: [&str; 6] = [
    VALIDATE_TOPIC,
    GENERATE_OBJECTIVES,
    GENERATE_CONTENT,
    GENERATE_EXAMPLES,
    CREATE_QUIZ,
    ASSEMBLE_LESSON,
];

pub struct LessonContentWorkflow {
    graph: CompiledGraph<LessonState>,
    model: String,
}

impl LessonContentWorkflow {
    pub fn new(runtime: AgentRuntime, config: &ServiceConfig) -> Result<Self, WorkflowError> {
        let temperature = config.llm.temperature;
        let mut graph = StateGraph::new();
        graph
            .add_node(
                VALIDATE_TOPIC,
                TopicValidatorAgent::new(runtime.clone(), config.llm.review_temperature),
            )?
            .add_node(
                GENERATE_OBJECTIVES,
                LearningObjectivesAgent::new(runtime.clone(), temperature),
            )?
            .add_node(GENERATE_CONTENT, LessonBodyAgent::new(runtime.clone(), temperature))?
            .add_node(
                GENERATE_EXAMPLES,
                ExampleGeneratorAgent::new(runtime.clone(), temperature),
            )?
            .add_node(CREATE_QUIZ, QuizCreatorAgent::new(runtime, temperature))?
            .add_node(ASSEMBLE_LESSON, LessonAssembler::new())?;

        for pair in PIPELINE.windows(2) {
            graph.add_edge(pair[0], pair[1])?;
        }
        graph.add_edge(ASSEMBLE_LESSON, END)?;
        graph.set_entry_point(VALIDATE_TOPIC);

        Ok(Self {
            graph: graph
                .compile()?
                .with_recursion_limit(config.workflow.recursion_limit),
            model: config.llm.default_model.clone(),
        })
    }

    /// Model every agent of this workflow is asked to use
    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn generate_lesson(&self, request: LessonRequest) -> Result<LessonContent, LessonError> {
        let topic = request.topic.clone();
        info!(topic = %topic, difficulty = %request.difficulty, "Generating lesson");

        let result = match self.graph.invoke(LessonState::new(request, &self.model)).await {
            Ok(run) => run
                .state
                .lesson
                .ok_or_else(|| LessonError::generation("Failed to generate lesson content")),
            Err(WorkflowError::NodeFailed { node, source }) => {
                match source.downcast::<LessonError>() {
                    Ok(lesson_error) => Err(*lesson_error),
                    Err(source) => Err(LessonError::generation(WorkflowError::NodeFailed {
                        node,
                        source,
                    })),
                }
            }
            Err(e) => Err(LessonError::generation(e)),
        };

        if let Err(e) = &result {
            error!(topic = %topic, error = %e, "Lesson generation failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::lesson_content::example_generator::EXAMPLE_GENERATOR_PROMPT;
    use crate::application::lesson_content::learning_objectives::LEARNING_OBJECTIVES_PROMPT;
    use crate::application::lesson_content::lesson_body::LESSON_BODY_PROMPT;
    use crate::application::lesson_content::quiz_creator::QUIZ_CREATOR_PROMPT;
    use crate::application::lesson_content::topic_validator::TOPIC_VALIDATOR_PROMPT;
    use crate::application::course_generation::agents::{
        CONTENT_PROMPT, PLANNER_PROMPT, REVIEW_PROMPT,
    };
    use crate::domain::lesson::DifficultyLevel;
    use crate::infrastructure::llm::SimulatedProvider;
    use crate::infrastructure::prompt_template_engine::PromptTemplateEngine;
    use std::sync::Arc;

    fn workflow() -> LessonContentWorkflow {
        let runtime = AgentRuntime::new(Arc::new(SimulatedProvider::new("gpt-4")));
        LessonContentWorkflow::new(runtime, &ServiceConfig::default()).unwrap()
    }

    #[test]
    fn test_all_prompt_templates_compile() {
        let engine = PromptTemplateEngine::new();
        for prompt in [
            TOPIC_VALIDATOR_PROMPT,
            LEARNING_OBJECTIVES_PROMPT,
            LESSON_BODY_PROMPT,
            EXAMPLE_GENERATOR_PROMPT,
            QUIZ_CREATOR_PROMPT,
            PLANNER_PROMPT,
            CONTENT_PROMPT,
            REVIEW_PROMPT,
        ] {
            assert!(
                engine.validate_template(prompt.template).is_ok(),
                "{} template does not compile",
                prompt.schema
            );
        }
    }

    #[tokio::test]
    async fn test_generates_complete_lesson() {
        let request = LessonRequest::new("Ownership in Rust").with_difficulty(DifficultyLevel::Intermediate);
        let lesson = workflow().generate_lesson(request).await.unwrap();

        assert_eq!(lesson.topic, "Ownership in Rust");
        assert_eq!(lesson.difficulty, DifficultyLevel::Intermediate);
        assert_eq!(lesson.learning_objectives.len(), 3);
        assert_eq!(lesson.content_sections.len(), 3);
        assert_eq!(lesson.examples.len(), 2);
        assert_eq!(lesson.quiz_questions.len(), 3);
        assert_eq!(lesson.estimated_duration_minutes, 45);
        assert_eq!(
            lesson.summary,
            "A focused introduction to Ownership in Rust for intermediate learners"
        );
    }

    #[tokio::test]
    async fn test_optional_parts_can_be_skipped() {
        let mut request = LessonRequest::new("Pattern matching");
        request.include_examples = false;
        request.include_quiz = false;

        let lesson = workflow().generate_lesson(request).await.unwrap();
        assert!(lesson.examples.is_empty());
        assert!(lesson.quiz_questions.is_empty());
        assert!(!lesson.content_sections.is_empty());
    }

    #[tokio::test]
    async fn test_requested_objectives_come_first() {
        let mut request = LessonRequest::new("Traits");
        request.learning_objectives = vec!["Implement Display for a struct".to_string()];

        let lesson = workflow().generate_lesson(request).await.unwrap();
        assert_eq!(
            lesson.learning_objectives[0].description,
            "Implement Display for a struct"
        );
    }

    #[tokio::test]
    async fn test_invalid_topic_is_reported_as_such() {
        let err = workflow()
            .generate_lesson(LessonRequest::new("?!"))
            .await
            .unwrap_err();
        assert!(matches!(err, LessonError::InvalidTopic { .. }));
    }

    #[tokio::test]
    async fn test_other_failures_are_wrapped() {
        let err = workflow()
            .generate_lesson(LessonRequest::new(" "))
            .await
            .unwrap_err();
        assert!(matches!(err, LessonError::Generation(_)));
        assert!(err.to_string().starts_with("Failed to generate lesson: "));
    }
}
