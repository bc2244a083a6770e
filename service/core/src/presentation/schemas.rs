// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! HTTP request and response bodies
//!
//! Wire shapes are kept separate from the domain types so the API can stay
//! stable while the domain evolves. Every type derives `JsonSchema` for the
//! generated OpenAPI document.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::application::lesson_content::LessonRequest;
use crate::domain::course::{Course, Lesson, Module};
use crate::domain::lesson::{
    DifficultyLevel, Example, LearningObjective, LessonContent, LessonSection, QuizQuestion,
};

pub const RESPONSE_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EchoQuery {
    /// Text to echo through the workflow graph
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EchoResponse {
    pub result: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

// ============================================================================
// Courses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GenerateCourseRequest {
    /// The main topic of the course
    pub topic: String,
    /// Model to use for generation (e.g. gpt-4)
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LessonSchema {
    pub title: String,
    pub summary: String,
    pub objectives: Vec<String>,
    pub key_points: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ModuleSchema {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub lessons: Vec<LessonSchema>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CourseSchema {
    pub topic: String,
    #[serde(default)]
    pub modules: Vec<ModuleSchema>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GenerateCourseResponse {
    pub success: bool,
    pub course: Option<CourseSchema>,
    pub error: Option<String>,
}

impl GenerateCourseResponse {
    pub fn ok(course: Course) -> Self {
        Self {
            success: true,
            course: Some(course.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            course: None,
            error: Some(error.into()),
        }
    }
}

impl From<Lesson> for LessonSchema {
    fn from(lesson: Lesson) -> Self {
        Self {
            title: lesson.title,
            summary: lesson.summary,
            objectives: lesson.objectives,
            key_points: lesson.key_points,
        }
    }
}

impl From<Module> for ModuleSchema {
    fn from(module: Module) -> Self {
        Self {
            title: module.title,
            description: module.description,
            lessons: module.lessons.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Course> for CourseSchema {
    fn from(course: Course) -> Self {
        Self {
            topic: course.topic,
            modules: course.modules.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Lessons
// ============================================================================

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GenerateLessonRequest {
    /// The main topic of the lesson
    pub topic: String,
    #[serde(default)]
    pub difficulty: DifficultyLevel,
    /// Specific learning objectives to cover
    #[serde(default)]
    pub learning_objectives: Option<Vec<String>>,
    /// Additional context or requirements for the lesson
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default = "default_true")]
    pub include_quiz: bool,
    #[serde(default = "default_true")]
    pub include_examples: bool,
    #[serde(default)]
    pub custom_instructions: Option<String>,
}

impl From<GenerateLessonRequest> for LessonRequest {
    fn from(request: GenerateLessonRequest) -> Self {
        LessonRequest {
            topic: request.topic,
            difficulty: request.difficulty,
            learning_objectives: request.learning_objectives.unwrap_or_default(),
            context: request.context,
            include_quiz: request.include_quiz,
            include_examples: request.include_examples,
            custom_instructions: request.custom_instructions,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LearningObjectiveResponse {
    pub description: String,
    pub key_concept: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExampleResponse {
    pub title: String,
    pub description: String,
    pub key_takeaway: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QuizQuestionResponse {
    pub question: String,
    pub options: Vec<String>,
    /// Index of the correct answer in `options`
    pub correct_answer: usize,
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LessonSectionResponse {
    pub heading: String,
    pub content: String,
    #[serde(default)]
    pub key_points: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GenerateLessonResponse {
    pub topic: String,
    pub difficulty: DifficultyLevel,
    pub learning_objectives: Vec<LearningObjectiveResponse>,
    pub sections: Vec<LessonSectionResponse>,
    #[serde(default)]
    pub examples: Vec<ExampleResponse>,
    #[serde(default)]
    pub quiz_questions: Vec<QuizQuestionResponse>,
    pub summary: String,
    pub estimated_duration_minutes: u32,
    /// `generated_at`, `version` and `model`
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

impl GenerateLessonResponse {
    pub fn from_lesson(lesson: LessonContent, model: &str) -> Self {
        let mut metadata = BTreeMap::new();
        metadata.insert(
            "generated_at".to_string(),
            Value::String(chrono::Utc::now().to_rfc3339()),
        );
        metadata.insert(
            "version".to_string(),
            Value::String(RESPONSE_VERSION.to_string()),
        );
        metadata.insert("model".to_string(), Value::String(model.to_string()));

        Self {
            topic: lesson.topic,
            difficulty: lesson.difficulty,
            learning_objectives: lesson
                .learning_objectives
                .into_iter()
                .map(Into::into)
                .collect(),
            sections: lesson.content_sections.into_iter().map(Into::into).collect(),
            examples: lesson.examples.into_iter().map(Into::into).collect(),
            quiz_questions: lesson.quiz_questions.into_iter().map(Into::into).collect(),
            summary: lesson.summary,
            estimated_duration_minutes: lesson.estimated_duration_minutes,
            metadata,
        }
    }
}

impl From<LearningObjective> for LearningObjectiveResponse {
    fn from(objective: LearningObjective) -> Self {
        Self {
            description: objective.description,
            key_concept: objective.key_concept,
        }
    }
}

impl From<Example> for ExampleResponse {
    fn from(example: Example) -> Self {
        Self {
            title: example.title,
            description: example.description,
            key_takeaway: example.key_takeaway,
        }
    }
}

impl From<QuizQuestion> for QuizQuestionResponse {
    fn from(question: QuizQuestion) -> Self {
        Self {
            question: question.question,
            options: question.options,
            correct_answer: question.correct_answer,
            explanation: question.explanation,
        }
    }
}

impl From<LessonSection> for LessonSectionResponse {
    fn from(section: LessonSection) -> Self {
        Self {
            heading: section.heading,
            content: section.content,
            key_points: section.key_points,
        }
    }
}
