// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use serde::{Deserialize, Serialize};

use super::example_generator::ExamplesOutput;
use super::learning_objectives::ObjectivesOutput;
use super::lesson_body::LessonBodyOutput;
use super::quiz_creator::QuizOutput;
use super::topic_validator::TopicValidation;
use crate::domain::lesson::{DifficultyLevel, LessonContent};

pub const DEFAULT_NUM_EXAMPLES: u32 = 2;
pub const DEFAULT_NUM_QUESTIONS: u32 = 3;

/// What the caller wants taught
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonRequest {
    pub topic: String,
    #[serde(default)]
    pub difficulty: DifficultyLevel,
    /// Objectives the lesson must cover, kept ahead of generated ones
    #[serde(default)]
    pub learning_objectives: Vec<String>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default = "default_true")]
    pub include_quiz: bool,
    #[serde(default = "default_true")]
    pub include_examples: bool,
    #[serde(default)]
    pub custom_instructions: Option<String>,
}

fn default_true() -> bool {
    true
}

impl LessonRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            difficulty: DifficultyLevel::default(),
            learning_objectives: Vec::new(),
            context: None,
            include_quiz: true,
            include_examples: true,
            custom_instructions: None,
        }
    }

    pub fn with_difficulty(mut self, difficulty: DifficultyLevel) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub(crate) fn context_text(&self) -> &str {
        self.context.as_deref().unwrap_or("")
    }

    pub(crate) fn instructions_text(&self) -> &str {
        self.custom_instructions.as_deref().unwrap_or("")
    }
}

/// Accumulated agent outputs for one lesson
#[derive(Debug, Clone)]
pub struct LessonState {
    pub request: LessonRequest,
    pub model: String,
    pub validation: Option<TopicValidation>,
    pub objectives: Option<ObjectivesOutput>,
    pub body: Option<LessonBodyOutput>,
    pub examples: Option<ExamplesOutput>,
    pub quiz: Option<QuizOutput>,
    pub lesson: Option<LessonContent>,
}

impl LessonState {
    pub fn new(request: LessonRequest, model: impl Into<String>) -> Self {
        Self {
            request,
            model: model.into(),
            validation: None,
            objectives: None,
            body: None,
            examples: None,
            quiz: None,
            lesson: None,
        }
    }

    /// Validated topic, falling back to the requested one
    pub fn topic(&self) -> &str {
        self.validation
            .as_ref()
            .map(|v| v.refined_topic.as_str())
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.request.topic)
    }
}
