// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Assembles the accumulated agent outputs into a [`LessonContent`].
//! Makes no model call.

use async_trait::async_trait;
use tracing::info;

use super::state::LessonState;
use crate::application::agent::AgentError;
use crate::domain::lesson::{
    LessonContent, LessonParts, MAX_DURATION_MINUTES, MAX_EXAMPLES, MAX_QUIZ_QUESTIONS,
    MIN_DURATION_MINUTES,
};
use crate::domain::workflow::{GraphNode, NodeError};

#[derive(Debug, Default)]
pub struct LessonAssembler;

impl LessonAssembler {
    pub fn new() -> Self {
        Self
    }

    pub fn assemble(&self, state: &LessonState) -> Result<LessonContent, NodeError> {
        let objectives = state
            .objectives
            .as_ref()
            .ok_or(AgentError::MissingInput("Learning objectives"))?;
        let body = state
            .body
            .as_ref()
            .ok_or(AgentError::MissingInput("Lesson body"))?;

        let topic = state.topic().to_string();
        let summary = state
            .validation
            .as_ref()
            .map(|v| v.suggested_scope.trim())
            .filter(|scope| !scope.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("An introduction to {}", topic));

        let examples = state
            .examples
            .as_ref()
            .map(|e| e.examples.iter().take(MAX_EXAMPLES).cloned().collect())
            .unwrap_or_default();
        let quiz_questions = state
            .quiz
            .as_ref()
            .map(|q| q.questions.iter().take(MAX_QUIZ_QUESTIONS).cloned().collect())
            .unwrap_or_default();

        let lesson = LessonContent::new(LessonParts {
            topic,
            difficulty: state.request.difficulty,
            learning_objectives: objectives.objectives.clone(),
            content_sections: body.sections.iter().cloned().map(Into::into).collect(),
            examples,
            quiz_questions,
            summary,
            estimated_duration_minutes: body
                .estimated_duration_minutes
                .clamp(MIN_DURATION_MINUTES, MAX_DURATION_MINUTES),
        })?;
        Ok(lesson)
    }
}

#[async_trait]
impl GraphNode<LessonState> for LessonAssembler {
    async fn run(&self, mut state: LessonState) -> Result<LessonState, NodeError> {
        let lesson = self.assemble(&state)?;
        info!(
            topic = %lesson.topic,
            sections = lesson.content_sections.len(),
            examples = lesson.examples.len(),
            questions = lesson.quiz_questions.len(),
            "Lesson assembled"
        );
        state.lesson = Some(lesson);
        Ok(state)
    }
}
