// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::state::LessonState;
use crate::application::agent::{AgentError, AgentPrompt, AgentRuntime};
use crate::domain::lesson::{LearningObjective, LessonSection};
use crate::domain::workflow::{GraphNode, NodeError};

pub const MIN_SECTIONS: usize = 3;
pub const MIN_BODY_MINUTES: u32 = 10;
pub const MAX_BODY_MINUTES: u32 = 120;

pub const LESSON_BODY_PROMPT: AgentPrompt = AgentPrompt {
    schema: "lesson_body",
    system_prompt: "You are an expert educator writing lesson content. Organize the lesson \
into at least three logical sections that build on each other, explain every concept with \
the target audience in mind and make sure each learning objective is covered.",
    template: "Topic: {{topic}}\n\
Target Audience: {{target_audience}}\n\
Scope: {{scope}}\n\n\
Learning Objectives:\n\
{{#each learning_objectives}}- {{description}} (Key Concept: {{key_concept}})\n{{/each}}\n\
{{#if context}}Context: {{context}}\n{{/if}}\
{{#if custom_instructions}}Instructions: {{custom_instructions}}\n{{/if}}\n\
Write the lesson sections with their key points and the objectives each one covers, \
estimate the time to complete the lesson and define the key terms.",
};

#[derive(Debug, Serialize)]
pub struct LessonBodyInput<'a> {
    pub topic: &'a str,
    pub target_audience: &'a str,
    pub scope: &'a str,
    pub learning_objectives: &'a [LearningObjective],
    pub context: &'a str,
    pub custom_instructions: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySection {
    pub heading: String,
    pub content: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub learning_objectives_covered: Vec<String>,
}

impl From<BodySection> for LessonSection {
    fn from(section: BodySection) -> Self {
        LessonSection {
            heading: section.heading,
            content: section.content,
            key_points: section.key_points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonBodyOutput {
    pub sections: Vec<BodySection>,
    pub estimated_duration_minutes: u32,
    #[serde(default)]
    pub key_terms: BTreeMap<String, String>,
}

impl LessonBodyOutput {
    fn validate(&self) -> Result<(), String> {
        if self.sections.len() < MIN_SECTIONS {
            return Err(format!(
                "expected at least {} sections, got {}",
                MIN_SECTIONS,
                self.sections.len()
            ));
        }
        if !(MIN_BODY_MINUTES..=MAX_BODY_MINUTES).contains(&self.estimated_duration_minutes) {
            return Err(format!(
                "estimated duration must be between {} and {} minutes, got {}",
                MIN_BODY_MINUTES, MAX_BODY_MINUTES, self.estimated_duration_minutes
            ));
        }
        Ok(())
    }
}

pub struct LessonBodyAgent {
    runtime: AgentRuntime,
    temperature: f32,
}

impl LessonBodyAgent {
    pub fn new(runtime: AgentRuntime, temperature: f32) -> Self {
        Self {
            runtime,
            temperature,
        }
    }

    pub async fn process(
        &self,
        input: &LessonBodyInput<'_>,
        model: &str,
    ) -> Result<LessonBodyOutput, AgentError> {
        if input.learning_objectives.is_empty() {
            return Err(AgentError::MissingInput("Learning objectives"));
        }
        let output: LessonBodyOutput = self
            .runtime
            .ask(&LESSON_BODY_PROMPT, input, model, self.temperature)
            .await?;
        output
            .validate()
            .map_err(|reason| AgentError::invalid_output(LESSON_BODY_PROMPT.schema, reason))?;
        Ok(output)
    }
}

#[async_trait]
impl GraphNode<LessonState> for LessonBodyAgent {
    async fn run(&self, mut state: LessonState) -> Result<LessonState, NodeError> {
        let objectives = state
            .objectives
            .as_ref()
            .map(|o| o.objectives.as_slice())
            .unwrap_or_default();
        let scope = state
            .validation
            .as_ref()
            .map(|v| v.suggested_scope.as_str())
            .unwrap_or_default();
        let input = LessonBodyInput {
            topic: state.topic(),
            target_audience: state.request.difficulty.as_str(),
            scope,
            learning_objectives: objectives,
            context: state.request.context_text(),
            custom_instructions: state.request.instructions_text(),
        };
        let body = self.process(&input, &state.model).await?;
        state.body = Some(body);
        Ok(state)
    }
}
