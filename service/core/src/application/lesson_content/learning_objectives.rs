// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::state::LessonState;
use crate::application::agent::{AgentError, AgentPrompt, AgentRuntime};
use crate::domain::lesson::{LearningObjective, MAX_OBJECTIVES};
use crate::domain::workflow::{GraphNode, NodeError};

pub const MIN_GENERATED_OBJECTIVES: usize = 3;

pub const LEARNING_OBJECTIVES_PROMPT: AgentPrompt = AgentPrompt {
    schema: "learning_objectives",
    system_prompt: "You are an instructional designer. Write 3 to 5 specific, measurable \
learning objectives using action verbs, each tied to one key concept, ordered from basic \
recall to higher-order thinking.",
    template: "Topic: {{topic}}\n\
Target Audience: {{target_audience}}\n\
{{#if context}}Context: {{context}}\n{{/if}}\
{{#if requested_objectives}}Objectives that must be included:\n\
{{#each requested_objectives}}- {{this}}\n{{/each}}{{/if}}\
{{#if custom_instructions}}Instructions: {{custom_instructions}}\n{{/if}}\n\
Write the learning objectives for this lesson with the key concept of each.",
};

#[derive(Debug, Serialize)]
pub struct ObjectivesInput<'a> {
    pub topic: &'a str,
    pub target_audience: &'a str,
    pub context: &'a str,
    pub requested_objectives: &'a [String],
    pub custom_instructions: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectivesOutput {
    pub objectives: Vec<LearningObjective>,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub alignment_note: String,
}

pub struct LearningObjectivesAgent {
    runtime: AgentRuntime,
    temperature: f32,
}

impl LearningObjectivesAgent {
    pub fn new(runtime: AgentRuntime, temperature: f32) -> Self {
        Self {
            runtime,
            temperature,
        }
    }

    pub async fn process(
        &self,
        input: &ObjectivesInput<'_>,
        model: &str,
    ) -> Result<ObjectivesOutput, AgentError> {
        let output: ObjectivesOutput = self
            .runtime
            .ask(&LEARNING_OBJECTIVES_PROMPT, input, model, self.temperature)
            .await?;

        let count = output.objectives.len();
        if !(MIN_GENERATED_OBJECTIVES..=MAX_OBJECTIVES).contains(&count) {
            return Err(AgentError::invalid_output(
                LEARNING_OBJECTIVES_PROMPT.schema,
                format!(
                    "expected {} to {} objectives, got {}",
                    MIN_GENERATED_OBJECTIVES, MAX_OBJECTIVES, count
                ),
            ));
        }
        Ok(output)
    }
}

#[async_trait]
impl GraphNode<LessonState> for LearningObjectivesAgent {
    async fn run(&self, mut state: LessonState) -> Result<LessonState, NodeError> {
        let input = ObjectivesInput {
            topic: state.topic(),
            target_audience: state.request.difficulty.as_str(),
            context: state.request.context_text(),
            requested_objectives: &state.request.learning_objectives,
            custom_instructions: state.request.instructions_text(),
        };
        let output = self.process(&input, &state.model).await?;
        state.objectives = Some(output);
        Ok(state)
    }
}
