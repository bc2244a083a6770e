// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::state::{LessonState, DEFAULT_NUM_EXAMPLES};
use crate::application::agent::{AgentError, AgentPrompt, AgentRuntime};
use crate::domain::lesson::{Example, LearningObjective};
use crate::domain::workflow::{GraphNode, NodeError};

pub const MAX_REQUESTED_EXAMPLES: u32 = 5;

pub const EXAMPLE_GENERATOR_PROMPT: AgentPrompt = AgentPrompt {
    schema: "examples",
    system_prompt: "You create concrete, real-world examples and short case studies that \
make abstract concepts tangible. Each example has a title, a description of the scenario \
and the key takeaway for the learner.",
    template: "Topic: {{topic}}\n\
Target Audience: {{target_audience}}\n\n\
Learning Objectives:\n\
{{#each learning_objectives}}- {{description}}\n{{/each}}\n\
Create {{num_examples}} examples that illustrate these objectives and suggest additional \
resources for further study.",
};

#[derive(Debug, Serialize)]
pub struct ExamplesInput<'a> {
    pub topic: &'a str,
    pub target_audience: &'a str,
    pub learning_objectives: &'a [LearningObjective],
    pub num_examples: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamplesOutput {
    pub examples: Vec<Example>,
    #[serde(default)]
    pub additional_resources: Vec<Resource>,
}

pub struct ExampleGeneratorAgent {
    runtime: AgentRuntime,
    temperature: f32,
}

impl ExampleGeneratorAgent {
    pub fn new(runtime: AgentRuntime, temperature: f32) -> Self {
        Self {
            runtime,
            temperature,
        }
    }

    pub async fn process(
        &self,
        input: &ExamplesInput<'_>,
        model: &str,
    ) -> Result<ExamplesOutput, AgentError> {
        let input = ExamplesInput {
            num_examples: input.num_examples.clamp(1, MAX_REQUESTED_EXAMPLES),
            ..*input
        };
        let output: ExamplesOutput = self
            .runtime
            .ask(&EXAMPLE_GENERATOR_PROMPT, &input, model, self.temperature)
            .await?;
        if output.examples.is_empty() {
            return Err(AgentError::invalid_output(
                EXAMPLE_GENERATOR_PROMPT.schema,
                "no examples returned",
            ));
        }
        Ok(output)
    }
}

#[async_trait]
impl GraphNode<LessonState> for ExampleGeneratorAgent {
    async fn run(&self, mut state: LessonState) -> Result<LessonState, NodeError> {
        if !state.request.include_examples {
            debug!("Examples disabled, skipping");
            return Ok(state);
        }
        let objectives = state
            .objectives
            .as_ref()
            .map(|o| o.objectives.as_slice())
            .unwrap_or_default();
        let input = ExamplesInput {
            topic: state.topic(),
            target_audience: state.request.difficulty.as_str(),
            learning_objectives: objectives,
            num_examples: DEFAULT_NUM_EXAMPLES,
        };
        let examples = self.process(&input, &state.model).await?;
        state.examples = Some(examples);
        Ok(state)
    }
}
