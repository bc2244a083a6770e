// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::LessonError;
use super::state::LessonState;
use crate::application::agent::{AgentError, AgentPrompt, AgentRuntime};
use crate::domain::workflow::{GraphNode, NodeError};

pub const TOPIC_VALIDATOR_PROMPT: AgentPrompt = AgentPrompt {
    schema: "topic_validation",
    system_prompt: "You are an expert educational content validator. Analyze and refine \
lesson topics so they are clear and specific, scoped for a single lesson, aligned with the \
target audience's level and educationally valuable. If a topic is too broad suggest a more \
focused version; if it is too narrow suggest a slightly broader scope.",
    template: "Topic: {{topic}}\n\
Target Audience: {{target_audience}}\n\
{{#if context}}Additional Context: {{context}}\n{{/if}}\n\
Provide a refined topic, whether it is valid for a single lesson and why, the suggested \
scope of the lesson and any recommended prerequisites.",
};

#[derive(Debug, Serialize)]
pub struct TopicValidatorInput<'a> {
    pub topic: &'a str,
    pub target_audience: &'a str,
    pub context: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicValidation {
    pub original_topic: String,
    pub refined_topic: String,
    pub is_valid: bool,
    #[serde(default)]
    pub validation_message: String,
    pub suggested_scope: String,
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

pub struct TopicValidatorAgent {
    runtime: AgentRuntime,
    temperature: f32,
}

impl TopicValidatorAgent {
    pub fn new(runtime: AgentRuntime, temperature: f32) -> Self {
        Self {
            runtime,
            temperature,
        }
    }

    pub async fn process(
        &self,
        input: &TopicValidatorInput<'_>,
        model: &str,
    ) -> Result<TopicValidation, AgentError> {
        if input.topic.trim().is_empty() {
            return Err(AgentError::MissingInput("Topic"));
        }
        self.runtime
            .ask(&TOPIC_VALIDATOR_PROMPT, input, model, self.temperature)
            .await
    }
}

#[async_trait]
impl GraphNode<LessonState> for TopicValidatorAgent {
    async fn run(&self, mut state: LessonState) -> Result<LessonState, NodeError> {
        let input = TopicValidatorInput {
            topic: &state.request.topic,
            target_audience: state.request.difficulty.as_str(),
            context: state.request.context_text(),
        };
        let validation = self.process(&input, &state.model).await?;

        if !validation.is_valid {
            warn!(topic = %state.request.topic, reason = %validation.validation_message, "Topic rejected");
            return Err(Box::new(LessonError::InvalidTopic {
                topic: state.request.topic.clone(),
                message: validation.validation_message,
            }));
        }

        info!(topic = %validation.refined_topic, "Topic validated");
        state.validation = Some(validation);
        Ok(state)
    }
}
