// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Agent Runtime
//!
//! Shared plumbing for every workflow agent: render the agent's prompt
//! template from its typed input, request a structured answer from the LLM
//! provider and decode it into the agent's typed output.
//!
//! # Architecture
//!
//! - **Layer:** Application
//! - **Collaborators:** Domain `LLMProvider`, Infrastructure `PromptTemplateEngine`

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::domain::llm::{GenerationOptions, LLMError, LLMProvider, StructuredRequest};
use crate::infrastructure::prompt_template_engine::PromptTemplateEngine;

/// Static prompt definition of one agent
#[derive(Debug, Clone, Copy)]
pub struct AgentPrompt {
    /// Structured output schema requested from the provider
    pub schema: &'static str,
    pub system_prompt: &'static str,
    /// Handlebars template rendered with the agent input
    pub template: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("{0} is required")]
    MissingInput(&'static str),

    #[error("Failed to render {schema} prompt: {reason}")]
    Prompt { schema: &'static str, reason: String },

    #[error(transparent)]
    Llm(#[from] LLMError),

    #[error("Invalid {schema} output: {reason}")]
    InvalidOutput { schema: &'static str, reason: String },
}

impl AgentError {
    pub fn invalid_output(schema: &'static str, reason: impl Into<String>) -> Self {
        AgentError::InvalidOutput {
            schema,
            reason: reason.into(),
        }
    }
}

#[derive(Clone)]
pub struct AgentRuntime {
    llm: Arc<dyn LLMProvider>,
    templates: Arc<PromptTemplateEngine>,
}

impl AgentRuntime {
    pub fn new(llm: Arc<dyn LLMProvider>) -> Self {
        Self {
            llm,
            templates: Arc::new(PromptTemplateEngine::new()),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.llm.name()
    }

    pub fn render<I: Serialize>(&self, prompt: &AgentPrompt, input: &I) -> Result<String, AgentError> {
        self.templates
            .render(prompt.template, input)
            .map_err(|e| AgentError::Prompt {
                schema: prompt.schema,
                reason: format!("{:#}", e),
            })
    }

    /// Render `prompt` with `input`, ask the provider and decode the answer
    pub async fn ask<I, O>(
        &self,
        prompt: &AgentPrompt,
        input: &I,
        model: &str,
        temperature: f32,
    ) -> Result<O, AgentError>
    where
        I: Serialize + Sync,
        O: DeserializeOwned,
    {
        let text = self.render(prompt, input)?;
        let input_value = serde_json::to_value(input).map_err(|e| AgentError::Prompt {
            schema: prompt.schema,
            reason: e.to_string(),
        })?;

        let request = StructuredRequest::new(prompt.schema, text)
            .with_system_prompt(prompt.system_prompt)
            .with_input(input_value)
            .with_options(
                GenerationOptions::default()
                    .with_model(model)
                    .with_temperature(temperature),
            );

        debug!(schema = prompt.schema, model, "Requesting structured output");
        let value = self.llm.generate_structured(&request).await?;

        serde_json::from_value(value)
            .map_err(|e| AgentError::invalid_output(prompt.schema, e.to_string()))
    }
}
