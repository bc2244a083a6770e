// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Llm
//!
//! Provider-neutral contract for text and structured generation.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Anti-corruption boundary between the agents and any model
//!   vendor

// LLM Provider Domain Interface (Anti-Corruption Layer)
//
// Agents only ever talk to `LLMProvider`. Structured answers are requested by
// schema name and come back as JSON values that the caller decodes into its
// own typed output.
//
// Implementations in infrastructure/llm/ directory.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Domain interface for LLM providers
/// Anti-Corruption Layer that isolates business logic from vendor APIs
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Provider identifier used in logs and response metadata
    fn name(&self) -> &str;

    /// Generate a completion from the LLM
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<GenerationResponse, LLMError>;

    /// Generate a JSON object conforming to `request.schema`.
    ///
    /// The default asks the model for JSON and extracts the first object found
    /// in the completion text.
    async fn generate_structured(
        &self,
        request: &StructuredRequest,
    ) -> Result<serde_json::Value, LLMError> {
        let prompt = request.render_prompt();
        let response = self.generate(&prompt, &request.options).await?;
        let json = extract_json_object(&response.text).ok_or_else(|| {
            LLMError::MalformedOutput(format!(
                "no JSON object in {} response",
                request.schema
            ))
        })?;
        serde_json::from_str(json).map_err(|e| {
            LLMError::MalformedOutput(format!("{} response: {}", request.schema, e))
        })
    }

    /// Check if provider is healthy and accessible
    async fn health_check(&self) -> Result<(), LLMError>;
}

/// A request for schema-shaped output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredRequest {
    /// Name of the expected output schema (e.g. `course_plan`)
    pub schema: String,

    pub system_prompt: Option<String>,

    /// Fully rendered user prompt
    pub prompt: String,

    /// The variables the prompt was rendered from. Providers that cannot
    /// read prose (the simulated one) answer from these.
    #[serde(default)]
    pub input: serde_json::Value,

    #[serde(default)]
    pub options: GenerationOptions,
}

impl StructuredRequest {
    pub fn new(schema: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            system_prompt: None,
            prompt: prompt.into(),
            input: serde_json::Value::Null,
            options: GenerationOptions::default(),
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn with_input(mut self, input: serde_json::Value) -> Self {
        self.input = input;
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    fn render_prompt(&self) -> String {
        let mut prompt = String::new();
        if let Some(system) = &self.system_prompt {
            prompt.push_str(system);
            prompt.push_str("\n\n");
        }
        prompt.push_str(&self.prompt);
        prompt.push_str(&format!(
            "\n\nRespond with a single JSON object matching the `{}` schema and nothing else.",
            self.schema
        ));
        prompt
    }
}

/// Slice from the first `{` to the last `}` of `text`, if any
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Options for LLM generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Model to use; `None` lets the provider pick its default
    pub model: Option<String>,

    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,

    /// Sampling temperature (0.0 = deterministic, 1.0 = creative)
    pub temperature: Option<f32>,

    /// Sequences that stop generation
    pub stop_sequences: Option<Vec<String>>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: None,
            max_tokens: Some(4096),
            temperature: Some(0.7),
            stop_sequences: None,
        }
    }
}

impl GenerationOptions {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[derive(Debug, Clone)]
pub struct GenerationResponse {
    /// Generated text
    pub text: String,

    /// Token usage stats
    pub usage: TokenUsage,

    /// Provider name (e.g., "simulated")
    pub provider: String,

    /// Model used (e.g., "gpt-4")
    pub model: String,

    /// Why generation stopped
    pub finish_reason: FinishReason,
}

#[derive(Debug, Clone, Default)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Reason why generation stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishReason {
    /// Natural completion (model decided to stop)
    Stop,

    /// Hit max_tokens limit
    Length,

    /// Blocked by content filter
    ContentFilter,
}

/// Errors that can occur during LLM operations
#[derive(Debug, thiserror::Error)]
pub enum LLMError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Malformed output: {0}")]
    MalformedOutput(String),
}

impl LLMError {
    /// Transient failures worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LLMError::Network(_) | LLMError::RateLimit | LLMError::Provider(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedProvider(&'static str);

    #[async_trait]
    impl LLMProvider for CannedProvider {
        fn name(&self) -> &str {
            "canned"
        }

        async fn generate(
            &self,
            _prompt: &str,
            options: &GenerationOptions,
        ) -> Result<GenerationResponse, LLMError> {
            Ok(GenerationResponse {
                text: self.0.to_string(),
                usage: TokenUsage::default(),
                provider: "canned".to_string(),
                model: options.model.clone().unwrap_or_default(),
                finish_reason: FinishReason::Stop,
            })
        }

        async fn health_check(&self) -> Result<(), LLMError> {
            Ok(())
        }
    }

    #[test]
    fn test_extract_json_object() {
        assert_eq!(
            extract_json_object("Sure! {\"a\": {\"b\": 1}} hope this helps"),
            Some("{\"a\": {\"b\": 1}}")
        );
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
    }

    #[tokio::test]
    async fn test_default_structured_generation_parses_json() {
        let provider = CannedProvider("```json\n{\"is_approved\": true}\n```");
        let value = provider
            .generate_structured(&StructuredRequest::new("review_feedback", "Review it"))
            .await
            .unwrap();
        assert_eq!(value["is_approved"], serde_json::Value::Bool(true));
    }

    #[tokio::test]
    async fn test_default_structured_generation_rejects_prose() {
        let provider = CannedProvider("I cannot do that");
        let err = provider
            .generate_structured(&StructuredRequest::new("review_feedback", "Review it"))
            .await
            .unwrap_err();
        assert!(matches!(err, LLMError::MalformedOutput(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_retryable_errors() {
        assert!(LLMError::RateLimit.is_retryable());
        assert!(LLMError::Network("reset".into()).is_retryable());
        assert!(!LLMError::Authentication("bad key".into()).is_retryable());
        assert!(!LLMError::ModelNotFound("gpt-9".into()).is_retryable());
    }
}
