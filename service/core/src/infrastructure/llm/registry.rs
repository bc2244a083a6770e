// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// LLM Provider Registry - Default Model Resolution and Retry Policy
//
// Wraps the configured provider so agents see a single `LLMProvider`. Requests
// without a model get the configured default; retryable failures are retried
// with exponential backoff.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use super::simulated::SimulatedProvider;
use crate::domain::llm::{
    GenerationOptions, GenerationResponse, LLMError, LLMProvider, StructuredRequest,
};
use crate::domain::service_config::LlmConfig;

pub struct ProviderRegistry {
    provider: Arc<dyn LLMProvider>,
    default_model: String,
    max_retries: u32,
    retry_delay_ms: u64,
}

impl ProviderRegistry {
    pub fn new(provider: Arc<dyn LLMProvider>, config: &LlmConfig) -> Self {
        Self {
            provider,
            default_model: config.default_model.clone(),
            max_retries: config.max_retries.max(1),
            retry_delay_ms: config.retry_delay_ms,
        }
    }

    /// Create the registry from the service configuration
    pub fn from_config(config: &LlmConfig) -> Self {
        info!(
            provider = "simulated",
            default_model = %config.default_model,
            "Initializing LLM provider registry"
        );
        let provider = Arc::new(SimulatedProvider::new(config.default_model.clone()));
        Self::new(provider, config)
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    fn resolve(&self, options: &GenerationOptions) -> GenerationOptions {
        let mut resolved = options.clone();
        if resolved.model.is_none() {
            resolved.model = Some(self.default_model.clone());
        }
        resolved
    }

    /// Run `call` until it succeeds, fails permanently or attempts run out
    async fn with_retry<T, F, Fut>(&self, operation: &str, call: F) -> Result<T, LLMError>
    where
        F: Fn() -> Fut + Send + Sync,
        Fut: std::future::Future<Output = Result<T, LLMError>> + Send,
        T: Send,
    {
        let mut attempt = 0;
        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt + 1 < self.max_retries => {
                    warn!(
                        operation,
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        error = %e,
                        "LLM call failed, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(
                        self.retry_delay_ms * 2_u64.pow(attempt),
                    ))
                    .await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[async_trait]
impl LLMProvider for ProviderRegistry {
    fn name(&self) -> &str {
        self.provider.name()
    }

    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<GenerationResponse, LLMError> {
        let options = self.resolve(options);
        self.with_retry("generate", || self.provider.generate(prompt, &options))
            .await
    }

    async fn generate_structured(
        &self,
        request: &StructuredRequest,
    ) -> Result<serde_json::Value, LLMError> {
        let mut request = request.clone();
        request.options = self.resolve(&request.options);
        self.with_retry("generate_structured", || {
            self.provider.generate_structured(&request)
        })
        .await
    }

    async fn health_check(&self) -> Result<(), LLMError> {
        self.provider.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::{FinishReason, TokenUsage};
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fails with the given error `failures` times, then succeeds
    struct FlakyProvider {
        failures: u32,
        calls: AtomicU32,
        error: fn() -> LLMError,
    }

    #[async_trait]
    impl LLMProvider for FlakyProvider {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn generate(
            &self,
            _prompt: &str,
            options: &GenerationOptions,
        ) -> Result<GenerationResponse, LLMError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                return Err((self.error)());
            }
            Ok(GenerationResponse {
                text: "{}".to_string(),
                usage: TokenUsage::default(),
                provider: "flaky".to_string(),
                model: options.model.clone().unwrap_or_default(),
                finish_reason: FinishReason::Stop,
            })
        }

        async fn health_check(&self) -> Result<(), LLMError> {
            Ok(())
        }
    }

    fn config(max_retries: u32) -> LlmConfig {
        LlmConfig {
            max_retries,
            retry_delay_ms: 1,
            ..LlmConfig::default()
        }
    }

    fn flaky(failures: u32, error: fn() -> LLMError) -> Arc<FlakyProvider> {
        Arc::new(FlakyProvider {
            failures,
            calls: AtomicU32::new(0),
            error,
        })
    }

    #[tokio::test]
    async fn test_retries_transient_errors() {
        let provider = flaky(2, || LLMError::RateLimit);
        let registry = ProviderRegistry::new(provider.clone(), &config(3));

        let response = registry
            .generate("hi", &GenerationOptions::default())
            .await
            .unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
        assert_eq!(response.model, "gpt-4");
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let provider = flaky(5, || LLMError::Network("reset".into()));
        let registry = ProviderRegistry::new(provider.clone(), &config(2));

        let err = registry
            .generate("hi", &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LLMError::Network(_)));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_permanent_errors_fail_fast() {
        let provider = flaky(1, || LLMError::Authentication("bad key".into()));
        let registry = ProviderRegistry::new(provider.clone(), &config(3));

        assert!(registry.generate("hi", &GenerationOptions::default()).await.is_err());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_explicit_model_is_kept() {
        let registry = ProviderRegistry::from_config(&LlmConfig::default());
        let response = registry
            .generate("hi", &GenerationOptions::default().with_model("gpt-3.5-turbo"))
            .await
            .unwrap();
        assert_eq!(response.model, "gpt-3.5-turbo");
        assert_eq!(registry.name(), "simulated");
    }
}
