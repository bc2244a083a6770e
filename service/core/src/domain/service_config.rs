// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Service Configuration Types
//
// Defines the YAML configuration of the course generator service:
// - Application identity and environment
// - HTTP server binding and CORS origins
// - Logging level and output format
// - LLM defaults (model, temperatures, retry policy)
// - Workflow execution limits

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "EDHUB_CONFIG_PATH";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["text", "json"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Human-readable service name
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Deployment environment (e.g., "development", "production")
    #[serde(default = "default_environment")]
    pub environment: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub workflow: WorkflowConfig,

    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (e.g., "info", "debug", "trace")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format ("json" or "text")
    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model requested when the caller does not name one
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Sampling temperature for generation agents
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Sampling temperature for the reviewer agent
    #[serde(default = "default_review_temperature")]
    pub review_temperature: f32,

    /// Attempts per provider call (including the first)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay for exponential backoff between attempts
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Maximum node executions per graph run
    #[serde(default = "default_recursion_limit")]
    pub recursion_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins; "*" allows any
    #[serde(default = "default_allow_origins")]
    pub allow_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "EdHub Course Generator".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_review_temperature() -> f32 {
    0.3
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    200
}

fn default_recursion_limit() -> usize {
    100
}

fn default_allow_origins() -> Vec<String> {
    vec!["*".to_string()]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            default_model: default_model(),
            temperature: default_temperature(),
            review_temperature: default_review_temperature(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay(),
        }
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            recursion_limit: default_recursion_limit(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origins: default_allow_origins(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            environment: default_environment(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            llm: LlmConfig::default(),
            workflow: WorkflowConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Parse configuration from YAML string
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Discover configuration file using precedence order
    /// 1. EDHUB_CONFIG_PATH environment variable
    /// 2. ./edhub-config.yaml (working directory)
    /// 3. ~/.edhub/config.yaml (user home)
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from("./edhub-config.yaml");
        if cwd.exists() {
            return Some(cwd);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".edhub").join("config.yaml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        None
    }

    /// Load configuration with discovery, fallback to default
    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        // Explicit CLI path (fail if missing/invalid)
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path).map_err(|e| {
                anyhow::anyhow!("Failed to load config at {:?}: {}", path, e)
            })?;
            config.apply_env_overrides();
            return Ok(config);
        }

        if let Some(config_path) = Self::discover_config() {
            tracing::info!("Loading configuration from discovered path: {:?}", config_path);
            let mut config = Self::from_yaml_file(&config_path).map_err(|e| {
                anyhow::anyhow!("Failed to load config at {:?}: {}", config_path, e)
            })?;
            config.apply_env_overrides();
            Ok(config)
        } else {
            tracing::debug!("No configuration file found in standard locations. Using defaults.");
            let mut config = Self::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    /// Apply environment variable overrides (APP_NAME, ENV, LOG_LEVEL, PORT, HOST)
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("APP_NAME") {
            tracing::info!("Environment override: APP_NAME={}", val);
            self.app_name = val;
        }
        if let Some(val) = lookup("ENV") {
            tracing::info!("Environment override: ENV={}", val);
            self.environment = val;
        }
        if let Some(val) = lookup("LOG_LEVEL") {
            tracing::info!("Environment override: LOG_LEVEL={}", val);
            self.logging.level = val.to_lowercase();
        }
        if let Some(val) = lookup("HOST") {
            tracing::info!("Environment override: HOST={}", val);
            self.server.host = val;
        }
        if let Some(val) = lookup("PORT") {
            match val.parse::<u16>() {
                Ok(port) => {
                    tracing::info!("Environment override: PORT={}", port);
                    self.server.port = port;
                }
                Err(_) => {
                    tracing::warn!(
                        "Invalid value for PORT: '{}'. Expected a port number. Ignoring.",
                        val
                    );
                }
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.app_name.trim().is_empty() {
            anyhow::bail!("app_name cannot be empty");
        }

        if self.server.port == 0 {
            anyhow::bail!("server.port must be between 1 and 65535");
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            anyhow::bail!(
                "Invalid logging.level: '{}'. Must be one of {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            );
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            anyhow::bail!(
                "Invalid logging.format: '{}'. Must be 'text' or 'json'",
                self.logging.format
            );
        }

        for (name, value) in [
            ("llm.temperature", self.llm.temperature),
            ("llm.review_temperature", self.llm.review_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                anyhow::bail!("{} must be between 0.0 and 2.0, got {}", name, value);
            }
        }

        if self.llm.default_model.trim().is_empty() {
            anyhow::bail!("llm.default_model cannot be empty");
        }

        if self.llm.max_retries == 0 {
            anyhow::bail!("llm.max_retries must be at least 1");
        }

        if self.workflow.recursion_limit == 0 {
            anyhow::bail!("workflow.recursion_limit must be at least 1");
        }

        Ok(())
    }
}
