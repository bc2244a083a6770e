// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Prompt Template Engine
//!
//! Renders agent prompt templates with Handlebars.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Transform templates with placeholders into final prompts
//! - **Integration:** Agent input struct → prompt text → LLM provider
//!
//! Any `Serialize` value can serve as the context, so each agent renders its
//! own typed input directly. Output is not HTML-escaped.
//!
//! # Usage
//!
//! ```ignore
//! let engine = PromptTemplateEngine::new();
//! let prompt = engine.render("Topic: {{topic}}", &input)?;
//! ```

use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde::Serialize;

pub struct PromptTemplateEngine {
    handlebars: Handlebars<'static>,
}

impl PromptTemplateEngine {
    /// Create a new template engine
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();

        // Don't fail on missing variables
        handlebars.set_strict_mode(false);
        // Prompts are plain text
        handlebars.register_escape_fn(handlebars::no_escape);

        Self { handlebars }
    }

    /// Render a template with any serializable context
    pub fn render<T: Serialize>(&self, template: &str, context: &T) -> Result<String> {
        self.handlebars
            .render_template(template, context)
            .context("Failed to render prompt template")
    }

    /// Validate template syntax without rendering
    pub fn validate_template(&self, template: &str) -> Result<()> {
        handlebars::template::Template::compile(template)
            .map(|_| ())
            .context("Invalid Handlebars template syntax")
    }
}

impl Default for PromptTemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}
