// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: show, validate, generate

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::{Path, PathBuf};

use edhub_core::domain::service_config::{ServiceConfig, CONFIG_PATH_ENV};

pub const SAMPLE_CONFIG: &str = include_str!("../../templates/edhub-config.yaml");

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show config file paths checked
        #[arg(long)]
        paths: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (default: discover)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Generate sample configuration
    Generate {
        /// Output path
        #[arg(short, long, default_value = "./edhub-config.yaml")]
        output: PathBuf,
    },
}

pub fn handle_command(command: ConfigCommand, config_override: Option<PathBuf>) -> Result<()> {
    match command {
        ConfigCommand::Show { paths } => show(config_override, paths),
        ConfigCommand::Validate { file } => validate(file.or(config_override)),
        ConfigCommand::Generate { output } => generate(&output),
    }
}

fn show(config_override: Option<PathBuf>, show_paths: bool) -> Result<()> {
    let config = ServiceConfig::load_or_default(config_override.clone())
        .context("Failed to load configuration")?;

    if show_paths {
        println!("{}", "Configuration discovery paths:".bold());
        if let Some(path) = &config_override {
            println!("  1. --config flag: {}", path.display());
        } else {
            println!("  1. --config flag: {}", "(not set)".dimmed());
        }
        println!(
            "  2. {}: {}",
            CONFIG_PATH_ENV,
            std::env::var(CONFIG_PATH_ENV)
                .unwrap_or_else(|_| "(not set)".to_string())
                .dimmed()
        );
        println!("  3. ./edhub-config.yaml");
        println!("  4. ~/.edhub/config.yaml");
        println!();
    }

    println!("{}", "Current configuration:".bold());
    println!();
    println!("  App: {} ({})", config.app_name, config.environment);
    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!(
        "  Logging: {} ({})",
        config.logging.level, config.logging.format
    );
    println!();

    println!("{}", "LLM:".bold());
    println!("  Default model: {}", config.llm.default_model);
    println!(
        "  Temperature: {} (review: {})",
        config.llm.temperature, config.llm.review_temperature
    );
    println!(
        "  Retries: {} (base delay {}ms)",
        config.llm.max_retries, config.llm.retry_delay_ms
    );
    println!();

    println!("{}", "Workflows:".bold());
    println!("  Recursion limit: {}", config.workflow.recursion_limit);
    println!("  CORS origins: {}", config.cors.allow_origins.join(", "));
    println!();

    Ok(())
}

fn validate(config_path: Option<PathBuf>) -> Result<()> {
    println!("Validating configuration...");

    let config =
        ServiceConfig::load_or_default(config_path).context("Failed to load configuration")?;

    config
        .validate()
        .context("Configuration validation failed")?;

    println!("{}", "✓ Configuration is valid".green());

    Ok(())
}

fn generate(output: &Path) -> Result<()> {
    std::fs::write(output, SAMPLE_CONFIG)
        .with_context(|| format!("Failed to write config to {:?}", output))?;

    println!(
        "{}",
        format!("✓ Configuration generated: {}", output.display()).green()
    );

    Ok(())
}
