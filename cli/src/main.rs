// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # EdHub CLI
//!
//! The `edhub` binary serves the course generator HTTP API and runs its
//! workflows locally.
//!
//! ## Commands
//!
//! - `edhub serve` - Start the HTTP service
//! - `edhub echo|course|lesson` - Run a workflow once and print the result
//! - `edhub config show|validate|generate` - Configuration management

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use edhub_cli::commands::{self, ConfigCommand, LessonArgs};
use edhub_core::domain::service_config::ServiceConfig;

/// EdHub Course Generator - AI-generated courses and lessons
#[derive(Parser)]
#[command(name = "edhub")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "EDHUB_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP service
    Serve {
        /// Bind address (default: server.host from config)
        #[arg(long)]
        host: Option<String>,

        /// Port (default: server.port from config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run the echo workflow
    Echo {
        /// Text to echo
        text: String,
    },

    /// Generate a full course for a topic
    Course {
        /// Topic of the course
        topic: String,

        /// Model to use (default: llm.default_model from config)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Generate a single lesson
    Lesson(LessonArgs),

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        eprintln!("{}", "No command specified. Use --help for usage.".yellow());
        std::process::exit(1);
    };

    // Config subcommands report load failures themselves
    if let Commands::Config { command } = command {
        init_logging(cli.log_level.as_deref().unwrap_or("warn"), "text")?;
        return commands::config::handle_command(command, cli.config);
    }

    let config =
        ServiceConfig::load_or_default(cli.config).context("Failed to load configuration")?;
    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    init_logging(level, &config.logging.format)?;

    match command {
        Commands::Serve { host, port } => commands::serve::run(config, host, port).await,
        Commands::Echo { text } => commands::generate::echo(&config, &text).await,
        Commands::Course { topic, model } => {
            commands::generate::course(&config, &topic, model.as_deref()).await
        }
        Commands::Lesson(args) => commands::generate::lesson(&config, args).await,
        Commands::Config { .. } => Ok(()),
    }
}

/// Initialize tracing subscriber for logging. `RUST_LOG` takes precedence
/// over `level`.
fn init_logging(level: &str, format: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        "json" => builder.json().init(),
        "text" => builder.compact().init(),
        other => bail!("Unknown log format '{}'", other),
    }

    Ok(())
}
