// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Local workflow commands
//!
//! Run the echo, course and lesson workflows in-process against the
//! configured LLM provider and print the result, without starting the server.

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::Value;

use edhub_core::application::lesson_content::LessonRequest;
use edhub_core::domain::lesson::DifficultyLevel;
use edhub_core::domain::service_config::ServiceConfig;
use edhub_core::infrastructure::event_bus::EventBus;
use edhub_core::presentation::schemas::{GenerateCourseResponse, GenerateLessonResponse};
use edhub_core::presentation::AppState;

/// Options of the `lesson` command
#[derive(Debug, Clone, clap::Args)]
pub struct LessonArgs {
    /// Topic of the lesson
    pub topic: String,

    /// Difficulty level (beginner, intermediate, advanced)
    #[arg(short, long, default_value = "beginner")]
    pub difficulty: DifficultyLevel,

    /// Additional context or requirements
    #[arg(long)]
    pub context: Option<String>,

    /// Learning objective the lesson must cover (repeatable)
    #[arg(long = "objective", value_name = "TEXT")]
    pub objectives: Vec<String>,

    /// Custom instructions for generation
    #[arg(long)]
    pub instructions: Option<String>,

    /// Skip the quiz
    #[arg(long)]
    pub no_quiz: bool,

    /// Skip the examples
    #[arg(long)]
    pub no_examples: bool,
}

impl From<LessonArgs> for LessonRequest {
    fn from(args: LessonArgs) -> Self {
        LessonRequest {
            topic: args.topic,
            difficulty: args.difficulty,
            learning_objectives: args.objectives,
            context: args.context,
            include_quiz: !args.no_quiz,
            include_examples: !args.no_examples,
            custom_instructions: args.instructions,
        }
    }
}

fn state(config: &ServiceConfig) -> Result<AppState> {
    config
        .validate()
        .context("Configuration validation failed")?;
    AppState::from_config(config, EventBus::default()).context("Failed to initialize workflows")
}

fn print_json(value: &Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    println!("{}", text);
    Ok(())
}

pub async fn echo(config: &ServiceConfig, text: &str) -> Result<()> {
    let state = state(config)?;
    let result = state.echo.run(text).await.context("Echo workflow failed")?;
    println!("{}", result);
    Ok(())
}

pub async fn course(config: &ServiceConfig, topic: &str, model: Option<&str>) -> Result<()> {
    let state = state(config)?;
    let response = match state.generate_course.execute(topic, model).await {
        Ok(course) => GenerateCourseResponse::ok(course),
        Err(e) => {
            eprintln!("{}", format!("✗ {}", e).red());
            GenerateCourseResponse::failed(e.to_string())
        }
    };
    print_json(&serde_json::to_value(&response)?)
}

pub async fn lesson(config: &ServiceConfig, args: LessonArgs) -> Result<()> {
    let state = state(config)?;
    let lesson = state
        .lessons
        .generate_lesson(args.into())
        .await
        .context("Lesson workflow failed")?;
    let response = GenerateLessonResponse::from_lesson(lesson, state.lessons.model());
    print_json(&serde_json::to_value(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        lesson: LessonArgs,
    }

    #[test]
    fn test_lesson_args_map_to_request() {
        let harness = Harness::parse_from([
            "edhub",
            "Closures",
            "--difficulty",
            "advanced",
            "--objective",
            "Capture by move",
            "--no-quiz",
        ]);
        let request: LessonRequest = harness.lesson.into();

        assert_eq!(request.topic, "Closures");
        assert_eq!(request.difficulty, DifficultyLevel::Advanced);
        assert_eq!(request.learning_objectives, vec!["Capture by move"]);
        assert!(!request.include_quiz);
        assert!(request.include_examples);
    }

    #[tokio::test]
    async fn test_echo_runs_locally() {
        echo(&ServiceConfig::default(), "hello").await.unwrap();
    }
}
