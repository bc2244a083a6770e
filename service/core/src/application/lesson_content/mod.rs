// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Lesson Content Workflow
//!
//! Linear pipeline that turns a topic into a single, self-contained lesson:
//! topic validation, learning objectives, lesson body, examples, quiz and a
//! final assembly step that enforces the `LessonContent` bounds.
//!
//! # Architecture
//!
//! - **Layer:** Application
//! - **Purpose:** Lesson agents, their typed inputs/outputs and the graph
//!   wiring them together

pub mod error;
pub mod example_generator;
pub mod learning_objectives;
pub mod lesson_assembler;
pub mod lesson_body;
pub mod quiz_creator;
pub mod state;
pub mod topic_validator;
pub mod workflow;

pub use error::LessonError;
pub use state::{LessonRequest, LessonState};
pub use workflow::LessonContentWorkflow;
