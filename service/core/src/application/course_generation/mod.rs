// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Course Generation Workflow
//!
//! Plans a multi-module course for a topic, then generates and reviews each
//! lesson in turn until the whole course is filled in.
//!
//! # Architecture
//!
//! - **Layer:** Application
//! - **Purpose:** Agents, graph state and graph definition for course generation

pub mod agents;
pub mod state;
pub mod workflow;

pub use state::{CoursePlan, CourseState, LessonDraft, ModulePlan, ReviewFeedback};
pub use workflow::CourseGenerationWorkflow;
