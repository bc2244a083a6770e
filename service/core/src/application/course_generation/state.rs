// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use serde::{Deserialize, Serialize};

use crate::domain::course::{Course, LessonPosition};

pub const MAX_MODULES: usize = 10;
pub const MAX_LESSONS_PER_MODULE: u32 = 10;

/// State threaded through the course generation graph
#[derive(Debug, Clone, Default)]
pub struct CourseState {
    pub topic: String,
    /// Model requested for every agent call of this run
    pub model: String,
    pub course_structure: Option<Course>,
    /// Lesson currently being generated and reviewed
    pub cursor: Option<LessonPosition>,
    pub validation_errors: Vec<String>,
    pub is_complete: bool,
}

impl CourseState {
    pub fn new(topic: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            model: model.into(),
            ..Default::default()
        }
    }
}

/// Planner output for a single module
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModulePlan {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub learning_objectives: Vec<String>,
    #[serde(default = "default_num_lessons")]
    pub num_lessons: u32,
}

fn default_num_lessons() -> u32 {
    3
}

/// Planner output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoursePlan {
    pub course_title: String,
    pub course_description: String,
    pub modules: Vec<ModulePlan>,
}

impl CoursePlan {
    pub fn validate(&self) -> Result<(), String> {
        if self.modules.is_empty() || self.modules.len() > MAX_MODULES {
            return Err(format!(
                "expected 1 to {} modules, got {}",
                MAX_MODULES,
                self.modules.len()
            ));
        }
        for module in &self.modules {
            if !(1..=MAX_LESSONS_PER_MODULE).contains(&module.num_lessons) {
                return Err(format!(
                    "module '{}' must have 1 to {} lessons, got {}",
                    module.title, MAX_LESSONS_PER_MODULE, module.num_lessons
                ));
            }
        }
        Ok(())
    }
}

/// Content generator output for one lesson
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonDraft {
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub key_points: Vec<String>,
}

/// Reviewer output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewFeedback {
    pub is_approved: bool,
    pub feedback: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}
