// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Course aggregate
//!
//! A course is an ordered list of modules, each an ordered list of lessons.
//! Lessons are addressed by [`LessonPosition`] rather than by reference so the
//! generation workflow can walk the structure while mutating it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub key_points: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub topic: String,
    #[serde(default)]
    pub modules: Vec<Module>,
}

/// Address of a lesson inside a course (module index, lesson index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonPosition {
    pub module: usize,
    pub lesson: usize,
}

impl Course {
    pub fn new(topic: impl Into<String>, modules: Vec<Module>) -> Self {
        Self {
            topic: topic.into(),
            modules,
        }
    }

    pub fn lesson_count(&self) -> usize {
        self.modules.iter().map(|m| m.lessons.len()).sum()
    }

    pub fn module(&self, position: LessonPosition) -> Option<&Module> {
        self.modules.get(position.module)
    }

    pub fn lesson(&self, position: LessonPosition) -> Option<&Lesson> {
        self.modules
            .get(position.module)
            .and_then(|m| m.lessons.get(position.lesson))
    }

    pub fn lesson_mut(&mut self, position: LessonPosition) -> Option<&mut Lesson> {
        self.modules
            .get_mut(position.module)
            .and_then(|m| m.lessons.get_mut(position.lesson))
    }

    /// First lesson of the course, skipping modules without lessons
    pub fn first_lesson(&self) -> Option<LessonPosition> {
        self.first_lesson_from(0)
    }

    /// Lesson following `position` in reading order, crossing module
    /// boundaries and skipping empty modules
    pub fn next_lesson(&self, position: LessonPosition) -> Option<LessonPosition> {
        let module = self.modules.get(position.module)?;
        if position.lesson + 1 < module.lessons.len() {
            return Some(LessonPosition {
                module: position.module,
                lesson: position.lesson + 1,
            });
        }
        self.first_lesson_from(position.module + 1)
    }

    fn first_lesson_from(&self, module_index: usize) -> Option<LessonPosition> {
        self.modules
            .iter()
            .enumerate()
            .skip(module_index)
            .find(|(_, m)| !m.lessons.is_empty())
            .map(|(module, _)| LessonPosition { module, lesson: 0 })
    }
}
