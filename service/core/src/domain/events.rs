// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::item::ItemId;
use crate::domain::lesson::DifficultyLevel;

/// Events emitted by the AI workflows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GenerationEvent {
    EchoCompleted {
        length: usize,
        completed_at: DateTime<Utc>,
    },
    CourseGenerated {
        topic: String,
        module_count: usize,
        lesson_count: usize,
        validation_errors: usize,
        generated_at: DateTime<Utc>,
    },
    LessonGenerated {
        topic: String,
        difficulty: DifficultyLevel,
        generated_at: DateTime<Utc>,
    },
    GenerationFailed {
        workflow: String,
        reason: String,
        failed_at: DateTime<Utc>,
    },
}

impl GenerationEvent {
    pub fn failed(workflow: impl Into<String>, reason: impl Into<String>) -> Self {
        GenerationEvent::GenerationFailed {
            workflow: workflow.into(),
            reason: reason.into(),
            failed_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ItemEvent {
    ItemCreated {
        item_id: ItemId,
        name: String,
        created_at: DateTime<Utc>,
    },
}
