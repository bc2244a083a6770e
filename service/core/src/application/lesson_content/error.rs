// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

#[derive(Debug, thiserror::Error)]
pub enum LessonError {
    /// The topic validator refused the topic
    #[error("Invalid topic '{topic}': {message}")]
    InvalidTopic { topic: String, message: String },

    #[error("Failed to generate lesson: {0}")]
    Generation(String),
}

impl LessonError {
    pub fn generation(cause: impl std::fmt::Display) -> Self {
        LessonError::Generation(cause.to_string())
    }
}
