// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

/// Raised when an entity or value object constructor rejects its input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("{field} must contain between {min} and {max} entries, got {actual}")]
    CountOutOfRange {
        field: &'static str,
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("{field} must be between {min} and {max}, got {actual}")]
    ValueOutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
