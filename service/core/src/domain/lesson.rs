// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Lesson
//!
//! Standalone lesson content produced by the lesson content workflow.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Value objects for a fully assembled lesson and the bounds
//!   every lesson must respect

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainValidationError;

pub const MAX_OBJECTIVES: usize = 5;
pub const MAX_EXAMPLES: usize = 3;
pub const MAX_QUIZ_QUESTIONS: usize = 5;
pub const MIN_DURATION_MINUTES: u32 = 5;
pub const MAX_DURATION_MINUTES: u32 = 120;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Beginner => "beginner",
            DifficultyLevel::Intermediate => "intermediate",
            DifficultyLevel::Advanced => "advanced",
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DifficultyLevel {
    type Err = DomainValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(DifficultyLevel::Beginner),
            "intermediate" => Ok(DifficultyLevel::Intermediate),
            "advanced" => Ok(DifficultyLevel::Advanced),
            other => Err(DomainValidationError::Invalid {
                field: "difficulty",
                reason: format!(
                    "'{}' is not one of beginner, intermediate, advanced",
                    other
                ),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningObjective {
    pub description: String,
    pub key_concept: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub title: String,
    pub description: String,
    pub key_takeaway: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`
    pub correct_answer: usize,
    pub explanation: String,
}

impl QuizQuestion {
    pub const MIN_OPTIONS: usize = 3;
    pub const MAX_OPTIONS: usize = 5;

    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
        correct_answer: usize,
        explanation: impl Into<String>,
    ) -> Result<Self, DomainValidationError> {
        let quiz = Self {
            question: question.into(),
            options,
            correct_answer,
            explanation: explanation.into(),
        };
        quiz.validate()?;
        Ok(quiz)
    }

    pub fn validate(&self) -> Result<(), DomainValidationError> {
        if self.question.trim().is_empty() {
            return Err(DomainValidationError::Empty { field: "question" });
        }
        if !(Self::MIN_OPTIONS..=Self::MAX_OPTIONS).contains(&self.options.len()) {
            return Err(DomainValidationError::CountOutOfRange {
                field: "options",
                min: Self::MIN_OPTIONS,
                max: Self::MAX_OPTIONS,
                actual: self.options.len(),
            });
        }
        if self.correct_answer >= self.options.len() {
            return Err(DomainValidationError::ValueOutOfRange {
                field: "correct_answer",
                min: 0,
                max: self.options.len() as i64 - 1,
                actual: self.correct_answer as i64,
            });
        }
        Ok(())
    }

    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_answer).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonSection {
    pub heading: String,
    pub content: String,
    #[serde(default)]
    pub key_points: Vec<String>,
}

/// A complete lesson. Construct through [`LessonContent::new`] so the bounds
/// hold for every instance handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonContent {
    pub topic: String,
    pub difficulty: DifficultyLevel,
    pub learning_objectives: Vec<LearningObjective>,
    pub content_sections: Vec<LessonSection>,
    pub examples: Vec<Example>,
    pub quiz_questions: Vec<QuizQuestion>,
    pub summary: String,
    pub estimated_duration_minutes: u32,
}

/// Raw parts of a lesson before validation
#[derive(Debug, Clone, Default)]
pub struct LessonParts {
    pub topic: String,
    pub difficulty: DifficultyLevel,
    pub learning_objectives: Vec<LearningObjective>,
    pub content_sections: Vec<LessonSection>,
    pub examples: Vec<Example>,
    pub quiz_questions: Vec<QuizQuestion>,
    pub summary: String,
    pub estimated_duration_minutes: u32,
}

impl LessonContent {
    pub fn new(parts: LessonParts) -> Result<Self, DomainValidationError> {
        if parts.topic.trim().is_empty() {
            return Err(DomainValidationError::Empty { field: "topic" });
        }
        if !(1..=MAX_OBJECTIVES).contains(&parts.learning_objectives.len()) {
            return Err(DomainValidationError::CountOutOfRange {
                field: "learning_objectives",
                min: 1,
                max: MAX_OBJECTIVES,
                actual: parts.learning_objectives.len(),
            });
        }
        if parts.examples.len() > MAX_EXAMPLES {
            return Err(DomainValidationError::CountOutOfRange {
                field: "examples",
                min: 0,
                max: MAX_EXAMPLES,
                actual: parts.examples.len(),
            });
        }
        if parts.quiz_questions.len() > MAX_QUIZ_QUESTIONS {
            return Err(DomainValidationError::CountOutOfRange {
                field: "quiz_questions",
                min: 0,
                max: MAX_QUIZ_QUESTIONS,
                actual: parts.quiz_questions.len(),
            });
        }
        for question in &parts.quiz_questions {
            question.validate()?;
        }
        if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES)
            .contains(&parts.estimated_duration_minutes)
        {
            return Err(DomainValidationError::ValueOutOfRange {
                field: "estimated_duration_minutes",
                min: MIN_DURATION_MINUTES as i64,
                max: MAX_DURATION_MINUTES as i64,
                actual: parts.estimated_duration_minutes as i64,
            });
        }

        Ok(Self {
            topic: parts.topic,
            difficulty: parts.difficulty,
            learning_objectives: parts.learning_objectives,
            content_sections: parts.content_sections,
            examples: parts.examples,
            quiz_questions: parts.quiz_questions,
            summary: parts.summary,
            estimated_duration_minutes: parts.estimated_duration_minutes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn objective() -> LearningObjective {
        LearningObjective {
            description: "Explain ownership".to_string(),
            key_concept: "ownership".to_string(),
        }
    }

    fn parts() -> LessonParts {
        LessonParts {
            topic: "Ownership".to_string(),
            difficulty: DifficultyLevel::Beginner,
            learning_objectives: vec![objective()],
            summary: "Ownership in short".to_string(),
            estimated_duration_minutes: 30,
            ..Default::default()
        }
    }

    #[test]
    fn test_difficulty_parse_and_display() {
        assert_eq!(
            "Advanced".parse::<DifficultyLevel>().unwrap(),
            DifficultyLevel::Advanced
        );
        assert_eq!(DifficultyLevel::Intermediate.to_string(), "intermediate");
        assert!("expert".parse::<DifficultyLevel>().is_err());
        assert_eq!(
            serde_json::to_string(&DifficultyLevel::Beginner).unwrap(),
            "\"beginner\""
        );
    }

    #[test]
    fn test_quiz_question_bounds() {
        let options = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert!(QuizQuestion::new("Q?", options.clone(), 2, "").is_ok());
        assert!(QuizQuestion::new("Q?", options.clone(), 3, "").is_err());
        assert!(QuizQuestion::new("Q?", options[..2].to_vec(), 0, "").is_err());
    }

    #[test]
    fn test_lesson_content_accepts_valid_parts() {
        let lesson = LessonContent::new(parts()).unwrap();
        assert_eq!(lesson.topic, "Ownership");
        assert_eq!(lesson.estimated_duration_minutes, 30);
    }

    #[test]
    fn test_lesson_content_rejects_out_of_bounds() {
        let mut no_objectives = parts();
        no_objectives.learning_objectives.clear();
        assert!(matches!(
            LessonContent::new(no_objectives),
            Err(DomainValidationError::CountOutOfRange { field: "learning_objectives", .. })
        ));

        let mut too_long = parts();
        too_long.estimated_duration_minutes = 121;
        assert!(LessonContent::new(too_long).is_err());

        let mut too_many_examples = parts();
        too_many_examples.examples = (0..4)
            .map(|i| Example {
                title: format!("Example {}", i),
                description: String::new(),
                key_takeaway: String::new(),
            })
            .collect();
        assert!(LessonContent::new(too_many_examples).is_err());
    }
}
