// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::state::{LessonState, DEFAULT_NUM_QUESTIONS};
use crate::application::agent::{AgentError, AgentPrompt, AgentRuntime};
use crate::domain::lesson::{LearningObjective, QuizQuestion};
use crate::domain::workflow::{GraphNode, NodeError};

pub const MAX_REQUESTED_QUESTIONS: u32 = 10;
const SECTION_PREVIEW_CHARS: usize = 100;
const PREVIEW_SECTIONS: usize = 3;

pub const QUIZ_CREATOR_PROMPT: AgentPrompt = AgentPrompt {
    schema: "quiz",
    system_prompt: "You are an expert in assessment design. Write clear, unambiguous \
multiple choice questions aligned with the learning objectives, each with 3 to 5 plausible \
options, the index of the correct answer and a short explanation of why it is correct.",
    template: "Topic: {{topic}}\n\
Target Audience: {{target_audience}}\n\n\
Learning Objectives to Assess:\n\
{{#each learning_objectives}}- {{description}} (Key Concept: {{key_concept}})\n{{/each}}\n\
Lesson Content Overview:\n\
{{#each content_sections}}- {{heading}}: {{preview}}...\n{{/each}}\n\
Generate {{num_questions}} questions that assess these objectives at the \
{{target_audience}} level, plus criteria for assessing the learner's answers.",
};

#[derive(Debug, Serialize)]
pub struct SectionOutline {
    pub heading: String,
    pub preview: String,
}

#[derive(Debug, Serialize)]
pub struct QuizInput<'a> {
    pub topic: &'a str,
    pub target_audience: &'a str,
    pub learning_objectives: &'a [LearningObjective],
    pub content_sections: Vec<SectionOutline>,
    pub num_questions: u32,
}

#[derive(Debug, Deserialize)]
struct RawQuiz {
    questions: Vec<Value>,
    #[serde(default)]
    assessment_criteria: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerKeyEntry {
    pub correct_answer: usize,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizOutput {
    pub questions: Vec<QuizQuestion>,
    /// Keyed by position in `questions`
    pub answer_key: BTreeMap<usize, AnswerKeyEntry>,
    pub assessment_criteria: BTreeMap<String, String>,
}

pub struct QuizCreatorAgent {
    runtime: AgentRuntime,
    temperature: f32,
}

impl QuizCreatorAgent {
    pub fn new(runtime: AgentRuntime, temperature: f32) -> Self {
        Self {
            runtime,
            temperature,
        }
    }

    pub async fn process(&self, input: &QuizInput<'_>, model: &str) -> Result<QuizOutput, AgentError> {
        let raw: RawQuiz = self
            .runtime
            .ask(&QUIZ_CREATOR_PROMPT, input, model, self.temperature)
            .await?;
        let output = keep_well_formed(raw);
        if output.questions.is_empty() {
            return Err(AgentError::invalid_output(
                QUIZ_CREATOR_PROMPT.schema,
                "no well-formed questions returned",
            ));
        }
        Ok(output)
    }
}

fn keep_well_formed(raw: RawQuiz) -> QuizOutput {
    let mut questions = Vec::with_capacity(raw.questions.len());
    for value in raw.questions {
        let parsed = serde_json::from_value::<QuizQuestion>(value)
            .map_err(|e| e.to_string())
            .and_then(|q| q.validate().map(|_| q).map_err(|e| e.to_string()));
        match parsed {
            Ok(question) => questions.push(question),
            Err(reason) => warn!(%reason, "Dropping malformed quiz question"),
        }
    }

    let answer_key = questions
        .iter()
        .enumerate()
        .map(|(index, q)| {
            (
                index,
                AnswerKeyEntry {
                    correct_answer: q.correct_answer,
                    explanation: q.explanation.clone(),
                },
            )
        })
        .collect();

    QuizOutput {
        questions,
        answer_key,
        assessment_criteria: raw.assessment_criteria,
    }
}

#[async_trait]
impl GraphNode<LessonState> for QuizCreatorAgent {
    async fn run(&self, mut state: LessonState) -> Result<LessonState, NodeError> {
        if !state.request.include_quiz {
            debug!("Quiz disabled, skipping");
            return Ok(state);
        }
        let objectives = state
            .objectives
            .as_ref()
            .map(|o| o.objectives.as_slice())
            .unwrap_or_default();
        let content_sections = state
            .body
            .iter()
            .flat_map(|body| body.sections.iter().take(PREVIEW_SECTIONS))
            .map(|section| SectionOutline {
                heading: section.heading.clone(),
                preview: section.content.chars().take(SECTION_PREVIEW_CHARS).collect(),
            })
            .collect();
        let input = QuizInput {
            topic: state.topic(),
            target_audience: state.request.difficulty.as_str(),
            learning_objectives: objectives,
            content_sections,
            num_questions: DEFAULT_NUM_QUESTIONS.clamp(1, MAX_REQUESTED_QUESTIONS),
        };
        let quiz = self.process(&input, &state.model).await?;
        state.quiz = Some(quiz);
        Ok(state)
    }
}
