// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Course generation agents
//!
//! Each agent is a graph node over [`CourseState`]: the planner builds the
//! course skeleton, the content generator fills the lesson under the cursor
//! and the reviewer critiques it and moves the cursor on.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};

use super::state::{CoursePlan, CourseState, LessonDraft, ReviewFeedback};
use crate::application::agent::{AgentError, AgentPrompt, AgentRuntime};
use crate::domain::course::{Course, Lesson, Module};
use crate::domain::workflow::{GraphNode, NodeError};

const KEY_POINTS_PER_PLACEHOLDER: usize = 3;

pub const PLANNER_PROMPT: AgentPrompt = AgentPrompt {
    schema: "course_plan",
    system_prompt: "You are an expert course planner.",
    template: "Create a detailed course plan for the following topic:\n\n\
Topic: {{topic}}\n\n\
Provide a comprehensive course structure with:\n\
1. Course Title: a clear, engaging title for the course\n\
2. Course Description: a brief but comprehensive description of what the course covers\n\
3. Modules: 3-5 modules, each with a title, a description, 3-5 measurable \
learning objectives and the number of lessons (3-5).",
};

pub const CONTENT_PROMPT: AgentPrompt = AgentPrompt {
    schema: "lesson_draft",
    system_prompt: "You are an expert course content creator.",
    template: "Generate detailed content for the following lesson:\n\n\
Course: {{course}}\n\
Module: {{module}}\n\
Lesson: {{lesson}}\n\n\
Provide a comprehensive lesson with objectives, key points, and a summary.",
};

pub const REVIEW_PROMPT: AgentPrompt = AgentPrompt {
    schema: "review_feedback",
    system_prompt: "You are an expert course reviewer.",
    template: "Review the following lesson content:\n\n\
Course: {{course}}\n\
Module: {{module}}\n\
Lesson: {{lesson}}\n\
Lesson Summary: {{summary}}\n\
Objectives: {{#each objectives}}{{#if @index}}, {{/if}}{{this}}{{/each}}\n\
Key Points: {{#each key_points}}{{#if @index}}, {{/if}}{{this}}{{/each}}\n\n\
Give specific feedback on the quality, accuracy, and educational value of \
this content and suggest improvements.",
};

#[derive(Serialize)]
struct PlannerInput<'a> {
    topic: &'a str,
}

#[derive(Serialize)]
struct LessonRef<'a> {
    course: &'a str,
    module: &'a str,
    lesson: &'a str,
}

#[derive(Serialize)]
struct ReviewInput<'a> {
    course: &'a str,
    module: &'a str,
    lesson: &'a str,
    summary: &'a str,
    objectives: &'a [String],
    key_points: &'a [String],
}

/// Plans modules and creates placeholder lessons
pub struct PlannerAgent {
    runtime: AgentRuntime,
    temperature: f32,
}

impl PlannerAgent {
    pub fn new(runtime: AgentRuntime, temperature: f32) -> Self {
        Self {
            runtime,
            temperature,
        }
    }

    pub async fn process(&self, mut state: CourseState) -> Result<CourseState, AgentError> {
        if state.topic.trim().is_empty() {
            return Err(AgentError::MissingInput("Topic"));
        }

        let plan: CoursePlan = self
            .runtime
            .ask(
                &PLANNER_PROMPT,
                &PlannerInput { topic: &state.topic },
                &state.model,
                self.temperature,
            )
            .await?;
        plan.validate()
            .map_err(|reason| AgentError::invalid_output(PLANNER_PROMPT.schema, reason))?;

        info!(
            topic = %state.topic,
            title = %plan.course_title,
            modules = plan.modules.len(),
            "Course plan generated"
        );

        let modules = plan
            .modules
            .into_iter()
            .map(|module_plan| {
                let lessons = (1..=module_plan.num_lessons)
                    .map(|n| Lesson {
                        title: format!("Lesson {}", n),
                        summary: format!("Summary for lesson {} of {}", n, module_plan.title),
                        objectives: module_plan.learning_objectives.clone(),
                        key_points: (1..=KEY_POINTS_PER_PLACEHOLDER)
                            .map(|k| format!("Key point {}", k))
                            .collect(),
                    })
                    .collect();
                Module {
                    title: module_plan.title,
                    description: module_plan.description,
                    lessons,
                }
            })
            .collect();

        let course = Course::new(state.topic.clone(), modules);
        state.cursor = course.first_lesson();
        state.is_complete = state.cursor.is_none();
        state.course_structure = Some(course);
        Ok(state)
    }
}

/// Writes summary, objectives and key points of the lesson under the cursor
pub struct ContentGeneratorAgent {
    runtime: AgentRuntime,
    temperature: f32,
}

impl ContentGeneratorAgent {
    pub fn new(runtime: AgentRuntime, temperature: f32) -> Self {
        Self {
            runtime,
            temperature,
        }
    }

    pub async fn process(&self, mut state: CourseState) -> Result<CourseState, AgentError> {
        let course = state
            .course_structure
            .as_ref()
            .ok_or(AgentError::MissingInput("Course structure"))?;
        let Some(position) = state.cursor else {
            state.is_complete = true;
            return Ok(state);
        };
        let (module, lesson) = match (course.module(position), course.lesson(position)) {
            (Some(module), Some(lesson)) => (module, lesson),
            _ => return Err(AgentError::MissingInput("Lesson under cursor")),
        };

        debug!(module = %module.title, lesson = %lesson.title, "Generating lesson content");
        let draft: LessonDraft = self
            .runtime
            .ask(
                &CONTENT_PROMPT,
                &LessonRef {
                    course: &course.topic,
                    module: &module.title,
                    lesson: &lesson.title,
                },
                &state.model,
                self.temperature,
            )
            .await?;

        if let Some(lesson) = state
            .course_structure
            .as_mut()
            .and_then(|course| course.lesson_mut(position))
        {
            lesson.summary = draft.summary;
            lesson.objectives = draft.objectives;
            lesson.key_points = draft.key_points;
        }
        Ok(state)
    }
}

/// Reviews the lesson under the cursor, then advances the cursor
pub struct ReviewerAgent {
    runtime: AgentRuntime,
    temperature: f32,
}

impl ReviewerAgent {
    pub fn new(runtime: AgentRuntime, temperature: f32) -> Self {
        Self {
            runtime,
            temperature,
        }
    }

    pub async fn process(&self, mut state: CourseState) -> Result<CourseState, AgentError> {
        let course = state
            .course_structure
            .as_ref()
            .ok_or(AgentError::MissingInput("Course structure"))?;
        let Some(position) = state.cursor else {
            state.is_complete = true;
            return Ok(state);
        };
        let (module, lesson) = match (course.module(position), course.lesson(position)) {
            (Some(module), Some(lesson)) => (module, lesson),
            _ => return Err(AgentError::MissingInput("Lesson under cursor")),
        };

        let feedback: ReviewFeedback = self
            .runtime
            .ask(
                &REVIEW_PROMPT,
                &ReviewInput {
                    course: &course.topic,
                    module: &module.title,
                    lesson: &lesson.title,
                    summary: &lesson.summary,
                    objectives: &lesson.objectives,
                    key_points: &lesson.key_points,
                },
                &state.model,
                self.temperature,
            )
            .await?;

        if !feedback.is_approved {
            let note = format!("Review for {}: {}", lesson.title, feedback.feedback);
            debug!(suggestions = feedback.suggestions.len(), "{}", note);
            state.validation_errors.push(note);
        }

        state.cursor = course.next_lesson(position);
        state.is_complete = state.cursor.is_none();
        Ok(state)
    }
}

#[async_trait]
impl GraphNode<CourseState> for PlannerAgent {
    async fn run(&self, state: CourseState) -> Result<CourseState, NodeError> {
        Ok(self.process(state).await?)
    }
}

#[async_trait]
impl GraphNode<CourseState> for ContentGeneratorAgent {
    async fn run(&self, state: CourseState) -> Result<CourseState, NodeError> {
        Ok(self.process(state).await?)
    }
}

#[async_trait]
impl GraphNode<CourseState> for ReviewerAgent {
    async fn run(&self, state: CourseState) -> Result<CourseState, NodeError> {
        Ok(self.process(state).await?)
    }
}
