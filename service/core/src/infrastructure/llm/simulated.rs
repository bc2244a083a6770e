// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Simulated LLM Provider Adapter
//
// Deterministic, offline provider. Structured requests are answered from the
// request `input` values according to the schema name, so every workflow can
// run end to end without network access or API keys.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::domain::llm::{
    FinishReason, GenerationOptions, GenerationResponse, LLMError, LLMProvider,
    StructuredRequest, TokenUsage,
};

const PROMPT_PREVIEW_CHARS: usize = 50;

pub struct SimulatedProvider {
    model: String,
}

impl SimulatedProvider {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }

    fn course_plan(input: &Value) -> Value {
        let topic = text(input, "topic", "Introduction to Topic");
        json!({
            "course_title": format!("{} Course", topic),
            "course_description": format!("A comprehensive course on {}", topic),
            "modules": [
                {
                    "title": "Getting Started",
                    "description": format!("Introduction to {}", topic),
                    "learning_objectives": [
                        format!("Understand the basics of {}", topic),
                        format!("Learn key concepts in {}", topic),
                        "Get familiar with the course structure"
                    ],
                    "num_lessons": 3
                },
                {
                    "title": "Advanced Concepts",
                    "description": format!("Deeper dive into {}", topic),
                    "learning_objectives": [
                        format!("Explore advanced topics in {}", topic),
                        format!("Apply {} concepts to real-world scenarios", topic),
                        "Develop practical skills"
                    ],
                    "num_lessons": 4
                }
            ]
        })
    }

    fn lesson_draft(input: &Value) -> Value {
        let course = text(input, "course", "the course");
        let module = text(input, "module", "this module");
        let lesson = text(input, "lesson", "this lesson");
        json!({
            "title": lesson,
            "summary": format!(
                "This is a detailed summary of {} in the {} of {}. \
                 It covers essential concepts and provides a comprehensive overview.",
                lesson, module, course
            ),
            "objectives": [
                format!("Understand the key concepts of {}", lesson),
                format!("Learn how to apply {} in practical scenarios", lesson),
                format!("Master the fundamentals of {} in the context of {}", lesson, module)
            ],
            "key_points": [
                format!("Key concept 1 about {}", lesson),
                format!("Important consideration for {}", lesson),
                format!("Practical application of {}", lesson),
                format!("Common challenges in {}", lesson),
                format!("Best practices for {}", lesson)
            ]
        })
    }

    fn review_feedback() -> Value {
        json!({
            "is_approved": true,
            "feedback": "The content looks good and meets all the requirements. No changes needed.",
            "suggestions": []
        })
    }

    /// A topic is accepted when it has at least three alphanumeric characters
    fn topic_validation(input: &Value) -> Value {
        let topic = text(input, "topic", "");
        let audience = text(input, "target_audience", "beginner");
        let trimmed = topic.trim();
        let is_valid = trimmed.chars().filter(|c| c.is_alphanumeric()).count() >= 3;
        let prerequisites: Vec<String> = if audience == "beginner" {
            Vec::new()
        } else {
            vec![format!("Basic familiarity with {}", trimmed)]
        };
        let message = if is_valid {
            format!("'{}' is a suitable topic for a single lesson", trimmed)
        } else {
            "The topic is too short or vague to build a lesson around".to_string()
        };
        json!({
            "original_topic": topic,
            "refined_topic": trimmed,
            "is_valid": is_valid,
            "validation_message": message,
            "suggested_scope": format!(
                "A focused introduction to {} for {} learners",
                trimmed, audience
            ),
            "prerequisites": prerequisites
        })
    }

    fn learning_objectives(input: &Value) -> Value {
        let topic = text(input, "topic", "the topic");
        let audience = text(input, "target_audience", "beginner");
        let generated = [
            ("Explain", "fundamentals"),
            ("Apply", "practical use"),
            ("Analyze", "trade-offs"),
        ];

        let mut objectives: Vec<Value> = strings(input, "requested_objectives")
            .into_iter()
            .take(5)
            .map(|description| json!({"description": description, "key_concept": topic}))
            .collect();
        for (verb, concept) in generated.iter().skip(objectives.len().min(3)) {
            objectives.push(json!({
                "description": format!("{} the {} of {}", verb, concept, topic),
                "key_concept": format!("{} {}", topic, concept),
            }));
        }

        json!({
            "objectives": objectives,
            "difficulty": audience,
            "alignment_note": format!("Objectives progress from recall to analysis for {} learners", audience)
        })
    }

    fn lesson_body(input: &Value) -> Value {
        let topic = text(input, "topic", "the topic");
        let audience = text(input, "target_audience", "beginner");
        let covered: Vec<String> = input
            .get("learning_objectives")
            .and_then(Value::as_array)
            .map(|objectives| {
                objectives
                    .iter()
                    .filter_map(|o| o.get("description").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let duration = match audience.as_str() {
            "advanced" => 60,
            "intermediate" => 45,
            _ => 30,
        };
        let first: Vec<&String> = covered.iter().take(1).collect();
        let second: Vec<&String> = covered.iter().skip(1).take(1).collect();
        let rest: Vec<&String> = covered.iter().skip(2).collect();
        let mut key_terms = serde_json::Map::new();
        key_terms.insert(
            topic.clone(),
            Value::String(format!("The subject of this lesson: {}", topic)),
        );

        json!({
            "sections": [
                {
                    "heading": format!("Introduction to {}", topic),
                    "content": format!("This section introduces {} and why it matters.", topic),
                    "key_points": [format!("What {} is", topic), "Where it is used"],
                    "learning_objectives_covered": first
                },
                {
                    "heading": "Core Concepts",
                    "content": format!("The central ideas behind {} explained step by step.", topic),
                    "key_points": ["Terminology", "Mental model"],
                    "learning_objectives_covered": second
                },
                {
                    "heading": "Putting It Into Practice",
                    "content": format!("Applying {} to realistic problems.", topic),
                    "key_points": ["Common pitfalls", "Best practices"],
                    "learning_objectives_covered": rest
                }
            ],
            "estimated_duration_minutes": duration,
            "key_terms": key_terms
        })
    }

    fn examples(input: &Value) -> Value {
        let topic = text(input, "topic", "the topic");
        let count = count(input, "num_examples", 2);
        let examples: Vec<Value> = (1..=count)
            .map(|n| {
                json!({
                    "title": format!("{} in practice #{}", topic, n),
                    "description": format!("A real-world scenario showing {} at work.", topic),
                    "key_takeaway": format!("How {} solves a concrete problem", topic)
                })
            })
            .collect();
        json!({
            "examples": examples,
            "additional_resources": [
                {"title": format!("Further reading on {}", topic), "type": "article"}
            ]
        })
    }

    fn quiz(input: &Value) -> Value {
        let topic = text(input, "topic", "the topic");
        let count = count(input, "num_questions", 3);
        let questions: Vec<Value> = (0..count)
            .map(|i| {
                json!({
                    "question": format!("Question {} about {}?", i + 1, topic),
                    "options": [
                        format!("A correct statement about {}", topic),
                        "An unrelated statement",
                        "A common misconception",
                        "None of the above"
                    ],
                    "correct_answer": 0,
                    "explanation": format!("Only the first option accurately describes {}", topic)
                })
            })
            .collect();
        json!({
            "questions": questions,
            "assessment_criteria": {
                "mastery": "All questions answered correctly",
                "proficient": "At least two thirds answered correctly"
            }
        })
    }
}

fn text(input: &Value, key: &str, default: &str) -> String {
    input
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

fn strings(input: &Value, key: &str) -> Vec<String> {
    input
        .get(key)
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn count(input: &Value, key: &str, default: u64) -> u64 {
    input.get(key).and_then(Value::as_u64).unwrap_or(default)
}

#[async_trait]
impl LLMProvider for SimulatedProvider {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<GenerationResponse, LLMError> {
        let preview: String = prompt.chars().take(PROMPT_PREVIEW_CHARS).collect();
        let text = format!("Generated response for prompt: {}...", preview);
        let prompt_tokens = prompt.split_whitespace().count() as u32;
        let completion_tokens = text.split_whitespace().count() as u32;

        Ok(GenerationResponse {
            text,
            usage: TokenUsage {
                prompt_tokens,
                completion_tokens,
                total_tokens: prompt_tokens + completion_tokens,
            },
            provider: self.name().to_string(),
            model: options.model.clone().unwrap_or_else(|| self.model.clone()),
            finish_reason: FinishReason::Stop,
        })
    }

    async fn generate_structured(&self, request: &StructuredRequest) -> Result<Value, LLMError> {
        debug!(schema = %request.schema, "Simulated structured generation");
        let input = &request.input;
        match request.schema.as_str() {
            "course_plan" => Ok(Self::course_plan(input)),
            "lesson_draft" => Ok(Self::lesson_draft(input)),
            "review_feedback" => Ok(Self::review_feedback()),
            "topic_validation" => Ok(Self::topic_validation(input)),
            "learning_objectives" => Ok(Self::learning_objectives(input)),
            "lesson_body" => Ok(Self::lesson_body(input)),
            "examples" => Ok(Self::examples(input)),
            "quiz" => Ok(Self::quiz(input)),
            other => Err(LLMError::InvalidInput(format!(
                "Unsupported structured schema: {}",
                other
            ))),
        }
    }

    async fn health_check(&self) -> Result<(), LLMError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(schema: &str, input: Value) -> StructuredRequest {
        StructuredRequest::new(schema, "prompt").with_input(input)
    }

    #[tokio::test]
    async fn test_generate_previews_prompt() {
        let provider = SimulatedProvider::new("gpt-4");
        let prompt = "x".repeat(80);
        let response = provider
            .generate(&prompt, &GenerationOptions::default())
            .await
            .unwrap();
        assert_eq!(
            response.text,
            format!("Generated response for prompt: {}...", "x".repeat(50))
        );
        assert_eq!(response.model, "gpt-4");
        assert_eq!(response.provider, "simulated");
    }

    #[tokio::test]
    async fn test_course_plan_uses_topic() {
        let provider = SimulatedProvider::new("gpt-4");
        let plan = provider
            .generate_structured(&request("course_plan", json!({"topic": "Rust"})))
            .await
            .unwrap();
        assert_eq!(plan["course_title"], "Rust Course");
        assert_eq!(plan["modules"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_topic_validation_rejects_vague_topics() {
        let provider = SimulatedProvider::new("gpt-4");
        let valid = provider
            .generate_structured(&request("topic_validation", json!({"topic": "Ownership"})))
            .await
            .unwrap();
        assert_eq!(valid["is_valid"], true);

        let invalid = provider
            .generate_structured(&request("topic_validation", json!({"topic": " ?! "})))
            .await
            .unwrap();
        assert_eq!(invalid["is_valid"], false);
    }

    #[tokio::test]
    async fn test_learning_objectives_keep_requested_ones() {
        let provider = SimulatedProvider::new("gpt-4");
        let output = provider
            .generate_structured(&request(
                "learning_objectives",
                json!({"topic": "Rust", "requested_objectives": ["Write a struct"]}),
            ))
            .await
            .unwrap();
        let objectives = output["objectives"].as_array().unwrap();
        assert_eq!(objectives.len(), 3);
        assert_eq!(objectives[0]["description"], "Write a struct");
    }

    #[tokio::test]
    async fn test_counts_are_honoured() {
        let provider = SimulatedProvider::new("gpt-4");
        let examples = provider
            .generate_structured(&request("examples", json!({"topic": "Rust", "num_examples": 4})))
            .await
            .unwrap();
        assert_eq!(examples["examples"].as_array().unwrap().len(), 4);

        let quiz = provider
            .generate_structured(&request("quiz", json!({"topic": "Rust", "num_questions": 2})))
            .await
            .unwrap();
        assert_eq!(quiz["questions"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_schema() {
        let provider = SimulatedProvider::new("gpt-4");
        let err = provider
            .generate_structured(&request("poem", Value::Null))
            .await
            .unwrap_err();
        assert!(matches!(err, LLMError::InvalidInput(_)));
    }
}
