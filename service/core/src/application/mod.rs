// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod agent;
pub mod course_generation;
pub mod create_item;
pub mod echo;
pub mod generate_course;
pub mod lesson_content;
