// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain
//!
//! Entities, value objects, domain events and the contracts the outer layers
//! implement (repositories, LLM providers). Only configuration loading
//! touches the filesystem.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Ubiquitous language of the course generator

pub mod error;
pub mod item;
pub mod course;
pub mod lesson;
pub mod events;
pub mod repository;
pub mod llm;
pub mod workflow;
pub mod service_config;
