// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! EdHub Core
//!
//! Domain model, AI workflows and HTTP surface of the course generator service.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Wires the DDD layers (`domain` → `application` →
//!   `infrastructure` → `presentation`) into one library consumed by the CLI

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
