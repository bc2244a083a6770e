// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod api;
pub mod docs;
pub mod middleware;
pub mod schemas;

pub use api::{app, AppState};
pub use middleware::ApiError;
