// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Domain Repository Interfaces
//!
//! Persistence contracts for each aggregate root: one repository per
//! aggregate, interface defined here, implemented in
//! `crate::infrastructure::repositories`.
//!
//! | Trait | Aggregate | Implementations |
//! |-------|-----------|----------------|
//! | `ItemRepository` | `Item` | `InMemoryItemRepository` |
//!
//! Only in-memory storage exists; contents are lost on restart.

use async_trait::async_trait;

use crate::domain::item::{Item, ItemId};

/// Repository interface for Item aggregates
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Store a new item. Fails with `Conflict` if the id is already taken
    async fn add(&self, item: &Item) -> Result<(), RepositoryError>;

    async fn get(&self, id: &ItemId) -> Result<Option<Item>, RepositoryError>;

    /// All items in insertion order
    async fn list(&self) -> Result<Vec<Item>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Entity already exists: {0}")]
    Conflict(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
