// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Repository Implementations
//!
//! Infrastructure implementations of the repository abstractions defined in
//! the domain layer.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Persist and retrieve domain aggregates
//! - **Pattern:** Repository (DDD), Adapter (Hexagonal Architecture)
//!
//! # Available Implementations
//!
//! - **InMemoryItemRepository** - Thread-safe HashMap-backed storage that
//!   remembers insertion order

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::item::{Item, ItemId};
use crate::domain::repository::{ItemRepository, RepositoryError};

#[derive(Default)]
struct ItemStore {
    items: HashMap<ItemId, Item>,
    order: Vec<ItemId>,
}

#[derive(Clone, Default)]
pub struct InMemoryItemRepository {
    store: Arc<RwLock<ItemStore>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn add(&self, item: &Item) -> Result<(), RepositoryError> {
        let mut store = self.store.write();
        if store.items.contains_key(&item.id) {
            return Err(RepositoryError::Conflict(item.id.to_string()));
        }
        store.order.push(item.id.clone());
        store.items.insert(item.id.clone(), item.clone());
        Ok(())
    }

    async fn get(&self, id: &ItemId) -> Result<Option<Item>, RepositoryError> {
        Ok(self.store.read().items.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Item>, RepositoryError> {
        let store = self.store.read();
        Ok(store
            .order
            .iter()
            .filter_map(|id| store.items.get(id).cloned())
            .collect())
    }
}
