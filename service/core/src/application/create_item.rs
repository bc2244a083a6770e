// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Create Item Use Case
//!
//! # DDD Pattern: Application Service
//!
//! - **Layer:** Application
//! - **Responsibility:** Mint an id, validate and store a new `Item`
//! - **Collaborators:**
//!   - Domain: Item aggregate, ItemRepository
//!   - Infrastructure: EventBus

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::domain::events::ItemEvent;
use crate::domain::item::{Item, ItemId};
use crate::domain::repository::ItemRepository;
use crate::infrastructure::event_bus::EventBus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItemInput {
    pub name: String,
}

pub struct CreateItemUseCase {
    repository: Arc<dyn ItemRepository>,
    event_bus: EventBus,
}

impl CreateItemUseCase {
    pub fn new(repository: Arc<dyn ItemRepository>, event_bus: EventBus) -> Self {
        Self {
            repository,
            event_bus,
        }
    }

    pub async fn execute(&self, input: CreateItemInput) -> Result<Item> {
        let item = Item::new(ItemId::new(), input.name).context("Invalid item")?;

        self.repository
            .add(&item)
            .await
            .context("Failed to persist item")?;

        info!(item_id = %item.id, name = %item.name, "Item created");
        self.event_bus.publish(ItemEvent::ItemCreated {
            item_id: item.id.clone(),
            name: item.name.clone(),
            created_at: Utc::now(),
        });

        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::event_bus::DomainEvent;
    use crate::infrastructure::repositories::InMemoryItemRepository;

    #[tokio::test]
    async fn test_create_item_stores_and_publishes() {
        let repository = Arc::new(InMemoryItemRepository::new());
        let event_bus = EventBus::new(8);
        let mut events = event_bus.subscribe();
        let use_case = CreateItemUseCase::new(repository.clone(), event_bus);

        let item = use_case
            .execute(CreateItemInput {
                name: "Test".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(item.name, "Test");
        assert_eq!(repository.get(&item.id).await.unwrap(), Some(item.clone()));

        match events.try_recv().unwrap() {
            DomainEvent::Item(ItemEvent::ItemCreated { item_id, .. }) => assert_eq!(item_id, item.id),
            other => panic!("Unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let repository = Arc::new(InMemoryItemRepository::new());
        let use_case = CreateItemUseCase::new(repository.clone(), EventBus::default());

        let result = use_case
            .execute(CreateItemInput {
                name: "  ".to_string(),
            })
            .await;

        assert!(result.is_err());
        assert!(repository.list().await.unwrap().is_empty());
    }
}
