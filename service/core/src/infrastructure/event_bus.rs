// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # Event Bus
//!
//! In-process fan-out of [`GenerationEvent`]s and [`ItemEvent`]s.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Decouple the workflows and handlers that emit events from
//!   whatever observes them
//!
//! Events live only in memory. A subscriber that falls more than `capacity`
//! events behind skips the oldest ones and keeps going. The service runs one
//! subscriber, [`spawn_event_logger`], which writes every event to the log.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::events::{GenerationEvent, ItemEvent};

pub const DEFAULT_EVENT_CAPACITY: usize = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    Generation(GenerationEvent),
    Item(ItemEvent),
}

impl From<GenerationEvent> for DomainEvent {
    fn from(event: GenerationEvent) -> Self {
        DomainEvent::Generation(event)
    }
}

impl From<ItemEvent> for DomainEvent {
    fn from(event: ItemEvent) -> Self {
        DomainEvent::Item(event)
    }
}

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Fire and forget. Events published while nobody listens are dropped.
    pub fn publish(&self, event: impl Into<DomainEvent>) {
        let event = event.into();
        if self.sender.send(event).is_err() {
            debug!("Event published with no subscribers");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

fn log_event(event: &DomainEvent) {
    match event {
        DomainEvent::Generation(GenerationEvent::EchoCompleted { length, .. }) => {
            info!(event = "echo_completed", length, "Echo completed");
        }
        DomainEvent::Generation(GenerationEvent::CourseGenerated {
            topic,
            module_count,
            lesson_count,
            validation_errors,
            ..
        }) => {
            info!(
                event = "course_generated",
                topic = %topic,
                module_count,
                lesson_count,
                validation_errors,
                "Course generated"
            );
        }
        DomainEvent::Generation(GenerationEvent::LessonGenerated {
            topic, difficulty, ..
        }) => {
            info!(
                event = "lesson_generated",
                topic = %topic,
                difficulty = %difficulty,
                "Lesson generated"
            );
        }
        DomainEvent::Generation(GenerationEvent::GenerationFailed {
            workflow, reason, ..
        }) => {
            warn!(
                event = "generation_failed",
                workflow = %workflow,
                reason = %reason,
                "Generation failed"
            );
        }
        DomainEvent::Item(ItemEvent::ItemCreated { item_id, name, .. }) => {
            info!(event = "item_created", item_id = %item_id, name = %name, "Item created");
        }
    }
}

/// Log every event published on `bus` until all of its publishers are gone.
///
/// The subscription is taken before this returns, so nothing published
/// afterwards is missed. The task resolves to the number of events logged.
pub fn spawn_event_logger(bus: &EventBus) -> JoinHandle<usize> {
    let mut receiver = bus.subscribe();
    tokio::spawn(async move {
        let mut logged = 0;
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    log_event(&event);
                    logged += 1;
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Event logger fell behind, events skipped");
                }
                Err(RecvError::Closed) => break,
            }
        }
        debug!(logged, "Event logger stopped");
        logged
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::ItemId;
    use chrono::Utc;
    use tokio::sync::broadcast::error::TryRecvError;

    fn item_created(name: &str) -> ItemEvent {
        ItemEvent::ItemCreated {
            item_id: ItemId::new(),
            name: name.to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_subscriber_receives_published_events() {
        let bus = EventBus::new(10);
        let mut receiver = bus.subscribe();

        bus.publish(GenerationEvent::failed("course", "boom"));

        match receiver.recv().await.unwrap() {
            DomainEvent::Generation(GenerationEvent::GenerationFailed { workflow, reason, .. }) => {
                assert_eq!(workflow, "course");
                assert_eq!(reason, "boom");
            }
            other => panic!("Unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_publish_without_subscribers_is_dropped() {
        let bus = EventBus::default();
        assert_eq!(bus.subscriber_count(), 0);
        bus.publish(item_created("widget"));

        let mut late = bus.subscribe();
        assert!(matches!(late.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn test_logger_drains_until_publishers_are_gone() {
        let bus = EventBus::new(8);
        let logger = spawn_event_logger(&bus);
        assert_eq!(bus.subscriber_count(), 1);

        bus.publish(GenerationEvent::failed("lesson", "bad topic"));
        bus.publish(item_created("widget"));
        drop(bus);

        assert_eq!(logger.await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_logger_survives_falling_behind() {
        let bus = EventBus::new(2);
        let logger = spawn_event_logger(&bus);

        // The logger task has not been polled yet, so three of these overflow
        for i in 0..5 {
            bus.publish(GenerationEvent::failed("echo", i.to_string()));
        }
        drop(bus);

        assert_eq!(logger.await.unwrap(), 2);
    }

    #[test]
    fn test_event_serialization_is_tagged() {
        let event = DomainEvent::from(GenerationEvent::failed("echo", "x"));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "generation");
    }
}
