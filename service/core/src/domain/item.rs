// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Item aggregate
//!
//! The smallest persisted aggregate of the service: a named item identified by
//! a UUID. It exists to exercise the repository + use case plumbing end to end.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::DomainValidationError;

/// Unique identifier for an Item (UUID v4, kept in its string form)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parse an identifier received from outside the domain
    pub fn parse(value: &str) -> Result<Self, DomainValidationError> {
        let uuid = Uuid::parse_str(value).map_err(|e| DomainValidationError::Invalid {
            field: "item id",
            reason: e.to_string(),
        })?;
        Ok(Self(uuid.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
}

impl Item {
    /// Create an item; the name is trimmed and must not be blank
    pub fn new(id: ItemId, name: impl Into<String>) -> Result<Self, DomainValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainValidationError::Empty { field: "item name" });
        }
        Ok(Self { id, name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_uniqueness() {
        assert_ne!(ItemId::new(), ItemId::new());
    }

    #[test]
    fn test_item_id_parse() {
        let id = ItemId::new();
        assert_eq!(ItemId::parse(id.as_str()).unwrap(), id);
        assert!(ItemId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn test_item_name_is_trimmed() {
        let item = Item::new(ItemId::new(), "  widget ").unwrap();
        assert_eq!(item.name, "widget");
        assert!(Item::new(ItemId::new(), "   ").is_err());
    }
}
