// SPDX-License-Identifier: AGPL-3.0-or-later

//! Helpers shared by the cursor subsystem tests.
use std::collections::HashMap;

use async_trait::async_trait;

use crate::cursor::parse_utc;
use crate::db::errors::EntityStorageError;
use crate::db::models::ReferenceEntity;
use crate::db::stores::EntityStore;

/// Returns a product-like reference entity with the given creation date and meta values.
pub fn product_entity(id: i64, date: &str, meta: &[(&str, &str)]) -> ReferenceEntity {
    let mut entity = ReferenceEntity::new(id);
    entity.created_at = parse_utc(date);
    entity.title = Some(format!("Product {}", id));
    entity.status = Some("publish".to_string());
    entity.meta = meta
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    entity
}

/// In-memory entity store for controller tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entities: HashMap<i64, ReferenceEntity>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity: ReferenceEntity) {
        self.entities.insert(entity.id, entity);
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn entity_by_id(&self, id: i64) -> Result<Option<ReferenceEntity>, EntityStorageError> {
        Ok(self.entities.get(&id).cloned())
    }
}

/// Entity store failing every lookup, for degrade-path tests.
#[derive(Debug, Clone, Copy)]
pub struct FailingStore;

#[async_trait]
impl EntityStore for FailingStore {
    async fn entity_by_id(&self, _id: i64) -> Result<Option<ReferenceEntity>, EntityStorageError> {
        Err(EntityStorageError::FatalStorageError(
            "connection lost".to_string(),
        ))
    }
}
