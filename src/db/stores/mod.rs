// SPDX-License-Identifier: AGPL-3.0-or-later

//! Concrete entity stores, one per storage backend.
mod ordertable;
mod postmeta;

use async_trait::async_trait;

use crate::db::errors::EntityStorageError;
use crate::db::models::ReferenceEntity;

pub use ordertable::OrderTableStore;
pub use postmeta::PostMetaStore;

/// Lookup of the reference entity a pagination cursor points at.
///
/// Implementations do exactly one thing: resolve a decoded row identifier into a read-only
/// entity snapshot, or signal "not found". The cursor subsystem treats lookup failures the same
/// as not-found and keeps pagination usable.
#[async_trait]
pub trait EntityStore {
    /// Returns the entity with the given identifier, `None` when no such row exists.
    async fn entity_by_id(&self, id: i64) -> Result<Option<ReferenceEntity>, EntityStorageError>;
}
