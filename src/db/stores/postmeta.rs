// SPDX-License-Identifier: AGPL-3.0-or-later

use async_trait::async_trait;
use sqlx::query_as;

use crate::db::errors::EntityStorageError;
use crate::db::models::{MetaRow, PostRow, ReferenceEntity};
use crate::db::stores::EntityStore;
use crate::db::Pool;

/// Entity store over the legacy post / post-meta table layout.
#[derive(Clone, Debug)]
pub struct PostMetaStore {
    pool: Pool,
}

impl PostMetaStore {
    /// Returns a new store using the provided connection pool.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore for PostMetaStore {
    async fn entity_by_id(&self, id: i64) -> Result<Option<ReferenceEntity>, EntityStorageError> {
        let row: Option<PostRow> = query_as(
            "
            SELECT
                ID AS id,
                post_date_gmt,
                post_modified_gmt,
                post_title,
                post_name,
                post_status,
                menu_order
            FROM
                wp_posts
            WHERE
                ID = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| EntityStorageError::FatalStorageError(err.to_string()))?;

        let row = match row {
            Some(row) => row,
            None => return Ok(None),
        };

        let meta_rows: Vec<MetaRow> = query_as(
            "
            SELECT
                meta_key,
                meta_value
            FROM
                wp_postmeta
            WHERE
                post_id = $1
            ",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| EntityStorageError::FatalStorageError(err.to_string()))?;

        Ok(Some(ReferenceEntity::from_post(row, meta_rows)))
    }
}
