// SPDX-License-Identifier: AGPL-3.0-or-later

use async_trait::async_trait;
use sqlx::query_as;

use crate::db::errors::EntityStorageError;
use crate::db::models::{MetaRow, OrderRow, ReferenceEntity};
use crate::db::stores::EntityStore;
use crate::db::Pool;

/// Entity store over the normalized order table layout.
#[derive(Clone, Debug)]
pub struct OrderTableStore {
    pool: Pool,
}

impl OrderTableStore {
    /// Returns a new store using the provided connection pool.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore for OrderTableStore {
    async fn entity_by_id(&self, id: i64) -> Result<Option<ReferenceEntity>, EntityStorageError> {
        let row: Option<OrderRow> = query_as(
            "
            SELECT
                id,
                status,
                date_created_gmt,
                date_updated_gmt,
                customer_id,
                billing_email,
                total_amount
            FROM
                wc_orders
            WHERE
                id = $1
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
                wc_orders_meta
            WHERE
                order_id = $1
            ",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| EntityStorageError::FatalStorageError(err.to_string()))?;

        Ok(Some(ReferenceEntity::from_order(row, meta_rows)))
    }
}
