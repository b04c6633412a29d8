// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::cursor::parse_utc;

/// A row from the legacy posts table holding the attributes the cursor subsystem can order by.
#[derive(FromRow, Debug, Clone)]
pub struct PostRow {
    /// Unique row identifier (`ID`).
    pub id: i64,

    /// Creation timestamp in UTC (`post_date_gmt`).
    pub post_date_gmt: Option<String>,

    /// Last modification timestamp in UTC (`post_modified_gmt`).
    pub post_modified_gmt: Option<String>,

    /// Post title.
    pub post_title: Option<String>,

    /// URL slug (`post_name`).
    pub post_name: Option<String>,

    /// Post status.
    pub post_status: Option<String>,

    /// Manual sort position.
    pub menu_order: Option<i64>,
}

/// A row from the normalized order table holding the attributes the cursor subsystem can order
/// by.
#[derive(FromRow, Debug, Clone)]
pub struct OrderRow {
    /// Unique row identifier.
    pub id: i64,

    /// Order status.
    pub status: Option<String>,

    /// Creation timestamp in UTC.
    pub date_created_gmt: Option<String>,

    /// Last update timestamp in UTC.
    pub date_updated_gmt: Option<String>,

    /// Identifier of the customer who placed the order.
    pub customer_id: Option<i64>,

    /// Billing email address.
    pub billing_email: Option<String>,

    /// Order total.
    pub total_amount: Option<f64>,
}

/// A single key-value row from one of the meta tables.
#[derive(FromRow, Debug, Clone)]
pub struct MetaRow {
    /// Meta key.
    pub meta_key: String,

    /// Meta value, stored as text.
    pub meta_value: Option<String>,
}

/// The concrete row a pagination cursor points at.
///
/// This is a transient, read-only snapshot held only for the duration of one predicate
/// construction. Attributes which do not exist in a given backend stay `None` and comparisons on
/// them get dropped.
#[derive(Debug, Clone)]
pub struct ReferenceEntity {
    /// Unique row identifier.
    pub id: i64,

    /// Creation timestamp in UTC.
    pub created_at: Option<DateTime<Utc>>,

    /// Last modification timestamp in UTC.
    pub modified_at: Option<DateTime<Utc>>,

    /// Title, posts backend only.
    pub title: Option<String>,

    /// URL slug, posts backend only.
    pub slug: Option<String>,

    /// Status.
    pub status: Option<String>,

    /// Manual sort position, posts backend only.
    pub menu_order: Option<i64>,

    /// Customer identifier, order table backend only.
    pub customer_id: Option<i64>,

    /// Billing email address, order table backend only.
    pub billing_email: Option<String>,

    /// Order total, order table backend only.
    pub total: Option<f64>,

    /// Raw meta key-value pairs of the row.
    pub meta: HashMap<String, String>,
}

impl ReferenceEntity {
    /// Returns a bare entity with the given identifier and no further attributes.
    pub fn new(id: i64) -> Self {
        Self {
            id,
            created_at: None,
            modified_at: None,
            title: None,
            slug: None,
            status: None,
            menu_order: None,
            customer_id: None,
            billing_email: None,
            total: None,
            meta: HashMap::new(),
        }
    }

    /// Returns the raw meta value for the given key, `None` when absent or empty.
    pub fn meta_value(&self, key: &str) -> Option<&str> {
        match self.meta.get(key) {
            Some(value) if !value.trim().is_empty() => Some(value.as_str()),
            _ => None,
        }
    }

    /// Builds a reference entity from a posts table row plus its meta rows.
    pub fn from_post(row: PostRow, meta_rows: Vec<MetaRow>) -> Self {
        Self {
            id: row.id,
            created_at: row.post_date_gmt.as_deref().and_then(parse_utc),
            modified_at: row.post_modified_gmt.as_deref().and_then(parse_utc),
            title: row.post_title,
            slug: row.post_name,
            status: row.post_status,
            menu_order: row.menu_order,
            customer_id: None,
            billing_email: None,
            total: None,
            meta: collect_meta(meta_rows),
        }
    }

    /// Builds a reference entity from an order table row plus its meta rows.
    pub fn from_order(row: OrderRow, meta_rows: Vec<MetaRow>) -> Self {
        Self {
            id: row.id,
            created_at: row.date_created_gmt.as_deref().and_then(parse_utc),
            modified_at: row.date_updated_gmt.as_deref().and_then(parse_utc),
            title: None,
            slug: None,
            status: row.status,
            menu_order: None,
            customer_id: row.customer_id,
            billing_email: row.billing_email,
            total: row.total_amount,
            meta: collect_meta(meta_rows),
        }
    }
}

fn collect_meta(meta_rows: Vec<MetaRow>) -> HashMap<String, String> {
    meta_rows
        .into_iter()
        .filter_map(|row| {
            let MetaRow {
                meta_key,
                meta_value,
            } = row;
            meta_value.map(|value| (meta_key, value))
        })
        .collect()
}
