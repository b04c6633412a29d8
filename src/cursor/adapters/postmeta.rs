// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::cursor::adapters::{
    typecast_meta_column, BackendAdapter, ColumnSpec, MetaJoins, MetaKeySpec, TableRole,
};
use crate::cursor::{ComparableValue, ValueKind};

/// Column mapping of the legacy posts storage.
///
/// Logical keys mirror the order arguments of the GraphQL connections, physical columns are the
/// UTC (`_gmt`) variants so compiled predicates compare normalized timestamps.
const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        key: "date",
        column: "wp_posts.post_date_gmt",
        get: |entity| entity.created_at.map(ComparableValue::Datetime),
    },
    ColumnSpec {
        key: "modified",
        column: "wp_posts.post_modified_gmt",
        get: |entity| entity.modified_at.map(ComparableValue::Datetime),
    },
    ColumnSpec {
        key: "title",
        column: "wp_posts.post_title",
        get: |entity| entity.title.clone().map(ComparableValue::Text),
    },
    ColumnSpec {
        key: "slug",
        column: "wp_posts.post_name",
        get: |entity| entity.slug.clone().map(ComparableValue::Text),
    },
    ColumnSpec {
        key: "status",
        column: "wp_posts.post_status",
        get: |entity| entity.status.clone().map(ComparableValue::Text),
    },
    ColumnSpec {
        key: "menu_order",
        column: "wp_posts.menu_order",
        get: |entity| entity.menu_order.map(ComparableValue::Integer),
    },
];

/// Meta keys products can be ordered by, with their declared comparison types.
const META_KEYS: &[MetaKeySpec] = &[
    MetaKeySpec {
        key: "_price",
        kind: ValueKind::Numeric,
    },
    MetaKeySpec {
        key: "_regular_price",
        kind: ValueKind::Numeric,
    },
    MetaKeySpec {
        key: "_sale_price",
        kind: ValueKind::Numeric,
    },
    MetaKeySpec {
        key: "_sku",
        kind: ValueKind::Text,
    },
    MetaKeySpec {
        key: "total_sales",
        kind: ValueKind::Numeric,
    },
    MetaKeySpec {
        key: "_wc_average_rating",
        kind: ValueKind::Numeric,
    },
];

/// Adapter for the legacy post / post-meta table layout (`wp_posts` + `wp_postmeta`).
#[derive(Debug, Clone, Default)]
pub struct PostMetaAdapter {
    meta_joins: MetaJoins,
}

impl PostMetaAdapter {
    /// Returns a new adapter instance with fresh alias bookkeeping.
    pub fn new() -> Self {
        Self::default()
    }
}

impl BackendAdapter for PostMetaAdapter {
    fn table(&self, role: TableRole) -> &'static str {
        match role {
            TableRole::Primary => "wp_posts",
            TableRole::Meta => "wp_postmeta",
        }
    }

    fn columns(&self) -> &'static [ColumnSpec] {
        COLUMNS
    }

    fn meta_keys(&self) -> &'static [MetaKeySpec] {
        META_KEYS
    }

    fn id_column(&self) -> &'static str {
        "wp_posts.ID"
    }

    fn meta_order_column(&mut self, key: &str) -> Option<String> {
        let spec = self.meta_key_spec(key)?;
        let alias = self.meta_joins.alias_for(key);
        Some(typecast_meta_column(
            &format!("{}.meta_value", alias),
            spec.kind,
        ))
    }

    fn meta_joins_sql(&self) -> String {
        self.meta_joins.render(|alias, key| {
            format!(
                " LEFT JOIN wp_postmeta AS {alias} ON ( wp_posts.ID = {alias}.post_id AND {alias}.meta_key = '{key}' )",
                alias = alias,
                key = key,
            )
        })
    }
}
