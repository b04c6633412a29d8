// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::cursor::adapters::{
    typecast_meta_column, BackendAdapter, ColumnSpec, MetaJoins, MetaKeySpec, TableRole,
};
use crate::cursor::{ComparableValue, ValueKind};

/// Column mapping of the normalized order table storage.
const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        key: "date",
        column: "wc_orders.date_created_gmt",
        get: |entity| entity.created_at.map(ComparableValue::Datetime),
    },
    ColumnSpec {
        key: "modified",
        column: "wc_orders.date_updated_gmt",
        get: |entity| entity.modified_at.map(ComparableValue::Datetime),
    },
    ColumnSpec {
        key: "status",
        column: "wc_orders.status",
        get: |entity| entity.status.clone().map(ComparableValue::Text),
    },
    ColumnSpec {
        key: "customer_id",
        column: "wc_orders.customer_id",
        get: |entity| entity.customer_id.map(ComparableValue::Integer),
    },
    ColumnSpec {
        key: "billing_email",
        column: "wc_orders.billing_email",
        get: |entity| entity.billing_email.clone().map(ComparableValue::Text),
    },
    ColumnSpec {
        key: "total",
        column: "wc_orders.total_amount",
        get: |entity| entity.total.map(ComparableValue::Float),
    },
];

/// Meta keys orders can be ordered by, with their declared comparison types.
const META_KEYS: &[MetaKeySpec] = &[
    MetaKeySpec {
        key: "_cart_discount",
        kind: ValueKind::Numeric,
    },
    MetaKeySpec {
        key: "_payment_method_title",
        kind: ValueKind::Text,
    },
];

/// Adapter for the normalized order table layout (`wc_orders` + `wc_orders_meta`).
#[derive(Debug, Clone, Default)]
pub struct OrderTableAdapter {
    meta_joins: MetaJoins,
}

impl OrderTableAdapter {
    /// Returns a new adapter instance with fresh alias bookkeeping.
    pub fn new() -> Self {
        Self::default()
    }
}

impl BackendAdapter for OrderTableAdapter {
    fn table(&self, role: TableRole) -> &'static str {
        match role {
            TableRole::Primary => "wc_orders",
            TableRole::Meta => "wc_orders_meta",
        }
    }

    fn columns(&self) -> &'static [ColumnSpec] {
        COLUMNS
    }

    fn meta_keys(&self) -> &'static [MetaKeySpec] {
        META_KEYS
    }

    fn id_column(&self) -> &'static str {
        "wc_orders.id"
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
                " LEFT JOIN wc_orders_meta AS {alias} ON ( wc_orders.id = {alias}.order_id AND {alias}.meta_key = '{key}' )",
                alias = alias,
                key = key,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{BackendAdapter, OrderTableAdapter, TableRole};

    #[test]
    fn columns_are_qualified_with_the_order_table() {
        let adapter = OrderTableAdapter::new();

        assert_eq!(adapter.table(TableRole::Primary), "wc_orders");
        assert_eq!(adapter.id_column(), "wc_orders.id");
        assert_eq!(
            adapter.column_spec("total").unwrap().column,
            "wc_orders.total_amount"
        );
        assert!(adapter.column_spec("menu_order").is_none());
    }

    #[test]
    fn meta_joins_reference_the_order_meta_table() {
        let mut adapter = OrderTableAdapter::new();
        adapter.meta_order_column("_cart_discount").unwrap();

        assert_eq!(
            adapter.meta_joins_sql(),
            " LEFT JOIN wc_orders_meta AS mt1 ON ( wc_orders.id = mt1.order_id AND mt1.meta_key = '_cart_discount' )"
        );
    }
}
