// SPDX-License-Identifier: AGPL-3.0-or-later

//! Pluggable mappings from logical sort keys to a concrete storage schema.
//!
//! The cursor controller and predicate builder are parameterized over a [`BackendAdapter`]
//! instance, swapping the storage layout never touches their logic. Only identifiers declared by
//! an adapter, either in its column mapping or its meta-orderable key set, can ever appear in a
//! compiled predicate. Everything else is dropped, which closes the injection hazard of deriving
//! physical names from caller input.
mod ordertable;
mod postmeta;

use crate::cursor::{ComparableValue, ValueKind};
use crate::db::models::ReferenceEntity;

pub use ordertable::OrderTableAdapter;
pub use postmeta::PostMetaAdapter;

/// Logical roles of the physical tables an adapter spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRole {
    /// The table holding one row per entity.
    Primary,

    /// The key-value table holding entity meta data.
    Meta,
}

/// One entry of an adapter's column mapping: a logical sort key, the physical column it maps to
/// and the accessor extracting the comparison value from a reference entity.
///
/// The accessor is an explicit function pointer, value extraction never constructs method or
/// column names from the key at runtime.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    /// Logical sort key, as used by clients.
    pub key: &'static str,

    /// Fully qualified physical column.
    pub column: &'static str,

    /// Extracts the comparison value from a reference entity.
    pub get: fn(&ReferenceEntity) -> Option<ComparableValue>,
}

/// One entry of an adapter's meta-orderable key set with its declared comparison type.
#[derive(Debug, Clone, Copy)]
pub struct MetaKeySpec {
    /// Meta key, as stored in the meta table.
    pub key: &'static str,

    /// Declared comparison type of the meta values.
    pub kind: ValueKind,
}

/// Mapping from logical sort keys to one concrete storage schema.
///
/// Adapters also do the table-alias bookkeeping for meta-key joins: every distinct meta key used
/// within one request gets exactly one join with a unique alias, repeated lookups return the
/// existing alias. The alias counter is per-instance and request-scoped.
pub trait BackendAdapter {
    /// Returns the physical table name for the given logical role.
    fn table(&self, role: TableRole) -> &'static str;

    /// Returns the allow-listed column mapping of this backend.
    fn columns(&self) -> &'static [ColumnSpec];

    /// Returns the declared set of meta keys results can be ordered by.
    fn meta_keys(&self) -> &'static [MetaKeySpec];

    /// Returns the fully qualified unique-identifier column.
    fn id_column(&self) -> &'static str;

    /// Returns the logical key of the unique row identifier.
    fn id_order_key(&self) -> &'static str {
        "id"
    }

    /// Returns the logical key results are ordered by when the caller supplied no order at all.
    fn default_order_key(&self) -> &'static str {
        "date"
    }

    /// Returns the orderable SQL expression for the given meta key, allocating a join alias on
    /// first use.
    ///
    /// Returns `None` for keys outside the declared meta-orderable set.
    fn meta_order_column(&mut self, key: &str) -> Option<String>;

    /// Returns the accumulated `JOIN` clauses for all meta keys used so far, or an empty string.
    fn meta_joins_sql(&self) -> String;

    /// Returns the column mapping entry for the given logical key.
    fn column_spec(&self, key: &str) -> Option<&'static ColumnSpec> {
        self.columns().iter().find(|spec| spec.key == key)
    }

    /// Returns the meta key entry for the given key.
    fn meta_key_spec(&self, key: &str) -> Option<&'static MetaKeySpec> {
        self.meta_keys().iter().find(|spec| spec.key == key)
    }
}

/// Shared alias bookkeeping for meta-key joins.
///
/// Aliases are `mt1`, `mt2`, .. in allocation order, scoped to one adapter instance and with it
/// to one request.
#[derive(Debug, Clone, Default)]
pub(crate) struct MetaJoins {
    joins: Vec<(String, String)>,
}

impl MetaJoins {
    /// Returns the alias for the given meta key, allocating the next one on first use.
    pub fn alias_for(&mut self, key: &str) -> String {
        if let Some((_, alias)) = self.joins.iter().find(|(join_key, _)| join_key == key) {
            return alias.clone();
        }

        let alias = format!("mt{}", self.joins.len() + 1);
        self.joins.push((key.to_string(), alias.clone()));
        alias
    }

    /// Renders all allocated joins with the given join template.
    ///
    /// The template receives the alias and the escaped meta key.
    pub fn render(&self, render_join: impl Fn(&str, &str) -> String) -> String {
        self.joins
            .iter()
            .map(|(key, alias)| {
                render_join(alias, &crate::cursor::value::escape_sql_string(key))
            })
            .collect::<Vec<String>>()
            .join("")
    }
}

/// Wraps a meta value expression into the typecast required for its declared comparison type.
///
/// Meta values are stored as text, numeric comparisons need an explicit cast. Text and datetime
/// values compare correctly as-is since datetimes are normalized to a lexicographically ordered
/// format.
pub(crate) fn typecast_meta_column(column: &str, kind: ValueKind) -> String {
    match kind {
        ValueKind::Numeric => format!("CAST ({} AS REAL)", column),
        ValueKind::Text | ValueKind::Datetime => column.to_string(),
    }
}
