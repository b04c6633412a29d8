// SPDX-License-Identifier: AGPL-3.0-or-later

//! Cursor resolution subsystem: translates a decoded pagination cursor plus an "order by"
//! specification into a keyset predicate for the backing SQL query.
//!
//! The subsystem is request-scoped. A [`CursorController`] is constructed per connection
//! resolution, performs at most one store lookup to load the reference entity the cursor points
//! at, and emits a compiled predicate together with the matching `ORDER BY` clause.
mod adapters;
mod builder;
mod controller;
pub mod errors;
mod field;
mod order;
mod pagination;
#[cfg(test)]
mod test_utils;
mod token;
mod value;

pub use adapters::{
    BackendAdapter, ColumnSpec, MetaKeySpec, OrderTableAdapter, PostMetaAdapter, TableRole,
};
pub use builder::PredicateBuilder;
pub use controller::{CompiledCursor, CursorArgs, CursorController, CursorKind};
pub use field::{resolve_field, FieldComparison};
pub use order::{Direction, OrderSpec, Ordering};
pub use pagination::Pagination;
pub use token::{Cursor, PaginationCursor};
pub use value::{parse_utc, ComparableValue, ValueKind};
