// SPDX-License-Identifier: AGPL-3.0-or-later

//! # woocursor
//!
//! Cursor-based pagination for WooCommerce GraphQL connections. This crate translates connection
//! arguments (`first` / `last` / `after` / `before` plus an "order by" specification) into
//! stable, keyset-style SQL predicates which a connection resolver can splice into its backing
//! store query.
//!
//! Two storage backends are supported through the [`BackendAdapter`] trait: the legacy post /
//! post-meta table layout and the newer normalized order table layout. Pagination never fails on
//! a stale or invalid cursor, it degrades to an unfiltered result instead.
#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

pub mod cursor;
pub mod db;

pub use crate::cursor::{
    BackendAdapter, ColumnSpec, ComparableValue, CompiledCursor, Cursor, CursorArgs,
    CursorController, CursorKind, Direction, MetaKeySpec, OrderSpec, OrderTableAdapter, Ordering,
    Pagination, PaginationCursor, PostMetaAdapter, PredicateBuilder, TableRole, ValueKind,
};
pub use crate::db::models::ReferenceEntity;
pub use crate::db::stores::{EntityStore, OrderTableStore, PostMetaStore};
pub use crate::db::{connection_pool, Pool};
