// SPDX-License-Identifier: AGPL-3.0-or-later

//! Orchestration of one cursor resolution: reference entity lookup, per-key value resolution and
//! predicate compilation.
use log::debug;

use crate::cursor::adapters::BackendAdapter;
use crate::cursor::builder::PredicateBuilder;
use crate::cursor::field::resolve_field;
use crate::cursor::order::{Direction, OrderSpec, Ordering};
use crate::db::stores::EntityStore;

/// Which edge of the current page the cursor represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorKind {
    /// Paginate forwards from this cursor (`first` / `after`).
    After,

    /// Paginate backwards from this cursor (`last` / `before`).
    Before,
}

/// Inputs driving one cursor resolution.
#[derive(Debug, Clone)]
pub struct CursorArgs {
    /// Decoded row identifier from the client-supplied pagination token, absent on the first
    /// page.
    pub reference_id: Option<i64>,

    /// Which edge of the current page the cursor represents.
    pub kind: CursorKind,

    /// Requested ordering, may be empty.
    pub order: OrderSpec,
}

impl CursorArgs {
    /// Returns new arguments with the given cursor and the default ordering.
    pub fn new(reference_id: Option<i64>, kind: CursorKind) -> Self {
        Self {
            reference_id,
            kind,
            order: OrderSpec::default(),
        }
    }

    /// Sets the requested ordering.
    pub fn order(mut self, order: OrderSpec) -> Self {
        self.order = order;
        self
    }
}

/// Result of one cursor resolution, ready to be spliced into the backing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledCursor {
    /// Boolean predicate fragment beginning with `" AND "`, or an empty string when pagination
    /// applies no filter.
    pub predicate: String,

    /// `ORDER BY` clause matching the normalized sort key sequence. For `before` cursors the
    /// scan direction is reversed, the caller reverses the fetched rows to restore the requested
    /// order.
    pub order_by: String,

    /// `JOIN` clauses for all meta keys participating in the ordering, or an empty string.
    pub meta_joins: String,
}

/// Resolves the opaque pagination cursor into a reference entity and emits the compiled keyset
/// predicate for the backing query.
///
/// A controller is constructed fresh per connection resolution and consumed by [`compile`]. All
/// failure paths degrade to an unfiltered result: a missing or stale reference, a store lookup
/// error and unresolvable order keys never surface as errors to the caller.
///
/// [`compile`]: CursorController::compile
#[derive(Debug)]
pub struct CursorController<A> {
    args: CursorArgs,
    adapter: A,
}

impl<A> CursorController<A>
where
    A: BackendAdapter,
{
    /// Returns a new controller for one request.
    pub fn new(args: CursorArgs, adapter: A) -> Self {
        Self { args, adapter }
    }

    /// Runs the cursor resolution against the given store.
    ///
    /// Emits the `ORDER BY` clause and meta joins in every case, the predicate only when the
    /// cursor resolves to an existing row.
    pub async fn compile<S: EntityStore>(mut self, store: &S) -> CompiledCursor {
        let orderings = self
            .args
            .order
            .normalized(self.adapter.default_order_key(), self.adapter.id_order_key());

        let order_by = self.order_by_sql(&orderings);
        let predicate = self.predicate_sql(store, &orderings).await;

        CompiledCursor {
            predicate,
            order_by,
            meta_joins: self.adapter.meta_joins_sql(),
        }
    }

    /// Builds the predicate fragment, or an empty string when no filtering applies.
    async fn predicate_sql<S: EntityStore>(
        &mut self,
        store: &S,
        orderings: &[Ordering],
    ) -> String {
        // No cursor was given, this is the first page
        let reference_id = match self.args.reference_id {
            Some(id) => id,
            None => return String::new(),
        };

        // Resolve the reference entity the cursor points at. Stale cursors and store failures
        // both degrade to an unfiltered result, pagination stays usable either way
        let entity = match store.entity_by_id(reference_id).await {
            Ok(Some(entity)) => entity,
            Ok(None) => {
                debug!("Cursor points at missing row {}, skipping filter", reference_id);
                return String::new();
            }
            Err(err) => {
                debug!("Reference lookup for row {} failed ({}), skipping filter", reference_id, err);
                return String::new();
            }
        };

        let mut builder = PredicateBuilder::new();
        for ordering in orderings {
            let direction = self.effective_direction(ordering);
            if let Some(comparison) =
                resolve_field(&mut self.adapter, &ordering.key, &entity, direction)
            {
                builder.add_field(comparison);
            }
        }

        // The stabilizing identifier comparison always resolves, so a valid reference is
        // guaranteed to produce a predicate even when every other comparison dropped
        match builder.compile() {
            Some(predicate) if builder.len() > 1 => format!(" AND ({})", predicate),
            Some(predicate) => format!(" AND {}", predicate),
            None => String::new(),
        }
    }

    /// Builds the `ORDER BY` clause for the normalized sort key sequence.
    fn order_by_sql(&mut self, orderings: &[Ordering]) -> String {
        let columns: Vec<String> = orderings
            .iter()
            .filter_map(|ordering| {
                let direction = self.effective_direction(ordering);
                self.order_column(&ordering.key)
                    .map(|column| format!("{} {}", column, direction.as_sql()))
            })
            .collect();

        format!("ORDER BY {}", columns.join(", "))
    }

    /// Maps a logical sort key onto its orderable column expression.
    fn order_column(&mut self, key: &str) -> Option<String> {
        if key == self.adapter.id_order_key() {
            return Some(self.adapter.id_column().to_string());
        }

        if self.adapter.meta_key_spec(key).is_some() {
            return self.adapter.meta_order_column(key);
        }

        match self.adapter.column_spec(key) {
            Some(spec) => Some(spec.column.to_string()),
            None => {
                debug!("Skipping unknown order key '{}'", key);
                None
            }
        }
    }

    /// Derives the effective scan direction of one sort key from the cursor kind.
    ///
    /// Paginating backwards means scanning against the requested order, so `before` cursors flip
    /// every direction. Combined with the per-direction operator this yields:
    ///
    /// | cursor   | requested | operator |
    /// |----------|-----------|----------|
    /// | `after`  | ASC       | `>`      |
    /// | `after`  | DESC      | `<`      |
    /// | `before` | ASC       | `<`      |
    /// | `before` | DESC      | `>`      |
    fn effective_direction(&self, ordering: &Ordering) -> Direction {
        match self.args.kind {
            CursorKind::After => ordering.direction,
            CursorKind::Before => ordering.direction.flip(),
        }
    }
}
