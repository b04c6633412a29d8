// SPDX-License-Identifier: AGPL-3.0-or-later

use log::debug;

use crate::cursor::adapters::BackendAdapter;
use crate::cursor::{ComparableValue, Direction};
use crate::db::models::ReferenceEntity;

/// One resolved comparison: a physical column expression, the boundary value extracted from the
/// reference entity and the effective scan direction.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldComparison {
    /// Physical column or cast expression, taken from the adapter's allow-list.
    pub column: String,

    /// Boundary value the compiled predicate compares against.
    pub value: ComparableValue,

    /// Effective direction of this comparison, already flipped for `before` cursors.
    pub direction: Direction,
}

impl FieldComparison {
    /// Returns a new field comparison.
    pub fn new(column: &str, value: ComparableValue, direction: Direction) -> Self {
        Self {
            column: column.to_string(),
            value,
            direction,
        }
    }
}

/// Resolves a logical sort key against the backend's mapping and the reference entity.
///
/// Resolution order:
///
/// 1. The unique-identifier key maps onto the identifier column and always resolves.
/// 2. Keys in the backend's declared meta-orderable set read the entity's meta map and allocate
///    a join alias.
/// 3. All other keys go through the backend's column mapping and its explicit accessor.
///
/// Returns `None` when the key is unknown to the backend or the entity lacks a usable value,
/// the comparison gets dropped then. Unknown keys never end up as raw identifiers in SQL.
pub fn resolve_field<A: BackendAdapter>(
    adapter: &mut A,
    key: &str,
    entity: &ReferenceEntity,
    direction: Direction,
) -> Option<FieldComparison> {
    if key == adapter.id_order_key() {
        return Some(FieldComparison::new(
            adapter.id_column(),
            ComparableValue::Integer(entity.id),
            direction,
        ));
    }

    if let Some(spec) = adapter.meta_key_spec(key) {
        let raw = match entity.meta_value(key) {
            Some(raw) => raw,
            None => {
                debug!("Dropping comparison on '{}', no meta value on entity", key);
                return None;
            }
        };
        let value = ComparableValue::parse(raw, spec.kind)?;
        let column = adapter.meta_order_column(key)?;

        return Some(FieldComparison {
            column,
            value,
            direction,
        });
    }

    match adapter.column_spec(key) {
        Some(spec) => {
            let value = match (spec.get)(entity) {
                Some(value) => value,
                None => {
                    debug!("Dropping comparison on '{}', no value on entity", key);
                    return None;
                }
            };

            Some(FieldComparison::new(spec.column, value, direction))
        }
        None => {
            debug!("Skipping unknown order key '{}'", key);
            None
        }
    }
}
