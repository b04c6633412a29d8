// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::cursor::field::FieldComparison;

/// Accumulates field comparisons and compiles them into one composite keyset predicate.
///
/// Comparisons are added in tie-break precedence order, the stabilizing unique-identifier
/// comparison last. Compilation produces the standard keyset pagination shape:
///
/// ```text
/// (k1 > v1) OR (k1 = v1 AND k2 > v2) OR (k1 = v1 AND k2 = v2 AND k3 > v3) ...
/// ```
///
/// with the strict inequality operator flipped per comparison direction. Every disjunct ends in
/// a strict inequality, the trailing comparison is expected to be on a unique column.
#[derive(Debug, Clone, Default)]
pub struct PredicateBuilder {
    fields: Vec<FieldComparison>,
}

impl PredicateBuilder {
    /// Returns a new, empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one comparison with lower tie-break precedence than all previous ones.
    pub fn add_field(&mut self, comparison: FieldComparison) {
        self.fields.push(comparison);
    }

    /// Returns true when at least one comparison was added.
    pub fn has_fields(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Returns the number of accumulated comparisons.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Compiles the accumulated comparisons into one boolean SQL expression.
    ///
    /// Returns `None` when no comparison was added, the caller applies no filter then.
    pub fn compile(&self) -> Option<String> {
        if self.fields.is_empty() {
            return None;
        }

        let groups: Vec<String> = self
            .fields
            .iter()
            .enumerate()
            .map(|(index, comparison)| {
                let mut clauses: Vec<String> = self.fields[..index]
                    .iter()
                    .map(|prior| format!("{} = {}", prior.column, prior.value.sql_literal()))
                    .collect();

                clauses.push(format!(
                    "{} {} {}",
                    comparison.column,
                    comparison.direction.as_operator(),
                    comparison.value.sql_literal()
                ));

                clauses.join(" AND ")
            })
            .collect();

        if groups.len() == 1 {
            Some(groups.into_iter().next().unwrap())
        } else {
            Some(
                groups
                    .into_iter()
                    .map(|group| format!("({})", group))
                    .collect::<Vec<String>>()
                    .join(" OR "),
            )
        }
    }
}
