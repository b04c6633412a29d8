// SPDX-License-Identifier: AGPL-3.0-or-later

use std::convert::TryFrom;
use std::slice::Iter;

use anyhow::bail;

/// Options to determine the direction of the ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Arrange items from smallest to largest value.
    Ascending,

    /// Arrange items from largest to smallest value.
    Descending,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn flip(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }

    /// Returns the SQL keyword for this direction.
    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Ascending => "ASC",
            Direction::Descending => "DESC",
        }
    }

    /// Returns the strict comparison operator selecting rows _past_ a boundary value when
    /// scanning in this direction.
    pub fn as_operator(self) -> &'static str {
        match self {
            Direction::Ascending => ">",
            Direction::Descending => "<",
        }
    }
}

impl TryFrom<&str> for Direction {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_uppercase().as_str() {
            "ASC" => Ok(Direction::Ascending),
            "DESC" => Ok(Direction::Descending),
            _ => bail!("Unknown order direction '{}'", value),
        }
    }
}

/// One entry of an "order by" specification: a logical sort key and a direction.
///
/// Logical keys are resolved against a backend adapter's column mapping or declared
/// meta-orderable key set, they never name physical columns directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    /// Logical sort key.
    pub key: String,

    /// Direction the results are sorted in for this key.
    pub direction: Direction,
}

impl Ordering {
    /// Returns a new ordering entry.
    pub fn new(key: &str, direction: Direction) -> Self {
        Self {
            key: key.to_string(),
            direction,
        }
    }
}

/// Ordered sequence of sort keys, insertion order defines the tie-break precedence.
///
/// Clients usually derive this from the `orderby` argument of a GraphQL connection. An empty
/// specification is valid, defaulting takes place during normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderSpec(Vec<Ordering>);

impl OrderSpec {
    /// Returns a new, empty order specification.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns a specification with a single sort key, sorted descending.
    ///
    /// This mirrors the behaviour of order arguments given as one plain string, which are
    /// descending by default.
    pub fn single(key: &str) -> Self {
        Self(vec![Ordering::new(key, Direction::Descending)])
    }

    /// Adds another sort key with lower tie-break precedence than all previous ones.
    pub fn field(mut self, key: &str, direction: Direction) -> Self {
        self.0.push(Ordering::new(key, direction));
        self
    }

    /// Returns the total number of sort keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when no sort key was given.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over all sort keys.
    pub fn iter(&self) -> Iter<Ordering> {
        self.0.iter()
    }

    /// Normalizes the specification into the final sort key sequence used for predicate and
    /// `ORDER BY` generation.
    ///
    /// Guarantees a total order over the result set:
    ///
    /// * When no sort key was given at all, a single comparison on the creation timestamp key is
    ///   injected (descending, newest first).
    /// * The stabilizing unique-identifier key is always appended last, regardless of caller
    ///   input. A caller-supplied identifier entry is removed from its original position and its
    ///   direction is kept for the appended one.
    pub fn normalized(&self, default_key: &str, id_key: &str) -> Vec<Ordering> {
        let mut orderings: Vec<Ordering> = Vec::new();
        let mut id_direction = None;

        for ordering in &self.0 {
            if ordering.key == id_key {
                id_direction = Some(ordering.direction);
            } else {
                orderings.push(ordering.clone());
            }
        }

        if orderings.is_empty() && id_direction.is_none() {
            orderings.push(Ordering::new(default_key, Direction::Descending));
        }

        // The stabilizing key follows the direction of the primary sort key unless the caller
        // pinned it explicitly
        let direction = id_direction.unwrap_or_else(|| {
            orderings
                .first()
                .map(|ordering| ordering.direction)
                .unwrap_or(Direction::Descending)
        });
        orderings.push(Ordering::new(id_key, direction));

        orderings
    }
}

#[cfg(test)]
mod tests {
    use std::convert::TryInto;

    use rstest::rstest;

    use super::{Direction, OrderSpec, Ordering};

    #[test]
    fn direction_from_str() {
        let direction: Direction = "ASC".try_into().unwrap();
        assert_eq!(direction, Direction::Ascending);

        let direction: Direction = "desc".try_into().unwrap();
        assert_eq!(direction, Direction::Descending);

        let result: Result<Direction, _> = "sideways".try_into();
        assert!(result.is_err());
    }

    #[test]
    fn default_specification() {
        // Without any sort key the results get ordered by creation date, newest first, stabilized
        // by the row identifier
        let spec = OrderSpec::default();

        assert_eq!(
            spec.normalized("date", "id"),
            vec![
                Ordering::new("date", Direction::Descending),
                Ordering::new("id", Direction::Descending),
            ]
        );
    }

    #[rstest]
    #[case::single_string_key(
        OrderSpec::single("title"),
        vec![
            Ordering::new("title", Direction::Descending),
            Ordering::new("id", Direction::Descending),
        ]
    )]
    #[case::multi_key(
        OrderSpec::new()
            .field("status", Direction::Ascending)
            .field("date", Direction::Descending),
        vec![
            Ordering::new("status", Direction::Ascending),
            Ordering::new("date", Direction::Descending),
            Ordering::new("id", Direction::Ascending),
        ]
    )]
    #[case::id_entry_moved_last(
        OrderSpec::new()
            .field("id", Direction::Ascending)
            .field("date", Direction::Descending),
        vec![
            Ordering::new("date", Direction::Descending),
            Ordering::new("id", Direction::Ascending),
        ]
    )]
    #[case::id_only(
        OrderSpec::new().field("id", Direction::Ascending),
        vec![Ordering::new("id", Direction::Ascending)]
    )]
    fn normalization(#[case] spec: OrderSpec, #[case] expected: Vec<Ordering>) {
        assert_eq!(spec.normalized("date", "id"), expected);
    }

    #[test]
    fn stabilizing_key_is_always_last() {
        let spec = OrderSpec::new()
            .field("title", Direction::Ascending)
            .field("id", Direction::Descending)
            .field("date", Direction::Ascending);

        let normalized = spec.normalized("date", "id");
        assert_eq!(normalized.last().unwrap().key, "id");
        assert_eq!(normalized.last().unwrap().direction, Direction::Descending);
        assert_eq!(normalized.len(), 3);
    }
}
