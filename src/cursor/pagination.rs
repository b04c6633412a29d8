// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::cursor::controller::CursorKind;
use crate::cursor::errors::PaginationError;
use crate::cursor::token::Cursor;

const DEFAULT_PAGE_SIZE: u64 = 10;

const MAX_PAGE_SIZE: u64 = 100;

/// Connection pagination arguments as received from a GraphQL client.
///
/// Exactly one pagination direction at a time is valid: `first` / `after` paginate forwards,
/// `last` / `before` backwards.
#[derive(Debug, Clone)]
pub struct Pagination<C>
where
    C: Cursor,
{
    /// Number of items requested from the start of the result set.
    pub first: Option<u64>,

    /// Cursor to paginate forwards from.
    pub after: Option<C>,

    /// Number of items requested from the end of the result set.
    pub last: Option<u64>,

    /// Cursor to paginate backwards from.
    pub before: Option<C>,
}

impl<C> Pagination<C>
where
    C: Cursor,
{
    /// Returns forward pagination arguments.
    pub fn new(first: Option<u64>, after: Option<&C>) -> Self {
        Self {
            first,
            after: after.cloned(),
            last: None,
            before: None,
        }
    }

    /// Returns backward pagination arguments.
    pub fn new_backwards(last: Option<u64>, before: Option<&C>) -> Self {
        Self {
            first: None,
            after: None,
            last,
            before: before.cloned(),
        }
    }

    /// Validates the argument combination and the requested page size.
    pub fn validate(&self) -> Result<(), PaginationError> {
        if self.first.is_some() && self.last.is_some() {
            return Err(PaginationError::ConflictingArguments);
        }

        if let Some(size) = self.first.or(self.last) {
            if size == 0 || size > MAX_PAGE_SIZE {
                return Err(PaginationError::InvalidPageSize(size, MAX_PAGE_SIZE));
            }
        }

        Ok(())
    }

    /// Returns which edge of the current page the given cursor represents.
    pub fn cursor_kind(&self) -> CursorKind {
        if self.last.is_some() || self.before.is_some() {
            CursorKind::Before
        } else {
            CursorKind::After
        }
    }

    /// Returns the cursor matching the pagination direction, if one was given.
    pub fn cursor(&self) -> Option<&C> {
        match self.cursor_kind() {
            CursorKind::After => self.after.as_ref(),
            CursorKind::Before => self.before.as_ref(),
        }
    }

    /// Returns the effective page size.
    pub fn page_size(&self) -> u64 {
        self.first.or(self.last).unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Returns the `LIMIT` clause for the backing query.
    ///
    /// One extra row is fetched to determine the "has next page" flag. The size saturates so an
    /// unvalidated `u64::MAX` never overflows.
    pub fn limit_clause(&self) -> String {
        format!("LIMIT {}", self.page_size().saturating_add(1))
    }
}

impl<C> Default for Pagination<C>
where
    C: Cursor,
{
    fn default() -> Self {
        Self {
            first: None,
            after: None,
            last: None,
            before: None,
        }
    }
}
