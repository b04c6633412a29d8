// SPDX-License-Identifier: AGPL-3.0-or-later

//! Validation errors for "abstract" pagination arguments.
use thiserror::Error;

/// Validation errors for connection pagination arguments.
///
/// These are the only errors of the subsystem which reach the caller, they concern malformed
/// client input and not cursor resolution. Resolution failures always degrade to an unfiltered
/// result instead.
#[derive(Error, Debug, Clone, Copy)]
pub enum PaginationError {
    /// `first` and `last` exclude each other.
    #[error("Can't paginate with both 'first' and 'last' arguments")]
    ConflictingArguments,

    /// Requested page size is zero or exceeds the maximum.
    #[error("Invalid page size {0}, needs to be between 1 and {1}")]
    InvalidPageSize(u64, u64),
}
