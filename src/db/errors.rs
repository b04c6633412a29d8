// SPDX-License-Identifier: AGPL-3.0-or-later

//! Errors of the storage layer.

/// `EntityStore` errors.
///
/// The cursor controller swallows these into the "no predicate" degrade path, retry policy
/// belongs to the store layer.
#[derive(thiserror::Error, Debug)]
pub enum EntityStorageError {
    /// Catch all error which implementers can use for passing their own errors up the chain.
    #[error("Error occurred in entity store: {0}")]
    Custom(String),

    /// Critical database error, for example a broken connection.
    #[error("Fatal database error: {0}")]
    FatalStorageError(String),
}
