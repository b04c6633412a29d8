// SPDX-License-Identifier: AGPL-3.0-or-later

//! Database access supporting both Postgres and SQLite through the `sqlx` "any" driver.
//!
//! The cursor subsystem borrows a pool connection for exactly one reference-entity lookup per
//! request, everything else it emits are query fragments for the caller's own store query.
use anyhow::{Error, Result};
use sqlx::any::{AnyPool, AnyPoolOptions};

pub mod errors;
pub mod models;
pub mod stores;
#[cfg(test)]
pub mod test_utils;

/// Re-export of generic connection pool type.
pub type Pool = AnyPool;

/// Create a database agnostic connection pool.
pub async fn connection_pool(url: &str, max_connections: u32) -> Result<Pool, Error> {
    let pool: Pool = AnyPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await?;

    Ok(pool)
}
