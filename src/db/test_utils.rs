// SPDX-License-Identifier: AGPL-3.0-or-later

//! Helpers to run store tests against an in-memory SQLite database.
use sqlx::{query, query_as};

use crate::cursor::CompiledCursor;
use crate::db::{connection_pool, Pool};

/// Create a connection pool onto a fresh in-memory database with both storage schemas.
///
/// The pool is limited to one connection since every connection would get its own in-memory
/// database otherwise.
pub async fn initialize_db() -> Pool {
    let pool = connection_pool("sqlite::memory:", 1)
        .await
        .expect("Could not connect to in-memory database");

    let statements = [
        "CREATE TABLE wp_posts (
            ID INTEGER PRIMARY KEY,
            post_title TEXT,
            post_name TEXT,
            post_status TEXT,
            post_date_gmt TEXT,
            post_modified_gmt TEXT,
            menu_order INTEGER
        )",
        "CREATE TABLE wp_postmeta (
            meta_id INTEGER PRIMARY KEY AUTOINCREMENT,
            post_id INTEGER NOT NULL,
            meta_key TEXT,
            meta_value TEXT
        )",
        "CREATE TABLE wc_orders (
            id INTEGER PRIMARY KEY,
            status TEXT,
            date_created_gmt TEXT,
            date_updated_gmt TEXT,
            customer_id INTEGER,
            billing_email TEXT,
            total_amount REAL
        )",
        "CREATE TABLE wc_orders_meta (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            order_id INTEGER NOT NULL,
            meta_key TEXT,
            meta_value TEXT
        )",
    ];

    for statement in &statements {
        query(statement)
            .execute(&pool)
            .await
            .expect("Could not create test schema");
    }

    pool
}

/// Insert a product row plus its meta values.
pub async fn insert_product(pool: &Pool, id: i64, date: &str, title: &str, meta: &[(&str, &str)]) {
    query(
        "INSERT INTO wp_posts
            ( ID, post_title, post_name, post_status, post_date_gmt, post_modified_gmt, menu_order )
        VALUES
            ( $1, $2, $3, 'publish', $4, $4, 0 )",
    )
    .bind(id)
    .bind(title)
    .bind(title.to_lowercase())
    .bind(date)
    .execute(pool)
    .await
    .expect("Could not insert product row");

    for (meta_key, meta_value) in meta {
        query("INSERT INTO wp_postmeta ( post_id, meta_key, meta_value ) VALUES ( $1, $2, $3 )")
            .bind(id)
            .bind(*meta_key)
            .bind(*meta_value)
            .execute(pool)
            .await
            .expect("Could not insert product meta row");
    }
}

/// Insert an order row.
pub async fn insert_order(pool: &Pool, id: i64, date: &str, status: &str, total: f64) {
    query(
        "INSERT INTO wc_orders
            ( id, status, date_created_gmt, date_updated_gmt, customer_id, billing_email, total_amount )
        VALUES
            ( $1, $2, $3, $3, 1, 'customer@example.com', $4 )",
    )
    .bind(id)
    .bind(status)
    .bind(date)
    .bind(total)
    .execute(pool)
    .await
    .expect("Could not insert order row");
}

/// Fetch one page of product identifiers using a compiled cursor.
pub async fn fetch_product_page(pool: &Pool, compiled: &CompiledCursor, limit: u64) -> Vec<i64> {
    fetch_page(pool, "wp_posts.ID", "wp_posts", compiled, limit).await
}

/// Fetch one page of order identifiers using a compiled cursor.
pub async fn fetch_order_page(pool: &Pool, compiled: &CompiledCursor, limit: u64) -> Vec<i64> {
    fetch_page(pool, "wc_orders.id", "wc_orders", compiled, limit).await
}

// Splice the compiled fragments into a backing query the way a connection resolver would
async fn fetch_page(
    pool: &Pool,
    id_column: &str,
    table: &str,
    compiled: &CompiledCursor,
    limit: u64,
) -> Vec<i64> {
    let sql = format!(
        "SELECT {id_column} AS id FROM {table}{joins} WHERE 1 = 1{predicate} {order_by} LIMIT {limit}",
        id_column = id_column,
        table = table,
        joins = compiled.meta_joins,
        predicate = compiled.predicate,
        order_by = compiled.order_by,
        limit = limit,
    );

    let rows: Vec<(i64,)> = query_as(&sql)
        .fetch_all(pool)
        .await
        .expect("Could not fetch page");

    rows.into_iter().map(|row| row.0).collect()
}
