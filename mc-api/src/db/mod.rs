//! Database access layer for mc-api
//!
//! The HTTP service only reads; its pool is opened with `query_only` so a
//! stray write fails at the SQLite level.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;

use mc_common::db::BUSY_TIMEOUT;

mod rooms;
pub use rooms::{count_rooms, find_room_by_code, list_rooms};

/// Connect to an existing database in query-only mode
pub async fn connect_readonly(db_path: &Path) -> Result<SqlitePool> {
    if !db_path.exists() {
        anyhow::bail!("Database not found: {}", db_path.display());
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(false)
        .busy_timeout(BUSY_TIMEOUT)
        .pragma("query_only", "ON");

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await
        .context("Failed to connect to database in query-only mode")?;

    Ok(pool)
}
