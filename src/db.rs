//! SQLite pool setup and boot-time schema.
//!
//! Responsibility:
//! - Build the `SqlitePool` from `DATABASE_URL`, creating the database file
//!   (and its parent directory) when missing.
//! - Size the pool from the thread settings in `Config`.
//! - Create the `posts` table if it does not exist yet.

use std::path::PathBuf;
use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use crate::config::Config;

pub async fn connect(config: &Config) -> anyhow::Result<SqlitePool> {
    connect_with(
        &config.database_url,
        config.db_min_connections,
        config.db_max_connections,
    )
    .await
}

pub async fn connect_with(
    database_url: &str,
    min_connections: u32,
    max_connections: u32,
) -> anyhow::Result<SqlitePool> {
    if let Some(parent) = database_path(database_url).and_then(|p| p.parent().map(PathBuf::from))
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(&parent)?;
    }

    tracing::info!(database_url, "initializing sqlite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .min_connections(min_connections)
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Idempotent; safe to run on every boot.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("creating posts table if not exists");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS posts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title VARCHAR NOT NULL,
            content TEXT NOT NULL,
            created_at DATETIME NOT NULL,
            updated_at DATETIME NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// File path behind a `sqlite:` URL, or `None` for in-memory databases.
fn database_path(database_url: &str) -> Option<PathBuf> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();

    if path.is_empty() || path == ":memory:" {
        None
    } else {
        Some(PathBuf::from(path))
    }
}
