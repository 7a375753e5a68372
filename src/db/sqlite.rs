use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

use crate::error::AppResult;

/// Creates a SQLite connection pool
///
/// The database file is created on first run. The pool automatically manages
/// connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Creates the application tables if they do not exist yet.
///
/// Composite primary keys carry the semantics the stores rely on:
/// `session_votes` upserts on (session, user, title), and a repeated
/// `session_shown` insert is a no-op rather than a duplicate row.
pub async fn init_schema(pool: &SqlitePool) -> AppResult<()> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS pair_sessions (
            session_id TEXT PRIMARY KEY,
            user_a TEXT NOT NULL,
            user_b TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS session_genres (
            session_id TEXT NOT NULL,
            user_id TEXT NOT NULL,
            genre TEXT NOT NULL,
            PRIMARY KEY (session_id, user_id, genre)
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS session_votes (
            session_id TEXT NOT NULL,
            user_id TEXT NOT NULL,
            title_id INTEGER NOT NULL,
            liked INTEGER NOT NULL,
            PRIMARY KEY (session_id, user_id, title_id)
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS session_shown (
            session_id TEXT NOT NULL,
            title_id INTEGER NOT NULL,
            PRIMARY KEY (session_id, title_id)
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS user_collections (
            user_id TEXT NOT NULL,
            title_id INTEGER NOT NULL,
            PRIMARY KEY (user_id, title_id)
        )
        "#,
    ];

    for statement in statements {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}
