use std::path::Path;
use std::str::FromStr;

use sqlx::{
    query,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use tracing::debug;

/// Creates the session table if it doesn't exist
pub async fn setup_database(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    query(
        "CREATE TABLE IF NOT EXISTS session_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            saved_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Opens the session database, in memory unless `path` is given.
///
/// The pool holds a single connection that is never recycled: an in-memory
/// SQLite database lives exactly as long as its connection.
pub async fn create_session_pool(path: Option<&Path>) -> Result<SqlitePool, sqlx::Error> {
    let options = match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            debug!(path = %path.display(), "Opening session database");
            SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
        }
        None => {
            debug!("Opening in-memory session database");
            SqliteConnectOptions::from_str("sqlite::memory:")?
        }
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .after_connect(|conn, _| {
            Box::pin(async move {
                use sqlx::Executor as _;
                conn.execute("PRAGMA synchronous = NORMAL;").await?;
                Ok(())
            })
        })
        .connect_with(options)
        .await?;

    setup_database(&pool).await?;
    Ok(pool)
}
