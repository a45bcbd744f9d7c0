use sqlx::{query, query_as, SqlitePool};

use crate::db::models::SessionEntry;

/// Stores `value` under `key`, replacing any previous value
pub async fn put_session_value(
    pool: &SqlitePool,
    key: &str,
    value: &str,
) -> Result<(), sqlx::Error> {
    query(
        "INSERT INTO session_state (key, value, saved_at) VALUES (?, ?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, saved_at = excluded.saved_at",
    )
    .bind(key)
    .bind(value)
    .bind(chrono::Local::now().to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Retrieves the entry stored under `key`, if any
pub async fn get_session_entry(
    pool: &SqlitePool,
    key: &str,
) -> Result<Option<SessionEntry>, sqlx::Error> {
    query_as::<_, SessionEntry>("SELECT key, value, saved_at FROM session_state WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await
}

/// Removes every stored entry, returning how many were dropped
pub async fn clear_session(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
    let result = query("DELETE FROM session_state").execute(pool).await?;
    Ok(result.rows_affected())
}
