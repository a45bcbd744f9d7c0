//! Session-scoped storage of the per-district aggregates.

use std::collections::HashMap;
use std::path::Path;

use sqlx::SqlitePool;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::db::{create_session_pool, queries};
use crate::domain::{AggregateMap, DistrictAggregate};

/// Key the aggregate map is stored under.
pub const SESSION_KEY: &str = "livingData";

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to serialize session state: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Session store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("Session store unavailable: {0}")]
    Unavailable(String),
}

/// Key-value storage that lives for one session.
#[allow(async_fn_in_trait)]
pub trait SessionStore {
    async fn save(&self, key: &str, value: &str) -> Result<(), CacheError>;
    async fn load(&self, key: &str) -> Result<Option<String>, CacheError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    async fn save(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }
}

/// SQLite-backed store. Opening it starts a fresh session.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn open(path: Option<&Path>) -> Result<Self, CacheError> {
        let pool = create_session_pool(path).await?;
        let dropped = queries::clear_session(&pool).await?;
        if dropped > 0 {
            debug!(entries = dropped, "Discarded state from a previous session");
        }
        Ok(Self { pool })
    }

    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl SessionStore for SqliteStore {
    async fn save(&self, key: &str, value: &str) -> Result<(), CacheError> {
        queries::put_session_value(&self.pool, key, value).await?;
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Option<String>, CacheError> {
        let entry = queries::get_session_entry(&self.pool, key).await?;
        Ok(entry.map(|entry| entry.value))
    }
}

/// Serializes the aggregate map into a [`SessionStore`] and reads it back.
#[derive(Debug)]
pub struct SessionCache<S> {
    store: S,
}

impl<S: SessionStore> SessionCache<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Overwrites the stored map. Storage errors are returned as they are.
    pub async fn save(&self, districts: &AggregateMap) -> Result<(), CacheError> {
        let blob = serde_json::to_string(districts)?;
        self.store.save(SESSION_KEY, &blob).await?;
        debug!(districts = districts.len(), bytes = blob.len(), "Saved session state");
        Ok(())
    }

    /// Reads the stored map; `None` if nothing was saved or it can't be read.
    pub async fn load(&self) -> Option<AggregateMap> {
        let blob = match self.store.load(SESSION_KEY).await {
            Ok(Some(blob)) => blob,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "Failed to read session state");
                return None;
            }
        };

        match serde_json::from_str(&blob) {
            Ok(districts) => Some(districts),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable session state");
                None
            }
        }
    }

    /// Looks up one district in the stored map.
    pub async fn district(&self, key: &str) -> Option<DistrictAggregate> {
        self.load().await?.get(key).copied()
    }
}
