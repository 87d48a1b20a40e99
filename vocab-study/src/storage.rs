use std::path::Path;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{query, query_as, FromRow, Pool, Sqlite, SqlitePool};
use study_api::{KeyValueStore, StoreError};
use tracing::trace;

#[derive(Debug, FromRow)]
pub struct Entry {
    pub name: String,
    pub value: String,
    pub updated_at: NaiveDateTime,
}

/// SQLite-backed session store. One row per key, last write wins.
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn initialize(path: &Path) -> sqlx::Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;
        sqlx::migrate!().run(&pool).await?;
        Ok(Self { pool })
    }
}

impl Storage {
    pub async fn entry(&self, key: &str) -> sqlx::Result<Option<Entry>> {
        query_as("SELECT name, value, updated_at FROM entries WHERE name = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn put(&self, key: &str, value: &str) -> sqlx::Result<()> {
        query(
            "
            INSERT INTO entries(name, value, updated_at) VALUES(?, ?, CURRENT_TIMESTAMP)
            ON CONFLICT(name) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP;
            ",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map(|_| ())
    }

    /// Returns true if a row was removed
    pub async fn delete(&self, key: &str) -> sqlx::Result<bool> {
        let result = query("DELETE FROM entries WHERE name = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn backend(error: sqlx::Error) -> StoreError {
    StoreError::Backend(Box::new(error))
}

#[async_trait]
impl KeyValueStore for Storage {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entry = self.entry(key).await.map_err(backend)?;
        Ok(entry.map(|entry| {
            trace!(key, updated_at = %entry.updated_at, "read session entry");
            entry.value
        }))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.put(key, &value).await.map_err(backend)
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.delete(key).await.map(|_| ()).map_err(backend)
    }
}
