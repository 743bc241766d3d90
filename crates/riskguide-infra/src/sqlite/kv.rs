//! SQLite session store implementation.
//!
//! Implements `SessionStore` from `riskguide-core` over the `session_store`
//! table. Values are stored verbatim as text.

use chrono::{DateTime, Utc};
use sqlx::Row;

use riskguide_core::storage::kv_store::SessionStore;
use riskguide_types::error::RepositoryError;
use riskguide_types::storage::StoreEntry;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `SessionStore`.
pub struct SqliteSessionStore {
    pool: DatabasePool,
}

impl SqliteSessionStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct EntryRow {
    key: String,
    value: String,
    created_at: String,
    updated_at: String,
}

impl EntryRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            key: row.try_get("key")?,
            value: row.try_get("value")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_entry(self) -> Result<StoreEntry, RepositoryError> {
        Ok(StoreEntry {
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
            key: self.key,
            value: self.value,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn query_err(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => RepositoryError::Connection,
        other => RepositoryError::Query(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// SessionStore implementation
// ---------------------------------------------------------------------------

impl SessionStore for SqliteSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let row = sqlx::query("SELECT value FROM session_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_err)?;

        row.map(|r| r.try_get::<String, _>("value"))
            .transpose()
            .map_err(query_err)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO session_store (key, value, created_at, updated_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#,
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(query_err)?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM session_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool.writer)
            .await
            .map_err(query_err)?;

        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>, RepositoryError> {
        let rows = sqlx::query("SELECT key FROM session_store ORDER BY key")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_err)?;

        rows.iter()
            .map(|r| r.try_get::<String, _>("key"))
            .collect::<Result<Vec<_>, _>>()
            .map_err(query_err)
    }

    async fn get_entry(&self, key: &str) -> Result<Option<StoreEntry>, RepositoryError> {
        let row = sqlx::query(
            "SELECT key, value, created_at, updated_at FROM session_store WHERE key = ?",
        )
        .bind(key)
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(query_err)?;

        match row {
            Some(row) => {
                let entry_row = EntryRow::from_row(&row).map_err(query_err)?;
                Ok(Some(entry_row.into_entry()?))
            }
            None => Ok(None),
        }
    }

    async fn clear(&self) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM session_store")
            .execute(&self.pool.writer)
            .await
            .map_err(query_err)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskguide_core::storage::cache::clear_derived;
    use riskguide_types::storage::StoreKey;
    use tempfile::TempDir;

    async fn test_store() -> (SqliteSessionStore, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::open(dir.path()).await.unwrap();
        (SqliteSessionStore::new(pool), dir)
    }

    #[tokio::test]
    async fn test_set_and_get_identical_string() {
        let (store, _dir) = test_store().await;
        let narrative = "## Moderate risk - 35%\n\nYou mentioned smoking.\n\n- ધૂમ્રપાન ટાળો";

        store.set("risk_assessment", narrative).await.unwrap();

        assert_eq!(
            store.get("risk_assessment").await.unwrap().as_deref(),
            Some(narrative)
        );
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let (store, _dir) = test_store().await;
        assert!(store.get("user_summary").await.unwrap().is_none());
        assert!(store.get_entry("user_summary").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_keeps_created_at() {
        let (store, _dir) = test_store().await;
        store.set("language", "en").await.unwrap();
        let first = store.get_entry("language").await.unwrap().unwrap();

        store.set("language", "gu").await.unwrap();
        let second = store.get_entry("language").await.unwrap().unwrap();

        assert_eq!(second.value, "gu");
        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at >= first.updated_at);
    }

    #[tokio::test]
    async fn test_list_keys_sorted() {
        let (store, _dir) = test_store().await;
        store.set("user_summary", "s").await.unwrap();
        store.set("language", "gu").await.unwrap();
        store.set("risk_assessment", "r").await.unwrap();

        let keys = store.list_keys().await.unwrap();
        assert_eq!(keys, vec!["language", "risk_assessment", "user_summary"]);
    }

    #[tokio::test]
    async fn test_delete_and_clear() {
        let (store, _dir) = test_store().await;
        store.set("language", "gu").await.unwrap();
        store.set("user_summary", "s").await.unwrap();

        store.delete("user_summary").await.unwrap();
        store.delete("does_not_exist").await.unwrap();
        assert_eq!(store.list_keys().await.unwrap(), vec!["language"]);

        store.clear().await.unwrap();
        assert!(store.list_keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_derived_keeps_locale() {
        let (store, _dir) = test_store().await;
        for key in StoreKey::ALL {
            store.set_key(key, "x").await.unwrap();
        }

        clear_derived(&store).await.unwrap();

        assert_eq!(store.list_keys().await.unwrap(), vec!["language"]);
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let pool = DatabasePool::open(dir.path()).await.unwrap();
            let store = SqliteSessionStore::new(pool.clone());
            store.set_key(StoreKey::UserSummary, "persisted").await.unwrap();
            pool.close().await;
        }

        let store = SqliteSessionStore::new(DatabasePool::open(dir.path()).await.unwrap());
        assert_eq!(
            store.get_key(StoreKey::UserSummary).await.unwrap().as_deref(),
            Some("persisted")
        );
    }
}
