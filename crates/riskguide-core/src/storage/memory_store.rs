//! In-process session store.
//!
//! A `DashMap`-backed [`SessionStore`] with the same semantics as the SQLite
//! store. Used by tests and by the CLI's `--ephemeral` mode, where nothing
//! should outlive the process.

use chrono::Utc;
use dashmap::DashMap;

use riskguide_types::error::RepositoryError;
use riskguide_types::storage::StoreEntry;

use super::kv_store::SessionStore;

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: DashMap<String, StoreEntry>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        Ok(self.entries.get(key).map(|e| e.value.clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        let now = Utc::now();
        self.entries
            .entry(key.to_string())
            .and_modify(|e| {
                e.value = value.to_string();
                e.updated_at = now;
            })
            .or_insert_with(|| StoreEntry {
                key: key.to_string(),
                value: value.to_string(),
                created_at: now,
                updated_at: now,
            });
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        self.entries.remove(key);
        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>, RepositoryError> {
        let mut keys: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        Ok(keys)
    }

    async fn get_entry(&self, key: &str) -> Result<Option<StoreEntry>, RepositoryError> {
        Ok(self.entries.get(key).map(|e| e.value().clone()))
    }

    async fn clear(&self) -> Result<(), RepositoryError> {
        self.entries.clear();
        Ok(())
    }
}
