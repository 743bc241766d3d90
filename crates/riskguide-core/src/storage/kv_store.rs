//! Session store trait.
//!
//! Defines the interface for the flat, string-keyed durable store that holds
//! the locale and the derived artifacts. Implementations live in
//! riskguide-infra (SQLite) and in [`super::memory_store`].

use riskguide_types::error::RepositoryError;
use riskguide_types::storage::{StoreEntry, StoreKey};

/// Trait for string-keyed persistent storage.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait SessionStore: Send + Sync {
    /// Get a value by key. Returns None if the key does not exist.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, RepositoryError>> + Send;

    /// Set a value for a key (upsert).
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete a key. No-op if key does not exist.
    fn delete(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// List all keys, sorted.
    fn list_keys(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<String>, RepositoryError>> + Send;

    /// Get the full entry including timestamps.
    fn get_entry(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<StoreEntry>, RepositoryError>> + Send;

    /// Remove every persisted key (logout).
    ///
    /// Has no effect on in-memory interview state.
    fn clear(&self) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Typed form of [`SessionStore::get`] for the fixed keys.
    fn get_key(
        &self,
        key: StoreKey,
    ) -> impl std::future::Future<Output = Result<Option<String>, RepositoryError>> + Send {
        self.get(key.as_str())
    }

    /// Typed form of [`SessionStore::set`] for the fixed keys.
    fn set_key<'a>(
        &'a self,
        key: StoreKey,
        value: &'a str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send + 'a {
        self.set(key.as_str(), value)
    }
}
