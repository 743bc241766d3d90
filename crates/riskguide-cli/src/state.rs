//! Application state wiring the store, settings, and completion client.
//!
//! The store is either the SQLite file in the data directory or, with
//! `--ephemeral`, an in-memory map that disappears on exit. `AppStore` pins
//! both behind one concrete `SessionStore` so the engine and resolver need
//! only one instantiation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use riskguide_core::llm::box_provider::BoxCompletionClient;
use riskguide_core::llm::provider::CompletionClient;
use riskguide_core::settings::Settings;
use riskguide_core::storage::kv_store::SessionStore;
use riskguide_core::storage::memory_store::InMemorySessionStore;
use riskguide_infra::config::resolve_api_key;
use riskguide_infra::llm::create_client;
use riskguide_infra::sqlite::kv::SqliteSessionStore;
use riskguide_infra::sqlite::pool::DatabasePool;
use riskguide_types::config::GlobalConfig;
use riskguide_types::error::{ConfigError, RepositoryError};
use riskguide_types::llm::{CompletionError, CompletionRequest, CompletionResponse};
use riskguide_types::storage::StoreEntry;

pub enum AppStore {
    Sqlite(SqliteSessionStore),
    Memory(InMemorySessionStore),
}

impl SessionStore for AppStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        match self {
            AppStore::Sqlite(s) => s.get(key).await,
            AppStore::Memory(m) => m.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        match self {
            AppStore::Sqlite(s) => s.set(key, value).await,
            AppStore::Memory(m) => m.set(key, value).await,
        }
    }

    async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        match self {
            AppStore::Sqlite(s) => s.delete(key).await,
            AppStore::Memory(m) => m.delete(key).await,
        }
    }

    async fn list_keys(&self) -> Result<Vec<String>, RepositoryError> {
        match self {
            AppStore::Sqlite(s) => s.list_keys().await,
            AppStore::Memory(m) => m.list_keys().await,
        }
    }

    async fn get_entry(&self, key: &str) -> Result<Option<StoreEntry>, RepositoryError> {
        match self {
            AppStore::Sqlite(s) => s.get_entry(key).await,
            AppStore::Memory(m) => m.get_entry(key).await,
        }
    }

    async fn clear(&self) -> Result<(), RepositoryError> {
        match self {
            AppStore::Sqlite(s) => s.clear().await,
            AppStore::Memory(m) => m.clear().await,
        }
    }
}

/// Stand-in client used when no API key is configured.
///
/// Lets cached guidance be shown offline; any real call fails with a
/// transport error naming the missing variable.
struct MissingKeyClient {
    env_var: String,
    model: String,
}

impl CompletionClient for MissingKeyClient {
    fn name(&self) -> &str {
        "unconfigured"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        _request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        Err(CompletionError::Transport(format!(
            "no API key: set the {} environment variable",
            self.env_var
        )))
    }
}

/// Shared application state for every command.
pub struct AppState {
    pub store: Arc<AppStore>,
    pub settings: Settings,
    pub config: GlobalConfig,
    pub data_dir: PathBuf,
    pub ephemeral: bool,
    db_pool: Option<DatabasePool>,
}

impl AppState {
    /// Open the store and load settings.
    pub async fn init(data_dir: PathBuf, config: GlobalConfig, ephemeral: bool) -> anyhow::Result<Self> {
        let (store, db_pool) = if ephemeral {
            tracing::debug!("using in-memory session store");
            (AppStore::Memory(InMemorySessionStore::new()), None)
        } else {
            let pool = DatabasePool::open(&data_dir)
                .await
                .with_context(|| format!("Failed to open database in {}", data_dir.display()))?;
            (AppStore::Sqlite(SqliteSessionStore::new(pool.clone())), Some(pool))
        };

        let settings = Settings::load(&store)
            .await
            .context("Failed to load settings")?;

        Ok(Self {
            store: Arc::new(store),
            settings,
            config,
            data_dir,
            ephemeral,
            db_pool,
        })
    }

    /// Whether an API key is available for the configured provider.
    pub fn has_api_key(&self) -> bool {
        resolve_api_key(&self.config.provider).is_some()
    }

    /// A client that can reach the completion service, or an error naming
    /// the missing key.
    pub fn require_client(&self) -> Result<Arc<BoxCompletionClient>, ConfigError> {
        let key = resolve_api_key(&self.config.provider);
        create_client(&self.config.provider, key).map(Arc::new)
    }

    /// Like [`Self::require_client`], but falls back to a client that fails
    /// on use, for flows that may be served from cache.
    pub fn client_or_offline(&self) -> Result<Arc<BoxCompletionClient>, ConfigError> {
        match self.require_client() {
            Err(ConfigError::MissingApiKey(env_var)) => {
                Ok(Arc::new(BoxCompletionClient::new(MissingKeyClient {
                    env_var,
                    model: self.config.provider.model.clone(),
                })))
            }
            other => other,
        }
    }

    pub async fn close(&self) {
        if let Some(pool) = &self.db_pool {
            pool.close().await;
        }
    }
}
