//! Read-if-present / else-generate policy for derived artifacts.
//!
//! Before invoking the completion service for an artifact, the store is
//! checked; a present value is used as-is and generation is skipped. A
//! freshly generated value is persisted immediately. When generation fails
//! nothing is written and the artifact stays absent.

use std::future::Future;

use tracing::debug;

use riskguide_types::error::RepositoryError;
use riskguide_types::storage::StoreKey;

use super::kv_store::SessionStore;

/// An artifact value and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Cached(String),
    Generated(String),
}

impl Resolved {
    pub fn value(&self) -> &str {
        match self {
            Resolved::Cached(v) | Resolved::Generated(v) => v,
        }
    }

    pub fn into_value(self) -> String {
        match self {
            Resolved::Cached(v) | Resolved::Generated(v) => v,
        }
    }

    pub fn was_cached(&self) -> bool {
        matches!(self, Resolved::Cached(_))
    }
}

/// Read a persisted, non-empty value for `key`.
///
/// An empty string counts as absent.
pub async fn read_present<S: SessionStore>(
    store: &S,
    key: StoreKey,
) -> Result<Option<String>, RepositoryError> {
    Ok(store.get_key(key).await?.filter(|v| !v.is_empty()))
}

/// Return the cached artifact for `key`, or run `generate` and persist its output.
pub async fn read_or_generate<S, F, Fut, E>(
    store: &S,
    key: StoreKey,
    generate: F,
) -> Result<Resolved, E>
where
    S: SessionStore,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<String, E>>,
    E: From<RepositoryError>,
{
    if let Some(cached) = read_present(store, key).await? {
        debug!(%key, "using cached artifact");
        return Ok(Resolved::Cached(cached));
    }

    let generated = generate().await?;
    store.set_key(key, &generated).await?;
    debug!(%key, chars = generated.len(), "persisted generated artifact");
    Ok(Resolved::Generated(generated))
}

/// Delete every derived artifact, keeping the locale.
///
/// The next interview or guidance request regenerates them.
pub async fn clear_derived<S: SessionStore>(store: &S) -> Result<(), RepositoryError> {
    for key in StoreKey::DERIVED {
        store.delete(key.as_str()).await?;
    }
    debug!("cleared derived artifacts");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory_store::InMemorySessionStore;
    use riskguide_types::llm::CompletionError;

    #[derive(Debug)]
    enum TestError {
        Storage,
        Completion(CompletionError),
    }

    impl From<RepositoryError> for TestError {
        fn from(_: RepositoryError) -> Self {
            TestError::Storage
        }
    }

    #[tokio::test]
    async fn test_present_value_skips_generation() {
        let store = InMemorySessionStore::new();
        store.set_key(StoreKey::UserSummary, "cached").await.unwrap();

        let mut generated = false;
        let resolved = read_or_generate(&store, StoreKey::UserSummary, || {
            generated = true;
            async { Ok::<_, TestError>(String::new()) }
        })
        .await
        .unwrap();

        assert!(!generated);
        assert_eq!(resolved, Resolved::Cached("cached".to_string()));
        assert!(resolved.was_cached());
    }

    #[tokio::test]
    async fn test_absent_value_is_generated_and_persisted() {
        let store = InMemorySessionStore::new();

        let resolved = read_or_generate(&store, StoreKey::UserSummary, || async {
            Ok::<_, TestError>("fresh".to_string())
        })
        .await
        .unwrap();

        assert_eq!(resolved.value(), "fresh");
        assert!(!resolved.was_cached());
        assert_eq!(
            store.get_key(StoreKey::UserSummary).await.unwrap().as_deref(),
            Some("fresh")
        );
    }

    #[tokio::test]
    async fn test_failed_generation_writes_nothing() {
        let store = InMemorySessionStore::new();

        let result = read_or_generate(&store, StoreKey::UserSummary, || async {
            Err::<String, _>(TestError::Completion(CompletionError::Transport(
                "offline".to_string(),
            )))
        })
        .await;

        assert!(matches!(result, Err(TestError::Completion(_))));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_empty_value_counts_as_absent() {
        let store = InMemorySessionStore::new();
        store.set_key(StoreKey::UserSummary, "").await.unwrap();

        assert!(read_present(&store, StoreKey::UserSummary).await.unwrap().is_none());

        let resolved = read_or_generate(&store, StoreKey::UserSummary, || async {
            Ok::<_, TestError>("regenerated".to_string())
        })
        .await
        .unwrap();
        assert_eq!(resolved, Resolved::Generated("regenerated".to_string()));
    }

    #[tokio::test]
    async fn test_clear_derived_keeps_language() {
        let store = InMemorySessionStore::new();
        store.set_key(StoreKey::Language, "gu").await.unwrap();
        for key in StoreKey::DERIVED {
            store.set_key(key, "cached").await.unwrap();
        }

        clear_derived(&store).await.unwrap();

        assert_eq!(store.list_keys().await.unwrap(), vec!["language"]);
    }
}
