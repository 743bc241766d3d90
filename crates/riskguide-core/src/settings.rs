//! Process-wide user settings.
//!
//! The locale is read once from the store and then passed explicitly to the
//! interview engine and the guidance resolver.

use tracing::{info, warn};

use riskguide_types::error::RepositoryError;
use riskguide_types::locale::Locale;
use riskguide_types::storage::StoreKey;

use crate::storage::kv_store::SessionStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    locale: Locale,
}

impl Settings {
    /// Load settings from the store. An absent or unrecognized locale is `en`.
    pub async fn load<S: SessionStore>(store: &S) -> Result<Self, RepositoryError> {
        let locale = match store.get_key(StoreKey::Language).await? {
            Some(code) => code.parse::<Locale>().unwrap_or_else(|e| {
                warn!(error = %e, "ignoring persisted locale");
                Locale::default()
            }),
            None => Locale::default(),
        };
        Ok(Self { locale })
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Persist a new locale. Cached artifacts are left as they are.
    pub async fn set_locale<S: SessionStore>(
        &mut self,
        store: &S,
        locale: Locale,
    ) -> Result<(), RepositoryError> {
        store.set_key(StoreKey::Language, locale.code()).await?;
        info!(from = %self.locale, to = %locale, "locale changed");
        self.locale = locale;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory_store::InMemorySessionStore;

    #[tokio::test]
    async fn test_defaults_to_english() {
        let store = InMemorySessionStore::new();
        let settings = Settings::load(&store).await.unwrap();
        assert_eq!(settings.locale(), Locale::En);
    }

    #[tokio::test]
    async fn test_unknown_code_falls_back() {
        let store = InMemorySessionStore::new();
        store.set("language", "fr").await.unwrap();
        assert_eq!(Settings::load(&store).await.unwrap().locale(), Locale::En);
    }

    #[tokio::test]
    async fn test_set_locale_persists() {
        let store = InMemorySessionStore::new();
        store.set_key(StoreKey::UserSummary, "english summary").await.unwrap();
        let mut settings = Settings::load(&store).await.unwrap();

        settings.set_locale(&store, Locale::Gu).await.unwrap();

        assert_eq!(settings.locale(), Locale::Gu);
        assert_eq!(store.get("language").await.unwrap().as_deref(), Some("gu"));
        assert_eq!(Settings::load(&store).await.unwrap().locale(), Locale::Gu);
        // Changing locale does not invalidate cached artifacts.
        assert!(store.get_key(StoreKey::UserSummary).await.unwrap().is_some());
    }
}
