//! Personalized guidance resolution.
//!
//! Guidance is generated at most once: a persisted narrative is returned
//! without touching the completion service. Generation needs the risk
//! assessment and serialized answers that finalization persists; when either
//! is missing the caller is told to send the user back to the interview.

use std::sync::Arc;

use tracing::{debug, info};

use riskguide_types::error::GuidanceError;
use riskguide_types::llm::PromptKind;
use riskguide_types::locale::Locale;
use riskguide_types::storage::StoreKey;

use crate::format::NarrativeFormatter;
use crate::llm::box_provider::BoxCompletionClient;
use crate::prompt::build_guidance_prompt;
use crate::storage::cache::{read_or_generate, read_present};
use crate::storage::kv_store::SessionStore;

/// A guidance narrative ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGuidance {
    /// The narrative exactly as generated (and persisted).
    pub markdown: String,
    /// The narrative after the resolver's formatter ran over it.
    pub formatted: String,
    pub from_cache: bool,
}

pub struct GuidanceResolver<S: SessionStore, F: NarrativeFormatter> {
    client: Arc<BoxCompletionClient>,
    store: Arc<S>,
    formatter: F,
}

impl<S: SessionStore, F: NarrativeFormatter> GuidanceResolver<S, F> {
    pub fn new(client: Arc<BoxCompletionClient>, store: Arc<S>, formatter: F) -> Self {
        Self {
            client,
            store,
            formatter,
        }
    }

    /// Return the cached guidance, or generate, persist, and return it.
    pub async fn resolve(&self, locale: Locale) -> Result<ResolvedGuidance, GuidanceError> {
        let store = self.store.as_ref();
        let client = self.client.as_ref();

        let resolved = read_or_generate(store, StoreKey::PersonalizedGuidance, move || async move {
            let risk = require(store, StoreKey::RiskAssessment).await?;
            let answers = require(store, StoreKey::UserAnswers).await?;
            info!(%locale, "generating personalized guidance");
            let prompt = build_guidance_prompt(&risk, &answers, locale);
            Ok::<_, GuidanceError>(client.complete_text(PromptKind::Guidance, prompt).await?)
        })
        .await?;

        let from_cache = resolved.was_cached();
        let markdown = resolved.into_value();
        debug!(from_cache, chars = markdown.len(), "guidance resolved");
        Ok(ResolvedGuidance {
            formatted: self.formatter.format(&markdown),
            markdown,
            from_cache,
        })
    }
}

async fn require<S: SessionStore>(store: &S, key: StoreKey) -> Result<String, GuidanceError> {
    read_present(store, key)
        .await?
        .ok_or(GuidanceError::PreconditionMissing { missing: key })
}
