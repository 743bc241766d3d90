//! Read-only profile view over the persisted artifacts.

use riskguide_types::error::RepositoryError;
use riskguide_types::risk::RiskHeadline;
use riskguide_types::storage::StoreKey;

use crate::format::NarrativeFormatter;
use crate::storage::cache::read_present;
use crate::storage::kv_store::SessionStore;

pub const NO_SUMMARY: &str = "Sorry, no user summary available.";
pub const NO_GUIDANCE: &str = "Sorry, personalized guidance is not available.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileView {
    pub summary: Option<String>,
    pub guidance: Option<String>,
    pub risk: Option<RiskHeadline>,
}

impl ProfileView {
    /// Load whatever artifacts exist. Never generates anything.
    pub async fn load<S: SessionStore>(store: &S) -> Result<Self, RepositoryError> {
        let summary = read_present(store, StoreKey::UserSummary).await?;
        let guidance = read_present(store, StoreKey::PersonalizedGuidance).await?;
        let risk = read_present(store, StoreKey::RiskAssessment)
            .await?
            .and_then(|text| RiskHeadline::parse(&text));
        Ok(Self {
            summary,
            guidance,
            risk,
        })
    }

    pub fn summary_text(&self) -> &str {
        self.summary.as_deref().unwrap_or(NO_SUMMARY)
    }

    pub fn guidance_text(&self) -> &str {
        self.guidance.as_deref().unwrap_or(NO_GUIDANCE)
    }

    /// `(summary, guidance)` run through `formatter`, fallbacks included.
    pub fn render<F: NarrativeFormatter>(&self, formatter: &F) -> (String, String) {
        (
            formatter.format(self.summary_text()),
            formatter.format(self.guidance_text()),
        )
    }
}
