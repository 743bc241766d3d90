//! Storage types for riskguide.
//!
//! The durable store is a flat string-keyed map. `StoreKey` names the fixed
//! keys the application reads and writes; `StoreEntry` is a value together
//! with its timestamps.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The fixed keys of the durable store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKey {
    /// Persisted locale code.
    Language,
    /// Plain-language narrative of the user's answers.
    UserSummary,
    /// Risk band + percentage narrative; first line is the headline.
    RiskAssessment,
    /// Serialized answer sequence, written together with the risk assessment.
    UserAnswers,
    /// Personalized guidance narrative.
    PersonalizedGuidance,
}

impl StoreKey {
    pub const ALL: [StoreKey; 5] = [
        StoreKey::Language,
        StoreKey::UserSummary,
        StoreKey::RiskAssessment,
        StoreKey::UserAnswers,
        StoreKey::PersonalizedGuidance,
    ];

    /// Keys holding generated output (everything except the locale).
    pub const DERIVED: [StoreKey; 4] = [
        StoreKey::UserSummary,
        StoreKey::RiskAssessment,
        StoreKey::UserAnswers,
        StoreKey::PersonalizedGuidance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StoreKey::Language => "language",
            StoreKey::UserSummary => "user_summary",
            StoreKey::RiskAssessment => "risk_assessment",
            StoreKey::UserAnswers => "user_answers",
            StoreKey::PersonalizedGuidance => "personalized_guidance",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StoreKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown store key: '{s}'"))
    }
}

/// A value in the durable store along with its timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreEntry {
    pub key: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
