//! Completion request/response types for riskguide.
//!
//! These types model the single external call contract: submit prompt text,
//! receive generated text or a failure. They are provider-agnostic; the
//! wire envelope of a concrete service lives in `riskguide-infra`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which prompt template a request was built from.
///
/// Carried through to tracing so each completion span says what it was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    QuestionGeneration,
    Summary,
    RiskClassification,
    Guidance,
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptKind::QuestionGeneration => write!(f, "question_generation"),
            PromptKind::Summary => write!(f, "summary"),
            PromptKind::RiskClassification => write!(f, "risk_classification"),
            PromptKind::Guidance => write!(f, "guidance"),
        }
    }
}

impl FromStr for PromptKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "question_generation" => Ok(PromptKind::QuestionGeneration),
            "summary" => Ok(PromptKind::Summary),
            "risk_classification" => Ok(PromptKind::RiskClassification),
            "guidance" => Ok(PromptKind::Guidance),
            other => Err(format!("invalid prompt kind: '{other}'")),
        }
    }
}

/// Request to the completion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub kind: PromptKind,
    pub prompt: String,
}

impl CompletionRequest {
    pub fn new(kind: PromptKind, prompt: impl Into<String>) -> Self {
        Self {
            kind,
            prompt: prompt.into(),
        }
    }
}

/// Response from the completion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub text: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub usage: Usage,
}

/// Token usage reported by the service, when it reports any.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Errors from a completion call.
///
/// Exactly one network round trip is made per call; neither kind is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompletionError {
    /// Network unreachable or non-success HTTP status.
    #[error("transport error: {0}")]
    Transport(String),

    /// A response arrived but the expected payload shape was missing.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_kind_roundtrip() {
        for kind in [
            PromptKind::QuestionGeneration,
            PromptKind::Summary,
            PromptKind::RiskClassification,
            PromptKind::Guidance,
        ] {
            let parsed: PromptKind = kind.to_string().parse().unwrap();
            assert_eq!(kind, parsed);
        }
    }

    #[test]
    fn test_prompt_kind_serde() {
        let json = serde_json::to_string(&PromptKind::RiskClassification).unwrap();
        assert_eq!(json, "\"risk_classification\"");
    }

    #[test]
    fn test_usage_default() {
        let usage = Usage::default();
        assert_eq!(usage.input_tokens, 0);
        assert_eq!(usage.output_tokens, 0);
    }

    #[test]
    fn test_completion_error_display() {
        let err = CompletionError::Transport("HTTP 503".to_string());
        assert_eq!(err.to_string(), "transport error: HTTP 503");
        let err = CompletionError::MalformedResponse("no candidates".to_string());
        assert!(err.to_string().contains("no candidates"));
    }
}
