//! Interview session types.
//!
//! A `Session` lives only in process memory for the duration of one
//! interview; it is never persisted mid-flight. Lifecycle logic lives in
//! `riskguide-core::interview::session`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::question::{Answer, Question};

/// In-memory state of one interview run.
///
/// Invariant: `current_index <= questions.len()`, and the session is complete
/// iff `current_index == questions.len()`, at which point
/// `answers.len() == questions.len()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub questions: Vec<Question>,
    pub answers: Vec<Answer>,
    pub current_index: usize,
}

/// Where the interview engine currently is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum InterviewState {
    /// Waiting for (or running) question generation.
    Loading,
    /// Showing the question at `index` and accepting an answer for it.
    Presenting { index: usize },
    /// All questions answered; summary and risk classification pending.
    Finalizing,
    /// Derived artifacts are persisted; the caller should show guidance.
    Done,
    /// Terminal failure. `message` is the user-facing retry prompt.
    Failed { stage: FailedStage, message: String },
}

/// Which part of the flow a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailedStage {
    Loading,
    Finalizing,
}

impl InterviewState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, InterviewState::Done | InterviewState::Failed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interview_state_serde() {
        let state = InterviewState::Presenting { index: 3 };
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"state":"presenting","index":3}"#);

        let failed = InterviewState::Failed {
            stage: FailedStage::Finalizing,
            message: "try again".to_string(),
        };
        let parsed: InterviewState =
            serde_json::from_str(&serde_json::to_string(&failed).unwrap()).unwrap();
        assert_eq!(parsed, failed);
    }

    #[test]
    fn test_terminal_states() {
        assert!(InterviewState::Done.is_terminal());
        assert!(!InterviewState::Finalizing.is_terminal());
        assert!(!InterviewState::Loading.is_terminal());
    }
}
