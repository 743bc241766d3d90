use thiserror::Error;

use crate::llm::CompletionError;
use crate::question::QuestionKind;
use crate::session::FailedStage;
use crate::storage::StoreKey;

/// Errors from session store operations (used by trait definitions in riskguide-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// A rejected answer submission.
///
/// Never reaches storage or the network; the engine state is unchanged and
/// the caller must resubmit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("the interview is not currently accepting answers")]
    NotPresenting,

    #[error("answer is for question {got}, but question {expected} is current")]
    StaleQuestion { expected: usize, got: usize },

    #[error("please select an option before proceeding")]
    NoSelection,

    #[error("please reply before proceeding")]
    EmptyText,

    #[error("at most {allowed} option(s) may be selected, got {got}")]
    TooManySelections { allowed: usize, got: usize },

    #[error("'{0}' is not one of the offered options")]
    UnknownOption(String),

    #[error("a {expected} question needs a different kind of answer")]
    KindMismatch { expected: QuestionKind },
}

/// Errors that move the interview engine into its `Failed` state.
#[derive(Debug, Error)]
pub enum InterviewError {
    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error("the generated question set was empty")]
    EmptyQuestionSet,

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),

    #[error("invalid engine state: {0}")]
    InvalidState(String),
}

impl InterviewError {
    /// The retry prompt shown to the user when this error stops the interview
    /// during `stage`.
    pub fn user_message(&self, stage: FailedStage) -> &'static str {
        match (self, stage) {
            (InterviewError::EmptyQuestionSet, _) | (_, FailedStage::Loading) => {
                "An error occurred while loading questions. Please try again."
            }
            (_, FailedStage::Finalizing) => {
                "An error occurred while making an API call. Please try again."
            }
        }
    }
}

/// Errors from resolving the personalized guidance narrative.
#[derive(Debug, Error)]
pub enum GuidanceError {
    /// Upstream artifacts are absent; the caller should redirect to the interview.
    #[error("'{missing}' is not available yet; complete the interview first")]
    PreconditionMissing { missing: StoreKey },

    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

/// Errors building a completion client from configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API key not found in environment variable '{0}'")]
    MissingApiKey(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}
