//! Interview engine state machine.
//!
//! `Loading -> Presenting(0..N) -> Finalizing -> Done`, with `Failed`
//! reachable from `Loading` and `Finalizing`. The engine never retries a
//! failed completion; the caller restarts it with [`InterviewEngine::start`]
//! or [`InterviewEngine::finalize`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use riskguide_types::error::{InterviewError, ValidationError};
use riskguide_types::llm::PromptKind;
use riskguide_types::locale::Locale;
use riskguide_types::question::{Answer, Question, Selection, serialize_answers};
use riskguide_types::session::{FailedStage, InterviewState, Session};
use riskguide_types::storage::StoreKey;

use crate::llm::box_provider::BoxCompletionClient;
use crate::prompt::{build_question_prompt, build_risk_prompt, build_summary_prompt};
use crate::storage::kv_store::SessionStore;

use super::parse::parse_questions;
use super::session::{SessionExt, new_session};
use super::validate::validate_selection;

/// Outcome of an accepted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The question at this index is now current.
    Next(usize),
    /// Every question is answered; call [`InterviewEngine::finalize`].
    ReadyToFinalize,
}

/// Finalization outputs this session has already written to the store.
#[derive(Debug, Clone, Copy, Default)]
struct Persisted {
    summary: bool,
    risk: bool,
}

pub struct InterviewEngine<S: SessionStore> {
    client: Arc<BoxCompletionClient>,
    store: Arc<S>,
    locale: Locale,
    session: Session,
    state: InterviewState,
    persisted: Persisted,
}

impl<S: SessionStore> InterviewEngine<S> {
    /// Create an engine in `Loading`. Nothing happens until [`Self::start`].
    pub fn new(client: Arc<BoxCompletionClient>, store: Arc<S>, locale: Locale) -> Self {
        Self {
            client,
            store,
            locale,
            session: new_session(Vec::new()),
            state: InterviewState::Loading,
            persisted: Persisted::default(),
        }
    }

    pub fn state(&self) -> &InterviewState {
        &self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// The question to show, only while presenting.
    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            InterviewState::Presenting { .. } => self.session.current_question(),
            _ => None,
        }
    }

    /// `(answered, total)`.
    pub fn progress(&self) -> (usize, usize) {
        self.session.progress()
    }

    pub fn answers(&self) -> &[Answer] {
        &self.session.answers
    }

    /// Generate a fresh question set and move to `Presenting(0)`.
    ///
    /// Always starts over: any previous session is discarded, and results
    /// stored by an earlier interview will be overwritten on finalization.
    pub async fn start(&mut self) -> Result<(), InterviewError> {
        self.session = new_session(Vec::new());
        self.state = InterviewState::Loading;
        self.persisted = Persisted::default();
        info!(session_id = %self.session.id, locale = %self.locale, "generating questions");

        match self.load_questions().await {
            Ok(questions) => {
                info!(count = questions.len(), "questions ready");
                self.session = new_session(questions);
                self.state = InterviewState::Presenting { index: 0 };
                Ok(())
            }
            Err(e) => Err(self.fail(FailedStage::Loading, e)),
        }
    }

    async fn load_questions(&self) -> Result<Vec<Question>, InterviewError> {
        let prompt = build_question_prompt(self.locale);
        let text = self
            .client
            .complete_text(PromptKind::QuestionGeneration, prompt)
            .await?;
        let questions = parse_questions(&text)?;
        if questions.is_empty() {
            return Err(InterviewError::EmptyQuestionSet);
        }
        Ok(questions)
    }

    /// Record an answer for the question at `question_index`.
    ///
    /// A rejected submission leaves the session and state untouched.
    pub fn submit(
        &mut self,
        question_index: usize,
        selection: Selection,
    ) -> Result<Step, ValidationError> {
        let InterviewState::Presenting { index } = self.state else {
            return Err(ValidationError::NotPresenting);
        };
        if question_index != index {
            return Err(ValidationError::StaleQuestion {
                expected: index,
                got: question_index,
            });
        }
        let question = self
            .session
            .current_question()
            .ok_or(ValidationError::NotPresenting)?;

        let value = validate_selection(question, selection)?;
        let answer = Answer {
            question_text: question.text.clone(),
            value,
        };
        self.session.record_answer(answer);

        if self.session.is_complete() {
            debug!(answered = self.session.answers.len(), "all questions answered");
            self.state = InterviewState::Finalizing;
            Ok(Step::ReadyToFinalize)
        } else {
            let next = self.session.current_index;
            debug!(index = next, "advancing to next question");
            self.state = InterviewState::Presenting { index: next };
            Ok(Step::Next(next))
        }
    }

    /// Produce and persist the summary, then the risk assessment with the
    /// serialized answers, and move to `Done`.
    ///
    /// Also usable to retry after a finalization failure: outputs this
    /// session already persisted are not regenerated. A partial result
    /// (summary persisted, risk not) is kept. Results left by earlier
    /// sessions are always replaced, and stale guidance is dropped.
    pub async fn finalize(&mut self) -> Result<(), InterviewError> {
        let resumable = matches!(
            self.state,
            InterviewState::Finalizing
                | InterviewState::Failed {
                    stage: FailedStage::Finalizing,
                    ..
                }
        );
        if !resumable {
            return Err(InterviewError::InvalidState(format!(
                "cannot finalize from {:?}",
                self.state
            )));
        }
        self.state = InterviewState::Finalizing;

        info!(session_id = %self.session.id, answers = self.session.answers.len(), "finalizing interview");
        match self.run_finalization().await {
            Ok(()) => {
                info!(session_id = %self.session.id, "interview complete");
                self.state = InterviewState::Done;
                Ok(())
            }
            Err(e) => Err(self.fail(FailedStage::Finalizing, e)),
        }
    }

    async fn run_finalization(&mut self) -> Result<(), InterviewError> {
        let answers_json = serialize_answers(&self.session.answers)
            .map_err(|e| InterviewError::InvalidState(format!("answers not serializable: {e}")))?;

        if self.persisted.summary {
            debug!("summary already persisted for this session");
        } else {
            let prompt = build_summary_prompt(&answers_json, self.locale);
            let summary = self.client.complete_text(PromptKind::Summary, prompt).await?;
            self.store.set_key(StoreKey::UserSummary, &summary).await?;
            self.persisted.summary = true;
        }

        if self.persisted.risk {
            debug!("risk assessment already persisted for this session");
            return Ok(());
        }
        let prompt = build_risk_prompt(&answers_json, self.locale);
        let assessment = self
            .client
            .complete_text(PromptKind::RiskClassification, prompt)
            .await?;
        self.store.set_key(StoreKey::RiskAssessment, &assessment).await?;
        self.store.set_key(StoreKey::UserAnswers, &answers_json).await?;
        // Guidance is derived from the assessment just replaced.
        self.store.delete(StoreKey::PersonalizedGuidance.as_str()).await?;
        self.persisted.risk = true;
        Ok(())
    }

    fn fail(&mut self, stage: FailedStage, error: InterviewError) -> InterviewError {
        let message = error.user_message(stage).to_string();
        warn!(?stage, error = %error, "interview failed");
        self.state = InterviewState::Failed { stage, message };
        error
    }
}
