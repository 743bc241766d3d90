//! Scripted completion client for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use riskguide_types::llm::{
    CompletionError, CompletionRequest, CompletionResponse, PromptKind, Usage,
};

use crate::llm::box_provider::BoxCompletionClient;
use crate::llm::provider::CompletionClient;

/// Replies with queued responses in order and records every request.
///
/// Running out of scripted replies is a transport error, so a test that
/// expects zero calls can script nothing and still observe a stray call.
#[derive(Clone, Default)]
pub struct ScriptedClient {
    replies: Arc<Mutex<VecDeque<Result<String, CompletionError>>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Ok(text.into()));
        self
    }

    pub fn fail(self, error: CompletionError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn boxed(&self) -> Arc<BoxCompletionClient> {
        Arc::new(BoxCompletionClient::new(self.clone()))
    }

    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn kinds(&self) -> Vec<PromptKind> {
        self.calls().into_iter().map(|c| c.kind).collect()
    }
}

impl CompletionClient for ScriptedClient {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        self.calls.lock().unwrap().push(request.clone());
        let next = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CompletionError::Transport("no scripted reply".into())));
        next.map(|text| CompletionResponse {
            text,
            model: "scripted-model".to_string(),
            finish_reason: Some("STOP".to_string()),
            usage: Usage::default(),
        })
    }
}

/// A three-question set covering every question kind, fenced the way the
/// service sometimes returns it.
pub const THREE_QUESTIONS: &str = r#"```json
{"questions": [
  {"question": "What is your gender?", "options": ["Male", "Female", "Other"], "type": "single-choice"},
  {"question": "Which of these apply to you?", "options": ["Smoking", "Alcohol", "Sedentary"], "type": "multiple-choice"},
  {"question": "What is your name?", "type": "open-ended"}
]}
```"#;
