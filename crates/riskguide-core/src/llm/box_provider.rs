//! BoxCompletionClient -- object-safe dynamic dispatch wrapper for CompletionClient.
//!
//! 1. Define an object-safe `CompletionClientDyn` trait with boxed futures
//! 2. Blanket-impl `CompletionClientDyn` for all `T: CompletionClient`
//! 3. `BoxCompletionClient` wraps `Box<dyn CompletionClientDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use tracing::{Instrument, debug, info_span, warn};

use riskguide_types::llm::{
    CompletionError, CompletionRequest, CompletionResponse, PromptKind,
};

use super::provider::CompletionClient;

/// Object-safe version of [`CompletionClient`] with boxed futures.
///
/// This trait exists solely to enable dynamic dispatch. A blanket
/// implementation is provided for all types implementing `CompletionClient`.
pub trait CompletionClientDyn: Send + Sync {
    fn name(&self) -> &str;

    fn model(&self) -> &str;

    fn complete_boxed<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CompletionResponse, CompletionError>> + Send + 'a>>;
}

impl<T: CompletionClient> CompletionClientDyn for T {
    fn name(&self) -> &str {
        CompletionClient::name(self)
    }

    fn model(&self) -> &str {
        CompletionClient::model(self)
    }

    fn complete_boxed<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CompletionResponse, CompletionError>> + Send + 'a>> {
        Box::pin(self.complete(request))
    }
}

/// Type-erased completion client for runtime provider selection.
///
/// Since `CompletionClient` uses RPITIT, it cannot be used as a trait object
/// directly. `BoxCompletionClient` provides equivalent methods that delegate
/// to the inner `CompletionClientDyn` trait object, and wraps every call in
/// a `gen_ai.complete` span.
pub struct BoxCompletionClient {
    inner: Box<dyn CompletionClientDyn + Send + Sync>,
}

impl BoxCompletionClient {
    /// Wrap a concrete `CompletionClient` in a type-erased box.
    pub fn new<T: CompletionClient + 'static>(client: T) -> Self {
        Self {
            inner: Box::new(client),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn model(&self) -> &str {
        self.inner.model()
    }

    /// Send a completion request and receive the full response.
    pub async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = self.inner.name(),
            gen_ai.request.model = %self.inner.model(),
            gen_ai.operation.name = %request.kind,
            prompt_chars = request.prompt.len(),
        );

        let result = self.inner.complete_boxed(request).instrument(span).await;
        match &result {
            Ok(response) => debug!(
                kind = %request.kind,
                output_chars = response.text.len(),
                input_tokens = response.usage.input_tokens,
                output_tokens = response.usage.output_tokens,
                "completion succeeded"
            ),
            Err(e) => warn!(kind = %request.kind, error = %e, "completion failed"),
        }
        result
    }

    /// Build a request from a prompt and return only the generated text.
    pub async fn complete_text(
        &self,
        kind: PromptKind,
        prompt: String,
    ) -> Result<String, CompletionError> {
        let request = CompletionRequest::new(kind, prompt);
        self.complete(&request).await.map(|r| r.text)
    }
}
