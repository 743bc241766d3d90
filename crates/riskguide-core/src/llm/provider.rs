//! CompletionClient trait definition.
//!
//! This is the single external call contract the interview engine and the
//! guidance resolver depend on: submit prompt text, receive generated text
//! or a transport/parsing failure.

use riskguide_types::llm::{CompletionError, CompletionRequest, CompletionResponse};

/// Trait for completion service backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
///
/// Implementations must perform exactly one network round trip per call,
/// must not retry internally, and must not cache; caching is the session
/// store's job. Implementations live in riskguide-infra
/// (e.g., `GeminiClient`).
pub trait CompletionClient: Send + Sync {
    /// Human-readable provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Model identifier every request is sent to.
    fn model(&self) -> &str;

    /// Send a prompt and receive the generated text.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, CompletionError>> + Send;
}
