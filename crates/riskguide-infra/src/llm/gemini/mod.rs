//! Google Gemini completion client.
//!
//! This module provides the [`GeminiClient`] which implements the
//! [`CompletionClient`](riskguide_core::llm::provider::CompletionClient)
//! trait for the `generateContent` endpoint.

pub mod client;
pub mod types;

pub use client::GeminiClient;
