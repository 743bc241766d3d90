//! Completion client abstractions for riskguide.
//!
//! - `CompletionClient`: RPITIT trait for concrete service implementations
//! - `BoxCompletionClient`: object-safe wrapper for dynamic dispatch

pub mod box_provider;
pub mod provider;
