//! Business logic and port trait definitions for riskguide.
//!
//! This crate defines the "ports" (`CompletionClient`, `SessionStore`,
//! `NarrativeFormatter`) that the infrastructure layer implements, and the
//! logic built on them: prompt construction, the interview engine, and the
//! guidance resolver. It depends only on `riskguide-types` -- never on
//! `riskguide-infra` or any database/HTTP crate.

pub mod format;
pub mod guidance;
pub mod interview;
pub mod llm;
pub mod profile;
pub mod prompt;
pub mod settings;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;
