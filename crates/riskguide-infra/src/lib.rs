//! Infrastructure layer for riskguide.
//!
//! Contains implementations of the port traits defined in `riskguide-core`:
//! the SQLite session store, the Gemini completion client, the HTML
//! narrative formatter, and configuration/data-directory resolution.

pub mod config;
pub mod format;
pub mod llm;
pub mod sqlite;
