//! Shared domain types for riskguide.
//!
//! This crate contains the data shapes used across the self-assessment flow:
//! questions and answers, the in-memory interview session, the locale
//! selector, persisted store keys, completion request/response types, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod llm;
pub mod locale;
pub mod question;
pub mod risk;
pub mod session;
pub mod storage;
