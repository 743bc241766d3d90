//! The interview flow: question acquisition, answer recording, and the
//! two-stage finalization that produces the persisted summary and risk
//! assessment.

pub mod engine;
pub mod parse;
pub mod session;
pub mod validate;

pub use engine::{InterviewEngine, Step};
