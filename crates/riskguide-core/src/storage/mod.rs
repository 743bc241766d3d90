//! Storage abstractions for riskguide.
//!
//! Defines the session store port, an in-process implementation of it, and
//! the read-if-present / else-generate helper used for derived artifacts.
//! The durable implementation lives in riskguide-infra.

pub mod cache;
pub mod kv_store;
pub mod memory_store;
