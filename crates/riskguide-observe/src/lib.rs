//! Observability setup for riskguide: structured logging through `tracing`
//! and an optional OpenTelemetry bridge.

pub mod tracing_setup;
