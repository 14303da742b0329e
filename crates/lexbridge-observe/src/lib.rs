//! Observability setup for lexbridge: structured logging with optional
//! OpenTelemetry span export.

pub mod tracing_setup;
