//! Observability module for the Watson model layer.
//!
//! Provides `tracing` subscriber setup and metrics for decode/encode calls.

mod logging;
mod metrics;

pub use logging::{LogFormat, LogLevel, LoggingConfig, MARSHAL_TARGET};
pub use metrics::{DefaultMetricsCollector, MarshalMetrics, MetricsCollector, NoopMetricsCollector};
