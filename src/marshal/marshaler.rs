//! Configured decode/encode facade with tracing and metrics.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::{debug, debug_span, warn};

use crate::config::{DecodeOptions, MarshalConfig};
use crate::errors::WatsonResult;
use crate::marshal::{decode_with, encode, Model};
use crate::observability::{DefaultMetricsCollector, MetricsCollector, NoopMetricsCollector};

/// Decodes and encodes models under a [`MarshalConfig`].
///
/// Cheap to share behind an `Arc`; all state is the configuration and a
/// thread-safe metrics collector.
pub struct Marshaler {
    config: MarshalConfig,
    options: DecodeOptions,
    metrics: Arc<dyn MetricsCollector>,
}

impl Marshaler {
    /// Creates a marshaler, collecting metrics if the configuration enables it.
    pub fn new(config: MarshalConfig) -> Self {
        let metrics: Arc<dyn MetricsCollector> = if config.metrics_enabled {
            Arc::new(DefaultMetricsCollector::new())
        } else {
            Arc::new(NoopMetricsCollector)
        };
        Self::with_metrics(config, metrics)
    }

    /// Creates a marshaler with a custom metrics collector.
    pub fn with_metrics(config: MarshalConfig, metrics: Arc<dyn MetricsCollector>) -> Self {
        let options = config.decode_options();
        Self {
            config,
            options,
            metrics,
        }
    }

    /// Creates a marshaler from `WATSON_*` environment variables.
    pub fn from_env() -> WatsonResult<Self> {
        Ok(Self::new(MarshalConfig::from_env()?))
    }

    /// Returns the configuration.
    pub fn config(&self) -> &MarshalConfig {
        &self.config
    }

    /// Returns the metrics collector.
    pub fn metrics(&self) -> &Arc<dyn MetricsCollector> {
        &self.metrics
    }

    /// Decodes a JSON value into `T`.
    pub fn decode<T: Model>(&self, value: Value) -> WatsonResult<T> {
        let model = T::shape().name();
        let span = debug_span!("decode", model);
        let _guard = span.enter();

        let start = Instant::now();
        let result = decode_with(value, &self.options);
        self.record("decode", model, &result, start.elapsed());
        result
    }

    /// Parses JSON text and decodes it into `T`.
    pub fn decode_str<T: Model>(&self, text: &str) -> WatsonResult<T> {
        let start = Instant::now();
        match serde_json::from_str::<Value>(text) {
            Ok(value) => self.decode(value),
            Err(err) => {
                let result: WatsonResult<T> = Err(err.into());
                self.record("decode", T::shape().name(), &result, start.elapsed());
                result
            }
        }
    }

    /// Encodes `model` to a JSON value.
    pub fn encode<T: Model>(&self, model: &T) -> WatsonResult<Value> {
        let name = T::shape().name();
        let span = debug_span!("encode", model = name);
        let _guard = span.enter();

        let start = Instant::now();
        let result = encode(model);
        self.record("encode", name, &result, start.elapsed());
        result
    }

    /// Encodes `model` to JSON text.
    pub fn encode_string<T: Model>(&self, model: &T) -> WatsonResult<String> {
        let value = self.encode(model)?;
        Ok(serde_json::to_string(&value)?)
    }

    fn record<R>(&self, operation: &str, model: &str, result: &WatsonResult<R>, elapsed: Duration) {
        match result {
            Ok(_) => {
                debug!(operation, model, elapsed_us = elapsed.as_micros() as u64, "completed");
                self.metrics.record_operation(operation, model, true, elapsed);
            }
            Err(err) => {
                warn!(operation, model, error = %err, "failed");
                self.metrics.record_operation(operation, model, false, elapsed);
                self.metrics.record_error(err.category());
            }
        }
    }
}

impl Default for Marshaler {
    fn default() -> Self {
        Self::new(MarshalConfig::default())
    }
}

impl std::fmt::Debug for Marshaler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Marshaler")
            .field("config", &self.config)
            .finish()
    }
}
