//! Metrics collection for marshaling operations.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::Duration;

use crate::errors::ErrorCategory;

/// Metrics collector interface.
pub trait MetricsCollector: Send + Sync {
    /// Records one decode or encode call for a model.
    fn record_operation(&self, operation: &str, model: &str, success: bool, duration: Duration);

    /// Records an error by category.
    fn record_error(&self, category: ErrorCategory);

    /// Gets current metrics.
    fn get_metrics(&self) -> MarshalMetrics;

    /// Resets all metrics.
    fn reset(&self);
}

/// Marshaling metrics snapshot.
#[derive(Debug, Clone, Default)]
pub struct MarshalMetrics {
    /// Total operations.
    pub total_operations: u64,
    /// Successful operations.
    pub successful_operations: u64,
    /// Failed operations.
    pub failed_operations: u64,
    /// Total latency in microseconds.
    pub total_latency_us: u64,
    /// Calls per operation (`decode`, `encode`).
    pub operations: HashMap<String, u64>,
    /// Calls per model name.
    pub models: HashMap<String, u64>,
    /// Error counts by category label.
    pub errors: HashMap<String, u64>,
}

impl MarshalMetrics {
    /// Calculates average latency in microseconds.
    pub fn average_latency_us(&self) -> f64 {
        if self.total_operations == 0 {
            0.0
        } else {
            self.total_latency_us as f64 / self.total_operations as f64
        }
    }

    /// Calculates success rate as a percentage.
    pub fn success_rate(&self) -> f64 {
        if self.total_operations == 0 {
            100.0
        } else {
            (self.successful_operations as f64 / self.total_operations as f64) * 100.0
        }
    }
}

/// Default metrics collector implementation.
pub struct DefaultMetricsCollector {
    total_operations: AtomicU64,
    successful_operations: AtomicU64,
    failed_operations: AtomicU64,
    total_latency_us: AtomicU64,
    operations: RwLock<HashMap<String, u64>>,
    models: RwLock<HashMap<String, u64>>,
    errors: RwLock<HashMap<String, u64>>,
}

impl DefaultMetricsCollector {
    /// Creates a new metrics collector.
    pub fn new() -> Self {
        Self {
            total_operations: AtomicU64::new(0),
            successful_operations: AtomicU64::new(0),
            failed_operations: AtomicU64::new(0),
            total_latency_us: AtomicU64::new(0),
            operations: RwLock::new(HashMap::new()),
            models: RwLock::new(HashMap::new()),
            errors: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for DefaultMetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsCollector for DefaultMetricsCollector {
    fn record_operation(&self, operation: &str, model: &str, success: bool, duration: Duration) {
        self.total_operations.fetch_add(1, Ordering::Relaxed);

        if success {
            self.successful_operations.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed_operations.fetch_add(1, Ordering::Relaxed);
        }

        self.total_latency_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);

        if let Ok(mut ops) = self.operations.write() {
            *ops.entry(operation.to_string()).or_insert(0) += 1;
        }
        if let Ok(mut models) = self.models.write() {
            *models.entry(model.to_string()).or_insert(0) += 1;
        }
    }

    fn record_error(&self, category: ErrorCategory) {
        if let Ok(mut errors) = self.errors.write() {
            *errors.entry(category.as_str().to_string()).or_insert(0) += 1;
        }
    }

    fn get_metrics(&self) -> MarshalMetrics {
        MarshalMetrics {
            total_operations: self.total_operations.load(Ordering::Relaxed),
            successful_operations: self.successful_operations.load(Ordering::Relaxed),
            failed_operations: self.failed_operations.load(Ordering::Relaxed),
            total_latency_us: self.total_latency_us.load(Ordering::Relaxed),
            operations: self.operations.read().map(|o| o.clone()).unwrap_or_default(),
            models: self.models.read().map(|m| m.clone()).unwrap_or_default(),
            errors: self.errors.read().map(|e| e.clone()).unwrap_or_default(),
        }
    }

    fn reset(&self) {
        self.total_operations.store(0, Ordering::Relaxed);
        self.successful_operations.store(0, Ordering::Relaxed);
        self.failed_operations.store(0, Ordering::Relaxed);
        self.total_latency_us.store(0, Ordering::Relaxed);

        if let Ok(mut ops) = self.operations.write() {
            ops.clear();
        }
        if let Ok(mut models) = self.models.write() {
            models.clear();
        }
        if let Ok(mut errors) = self.errors.write() {
            errors.clear();
        }
    }
}

impl std::fmt::Debug for DefaultMetricsCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultMetricsCollector")
            .field("total_operations", &self.total_operations.load(Ordering::Relaxed))
            .field(
                "successful_operations",
                &self.successful_operations.load(Ordering::Relaxed),
            )
            .field("failed_operations", &self.failed_operations.load(Ordering::Relaxed))
            .finish()
    }
}

/// Collector that discards everything.
#[derive(Debug, Default)]
pub struct NoopMetricsCollector;

impl MetricsCollector for NoopMetricsCollector {
    fn record_operation(&self, _operation: &str, _model: &str, _success: bool, _duration: Duration) {}

    fn record_error(&self, _category: ErrorCategory) {}

    fn get_metrics(&self) -> MarshalMetrics {
        MarshalMetrics::default()
    }

    fn reset(&self) {}
}
