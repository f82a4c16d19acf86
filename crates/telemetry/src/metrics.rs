//! Internal metrics collection.
//!
//! Counters and histograms live in memory; `main` logs a snapshot on an
//! interval.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// A counter metric.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_by(&self, n: u64) {
        self.0.fetch_add(n, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Histogram for latency tracking.
#[derive(Debug)]
pub struct Histogram {
    /// Buckets: 1ms, 5ms, 10ms, 25ms, 50ms, 100ms, 250ms, 500ms, 1s, 5s, 10s
    buckets: [AtomicU64; 11],
    sum: AtomicU64,
    count: AtomicU64,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    const BUCKET_BOUNDS: [u64; 11] = [1, 5, 10, 25, 50, 100, 250, 500, 1000, 5000, 10000];

    pub fn new() -> Self {
        Self {
            buckets: Default::default(),
            sum: AtomicU64::new(0),
            count: AtomicU64::new(0),
        }
    }

    /// Records a value in milliseconds. Values above the last bound land in
    /// the last bucket.
    pub fn observe(&self, ms: u64) {
        self.sum.fetch_add(ms, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);

        let bucket = Self::BUCKET_BOUNDS
            .iter()
            .position(|&bound| ms <= bound)
            .unwrap_or(Self::BUCKET_BOUNDS.len() - 1);
        self.buckets[bucket].fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn sum(&self) -> u64 {
        self.sum.load(Ordering::Relaxed)
    }

    pub fn mean(&self) -> f64 {
        let count = self.count();
        if count == 0 {
            0.0
        } else {
            self.sum() as f64 / count as f64
        }
    }

    /// Returns `(upper bound, count)` per bucket.
    pub fn buckets(&self) -> Vec<(u64, u64)> {
        Self::BUCKET_BOUNDS
            .iter()
            .zip(self.buckets.iter())
            .map(|(&bound, count)| (bound, count.load(Ordering::Relaxed)))
            .collect()
    }
}

/// Collected metrics for the feedback service.
#[derive(Debug, Default)]
pub struct Metrics {
    // Intake
    pub feedback_submitted: Counter,
    pub suggestions_submitted: Counter,
    pub votes_recorded: Counter,
    pub analytics_events_recorded: Counter,
    pub status_checks_recorded: Counter,
    pub validation_failures: Counter,

    // Triage
    pub updates_applied: Counter,
    pub not_found: Counter,

    // Store
    pub store_errors: Counter,
    pub store_latency_ms: Histogram,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A snapshot of metrics at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub feedback_submitted: u64,
    pub suggestions_submitted: u64,
    pub votes_recorded: u64,
    pub analytics_events_recorded: u64,
    pub status_checks_recorded: u64,
    pub validation_failures: u64,
    pub updates_applied: u64,
    pub not_found: u64,
    pub store_errors: u64,
    pub store_operations: u64,
    pub store_latency_mean_ms: f64,
}

impl Metrics {
    /// Takes a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            timestamp: Utc::now(),
            feedback_submitted: self.feedback_submitted.get(),
            suggestions_submitted: self.suggestions_submitted.get(),
            votes_recorded: self.votes_recorded.get(),
            analytics_events_recorded: self.analytics_events_recorded.get(),
            status_checks_recorded: self.status_checks_recorded.get(),
            validation_failures: self.validation_failures.get(),
            updates_applied: self.updates_applied.get(),
            not_found: self.not_found.get(),
            store_errors: self.store_errors.get(),
            store_operations: self.store_latency_ms.count(),
            store_latency_mean_ms: self.store_latency_ms.mean(),
        }
    }
}

/// Global metrics registry.
pub static METRICS: std::sync::LazyLock<Metrics> = std::sync::LazyLock::new(Metrics::new);

/// Get the global metrics instance.
pub fn metrics() -> &'static Metrics {
    &METRICS
}
