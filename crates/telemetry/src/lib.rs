//! Internal telemetry for the feedback service.
//!
//! In-process counters, latency histograms and component health, plus the
//! tracing subscriber setup. Nothing is exported to an external system; the
//! service logs periodic snapshots instead.

pub mod health;
pub mod metrics;
pub mod tracing_setup;

pub use health::*;
pub use metrics::*;
pub use tracing_setup::*;
