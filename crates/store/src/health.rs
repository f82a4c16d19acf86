//! Store health checks.

use std::sync::Arc;
use std::time::Duration;

use telemetry::health;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, error, info};

use crate::document::DocumentStore;

/// Pings the store and records the outcome in the health registry.
pub async fn check_connection(store: &dyn DocumentStore) -> bool {
    match store.ping().await {
        Ok(()) => {
            health().store.set_healthy();
            debug!(backend = store.backend(), "Store connection healthy");
            true
        }
        Err(e) => {
            health().store.set_unhealthy(e.to_string());
            error!(backend = store.backend(), "Store health check failed: {}", e);
            false
        }
    }
}

/// Re-checks the store on a fixed interval so readiness follows outages
/// and recoveries.
pub fn start_health_monitor(store: Arc<dyn DocumentStore>, every: Duration) -> JoinHandle<()> {
    info!(interval_secs = every.as_secs(), "Store health monitor started");
    tokio::spawn(async move {
        let mut ticker = interval(every);
        let mut was_healthy = health().store.is_healthy();

        loop {
            ticker.tick().await;

            let healthy = check_connection(store.as_ref()).await;
            if healthy != was_healthy {
                info!(healthy, backend = store.backend(), "Store health changed");
                was_healthy = healthy;
            }
        }
    })
}
