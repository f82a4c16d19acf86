//! Append-only analytics events and status checks.

use feedback_core::{
    limits::MAX_LIST_LIMIT, AnalyticsEventInput, Result, StatusCheck, StatusCheckCreate,
    UserAnalytics,
};
use telemetry::metrics;
use tracing::{debug, warn};

use crate::document::{Collection, DocumentStore, Filter, FindOptions};
use crate::records::{find_records, insert_record};

/// Records an interaction event. Events are never read back through the API.
pub async fn record_event(
    store: &dyn DocumentStore,
    input: AnalyticsEventInput,
) -> Result<UserAnalytics> {
    let event = input.into_record().inspect_err(|e| {
        metrics().validation_failures.inc();
        warn!(error = %e, "Rejected analytics event");
    })?;

    insert_record(store, Collection::UserAnalytics, &event).await?;
    metrics().analytics_events_recorded.inc();

    debug!(id = %event.id, page_path = %event.page_path, action = %event.action, "Analytics event recorded");
    Ok(event)
}

pub async fn create_status_check(
    store: &dyn DocumentStore,
    input: StatusCheckCreate,
) -> Result<StatusCheck> {
    let check = input.into_record().inspect_err(|_| {
        metrics().validation_failures.inc();
    })?;

    insert_record(store, Collection::StatusChecks, &check).await?;
    metrics().status_checks_recorded.inc();

    debug!(id = %check.id, client_name = %check.client_name, "Status check recorded");
    Ok(check)
}

/// Returns up to [`MAX_LIST_LIMIT`] status checks in store order.
pub async fn list_status_checks(store: &dyn DocumentStore) -> Result<Vec<StatusCheck>> {
    let options = FindOptions::new().limit(MAX_LIST_LIMIT);
    find_records(store, Collection::StatusChecks, &Filter::new(), &options).await
}
