//! Typed record access shared by the facet operations.
//!
//! Every store round-trip goes through here so latency and store failures
//! are recorded in one place.

use feedback_core::{timestamp, EntityUpdate, Error, Result};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::future::Future;
use std::time::Instant;
use telemetry::metrics;
use tracing::{error, warn};

use crate::document::{
    from_document, to_document, Collection, DocumentStore, Filter, FindOptions,
};

/// Times a store call and counts store-level failures.
pub(crate) async fn timed<T, F>(operation: &'static str, collection: Collection, call: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let start = Instant::now();
    let result = call.await;
    metrics()
        .store_latency_ms
        .observe(start.elapsed().as_millis() as u64);

    if let Err(e @ Error::Store { .. }) = &result {
        metrics().store_errors.inc();
        error!(
            operation,
            collection = collection.name(),
            error = %e,
            "Store operation failed"
        );
    }
    result
}

pub(crate) async fn insert_record<T: Serialize>(
    store: &dyn DocumentStore,
    collection: Collection,
    record: &T,
) -> Result<()> {
    let document = to_document(record)?;
    timed("insert", collection, store.insert(collection, document)).await
}

pub(crate) async fn find_records<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: Collection,
    filter: &Filter,
    options: &FindOptions,
) -> Result<Vec<T>> {
    timed("find", collection, store.find(collection, filter, options))
        .await?
        .into_iter()
        .map(from_document)
        .collect()
}

/// Looks up one record by id, mapping absence to `NotFound`.
pub(crate) async fn get_record<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: Collection,
    kind: &'static str,
    id: &str,
) -> Result<T> {
    let found = timed(
        "find_one",
        collection,
        store.find_one(collection, &Filter::by_id(id)),
    )
    .await?;

    match found {
        Some(document) => from_document(document),
        None => {
            metrics().not_found.inc();
            warn!(kind, id, "Lookup of unknown identifier");
            Err(Error::not_found(kind, id))
        }
    }
}

/// Applies a partial update and returns the record as stored afterwards.
///
/// The existence check and the write are separate store calls; with no
/// delete operation exposed, the only race is between overlapping updates,
/// which resolve last-write-wins per field.
pub(crate) async fn update_record<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: Collection,
    kind: &'static str,
    id: &str,
    update: &EntityUpdate,
) -> Result<T> {
    let exists = timed(
        "find_one",
        collection,
        store.find_one(collection, &Filter::by_id(id)),
    )
    .await?;
    if exists.is_none() {
        metrics().not_found.inc();
        warn!(kind, id, "Update of unknown identifier");
        return Err(Error::not_found(kind, id));
    }

    let mut changes = update.changes();
    changes.insert(
        "updated_at".into(),
        Value::from(timestamp::format(&timestamp::now())),
    );

    let updated = timed(
        "update_one",
        collection,
        store.update_one(collection, &Filter::by_id(id), changes),
    )
    .await?;

    match updated {
        Some(document) => {
            metrics().updates_applied.inc();
            from_document(document)
        }
        None => Err(Error::not_found(kind, id)),
    }
}

pub(crate) async fn count_records(
    store: &dyn DocumentStore,
    collection: Collection,
    filter: &Filter,
) -> Result<u64> {
    timed("count", collection, store.count(collection, filter)).await
}
