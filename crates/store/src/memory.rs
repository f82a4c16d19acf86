//! In-process document store.
//!
//! Keeps each collection as an insertion-ordered `Vec`. Every operation runs
//! under a single lock, which gives the same per-document atomicity the
//! database backend provides (in particular for `increment`).

use async_trait::async_trait;
use feedback_core::{Error, Result};
use parking_lot::Mutex;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

use crate::document::{Collection, Document, DocumentStore, Filter, FindOptions, SortOrder};

/// Document store held in memory. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection.
    pub fn len(&self, collection: Collection) -> usize {
        self.collections
            .lock()
            .get(&collection)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

/// Orders JSON values: numbers numerically, strings lexicographically,
/// anything else (including missing fields) first.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: Collection, document: Document) -> Result<()> {
        self.collections
            .lock()
            .entry(collection)
            .or_default()
            .push(document);
        Ok(())
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        options: &FindOptions,
    ) -> Result<Vec<Document>> {
        let collections = self.collections.lock();
        let Some(documents) = collections.get(&collection) else {
            return Ok(Vec::new());
        };

        let mut matched: Vec<&Document> = documents.iter().filter(|d| filter.matches(d)).collect();

        if let Some((field, order)) = &options.sort {
            // Stable sort keeps natural order among equal keys.
            matched.sort_by(|a, b| {
                let ordering = compare_values(a.get(field), b.get(field));
                match order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }

        let skip = usize::try_from(options.skip).unwrap_or(usize::MAX);
        let limit = options
            .limit
            .map(|l| usize::try_from(l).unwrap_or(usize::MAX))
            .unwrap_or(usize::MAX);

        Ok(matched
            .into_iter()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>> {
        Ok(self
            .collections
            .lock()
            .get(&collection)
            .and_then(|documents| documents.iter().find(|d| filter.matches(d)).cloned()))
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        changes: Document,
    ) -> Result<Option<Document>> {
        let mut collections = self.collections.lock();
        let Some(document) = collections
            .get_mut(&collection)
            .and_then(|documents| documents.iter_mut().find(|d| filter.matches(d)))
        else {
            return Ok(None);
        };

        for (field, value) in changes {
            document.insert(field, value);
        }
        Ok(Some(document.clone()))
    }

    async fn increment(
        &self,
        collection: Collection,
        filter: &Filter,
        field: &str,
        by: i64,
    ) -> Result<bool> {
        let mut collections = self.collections.lock();
        let Some(document) = collections
            .get_mut(&collection)
            .and_then(|documents| documents.iter_mut().find(|d| filter.matches(d)))
        else {
            return Ok(false);
        };

        let current = match document.get(field) {
            None | Some(Value::Null) => 0,
            Some(value) => value.as_i64().ok_or_else(|| {
                Error::internal(format!("cannot increment non-integer field {}", field))
            })?,
        };
        document.insert(field.to_string(), Value::from(current + by));
        debug!(collection = collection.name(), field, value = current + by, "Incremented");
        Ok(true)
    }

    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64> {
        Ok(self
            .collections
            .lock()
            .get(&collection)
            .map(|documents| documents.iter().filter(|d| filter.matches(d)).count() as u64)
            .unwrap_or(0))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
