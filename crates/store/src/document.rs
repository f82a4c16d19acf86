//! Abstract document store contract.
//!
//! Documents are JSON objects. Every backend implements the same
//! insert / find / update / increment / count operations so the facet
//! operations never depend on a concrete database.

use async_trait::async_trait;
use feedback_core::Result;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

/// A stored document.
pub type Document = Map<String, Value>;

/// Named collections in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Feedback,
    Suggestions,
    UserAnalytics,
    StatusChecks,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Self::Feedback,
        Self::Suggestions,
        Self::UserAnalytics,
        Self::StatusChecks,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Feedback => "feedback",
            Self::Suggestions => "suggestions",
            Self::UserAnalytics => "user_analytics",
            Self::StatusChecks => "status_checks",
        }
    }
}

/// One predicate on a document field.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Field equals the value.
    Eq(String, Value),
    /// Field is present and not null.
    NotNull(String),
}

impl Condition {
    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Self::Eq(field, value) => document.get(field) == Some(value),
            Self::NotNull(field) => document.get(field).is_some_and(|v| !v.is_null()),
        }
    }
}

/// Conjunction of conditions. The empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter matching a single document by its `id`.
    pub fn by_id(id: &str) -> Self {
        Self::new().eq("id", id)
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition::Eq(field.into(), value.into()));
        self
    }

    /// Adds an equality condition only when a value is given.
    pub fn eq_opt<V: Into<Value>>(self, field: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.eq(field, value),
            None => self,
        }
    }

    pub fn not_null(mut self, field: impl Into<String>) -> Self {
        self.conditions.push(Condition::NotNull(field.into()));
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn matches(&self, document: &Document) -> bool {
        self.conditions.iter().all(|c| c.matches(document))
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Options for `find`. Without a sort, documents come back in the store's
/// natural order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindOptions {
    pub skip: u64,
    pub limit: Option<u64>,
    pub sort: Option<(String, SortOrder)>,
}

impl FindOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = skip;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some((field.into(), order));
        self
    }
}

/// Document store operations.
///
/// Implemented by the in-process [`MemoryStore`](crate::MemoryStore) and by
/// [`MongoStore`](crate::MongoStore). Each operation is atomic per document;
/// nothing spans documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Appends a document.
    async fn insert(&self, collection: Collection, document: Document) -> Result<()>;

    /// Returns matching documents after applying skip, limit and sort.
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        options: &FindOptions,
    ) -> Result<Vec<Document>>;

    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>>;

    /// Sets the given fields on the first matching document and returns the
    /// document after the change, or `None` when nothing matched.
    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        changes: Document,
    ) -> Result<Option<Document>>;

    /// Adds `by` to a numeric field in place. Returns whether a document
    /// matched.
    async fn increment(
        &self,
        collection: Collection,
        filter: &Filter,
        field: &str,
        by: i64,
    ) -> Result<bool>;

    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64>;

    /// Round-trips to the backend.
    async fn ping(&self) -> Result<()>;

    /// Backend name for logs and health reports.
    fn backend(&self) -> &'static str;
}

/// Serializes a record into a document.
pub fn to_document<T: Serialize>(record: &T) -> Result<Document> {
    match serde_json::to_value(record)? {
        Value::Object(document) => Ok(document),
        other => Err(feedback_core::Error::internal(format!(
            "record serialized to {} instead of an object",
            json_kind(&other)
        ))),
    }
}

/// Deserializes a document into a record.
pub fn from_document<T: DeserializeOwned>(document: Document) -> Result<T> {
    Ok(serde_json::from_value(Value::Object(document))?)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
