//! Mock implementations for testing.

use async_trait::async_trait;
use feedback_core::{DbErrorCode, Error, Result};
use parking_lot::Mutex;
use store::{Collection, Document, DocumentStore, Filter, FindOptions, MemoryStore};

/// Store that delegates to a `MemoryStore` until told to fail.
///
/// Failures look like an unreachable database: every operation returns a
/// `DB_001` store error.
pub struct FailingStore {
    inner: MemoryStore,
    should_fail: Mutex<bool>,
}

impl FailingStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            should_fail: Mutex::new(false),
        }
    }

    /// Set failure mode for testing error handling.
    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock() = fail;
    }

    fn check(&self) -> Result<()> {
        if *self.should_fail.lock() {
            Err(Error::store(DbErrorCode::StoreFailed, "connection refused"))
        } else {
            Ok(())
        }
    }
}

impl Default for FailingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn insert(&self, collection: Collection, document: Document) -> Result<()> {
        self.check()?;
        self.inner.insert(collection, document).await
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        options: &FindOptions,
    ) -> Result<Vec<Document>> {
        self.check()?;
        self.inner.find(collection, filter, options).await
    }

    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>> {
        self.check()?;
        self.inner.find_one(collection, filter).await
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        changes: Document,
    ) -> Result<Option<Document>> {
        self.check()?;
        self.inner.update_one(collection, filter, changes).await
    }

    async fn increment(
        &self,
        collection: Collection,
        filter: &Filter,
        field: &str,
        by: i64,
    ) -> Result<bool> {
        self.check()?;
        self.inner.increment(collection, filter, field, by).await
    }

    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64> {
        self.check()?;
        self.inner.count(collection, filter).await
    }

    async fn ping(&self) -> Result<()> {
        self.check()
    }

    fn backend(&self) -> &'static str {
        "failing"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_delegates_until_failing() {
        let store = FailingStore::new();
        assert!(store.ping().await.is_ok());

        store.set_should_fail(true);
        let err = store.ping().await.unwrap_err();
        assert_eq!(err.error_code(), Some("DB_001"));

        store.set_should_fail(false);
        assert_eq!(store.count(Collection::Feedback, &Filter::new()).await.unwrap(), 0);
    }
}
