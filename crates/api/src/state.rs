//! Application state shared across handlers.

use std::sync::Arc;

use store::DocumentStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Document store (MongoDB in production, in-memory in tests)
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }
}
