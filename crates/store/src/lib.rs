//! Document storage for the feedback service.
//!
//! [`DocumentStore`] is the seam between the facet operations and a concrete
//! backend: [`MemoryStore`] for development and tests, [`MongoStore`] for
//! deployments.

pub mod analytics;
pub mod config;
pub mod document;
pub mod feedback;
pub mod health;
pub mod memory;
pub mod mongo;
mod records;
pub mod reports;
pub mod suggestions;

use std::sync::Arc;

use feedback_core::Result;
use tracing::{error, info};

pub use analytics::*;
pub use config::*;
pub use document::*;
pub use feedback::*;
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use reports::*;
pub use suggestions::*;

/// Opens the configured backend.
pub async fn connect(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match config.backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Mongo => {
            let mongo = MongoStore::new(config.clone()).await?;
            // The database may not be up yet; indexes are created on a later start.
            if let Err(e) = mongo.init_indexes().await {
                error!("Failed to initialize MongoDB indexes: {}", e);
            }
            Arc::new(mongo)
        }
    };

    info!(backend = store.backend(), "Document store ready");
    Ok(store)
}
