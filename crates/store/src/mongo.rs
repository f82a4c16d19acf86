//! MongoDB document store.

use async_trait::async_trait;
use feedback_core::{DbErrorCode, Error, Result};
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, Bson, Document as BsonDocument},
    options::{ClientOptions, IndexOptions, ReturnDocument},
    Client, Collection as MongoCollection, Database, IndexModel,
};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::document::{
    Collection, Condition, Document, DocumentStore, Filter, FindOptions, SortOrder,
};

fn store_error(e: mongodb::error::Error) -> Error {
    Error::store(DbErrorCode::StoreFailed, e.to_string())
}

/// Documents are returned without Mongo's own `_id`.
fn projection() -> BsonDocument {
    doc! { "_id": 0 }
}

fn to_bson_document(document: &Document) -> Result<BsonDocument> {
    bson::to_document(document)
        .map_err(|e| Error::internal(format!("Failed to encode document: {}", e)))
}

fn from_bson_document(document: BsonDocument) -> Result<Document> {
    match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(map) => Ok(map),
        _ => Err(Error::internal("Stored document is not an object")),
    }
}

fn filter_document(filter: &Filter) -> Result<BsonDocument> {
    let mut out = BsonDocument::new();
    for condition in filter.conditions() {
        match condition {
            Condition::Eq(field, value) => {
                let value = bson::to_bson(value)
                    .map_err(|e| Error::internal(format!("Failed to encode filter: {}", e)))?;
                out.insert(field.clone(), value);
            }
            Condition::NotNull(field) => {
                out.insert(field.clone(), doc! { "$ne": Bson::Null });
            }
        }
    }
    Ok(out)
}

/// MongoDB-backed store.
#[derive(Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connects to MongoDB. The driver connects lazily, so this only fails on
    /// a malformed connection string.
    pub async fn new(config: StoreConfig) -> Result<Self> {
        let mut options = ClientOptions::parse(&config.mongo_url)
            .await
            .map_err(store_error)?;
        options.app_name = Some("feedback-service".to_string());
        options.server_selection_timeout = Some(Duration::from_secs(config.timeout_secs));
        options.connect_timeout = Some(Duration::from_secs(config.timeout_secs));

        let client = Client::with_options(options).map_err(store_error)?;
        let database = client.database(&config.database);

        info!(database = %config.database, "Created MongoDB client");

        Ok(Self { database })
    }

    fn collection(&self, collection: Collection) -> MongoCollection<BsonDocument> {
        self.database.collection(collection.name())
    }

    /// Creates the lookup and ordering indexes. Safe to run repeatedly.
    pub async fn init_indexes(&self) -> Result<()> {
        for collection in Collection::ALL {
            // Analytics events keep client-supplied ids, which may repeat.
            let unique = matches!(collection, Collection::Feedback | Collection::Suggestions);
            let by_id = IndexModel::builder()
                .keys(doc! { "id": 1 })
                .options(IndexOptions::builder().unique(unique).build())
                .build();
            self.collection(collection)
                .create_index(by_id)
                .await
                .map_err(store_error)?;
        }

        for collection in [Collection::Feedback, Collection::Suggestions] {
            let recent = IndexModel::builder().keys(doc! { "created_at": -1 }).build();
            self.collection(collection)
                .create_index(recent)
                .await
                .map_err(store_error)?;
        }

        debug!("MongoDB indexes initialized");
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert(&self, collection: Collection, document: Document) -> Result<()> {
        self.collection(collection)
            .insert_one(to_bson_document(&document)?)
            .await
            .map_err(store_error)?;
        Ok(())
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        options: &FindOptions,
    ) -> Result<Vec<Document>> {
        let handle = self.collection(collection);
        let mut find = handle
            .find(filter_document(filter)?)
            .projection(projection())
            .skip(options.skip);

        if let Some(limit) = options.limit {
            // A zero limit means "no limit" to MongoDB.
            if limit == 0 {
                return Ok(Vec::new());
            }
            find = find.limit(i64::try_from(limit).unwrap_or(i64::MAX));
        }
        if let Some((field, order)) = &options.sort {
            let direction = match order {
                SortOrder::Ascending => 1,
                SortOrder::Descending => -1,
            };
            find = find.sort(doc! { field.as_str(): direction });
        }

        let documents: Vec<BsonDocument> = find
            .await
            .map_err(store_error)?
            .try_collect()
            .await
            .map_err(store_error)?;

        documents.into_iter().map(from_bson_document).collect()
    }

    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>> {
        self.collection(collection)
            .find_one(filter_document(filter)?)
            .projection(projection())
            .await
            .map_err(store_error)?
            .map(from_bson_document)
            .transpose()
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        changes: Document,
    ) -> Result<Option<Document>> {
        let update = doc! { "$set": to_bson_document(&changes)? };
        self.collection(collection)
            .find_one_and_update(filter_document(filter)?, update)
            .return_document(ReturnDocument::After)
            .projection(projection())
            .await
            .map_err(store_error)?
            .map(from_bson_document)
            .transpose()
    }

    async fn increment(
        &self,
        collection: Collection,
        filter: &Filter,
        field: &str,
        by: i64,
    ) -> Result<bool> {
        let result = self
            .collection(collection)
            .update_one(filter_document(filter)?, doc! { "$inc": { field: by } })
            .await
            .map_err(store_error)?;
        Ok(result.matched_count > 0)
    }

    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64> {
        self.collection(collection)
            .count_documents(filter_document(filter)?)
            .await
            .map_err(store_error)
    }

    async fn ping(&self) -> Result<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(store_error)?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "mongo"
    }
}
