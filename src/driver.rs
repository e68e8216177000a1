//! The modern driver collaborator consumed by the compatibility layer.
//!
//! Everything that involves I/O lives behind [`DriverCollection`]: connection
//! management, the wire protocol, cursor iteration, server-side validation.
//! The compatibility layer only reshapes arguments into the modern document
//! and option types accepted here and reshapes results back into the legacy
//! forms. Errors raised by an implementation must be returned as-is; the
//! layer above propagates them unchanged.

use bson::{Bson, Document};

use crate::{
    coll::options::{
        AggregateOptions,
        CollectionOptions,
        CountOptions,
        CreateIndexOptions,
        DeleteOptions,
        DistinctOptions,
        DropIndexOptions,
        FindOneAndDeleteOptions,
        FindOneAndUpdateOptions,
        FindOneOptions,
        FindOptions,
        InsertManyOptions,
        InsertOneOptions,
        UpdateOptions,
    },
    error::Result,
    index::IndexModel,
    results::{DeleteResult, InsertManyResult, InsertOneResult, UpdateResult},
};

/// A collection handle of the modern driver.
///
/// All operations are blocking request/response round trips; no timeouts,
/// cancellation, or retries are expected of the compatibility layer above.
pub trait DriverCollection: Sized {
    /// The name of the collection this handle points at.
    fn name(&self) -> &str;

    /// Returns a new handle over the same collection with different
    /// collection-scoped options. The compatibility layer calls this whenever
    /// its read preference or write concern configuration changes.
    fn with_options(&self, options: CollectionOptions) -> Self;

    /// Inserts `document` into the collection.
    fn insert_one(&self, document: Document, options: InsertOneOptions) -> Result<InsertOneResult>;

    /// Inserts `documents` into the collection.
    fn insert_many(
        &self,
        documents: Vec<Document>,
        options: InsertManyOptions,
    ) -> Result<InsertManyResult>;

    /// Updates at most one document matching `filter`.
    fn update_one(
        &self,
        filter: Document,
        update: Document,
        options: UpdateOptions,
    ) -> Result<UpdateResult>;

    /// Updates all documents matching `filter`.
    fn update_many(
        &self,
        filter: Document,
        update: Document,
        options: UpdateOptions,
    ) -> Result<UpdateResult>;

    /// Deletes at most one document matching `filter`.
    fn delete_one(&self, filter: Document, options: DeleteOptions) -> Result<DeleteResult>;

    /// Deletes all documents matching `filter`.
    fn delete_many(&self, filter: Document, options: DeleteOptions) -> Result<DeleteResult>;

    /// Finds the documents matching `filter`.
    fn find(&self, filter: Document, options: FindOptions) -> Result<Vec<Document>>;

    /// Finds at most one document matching `filter`.
    fn find_one(&self, filter: Document, options: FindOneOptions) -> Result<Option<Document>>;

    /// Runs an aggregation pipeline over the collection.
    fn aggregate(&self, pipeline: Vec<Document>, options: AggregateOptions)
        -> Result<Vec<Document>>;

    /// Finds the distinct values of the field `field_name` across the
    /// documents matching `filter`.
    fn distinct(
        &self,
        field_name: &str,
        filter: Document,
        options: DistinctOptions,
    ) -> Result<Vec<Bson>>;

    /// Counts the documents matching `filter`.
    fn count(&self, filter: Document, options: CountOptions) -> Result<u64>;

    /// Creates `index` on the collection, returning its name.
    fn create_index(&self, index: IndexModel, options: CreateIndexOptions) -> Result<String>;

    /// Drops the index named `name`.
    fn drop_index(&self, name: &str, options: DropIndexOptions) -> Result<()>;

    /// Drops all indexes on the collection.
    fn drop_indexes(&self, options: DropIndexOptions) -> Result<()>;

    /// Lists the indexes on the collection.
    fn list_indexes(&self) -> Result<Vec<IndexModel>>;

    /// Atomically finds a document matching `filter` and updates it.
    fn find_one_and_update(
        &self,
        filter: Document,
        update: Document,
        options: FindOneAndUpdateOptions,
    ) -> Result<Option<Document>>;

    /// Atomically finds a document matching `filter` and deletes it.
    fn find_one_and_delete(
        &self,
        filter: Document,
        options: FindOneAndDeleteOptions,
    ) -> Result<Option<Document>>;
}
