//! Contains the types of results returned by the driver collaborator's CRUD
//! operations.

use std::collections::HashMap;

use bson::Bson;
use serde::Serialize;

/// The result of a [`DriverCollection::insert_one`](crate::driver::DriverCollection::insert_one)
/// operation.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct InsertOneResult {
    /// The `_id` field of the document inserted.
    pub inserted_id: Bson,
}

/// The result of a [`DriverCollection::insert_many`](crate::driver::DriverCollection::insert_many)
/// operation.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct InsertManyResult {
    /// The `_id` field of the documents inserted, keyed by their position in
    /// the inserted batch.
    pub inserted_ids: HashMap<usize, Bson>,
}

/// The result of a [`DriverCollection::update_one`](crate::driver::DriverCollection::update_one)
/// or [`DriverCollection::update_many`](crate::driver::DriverCollection::update_many) operation.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct UpdateResult {
    /// The number of documents that matched the filter.
    pub matched_count: u64,

    /// The number of documents that were modified by the operation.
    pub modified_count: u64,

    /// The `_id` field of the upserted document.
    pub upserted_id: Option<Bson>,
}

/// The result of a [`DriverCollection::delete_one`](crate::driver::DriverCollection::delete_one)
/// or [`DriverCollection::delete_many`](crate::driver::DriverCollection::delete_many) operation.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct DeleteResult {
    /// The number of documents deleted by the operation.
    pub deleted_count: u64,
}
