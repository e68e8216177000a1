//! Options for the operations of the driver collaborator.

use bson::Document;
use serde::{Serialize, Serializer};
use serde_with::skip_serializing_none;
use typed_builder::TypedBuilder;

use crate::{concern::WriteConcern, read_preference::ReadPreference};

/// These are the valid options for constructing a
/// [`Collection`](crate::Collection) and for
/// [`DriverCollection::with_options`](crate::driver::DriverCollection::with_options).
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option)))]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct CollectionOptions {
    /// The default read preference for operations.
    pub read_preference: Option<ReadPreference>,

    /// The default write concern for operations.
    pub write_concern: Option<WriteConcern>,
}

/// Specifies the options to a
/// [`DriverCollection::insert_one`](crate::driver::DriverCollection::insert_one) operation.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option)))]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct InsertOneOptions {
    /// The write concern for the operation.
    pub write_concern: Option<WriteConcern>,
}

/// Specifies the options to a
/// [`DriverCollection::insert_many`](crate::driver::DriverCollection::insert_many) operation.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option)))]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct InsertManyOptions {
    /// Whether the documents must be inserted in the order given.
    pub ordered: Option<bool>,

    /// The write concern for the operation.
    pub write_concern: Option<WriteConcern>,
}

/// Specifies the options to a
/// [`DriverCollection::update_one`](crate::driver::DriverCollection::update_one) or
/// [`DriverCollection::update_many`](crate::driver::DriverCollection::update_many) operation.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option)))]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct UpdateOptions {
    /// If true, insert a document if no matching document is found.
    pub upsert: Option<bool>,

    /// The write concern for the operation.
    pub write_concern: Option<WriteConcern>,
}

/// Specifies the options to a
/// [`DriverCollection::delete_one`](crate::driver::DriverCollection::delete_one) or
/// [`DriverCollection::delete_many`](crate::driver::DriverCollection::delete_many) operation.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option)))]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct DeleteOptions {
    /// The write concern for the operation.
    pub write_concern: Option<WriteConcern>,
}

/// Specifies the options to a
/// [`DriverCollection::find`](crate::driver::DriverCollection::find) operation.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option)))]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct FindOptions {
    /// Limits the fields of the document being returned.
    pub projection: Option<Document>,

    /// The order of the documents for the purposes of the operation.
    pub sort: Option<Document>,

    /// The maximum number of documents to query.
    pub limit: Option<i64>,

    /// The number of documents to skip before counting.
    pub skip: Option<u64>,

    /// The read preference for the operation.
    pub read_preference: Option<ReadPreference>,
}

/// Specifies the options to a
/// [`DriverCollection::find_one`](crate::driver::DriverCollection::find_one) operation.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option)))]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct FindOneOptions {
    /// Limits the fields of the document being returned.
    pub projection: Option<Document>,

    /// The order of the documents for the purposes of the operation.
    pub sort: Option<Document>,

    /// The read preference for the operation.
    pub read_preference: Option<ReadPreference>,
}

/// Specifies the options to a
/// [`DriverCollection::aggregate`](crate::driver::DriverCollection::aggregate) operation.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option)))]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct AggregateOptions {
    /// Enables writing to temporary files. When set to true, aggregation
    /// stages can write data to the _tmp subdirectory in the dbPath directory.
    pub allow_disk_use: Option<bool>,

    /// The read preference for the operation.
    pub read_preference: Option<ReadPreference>,
}

/// Specifies the options to a
/// [`DriverCollection::distinct`](crate::driver::DriverCollection::distinct) operation.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option)))]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct DistinctOptions {
    /// The read preference for the operation.
    pub read_preference: Option<ReadPreference>,
}

/// Specifies the options to a
/// [`DriverCollection::count`](crate::driver::DriverCollection::count) operation.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option)))]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct CountOptions {
    /// The maximum number of documents to count.
    pub limit: Option<u64>,

    /// The number of documents to skip before counting.
    pub skip: Option<u64>,

    /// The read preference for the operation.
    pub read_preference: Option<ReadPreference>,
}

/// Specifies the options to a
/// [`DriverCollection::create_index`](crate::driver::DriverCollection::create_index) operation.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option)))]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct CreateIndexOptions {
    /// The write concern for the operation.
    pub write_concern: Option<WriteConcern>,
}

/// Specifies the options to a
/// [`DriverCollection::drop_index`](crate::driver::DriverCollection::drop_index) or
/// [`DriverCollection::drop_indexes`](crate::driver::DriverCollection::drop_indexes) operation.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option)))]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct DropIndexOptions {
    /// The write concern for the operation.
    pub write_concern: Option<WriteConcern>,
}

/// Specifies whether a
/// [`DriverCollection::find_one_and_update`](crate::driver::DriverCollection::find_one_and_update)
/// operation should return the document before or after modification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReturnDocument {
    /// Return the document after modification.
    After,
    /// Return the document before modification.
    Before,
}

impl ReturnDocument {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            ReturnDocument::After => "after",
            ReturnDocument::Before => "before",
        }
    }
}

impl Serialize for ReturnDocument {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Specifies the options to a
/// [`DriverCollection::find_one_and_update`](crate::driver::DriverCollection::find_one_and_update)
/// operation.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option)))]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct FindOneAndUpdateOptions {
    /// Limits the fields of the document being returned.
    pub projection: Option<Document>,

    /// The order of the documents for the purposes of the operation.
    pub sort: Option<Document>,

    /// If true, insert a document if no matching document is found.
    pub upsert: Option<bool>,

    /// Whether the operation should return the document before or after
    /// modification.
    pub return_document: Option<ReturnDocument>,

    /// The write concern for the operation.
    pub write_concern: Option<WriteConcern>,
}

/// Specifies the options to a
/// [`DriverCollection::find_one_and_delete`](crate::driver::DriverCollection::find_one_and_delete)
/// operation.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option)))]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct FindOneAndDeleteOptions {
    /// Limits the fields of the document being returned.
    pub projection: Option<Document>,

    /// The order of the documents for the purposes of the operation.
    pub sort: Option<Document>,

    /// The write concern for the operation.
    pub write_concern: Option<WriteConcern>,
}
