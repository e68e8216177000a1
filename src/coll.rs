//! The legacy collection facade.

pub mod options;


use std::time::Duration;

use bson::{oid::ObjectId, Bson, Document};
use tracing::debug;

use self::options::*;
use crate::{
    bridge::{
        is_sequence,
        to_legacy,
        to_legacy_document,
        to_modern_document,
        LegacyDocument,
        LegacyValue,
    },
    concern::{Acknowledgment, WriteConcern},
    driver::DriverCollection,
    error::{Error, Result},
    index::{default_index_name, options::IndexOptions, IndexModel},
    read_preference::{ReadPreference, TagSet},
    reconcile::{legacy_flag, legacy_int, reconcile_write_options},
};

/// `Collection` re-exposes the legacy collection API on top of a
/// [`DriverCollection`] collaborator.
///
/// Every operation accepts legacy-shaped arguments ([`LegacyDocument`]
/// mappings with historical option names such as `safe`, `justOne`,
/// `multiple`, `new`, `remove`) and returns legacy-shaped results. Arguments
/// pass through the document bridge and the option reconciler on the way in;
/// driver results pass back through the bridge on the way out. Errors raised
/// by the driver propagate unchanged.
///
/// Read preference and write concern are collection-scoped configuration,
/// owned exclusively by this instance. Changing them through the setters
/// rebuilds the underlying driver handle and affects all subsequent
/// operations. Serializing concurrent mutation of the same instance is the
/// caller's responsibility; the design assumes single-threaded request
/// handling.
#[derive(Debug)]
pub struct Collection<D: DriverCollection> {
    driver: D,
    name: String,
    write_concern: WriteConcern,
    read_preference: Option<ReadPreference>,
}

impl<D: DriverCollection> Collection<D> {
    /// Creates a collection over `driver` with the given options.
    ///
    /// When no write concern is given, the legacy default applies:
    /// acknowledged by one node with no time limit.
    pub fn new(driver: D, options: Option<CollectionOptions>) -> Self {
        let options = options.unwrap_or_default();
        let write_concern = options.write_concern.unwrap_or_else(WriteConcern::acknowledged);
        let read_preference = options.read_preference;
        let name = driver.name().to_string();

        let mut coll = Self {
            driver,
            name,
            write_concern,
            read_preference,
        };
        coll.rebuild_driver();
        coll
    }

    /// The name of this collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The write concern applied to operations that do not override it.
    pub fn get_write_concern(&self) -> &WriteConcern {
        &self.write_concern
    }

    /// The acknowledgement level of the collection write concern.
    ///
    /// The legacy API exposed this as a magic `w` field on the collection.
    pub fn w(&self) -> Option<&Acknowledgment> {
        self.write_concern.w.as_ref()
    }

    /// The time limit of the collection write concern.
    ///
    /// The legacy API exposed this as a magic `wtimeout` field on the
    /// collection.
    pub fn w_timeout(&self) -> Option<Duration> {
        self.write_concern.w_timeout
    }

    /// Replaces the collection write concern and rebuilds the driver handle.
    ///
    /// Passing `None` for `w_timeout` keeps the currently configured time
    /// limit.
    pub fn set_write_concern(&mut self, w: impl Into<Acknowledgment>, w_timeout: Option<Duration>) {
        self.write_concern = WriteConcern {
            w: Some(w.into()),
            w_timeout: w_timeout.or(self.write_concern.w_timeout),
            journal: self.write_concern.journal,
        };
        debug!(collection = self.name.as_str(), "write concern changed");
        self.rebuild_driver();
    }

    /// The read preference attached to query and command paths.
    pub fn get_read_preference(&self) -> Option<&ReadPreference> {
        self.read_preference.as_ref()
    }

    /// Replaces the collection read preference from its legacy form (a mode
    /// string and an ordered sequence of tag sets) and rebuilds the driver
    /// handle.
    pub fn set_read_preference(&mut self, mode: &str, tag_sets: Vec<TagSet>) -> Result<()> {
        self.read_preference = Some(ReadPreference::from_legacy(mode, tag_sets)?);
        debug!(
            collection = self.name.as_str(),
            mode, "read preference changed"
        );
        self.rebuild_driver();
        Ok(())
    }

    /// Collection-scoped configuration changed; derive a fresh driver handle
    /// from it.
    fn rebuild_driver(&mut self) {
        let options = CollectionOptions {
            read_preference: self.read_preference.clone(),
            write_concern: Some(self.write_concern.clone()),
        };
        self.driver = self.driver.with_options(options);
    }

    /// Inserts a single document (legacy `insert`).
    ///
    /// If the document has no `_id`, one is generated and written back into
    /// `document` so the caller can observe it, matching the legacy client
    /// behavior of generating identifiers client-side.
    pub fn insert(
        &self,
        document: &mut LegacyDocument,
        options: &LegacyDocument,
    ) -> Result<LegacyDocument> {
        debug!(collection = self.name.as_str(), "legacy insert");
        let reconciled = reconcile_write_options(options, Some(&self.write_concern));
        ensure_id(document);
        self.driver.insert_one(
            to_modern_document(document),
            InsertOneOptions {
                write_concern: reconciled.write_concern,
            },
        )?;
        Ok(write_result(0))
    }

    /// Inserts a batch of documents (legacy `batchInsert`).
    ///
    /// The legacy `continueOnError` flag maps to the modern `ordered` option
    /// inverted.
    pub fn batch_insert(
        &self,
        documents: &mut [LegacyDocument],
        options: &LegacyDocument,
    ) -> Result<LegacyDocument> {
        debug!(
            collection = self.name.as_str(),
            count = documents.len(),
            "legacy batch insert"
        );
        let reconciled = reconcile_write_options(options, Some(&self.write_concern));
        let ordered = !flag(options, "continueOnError");
        let modern = documents
            .iter_mut()
            .map(|document| {
                ensure_id(document);
                to_modern_document(document)
            })
            .collect();
        self.driver.insert_many(
            modern,
            InsertManyOptions {
                ordered: Some(ordered),
                write_concern: reconciled.write_concern,
            },
        )?;
        Ok(write_result(0))
    }

    /// Updates the documents matching `criteria` (legacy `update`).
    ///
    /// The legacy `multiple` flag selects between updating one document and
    /// updating all matches; `upsert` is honored.
    pub fn update(
        &self,
        criteria: &LegacyDocument,
        new_object: &LegacyDocument,
        options: &LegacyDocument,
    ) -> Result<LegacyDocument> {
        debug!(collection = self.name.as_str(), "legacy update");
        let reconciled = reconcile_write_options(options, Some(&self.write_concern));
        let update_options = UpdateOptions {
            upsert: Some(flag(options, "upsert")),
            write_concern: reconciled.write_concern,
        };
        let filter = to_modern_document(criteria);
        let update = to_modern_document(new_object);
        let result = if flag(options, "multiple") {
            self.driver.update_many(filter, update, update_options)?
        } else {
            self.driver.update_one(filter, update, update_options)?
        };

        let n = result.matched_count + u64::from(result.upserted_id.is_some());
        let mut legacy = write_result(n as i64);
        legacy.insert(
            "updatedExisting",
            result.matched_count > 0 && result.upserted_id.is_none(),
        );
        if let Some(id) = result.upserted_id {
            legacy.insert("upserted", to_legacy(&id));
        }
        Ok(legacy)
    }

    /// Removes the documents matching `criteria` (legacy `remove`).
    ///
    /// The legacy `justOne` flag selects between deleting one document and
    /// deleting all matches.
    pub fn remove(
        &self,
        criteria: &LegacyDocument,
        options: &LegacyDocument,
    ) -> Result<LegacyDocument> {
        debug!(collection = self.name.as_str(), "legacy remove");
        let reconciled = reconcile_write_options(options, Some(&self.write_concern));
        let delete_options = DeleteOptions {
            write_concern: reconciled.write_concern,
        };
        let filter = to_modern_document(criteria);
        let result = if flag(options, "justOne") {
            self.driver.delete_one(filter, delete_options)?
        } else {
            self.driver.delete_many(filter, delete_options)?
        };
        Ok(write_result(result.deleted_count as i64))
    }

    /// Saves a document (legacy `save`): an upsert by `_id` when the document
    /// carries one, an insert otherwise.
    pub fn save(
        &self,
        document: &mut LegacyDocument,
        options: &LegacyDocument,
    ) -> Result<LegacyDocument> {
        match document.get("_id").cloned() {
            Some(id) => {
                let mut criteria = LegacyDocument::new();
                criteria.insert("_id", id);
                let mut save_options = options.clone();
                save_options.insert("upsert", true);
                save_options.insert("multiple", false);
                self.update(&criteria, document, &save_options)
            }
            None => self.insert(document, options),
        }
    }

    /// Finds the documents matching `query` (legacy `find`).
    ///
    /// `fields` may be either a map of field name to inclusion/exclusion or,
    /// in the older legacy form, a plain sequence of field names, which is
    /// translated into an inclusion projection.
    pub fn find(
        &self,
        query: Option<&LegacyDocument>,
        fields: Option<&LegacyDocument>,
    ) -> Result<Vec<LegacyDocument>> {
        let options = FindOptions {
            projection: legacy_projection(fields),
            sort: None,
            limit: None,
            skip: None,
            read_preference: self.read_preference.clone(),
        };
        let documents = self.driver.find(query_document(query), options)?;
        Ok(documents.iter().map(to_legacy_document).collect())
    }

    /// Finds at most one document matching `query` (legacy `findOne`).
    pub fn find_one(
        &self,
        query: Option<&LegacyDocument>,
        fields: Option<&LegacyDocument>,
    ) -> Result<Option<LegacyDocument>> {
        let options = FindOneOptions {
            projection: legacy_projection(fields),
            sort: None,
            read_preference: self.read_preference.clone(),
        };
        let document = self.driver.find_one(query_document(query), options)?;
        Ok(document.as_ref().map(to_legacy_document))
    }

    /// Finds the distinct values of `key` across the documents matching
    /// `query` (legacy `distinct`), returned in the legacy sequence shape.
    pub fn distinct(&self, key: &str, query: Option<&LegacyDocument>) -> Result<LegacyDocument> {
        let values = self.driver.distinct(
            key,
            query_document(query),
            DistinctOptions {
                read_preference: self.read_preference.clone(),
            },
        )?;
        let mut sequence = LegacyDocument::new();
        for (index, value) in values.iter().enumerate() {
            sequence.insert(index.to_string(), to_legacy(value));
        }
        Ok(sequence)
    }

    /// Counts the documents matching `query` (legacy `count`), honoring the
    /// legacy `limit` and `skip` options.
    pub fn count(&self, query: Option<&LegacyDocument>, options: &LegacyDocument) -> Result<u64> {
        let count_options = CountOptions {
            limit: int_option(options, "limit"),
            skip: int_option(options, "skip"),
            read_preference: self.read_preference.clone(),
        };
        self.driver.count(query_document(query), count_options)
    }

    /// Runs an aggregation (legacy `aggregate`).
    ///
    /// The argument is disambiguated by key pattern: a sequence is a full
    /// pipeline of stages in order; any other mapping is a single stage. The
    /// result is returned in the legacy `{ok, result}` shape.
    pub fn aggregate(
        &self,
        pipeline: &LegacyDocument,
        options: &LegacyDocument,
    ) -> Result<LegacyDocument> {
        debug!(collection = self.name.as_str(), "legacy aggregate");
        let stages = if is_sequence(pipeline) {
            pipeline
                .iter()
                .map(|(_, stage)| match stage {
                    LegacyValue::Mapping(stage) => Ok(to_modern_document(stage)),
                    _ => Err(Error::conversion(
                        "every aggregation pipeline stage must be a mapping",
                    )),
                })
                .collect::<Result<Vec<_>>>()?
        } else {
            vec![to_modern_document(pipeline)]
        };

        let aggregate_options = AggregateOptions {
            allow_disk_use: options.get("allowDiskUse").and_then(legacy_flag),
            read_preference: self.read_preference.clone(),
        };
        let documents = self.driver.aggregate(stages, aggregate_options)?;

        let mut result = LegacyDocument::new();
        result.insert("ok", 1.0);
        result.insert(
            "result",
            to_legacy(&Bson::Array(
                documents.into_iter().map(Bson::Document).collect(),
            )),
        );
        Ok(result)
    }

    /// Atomically modifies and returns a single document (legacy
    /// `findAndModify`).
    ///
    /// The legacy `remove` flag selects deletion instead of update; the
    /// legacy `new` flag returns the post-modification document.
    pub fn find_and_modify(
        &self,
        query: &LegacyDocument,
        update: Option<&LegacyDocument>,
        fields: Option<&LegacyDocument>,
        options: &LegacyDocument,
    ) -> Result<Option<LegacyDocument>> {
        debug!(collection = self.name.as_str(), "legacy findAndModify");
        let reconciled = reconcile_write_options(options, Some(&self.write_concern));
        let filter = to_modern_document(query);
        let projection = legacy_projection(fields);
        let sort = mapping_option(options, "sort");

        let document = if flag(options, "remove") {
            self.driver.find_one_and_delete(
                filter,
                FindOneAndDeleteOptions {
                    projection,
                    sort,
                    write_concern: reconciled.write_concern,
                },
            )?
        } else {
            let update = update.ok_or_else(|| {
                Error::invalid_argument(
                    "findAndModify requires an update document unless the remove flag is set",
                )
            })?;
            let return_document = if flag(options, "new") {
                ReturnDocument::After
            } else {
                ReturnDocument::Before
            };
            self.driver.find_one_and_update(
                filter,
                to_modern_document(update),
                FindOneAndUpdateOptions {
                    projection,
                    sort,
                    upsert: Some(flag(options, "upsert")),
                    return_document: Some(return_document),
                    write_concern: reconciled.write_concern,
                },
            )?
        };
        Ok(document.as_ref().map(to_legacy_document))
    }

    /// Creates an index (legacy `ensureIndex`).
    ///
    /// `keys` is either a single field name (indexed ascending) or an ordered
    /// mapping of field to index type. Recognized legacy options (`name`,
    /// `unique`, `sparse`, `background`, `expireAfterSeconds`) populate the
    /// index options; write concern spellings are reconciled as on any other
    /// write path.
    pub fn ensure_index(
        &self,
        keys: &LegacyValue,
        options: &LegacyDocument,
    ) -> Result<LegacyDocument> {
        debug!(collection = self.name.as_str(), "legacy ensureIndex");
        let reconciled = reconcile_write_options(options, Some(&self.write_concern));
        let keys = index_keys(keys)?;

        let mut index_options = IndexOptions::default();
        if let Some(LegacyValue::String(name)) = options.get("name") {
            index_options.name = Some(name.clone());
        }
        index_options.unique = options.get("unique").and_then(legacy_flag);
        index_options.sparse = options.get("sparse").and_then(legacy_flag);
        index_options.background = options.get("background").and_then(legacy_flag);
        index_options.expire_after = options
            .get("expireAfterSeconds")
            .and_then(legacy_int)
            .and_then(|secs| u64::try_from(secs).ok())
            .map(Duration::from_secs);

        let mut model = IndexModel {
            keys,
            options: Some(index_options),
        };
        model.update_name();

        self.driver.create_index(
            model,
            CreateIndexOptions {
                write_concern: reconciled.write_concern,
            },
        )?;
        Ok(ok_result())
    }

    /// Drops a single index (legacy `deleteIndex`).
    ///
    /// `spec` is either a field name, which maps to the default ascending
    /// index name for that field, or a key mapping whose derived name is
    /// dropped.
    pub fn delete_index(&self, spec: &LegacyValue) -> Result<LegacyDocument> {
        let name = match spec {
            LegacyValue::String(field) => format!("{field}_1"),
            LegacyValue::Mapping(keys) => default_index_name(&to_modern_document(keys)),
            _ => {
                return Err(Error::invalid_argument(
                    "index specification must be a field name or a key mapping",
                ))
            }
        };
        self.driver.drop_index(&name, DropIndexOptions::default())?;
        Ok(ok_result())
    }

    /// Drops every index on the collection (legacy `deleteIndexes`).
    pub fn delete_indexes(&self) -> Result<LegacyDocument> {
        self.driver.drop_indexes(DropIndexOptions::default())?;
        Ok(ok_result())
    }

    /// Lists the indexes on the collection (legacy `getIndexInfo`), each in
    /// the legacy document shape.
    pub fn get_index_info(&self) -> Result<Vec<LegacyDocument>> {
        let indexes = self.driver.list_indexes()?;
        indexes
            .iter()
            .map(|index| {
                let document = bson::to_document(index)
                    .map_err(|e| Error::conversion(format!("index model: {e}")))?;
                Ok(to_legacy_document(&document))
            })
            .collect()
    }
}

fn ensure_id(document: &mut LegacyDocument) {
    if !document.contains_key("_id") {
        document.insert("_id", to_legacy(&Bson::ObjectId(ObjectId::new())));
    }
}

/// The legacy acknowledged-write result shape.
fn write_result(n: i64) -> LegacyDocument {
    let mut result = LegacyDocument::new();
    result.insert("ok", 1.0);
    result.insert("n", n);
    result.insert("err", LegacyValue::Null);
    result.insert("errmsg", LegacyValue::Null);
    result
}

fn ok_result() -> LegacyDocument {
    let mut result = LegacyDocument::new();
    result.insert("ok", 1.0);
    result
}

fn flag(options: &LegacyDocument, key: &str) -> bool {
    options.get(key).and_then(legacy_flag).unwrap_or(false)
}

fn int_option(options: &LegacyDocument, key: &str) -> Option<u64> {
    options
        .get(key)
        .and_then(legacy_int)
        .and_then(|value| u64::try_from(value).ok())
}

fn mapping_option(options: &LegacyDocument, key: &str) -> Option<Document> {
    match options.get(key) {
        Some(LegacyValue::Mapping(mapping)) => Some(to_modern_document(mapping)),
        _ => None,
    }
}

fn query_document(query: Option<&LegacyDocument>) -> Document {
    query.map(to_modern_document).unwrap_or_default()
}

/// Translates the legacy `fields` argument into a modern projection. The older
/// legacy form is a plain sequence of field names, which becomes an inclusion
/// projection; a map passes through the bridge verbatim.
fn legacy_projection(fields: Option<&LegacyDocument>) -> Option<Document> {
    let fields = fields?;
    if fields.is_empty() {
        return None;
    }
    if is_sequence(fields) {
        let mut projection = Document::new();
        for (_, value) in fields.iter() {
            if let LegacyValue::String(name) = value {
                projection.insert(name.clone(), 1);
            }
        }
        Some(projection)
    } else {
        Some(to_modern_document(fields))
    }
}

fn index_keys(keys: &LegacyValue) -> Result<Document> {
    match keys {
        LegacyValue::String(field) => {
            let mut keys = Document::new();
            keys.insert(field.clone(), 1);
            Ok(keys)
        }
        LegacyValue::Mapping(mapping) => Ok(to_modern_document(mapping)),
        _ => Err(Error::invalid_argument(
            "index keys must be a field name or a key mapping",
        )),
    }
}
