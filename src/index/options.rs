//! Options for the index model.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use typed_builder::TypedBuilder;

use crate::serde_util;

/// These are the valid options for specifying an [`IndexModel`](crate::IndexModel).
#[skip_serializing_none]
#[derive(Clone, Debug, Default, TypedBuilder, Serialize, Deserialize, PartialEq)]
#[builder(field_defaults(default, setter(into)))]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct IndexOptions {
    /// Specifies a name outside the default generated name.
    pub name: Option<String>,

    /// Forces the index to be unique so the collection will not accept
    /// documents where the index key value matches an existing value in the
    /// index.
    pub unique: Option<bool>,

    /// If true, the index only references documents with the specified field.
    pub sparse: Option<bool>,

    /// Specifies a TTL to control how long documents are retained in the
    /// collection.
    #[serde(
        rename = "expireAfterSeconds",
        default,
        with = "serde_util::duration_option_as_int_seconds"
    )]
    pub expire_after: Option<Duration>,

    /// Whether the index should be built in the background, the historical
    /// default for the legacy `ensureIndex` call.
    pub background: Option<bool>,
}
