//! Contains the index model passed to the driver collaborator's index
//! operations.

pub mod options;

use bson::{Bson, Document};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use self::options::IndexOptions;

/// Specifies the fields and options for an index.
#[derive(Clone, Debug, Default, TypedBuilder, Serialize, Deserialize)]
#[builder(field_defaults(default, setter(into)))]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct IndexModel {
    /// Specifies the index's fields. For each field, specify a key-value pair
    /// in which the key is the name of the field to index and the value is
    /// the index type.
    #[serde(rename = "key")]
    pub keys: Document,

    /// The options for the index.
    #[serde(flatten)]
    pub options: Option<IndexOptions>,
}

impl IndexModel {
    /// If the caller did not specify a name, generate and set it. Otherwise, do nothing.
    pub(crate) fn update_name(&mut self) {
        if self
            .options
            .as_ref()
            .and_then(|o| o.name.as_ref())
            .is_none()
        {
            let name = default_index_name(&self.keys);
            self.options.get_or_insert(IndexOptions::default()).name = Some(name);
        }
    }

    pub(crate) fn get_name(&self) -> Option<String> {
        self.options.as_ref().and_then(|o| o.name.as_ref()).cloned()
    }
}

/// The name the server derives from a key specification when none is given:
/// each field paired with its index type, joined with underscores.
pub(crate) fn default_index_name(keys: &Document) -> String {
    fn format_kv(kv: (&String, &Bson)) -> String {
        if let Bson::String(s) = kv.1 {
            format!("{}_{}", kv.0, s)
        } else {
            format!("{}_{}", kv.0, kv.1)
        }
    }
    let key_names: Vec<String> = keys.iter().map(format_kv).collect();
    key_names.join("_")
}
