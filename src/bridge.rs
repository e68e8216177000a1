//! Bidirectional conversion between the legacy document representation and the
//! modern BSON document model.
//!
//! The legacy representation is a single ordered mapping type, PHP-array-like:
//! whether a mapping is "a list" or "an object" is not encoded in the value
//! itself but derived from its key pattern. A mapping whose keys are exactly
//! `"0", "1", ..., "n-1"` in that order is a sequence; any other key pattern
//! (string keys, gaps, a non-zero start) is a map. [`is_sequence`] is the
//! single shared predicate implementing that rule, and both conversion
//! directions derive it identically so that round-trips are stable.
//!
//! The one inherent lossy case: a modern document whose keys happen to be
//! `"0", "1", ...` converts to a legacy mapping that is indistinguishable from
//! a list, so converting it back yields an array. Callers that construct such
//! documents on purpose cannot round-trip them through the legacy shape.

#[cfg(test)]
mod test;

use bson::{oid::ObjectId, Bson, Document};

/// A value in a legacy document.
///
/// Scalars map one-to-one onto their modern counterparts. All containers are
/// represented by the single [`Mapping`](LegacyValue::Mapping) variant, whose
/// sequence-versus-map interpretation is derived by [`is_sequence`]. Modern
/// values with no legacy equivalent (timestamps, binary data, and so on) are
/// carried unchanged in the [`Modern`](LegacyValue::Modern) variant rather
/// than dropped, so unknown scalar subtypes survive a round-trip.
#[derive(Clone, Debug, PartialEq)]
pub enum LegacyValue {
    /// A null value.
    Null,
    /// A boolean value.
    Boolean(bool),
    /// A 32-bit integer.
    Int32(i32),
    /// A 64-bit integer.
    Int64(i64),
    /// A double-precision floating point value.
    Double(f64),
    /// A string value.
    String(String),
    /// An ordered mapping, ambiguous between a list and a map.
    Mapping(LegacyDocument),
    /// A modern value with no legacy representation, passed through unchanged.
    Modern(Bson),
}

/// An ordered mapping from string key to [`LegacyValue`].
///
/// Key insertion order is preserved exactly; re-inserting an existing key
/// replaces its value in place without moving it, matching the behavior of
/// the legacy runtime this representation is modeled on.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LegacyDocument {
    entries: Vec<(String, LegacyValue)>,
}

impl LegacyDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of entries in the document.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sets `key` to `value`. An existing entry is overwritten in place; a new
    /// entry is appended.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<LegacyValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Gets the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&LegacyValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Removes and returns the value for `key`, if present.
    pub fn remove(&mut self, key: &str) -> Option<LegacyValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Whether the document contains `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LegacyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl FromIterator<(String, LegacyValue)> for LegacyDocument {
    fn from_iter<I: IntoIterator<Item = (String, LegacyValue)>>(iter: I) -> Self {
        let mut doc = LegacyDocument::new();
        for (key, value) in iter {
            doc.insert(key, value);
        }
        doc
    }
}

impl IntoIterator for LegacyDocument {
    type Item = (String, LegacyValue);
    type IntoIter = std::vec::IntoIter<(String, LegacyValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl From<bool> for LegacyValue {
    fn from(value: bool) -> Self {
        LegacyValue::Boolean(value)
    }
}

impl From<i32> for LegacyValue {
    fn from(value: i32) -> Self {
        LegacyValue::Int32(value)
    }
}

impl From<i64> for LegacyValue {
    fn from(value: i64) -> Self {
        LegacyValue::Int64(value)
    }
}

impl From<f64> for LegacyValue {
    fn from(value: f64) -> Self {
        LegacyValue::Double(value)
    }
}

impl From<&str> for LegacyValue {
    fn from(value: &str) -> Self {
        LegacyValue::String(value.to_string())
    }
}

impl From<String> for LegacyValue {
    fn from(value: String) -> Self {
        LegacyValue::String(value)
    }
}

impl From<LegacyDocument> for LegacyValue {
    fn from(value: LegacyDocument) -> Self {
        LegacyValue::Mapping(value)
    }
}

impl From<Bson> for LegacyValue {
    fn from(value: Bson) -> Self {
        to_legacy(&value)
    }
}

impl From<Document> for LegacyDocument {
    fn from(value: Document) -> Self {
        to_legacy_document(&value)
    }
}

/// Whether `doc` is interpreted as a sequence: true iff its keys are exactly
/// `"0", "1", ..., "n-1"` in ascending contiguous order. The empty mapping is
/// a sequence.
///
/// Only canonical integer spellings count: `"01"` is a string key, not index 1.
pub fn is_sequence(doc: &LegacyDocument) -> bool {
    doc.keys()
        .enumerate()
        .all(|(index, key)| key == index.to_string())
}

/// The legacy wire form of a canonical identifier: a mapping whose only entry
/// is `$id` holding the 24-character hex spelling.
const ID_MARKER: &str = "$id";

fn as_object_id(doc: &LegacyDocument) -> Option<ObjectId> {
    if doc.len() != 1 {
        return None;
    }
    let (key, value) = doc.iter().next()?;
    if key != ID_MARKER {
        return None;
    }
    match value {
        LegacyValue::String(hex) => ObjectId::parse_str(hex).ok(),
        _ => None,
    }
}

/// Converts a legacy document into its modern form, deciding at every nesting
/// level whether the mapping is a sequence or a map.
///
/// A mapping in the legacy identifier wire form becomes a canonical
/// [`ObjectId`] rather than staying a plain map, since identifier equality and
/// indexing on the modern side depend on the type, not just the byte content.
/// This function never fails for well-formed input.
pub fn to_modern(doc: &LegacyDocument) -> Bson {
    if let Some(id) = as_object_id(doc) {
        return Bson::ObjectId(id);
    }
    if is_sequence(doc) {
        Bson::Array(doc.iter().map(|(_, value)| to_modern_value(value)).collect())
    } else {
        Bson::Document(to_modern_document(doc))
    }
}

/// Converts a legacy document into a modern [`Document`], keeping every key
/// verbatim regardless of key pattern.
///
/// This is the conversion for positions where the modern side requires a
/// document (filters, option maps); values are still converted recursively
/// with full sequence/map disambiguation.
pub fn to_modern_document(doc: &LegacyDocument) -> Document {
    let mut modern = Document::new();
    for (key, value) in doc.iter() {
        modern.insert(key, to_modern_value(value));
    }
    modern
}

/// Converts a single legacy value into its modern form.
pub fn to_modern_value(value: &LegacyValue) -> Bson {
    match value {
        LegacyValue::Null => Bson::Null,
        LegacyValue::Boolean(b) => Bson::Boolean(*b),
        LegacyValue::Int32(i) => Bson::Int32(*i),
        LegacyValue::Int64(i) => Bson::Int64(*i),
        LegacyValue::Double(d) => Bson::Double(*d),
        LegacyValue::String(s) => Bson::String(s.clone()),
        LegacyValue::Mapping(doc) => to_modern(doc),
        LegacyValue::Modern(bson) => bson.clone(),
    }
}

/// Converts a modern value into its legacy form.
///
/// Arrays become zero-indexed ordered mappings. Documents keep their keys
/// verbatim, including keys that happen to look sequential; that is the
/// documented one-way ambiguity of the legacy representation. Canonical
/// identifiers become the `$id` wire form. Modern scalar subtypes with no
/// legacy equivalent pass through unchanged.
pub fn to_legacy(value: &Bson) -> LegacyValue {
    match value {
        Bson::Null => LegacyValue::Null,
        Bson::Boolean(b) => LegacyValue::Boolean(*b),
        Bson::Int32(i) => LegacyValue::Int32(*i),
        Bson::Int64(i) => LegacyValue::Int64(*i),
        Bson::Double(d) => LegacyValue::Double(*d),
        Bson::String(s) => LegacyValue::String(s.clone()),
        Bson::ObjectId(id) => {
            let mut doc = LegacyDocument::new();
            doc.insert(ID_MARKER, id.to_hex());
            LegacyValue::Mapping(doc)
        }
        Bson::Array(values) => {
            let mut doc = LegacyDocument::new();
            for (index, value) in values.iter().enumerate() {
                doc.insert(index.to_string(), to_legacy(value));
            }
            LegacyValue::Mapping(doc)
        }
        Bson::Document(document) => LegacyValue::Mapping(to_legacy_document(document)),
        other => LegacyValue::Modern(other.clone()),
    }
}

/// Converts a modern document into a legacy document, preserving key order
/// exactly.
pub fn to_legacy_document(doc: &Document) -> LegacyDocument {
    doc.iter()
        .map(|(key, value)| (key.clone(), to_legacy(value)))
        .collect()
}
