use bson::{doc, oid::ObjectId, Bson, DateTime};
use pretty_assertions::assert_eq;

use super::{
    is_sequence,
    to_legacy,
    to_legacy_document,
    to_modern,
    to_modern_document,
    to_modern_value,
    LegacyDocument,
    LegacyValue,
};

fn mapping(entries: &[(&str, LegacyValue)]) -> LegacyDocument {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

#[test]
fn empty_mapping_is_a_sequence() {
    assert!(is_sequence(&LegacyDocument::new()));
}

#[test]
fn contiguous_zero_indexed_keys_are_a_sequence() {
    let doc = mapping(&[("0", "a".into()), ("1", "b".into()), ("2", "c".into())]);
    assert!(is_sequence(&doc));
}

#[test]
fn gapped_keys_are_a_map() {
    let doc = mapping(&[("0", "x".into()), ("2", "y".into())]);
    assert!(!is_sequence(&doc));
}

#[test]
fn non_zero_start_is_a_map() {
    let doc = mapping(&[("1", "x".into()), ("2", "y".into())]);
    assert!(!is_sequence(&doc));
}

#[test]
fn out_of_order_integer_keys_are_a_map() {
    let doc = mapping(&[("1", "x".into()), ("0", "y".into())]);
    assert!(!is_sequence(&doc));
}

#[test]
fn non_canonical_integer_spellings_are_string_keys() {
    let doc = mapping(&[("0", "x".into()), ("01", "y".into())]);
    assert!(!is_sequence(&doc));
}

#[test]
fn string_keys_are_a_map() {
    let doc = mapping(&[("name", "alice".into())]);
    assert!(!is_sequence(&doc));
}

#[test]
fn sequence_converts_to_array() {
    let doc = mapping(&[("0", 1i32.into()), ("1", 2i32.into())]);
    assert_eq!(to_modern(&doc), Bson::Array(vec![Bson::Int32(1), Bson::Int32(2)]));
}

#[test]
fn map_converts_to_document() {
    let doc = mapping(&[("name", "alice".into()), ("age", 30i32.into())]);
    assert_eq!(to_modern(&doc), Bson::Document(doc! { "name": "alice", "age": 30 }));
}

#[test]
fn sequence_map_decision_applies_at_every_nesting_level() {
    let inner_list = mapping(&[("0", "a".into()), ("1", "b".into())]);
    let inner_map = mapping(&[("0", "a".into()), ("2", "b".into())]);
    let doc = mapping(&[
        ("list", inner_list.into()),
        ("map", inner_map.into()),
    ]);
    assert_eq!(
        to_modern(&doc),
        Bson::Document(doc! {
            "list": ["a", "b"],
            "map": { "0": "a", "2": "b" },
        })
    );
}

#[test]
fn to_modern_document_keeps_keys_verbatim() {
    // A filter like { "0": ..., "1": ... } must stay a document even though
    // its keys look sequential.
    let doc = mapping(&[("0", "x".into()), ("1", "y".into())]);
    assert_eq!(to_modern_document(&doc), doc! { "0": "x", "1": "y" });
}

#[test]
fn legacy_id_wire_form_becomes_object_id() {
    let id = ObjectId::new();
    let doc = mapping(&[("$id", id.to_hex().into())]);
    assert_eq!(to_modern(&doc), Bson::ObjectId(id));
}

#[test]
fn object_id_becomes_legacy_wire_form() {
    let id = ObjectId::new();
    let expected = mapping(&[("$id", id.to_hex().into())]);
    assert_eq!(to_legacy(&Bson::ObjectId(id)), LegacyValue::Mapping(expected));
}

#[test]
fn malformed_id_wire_form_stays_a_map() {
    let doc = mapping(&[("$id", "not-an-identifier".into())]);
    assert_eq!(
        to_modern(&doc),
        Bson::Document(doc! { "$id": "not-an-identifier" })
    );
}

#[test]
fn id_wire_form_with_extra_keys_stays_a_map() {
    let id = ObjectId::new();
    let doc = mapping(&[("$id", id.to_hex().into()), ("extra", 1i32.into())]);
    assert_eq!(
        to_modern(&doc),
        Bson::Document(doc! { "$id": id.to_hex(), "extra": 1 })
    );
}

#[test]
fn unknown_scalar_subtypes_pass_through_unchanged() {
    let now = DateTime::now();
    let legacy = to_legacy(&Bson::DateTime(now));
    assert_eq!(legacy, LegacyValue::Modern(Bson::DateTime(now)));
    assert_eq!(to_modern_value(&legacy), Bson::DateTime(now));
}

#[test]
fn modern_round_trip_without_ambiguity() {
    let id = ObjectId::new();
    let document = doc! {
        "_id": id,
        "name": "alice",
        "age": 30,
        "balance": 12.5,
        "active": true,
        "note": Bson::Null,
        "tags": ["a", "b", "c"],
        "address": { "city": "x", "zip": "99999" },
        "history": [ { "at": DateTime::now(), "delta": Bson::Int64(-5) } ],
    };
    assert_eq!(
        to_modern_document(&to_legacy_document(&document)),
        document
    );
}

#[test]
fn legacy_round_trip_without_ambiguity() {
    let inner = mapping(&[("0", "a".into()), ("2", "b".into())]);
    let list = mapping(&[("0", 1i64.into()), ("1", 2i64.into())]);
    let doc = mapping(&[
        ("name", "alice".into()),
        ("sparse", inner.into()),
        ("values", list.into()),
    ]);
    let modern = to_modern(&doc);
    assert_eq!(to_legacy(&modern), LegacyValue::Mapping(doc));
}

#[test]
fn pipeline_stage_order_is_preserved() {
    let match_stage = mapping(&[(
        "$match",
        mapping(&[("status", "active".into())]).into(),
    )]);
    let group_stage = mapping(&[(
        "$group",
        mapping(&[("_id", "$status".into())]).into(),
    )]);
    let pipeline = mapping(&[
        ("0", match_stage.into()),
        ("1", group_stage.into()),
    ]);

    let modern = to_modern(&pipeline);
    assert_eq!(
        modern,
        Bson::Array(vec![
            Bson::Document(doc! { "$match": { "status": "active" } }),
            Bson::Document(doc! { "$group": { "_id": "$status" } }),
        ])
    );
    assert_eq!(to_legacy(&modern), LegacyValue::Mapping(pipeline));
}

#[test]
fn zero_indexed_modern_document_is_the_documented_lossy_case() {
    // A map with keys "0", "1" is indistinguishable from a list once in the
    // legacy shape, so it comes back as an array.
    let document = doc! { "0": "x", "1": "y" };
    let legacy = to_legacy_document(&document);
    assert!(is_sequence(&legacy));
    assert_eq!(
        to_modern(&legacy),
        Bson::Array(vec![Bson::String("x".into()), Bson::String("y".into())])
    );
}

#[test]
fn insert_replaces_existing_key_in_place() {
    let mut doc = LegacyDocument::new();
    doc.insert("a", 1i32);
    doc.insert("b", 2i32);
    doc.insert("a", 3i32);
    let keys: Vec<_> = doc.keys().collect();
    assert_eq!(keys, vec!["a", "b"]);
    assert_eq!(doc.get("a"), Some(&LegacyValue::Int32(3)));
}

#[test]
fn key_order_is_preserved_through_both_directions() {
    let document = doc! { "z": 1, "a": 2, "m": 3 };
    let legacy = to_legacy_document(&document);
    assert_eq!(legacy.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
    let keys: Vec<_> = to_modern_document(&legacy)
        .keys()
        .cloned()
        .collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}
