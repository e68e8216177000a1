use std::time::Duration;

use bson::{doc, Bson};
use pretty_assertions::assert_eq;

use super::{Acknowledgment, WriteConcern};

#[test]
fn write_concern_is_acknowledged() {
    let w_1 = WriteConcern::builder()
        .w(Acknowledgment::Nodes(1))
        .journal(false)
        .build();
    assert!(w_1.is_acknowledged());

    let w_majority = WriteConcern::builder()
        .w(Acknowledgment::Majority)
        .journal(false)
        .build();
    assert!(w_majority.is_acknowledged());

    let w_0 = WriteConcern::builder()
        .w(Acknowledgment::Nodes(0))
        .journal(false)
        .build();
    assert!(!w_0.is_acknowledged());

    let w_0_journaled = WriteConcern::builder()
        .w(Acknowledgment::Nodes(0))
        .journal(true)
        .build();
    assert!(w_0_journaled.is_acknowledged());

    let empty = WriteConcern::builder().build();
    assert!(empty.is_acknowledged());
    assert!(empty.is_empty());
}

#[test]
fn write_concern_deserialize() {
    let w_1 = doc! { "w": 1 };
    let wc: WriteConcern = bson::from_bson(Bson::Document(w_1)).unwrap();
    assert_eq!(
        wc,
        WriteConcern {
            w: Acknowledgment::Nodes(1).into(),
            w_timeout: None,
            journal: None,
        }
    );

    let w_majority = doc! { "w": "majority" };
    let wc: WriteConcern = bson::from_bson(Bson::Document(w_majority)).unwrap();
    assert_eq!(
        wc,
        WriteConcern {
            w: Acknowledgment::Majority.into(),
            w_timeout: None,
            journal: None,
        }
    );

    let w_timeout = doc! { "w": "majority", "wtimeout": 100 };
    let wc: WriteConcern = bson::from_bson(Bson::Document(w_timeout)).unwrap();
    assert_eq!(
        wc,
        WriteConcern {
            w: Acknowledgment::Majority.into(),
            w_timeout: Duration::from_millis(100).into(),
            journal: None,
        }
    );

    let journal = doc! { "w": "majority", "j": true };
    let wc: WriteConcern = bson::from_bson(Bson::Document(journal)).unwrap();
    assert_eq!(
        wc,
        WriteConcern {
            w: Acknowledgment::Majority.into(),
            w_timeout: None,
            journal: true.into(),
        }
    );
}

#[test]
fn write_concern_serialize() {
    let wc = WriteConcern {
        w: Acknowledgment::Nodes(2).into(),
        w_timeout: Duration::from_millis(5000).into(),
        journal: None,
    };
    let serialized = bson::to_document(&wc).unwrap();
    assert_eq!(serialized, doc! { "w": 2, "wtimeout": 5000 });

    let custom = WriteConcern {
        w: Acknowledgment::Custom("myTag".to_string()).into(),
        w_timeout: None,
        journal: Some(true),
    };
    let serialized = bson::to_document(&custom).unwrap();
    assert_eq!(serialized, doc! { "w": "myTag", "j": true });
}

#[test]
fn acknowledged_default() {
    let wc = WriteConcern::acknowledged();
    assert_eq!(wc.w, Some(Acknowledgment::Nodes(1)));
    assert_eq!(wc.w_timeout, Some(Duration::ZERO));
    assert!(wc.is_acknowledged());
}
