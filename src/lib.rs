#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod bridge;
mod coll;
pub mod concern;
pub mod driver;
pub mod error;
pub mod index;
pub mod options;
mod read_preference;
mod reconcile;
pub mod results;
mod serde_util;

pub use crate::{
    bridge::{LegacyDocument, LegacyValue},
    coll::Collection,
    concern::{Acknowledgment, WriteConcern},
    error::{Error, ErrorKind, Result},
    index::IndexModel,
    read_preference::{ReadPreference, ReadPreferenceOptions, TagSet},
    reconcile::{reconcile_write_options, WriteOptions},
};
