//! Contains the options that can be passed to the operations of the
//! [`DriverCollection`](crate::driver::DriverCollection) collaborator,
//! gathered in one place.

pub use crate::{
    coll::options::*,
    index::options::IndexOptions,
    read_preference::{ReadPreference, ReadPreferenceOptions, TagSet},
};
