//! Contains the read preference types attached to query and command paths.

use std::collections::HashMap;

use serde::{Serialize, Serializer};
use serde_with::skip_serializing_none;
use typed_builder::TypedBuilder;

use crate::error::{Error, Result};

/// Specifies how the driver collaborator should route a read operation to
/// members of a replica set.
///
/// If applicable, `tag_sets` can be used to target specific nodes in a replica
/// set. Tag sets are checked in order until one or more servers is found with
/// each tag in the set.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum ReadPreference {
    /// Only route this operation to the primary.
    Primary,

    /// Only route this operation to a secondary.
    Secondary {
        /// Read preference options for this mode.
        options: Option<ReadPreferenceOptions>,
    },

    /// Route this operation to the primary if it's available, but fall back to
    /// the secondaries if not.
    PrimaryPreferred {
        /// Read preference options for this mode.
        options: Option<ReadPreferenceOptions>,
    },

    /// Route this operation to a secondary if one is available, but fall back
    /// to the primary if not.
    SecondaryPreferred {
        /// Read preference options for this mode.
        options: Option<ReadPreferenceOptions>,
    },

    /// Route this operation to the node with the least network latency
    /// regardless of whether it's the primary or a secondary.
    Nearest {
        /// Read preference options for this mode.
        options: Option<ReadPreferenceOptions>,
    },
}

/// Specifies read preference options for non-primary read preferences.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(into)))]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct ReadPreferenceOptions {
    /// Specifies which replica set members should be considered for
    /// operations. Each tag set will be checked in order until one or more
    /// servers is found with each tag in the set.
    pub tag_sets: Option<Vec<TagSet>>,
}

/// A read preference tag set.
pub type TagSet = HashMap<String, String>;

impl ReadPreference {
    /// Parses the legacy mode string (case-insensitive) and tag-set sequence
    /// into a read preference.
    ///
    /// An unknown mode is an error; tags on the `primary` mode are an error,
    /// matching the historical API.
    pub fn from_legacy(mode: &str, tag_sets: Vec<TagSet>) -> Result<Self> {
        let options = if tag_sets.is_empty() {
            None
        } else {
            Some(ReadPreferenceOptions::builder().tag_sets(tag_sets).build())
        };
        match mode.to_ascii_lowercase().as_str() {
            "primary" => {
                if options.is_some() {
                    return Err(Error::invalid_argument(
                        "read preference tags can only be specified when a non-primary mode is \
                         specified",
                    ));
                }
                Ok(ReadPreference::Primary)
            }
            "secondary" => Ok(ReadPreference::Secondary { options }),
            "primarypreferred" => Ok(ReadPreference::PrimaryPreferred { options }),
            "secondarypreferred" => Ok(ReadPreference::SecondaryPreferred { options }),
            "nearest" => Ok(ReadPreference::Nearest { options }),
            other => Err(Error::invalid_argument(format!(
                "unknown read preference mode: {other}"
            ))),
        }
    }

    /// The wire spelling of this read preference's mode.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary { .. } => "secondary",
            Self::PrimaryPreferred { .. } => "primaryPreferred",
            Self::SecondaryPreferred { .. } => "secondaryPreferred",
            Self::Nearest { .. } => "nearest",
        }
    }

    /// The options for this read preference, if the mode carries any.
    pub fn options(&self) -> Option<&ReadPreferenceOptions> {
        match self {
            Self::Primary => None,
            Self::Secondary { options }
            | Self::PrimaryPreferred { options }
            | Self::SecondaryPreferred { options }
            | Self::Nearest { options } => options.as_ref(),
        }
    }

    /// The tag sets for this read preference, in the order they were given.
    pub fn tag_sets(&self) -> Option<&Vec<TagSet>> {
        self.options().and_then(|options| options.tag_sets.as_ref())
    }
}

impl Serialize for ReadPreference {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[skip_serializing_none]
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ReadPreferenceHelper<'a> {
            mode: &'static str,
            #[serde(flatten)]
            options: Option<&'a ReadPreferenceOptions>,
        }

        let helper = ReadPreferenceHelper {
            mode: self.mode(),
            options: self.options(),
        };
        helper.serialize(serializer)
    }
}
