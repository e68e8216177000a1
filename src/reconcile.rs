//! Merges the overlapping legacy write-option spellings into the canonical
//! [`WriteConcern`] form.
//!
//! Three generations of option names accumulated in the legacy API: the
//! boolean `safe`, the loose `w`/`wtimeout` pair, and the modern
//! `wTimeoutMS`/`writeConcern` spelling. Conflicts between them are resolved
//! by a fixed precedence, never rejected:
//!
//! 1. `safe` derives `w = 1` (true) or `w = 0` (false);
//! 2. an explicit `w` overrides the `safe`-derived value;
//! 3. `wtimeout` maps to `wTimeoutMS` only when `wTimeoutMS` is not itself
//!    present;
//! 4. if any of these surfaced a value, one write concern is built, filling
//!    unset fields from the collection default;
//! 5. if none surfaced, no override is attached and the collection-level
//!    default applies implicitly;
//! 6. the legacy keys are stripped from the remaining options either way, so
//!    they never reach the driver call as loose keys.
//!
//! The legacy journaling spellings `j` and `fsync` are folded into the modern
//! `journal` flag under the same scheme, with `j` winning over `fsync`.


use std::time::Duration;

use bson::Document;
use tracing::debug;

use crate::{
    bridge::{to_modern_value, LegacyDocument, LegacyValue},
    concern::{Acknowledgment, WriteConcern},
};

/// The driver-facing form of a legacy write-option mapping: an optional write
/// concern override plus whatever non-concern options the caller passed,
/// converted to the modern document model.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct WriteOptions {
    /// The write concern to apply to this single operation, if the legacy
    /// options requested one. `None` means the collection default applies.
    pub write_concern: Option<WriteConcern>,

    /// The remaining caller options with every legacy concern key removed.
    pub extra: Document,
}

/// Coerce a legacy numeric value into an `i64` if it would be lossless to do
/// so.
pub(crate) fn legacy_int(value: &LegacyValue) -> Option<i64> {
    match *value {
        LegacyValue::Int32(i) => Some(i64::from(i)),
        LegacyValue::Int64(i) => Some(i),
        LegacyValue::Double(f) if (f - (f as i64 as f64)).abs() <= f64::EPSILON => Some(f as i64),
        _ => None,
    }
}

/// Legacy truthiness for flag options that historically accepted either a
/// boolean or a number.
pub(crate) fn legacy_flag(value: &LegacyValue) -> Option<bool> {
    match value {
        LegacyValue::Boolean(b) => Some(*b),
        other => legacy_int(other).map(|i| i != 0),
    }
}

fn legacy_acknowledgment(value: &LegacyValue) -> Option<Acknowledgment> {
    match value {
        LegacyValue::String(s) => Some(Acknowledgment::from(s.as_str())),
        other => {
            let nodes = legacy_int(other)?;
            Some(Acknowledgment::Nodes(u32::try_from(nodes).unwrap_or(0)))
        }
    }
}

fn legacy_millis(value: &LegacyValue) -> Option<Duration> {
    let millis = legacy_int(value)?;
    Some(Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
}

/// Merges the legacy write-option spellings in `requested` into a single
/// [`WriteOptions`], using `collection_default` to fill fields no legacy key
/// set.
///
/// Pure and idempotent: reapplying it to its own `extra` output with the same
/// default is a no-op, because the legacy keys are already stripped.
pub fn reconcile_write_options(
    requested: &LegacyDocument,
    collection_default: Option<&WriteConcern>,
) -> WriteOptions {
    let mut safe_w = None;
    let mut explicit_w = None;
    let mut legacy_timeout = None;
    let mut explicit_timeout = None;
    let mut journal = None;
    let mut fsync = None;
    let mut extra = Document::new();

    for (key, value) in requested.iter() {
        match key {
            "safe" => {
                if let Some(flag) = legacy_flag(value) {
                    safe_w = Some(Acknowledgment::Nodes(u32::from(flag)));
                }
            }
            "w" => explicit_w = legacy_acknowledgment(value),
            "wtimeout" | "wTimeout" => legacy_timeout = legacy_millis(value),
            "wTimeoutMS" => explicit_timeout = legacy_millis(value),
            "j" => journal = legacy_flag(value),
            "fsync" => fsync = legacy_flag(value),
            _ => {
                extra.insert(key, to_modern_value(value));
            }
        }
    }

    let w = explicit_w.or(safe_w);
    let w_timeout = explicit_timeout.or(legacy_timeout);
    let journal = journal.or(fsync);

    let write_concern = if w.is_some() || w_timeout.is_some() || journal.is_some() {
        let concern = WriteConcern {
            w: w.or_else(|| collection_default.and_then(|d| d.w.clone())),
            w_timeout: w_timeout.or_else(|| collection_default.and_then(|d| d.w_timeout)),
            journal: journal.or_else(|| collection_default.and_then(|d| d.journal)),
        };
        debug!(?concern, "legacy write options reconciled to an explicit write concern");
        Some(concern)
    } else {
        // No legacy key surfaced a value; the collection-level default applies
        // implicitly and no override is attached.
        None
    };

    WriteOptions {
        write_concern,
        extra,
    }
}
