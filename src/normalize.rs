// SPDX-License-Identifier: MPL-2.0

//! Sentinel substitution and canonicalization of a single range.

use crate::comparator::VersionComparator;
use crate::trace::Tracer;
use crate::version::SemanticVersion;

/// Wildcard literal, stands for every version.
pub const WILDCARD: &str = "*";

/// Literal standing for the highest version.
pub const LATEST: &str = "latest";

/// Range substituted for [WILDCARD], printed back as `*`.
pub const MINIMUM_RANGE: &str = ">=0.0.0";

/// Range substituted for [LATEST], printed back as `latest`.
pub fn maximum_range() -> String {
    format!("<={}", SemanticVersion::latest())
}

/// Replace every `*` and `latest` token by its sentinel range.
pub fn substitute_sentinels(range: &str) -> String {
    let maximum = maximum_range();
    range
        .split_whitespace()
        .map(|token| match token {
            WILDCARD => MINIMUM_RANGE,
            LATEST => maximum.as_str(),
            _ => token,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Print sentinel ranges back as their literals.
pub fn collapse_sentinels(range: String) -> String {
    if range == MINIMUM_RANGE {
        WILDCARD.to_string()
    } else if range == maximum_range() {
        LATEST.to_string()
    } else {
        range
    }
}

/// Canonical comparator form of `range`, or [None] if it is not valid.
pub fn normalize(
    comparator: &impl VersionComparator,
    tracer: &impl Tracer,
    range: &str,
) -> Option<String> {
    let substituted = substitute_sentinels(range);
    match comparator.valid_range(&substituted) {
        Some(valid) => {
            tracer.trace(format_args!("range = {:?}: success {:?}", range, valid));
            Some(valid)
        }
        None => {
            tracer.trace(format_args!("range = {:?}: failure", range));
            None
        }
    }
}
