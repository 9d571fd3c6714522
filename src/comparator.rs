// SPDX-License-Identifier: MPL-2.0

//! The version comparison primitives the resolver is written against.
//!
//! The resolver only ever manipulates strings and asks a [VersionComparator]
//! to validate, compare and probe them. [NodeSemver] is the provided
//! implementation, following the range grammar described in [crate::range].

use std::str::FromStr;

use crate::range::RangeSet;
use crate::version::SemanticVersion;

/// Validation and comparison of versions and ranges, all on their text form.
///
/// Comparisons involving a string that is not a valid version return `false`.
pub trait VersionComparator {
    /// Canonical form of a valid range, or [None] if it does not parse.
    fn valid_range(&self, range: &str) -> Option<String>;

    /// `a > b`
    fn gt(&self, a: &str, b: &str) -> bool;
    /// `a >= b`
    fn gte(&self, a: &str, b: &str) -> bool;
    /// `a < b`
    fn lt(&self, a: &str, b: &str) -> bool;
    /// `a <= b`
    fn lte(&self, a: &str, b: &str) -> bool;

    /// Whether `version` is contained in `range`.
    fn satisfies(&self, version: &str, range: &str) -> bool;

    /// The next patch-level version, or [None] if `version` does not parse.
    fn increment_patch(&self, version: &str) -> Option<String>;

    /// Whether `version` is a valid version without pre-release.
    fn is_release(&self, version: &str) -> bool;

    /// Lowest version above the pre-release `version`,
    /// or [None] if it is a release or does not parse.
    fn next_pre_release(&self, version: &str) -> Option<String>;

    /// Lowest pre-release sharing `major.minor.patch` with `version`,
    /// or [None] if it does not parse.
    fn first_pre_release(&self, version: &str) -> Option<String>;
}

/// Default comparator: semantic versions with node-style ranges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NodeSemver;

impl NodeSemver {
    fn compare(a: &str, b: &str, f: impl Fn(&SemanticVersion, &SemanticVersion) -> bool) -> bool {
        match (SemanticVersion::from_str(a), SemanticVersion::from_str(b)) {
            (Ok(a), Ok(b)) => f(&a, &b),
            _ => false,
        }
    }
}

impl VersionComparator for NodeSemver {
    fn valid_range(&self, range: &str) -> Option<String> {
        RangeSet::from_str(range).ok().map(|r| r.to_string())
    }

    fn gt(&self, a: &str, b: &str) -> bool {
        Self::compare(a, b, |a, b| a > b)
    }

    fn gte(&self, a: &str, b: &str) -> bool {
        Self::compare(a, b, |a, b| a >= b)
    }

    fn lt(&self, a: &str, b: &str) -> bool {
        Self::compare(a, b, |a, b| a < b)
    }

    fn lte(&self, a: &str, b: &str) -> bool {
        Self::compare(a, b, |a, b| a <= b)
    }

    fn satisfies(&self, version: &str, range: &str) -> bool {
        match (SemanticVersion::from_str(version), RangeSet::from_str(range)) {
            (Ok(version), Ok(range)) => range.contains(&version),
            _ => false,
        }
    }

    fn increment_patch(&self, version: &str) -> Option<String> {
        SemanticVersion::from_str(version)
            .ok()
            .map(|v| v.bump_patch().to_string())
    }

    fn is_release(&self, version: &str) -> bool {
        SemanticVersion::from_str(version).is_ok_and(|v| !v.is_pre_release())
    }

    fn next_pre_release(&self, version: &str) -> Option<String> {
        SemanticVersion::from_str(version)
            .ok()?
            .next_pre_release()
            .map(|v| v.to_string())
    }

    fn first_pre_release(&self, version: &str) -> Option<String> {
        SemanticVersion::from_str(version)
            .ok()
            .map(|v| v.first_pre_release().to_string())
    }
}

// Capabilities are usually shared, let references stand in for them.
impl<C: VersionComparator + ?Sized> VersionComparator for &C {
    fn valid_range(&self, range: &str) -> Option<String> {
        (**self).valid_range(range)
    }
    fn gt(&self, a: &str, b: &str) -> bool {
        (**self).gt(a, b)
    }
    fn gte(&self, a: &str, b: &str) -> bool {
        (**self).gte(a, b)
    }
    fn lt(&self, a: &str, b: &str) -> bool {
        (**self).lt(a, b)
    }
    fn lte(&self, a: &str, b: &str) -> bool {
        (**self).lte(a, b)
    }
    fn satisfies(&self, version: &str, range: &str) -> bool {
        (**self).satisfies(version, range)
    }
    fn increment_patch(&self, version: &str) -> Option<String> {
        (**self).increment_patch(version)
    }
    fn is_release(&self, version: &str) -> bool {
        (**self).is_release(version)
    }
    fn next_pre_release(&self, version: &str) -> Option<String> {
        (**self).next_pre_release(version)
    }
    fn first_pre_release(&self, version: &str) -> Option<String> {
        (**self).first_pre_release(version)
    }
}
