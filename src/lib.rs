// SPDX-License-Identifier: MPL-2.0

//! Intersection of semantic version range sets.
//!
//! Given several range sets, such as the requirements different dependents
//! place on one package, this crate computes the smallest range
//! describing the versions satisfying all of them at once.
//!
//! ```
//! assert_eq!(semver_resolve::resolve(&["^1.2.0", "~1.4.1"]), ">=1.4.1 <1.5.0");
//! assert_eq!(semver_resolve::resolve(&["1.2.3", ">=1.0.0 <2.0.0"]), "1.2.3");
//! assert_eq!(semver_resolve::resolve(&["*", ">=1.0.0"]), ">=1.0.0");
//! assert_eq!(semver_resolve::resolve(&[">2.0.0", "<1.0.0"]), "");
//! ```
//!
//! # Grammar
//!
//! A range set is an OR (`||`) of ranges, each range being an AND
//! (whitespace) of comparators `>`, `>=`, `<`, `<=`, `=` or bare versions.
//! The literal `*` stands for every version and `latest` for the highest one.
//! Shorthands like `1.x`, `~1.2.3`, `^0.4` or `1.0.0 - 2.0.0`
//! are desugared into primitive comparators, see [range].
//!
//! # Algorithm
//!
//! Resolution goes through four stages:
//!  - [normalize](normalize::normalize) substitutes the `*` and `latest` literals
//!    and canonicalizes each range with a [VersionComparator](comparator::VersionComparator);
//!  - [expand](expand::expand) splits a range set into its normalized alternatives;
//!  - [resolve_range](intersect::resolve_range) folds one conjunction into
//!    its tightest bounds and checks that some version satisfies it;
//!  - the [Resolver](resolver::Resolver) intersects every combination of
//!    one alternative per range set and joins the feasible results.
//!
//! When alternatives from different range sets lead to several feasible
//! ranges, each one is kept as its own alternative in the result,
//! even if they overlap.
//!
//! # Failures
//!
//! Resolution never fails as a whole. Every invalid alternative and every
//! empty combination is reported as a [Failure](report::Failure) to the
//! observer given to [resolve_with], and left out of the result:
//!
//! ```
//! # use semver_resolve::report::FailureKind;
//! let mut kinds = Vec::new();
//! let range = semver_resolve::resolve_with(&["1.x || 3.x", "^1.5.0 || garbage"], |failure| {
//!     kinds.push(failure.kind)
//! });
//! assert_eq!(range, ">=1.5.0 <2.0.0");
//! assert_eq!(kinds, [FailureKind::Valid, FailureKind::Min]);
//! ```
//!
//! # Debug traces
//!
//! The free functions trace their steps through the [log] facade when the
//! `DEBUG` environment variable mentions `semver-resolve`,
//! see [trace::from_env_once]. A [Resolver](resolver::Resolver) traces to whatever
//! [Tracer](trace::Tracer) it is given, nothing by default.

#![warn(missing_docs)]

pub mod comparator;
pub mod error;
pub mod expand;
pub mod intersect;
pub mod normalize;
pub mod range;
pub mod report;
pub mod resolver;
pub mod trace;
pub mod type_aliases;
pub mod version;

use crate::comparator::NodeSemver;
use crate::report::Failure;
use crate::resolver::Resolver;

/// Intersection of all `range_sets`, empty if there is none.
pub fn resolve<S: AsRef<str>>(range_sets: &[S]) -> String {
    resolve_with(range_sets, |_| {})
}

/// Intersection of all `range_sets`, reporting every dropped range to `on_failure`.
pub fn resolve_with<S, F>(range_sets: &[S], on_failure: F) -> String
where
    S: AsRef<str>,
    F: FnMut(Failure),
{
    Resolver::new(NodeSemver)
        .with_tracer(trace::from_env_once())
        .resolve_with(range_sets, on_failure)
}
