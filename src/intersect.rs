// SPDX-License-Identifier: MPL-2.0

//! Intersection of a single conjunction of comparators.
//!
//! The conjunction is folded into at most one lower bound, one upper bound
//! and an ordered set of exact versions. Those are printed back as the
//! canonical range, which is then probed for emptiness:
//!  - with exact versions, the first one must satisfy the range,
//!    and the range resolves to it;
//!  - with a lower bound, the lowest version it admits must satisfy the range;
//!  - with an upper bound, its version must satisfy the range
//!    (widened by one patch when the bound is strict).

use std::fmt;

use crate::comparator::VersionComparator;
use crate::normalize::collapse_sentinels;
use crate::range::Op;
use crate::report::{Failure, FailureKind, Outcome};
use crate::type_aliases::FxIndexSet;

/// Tightest lower or upper constraint seen so far.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Bound {
    op: Op,
    version: String,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.version)
    }
}

/// A conjunction reduced to its tightest constraints.
#[derive(Debug, Default)]
struct Folded {
    exact: FxIndexSet<String>,
    min: Option<Bound>,
    max: Option<Bound>,
}

impl Folded {
    fn fold<C: VersionComparator>(comparator: &C, conjunction: &str) -> Self {
        let mut folded = Self::default();
        for token in conjunction.split_whitespace() {
            let (op, version) = Op::split_prefix(token);
            let bound = Bound {
                op,
                version: version.to_string(),
            };
            if op.is_lower() {
                if folded
                    .min
                    .as_ref()
                    .map_or(true, |min| raises(comparator, &bound, min))
                {
                    folded.min = Some(bound);
                }
            } else if op.is_upper() {
                if folded
                    .max
                    .as_ref()
                    .map_or(true, |max| lowers(comparator, &bound, max))
                {
                    folded.max = Some(bound);
                }
            } else {
                folded.exact.insert(bound.version);
            }
        }
        folded
    }

    fn infeasible(range: String, kind: FailureKind, version: Option<String>) -> Outcome {
        Outcome::Infeasible(Failure {
            range,
            kind,
            version,
        })
    }

    /// Probe the canonical range for emptiness.
    fn check<C: VersionComparator>(&self, comparator: &C, range: String) -> Outcome {
        if let Some(exact) = self.exact.first() {
            if !comparator.satisfies(exact, &range) {
                return Self::infeasible(range, FailureKind::Exact, Some(exact.clone()));
            }
            return Outcome::Resolved(exact.clone());
        }

        let mut lowest = None;
        if let Some(min) = &self.min {
            let probes = self.lowest_candidates(comparator, min);
            match probes.iter().find(|probe| comparator.satisfies(probe, &range)) {
                Some(probe) => lowest = Some(probe.clone()),
                None => {
                    let version = probes
                        .into_iter()
                        .next()
                        .unwrap_or_else(|| min.version.clone());
                    return Self::infeasible(range, FailureKind::Min, Some(version));
                }
            }
        }

        if let Some(max) = &self.max {
            let mut probed = range.clone();
            if max.op == Op::Lt {
                if admits_nothing_below(comparator, &max.version) {
                    return Self::infeasible(range, FailureKind::Max, Some(max.version.clone()));
                }
                // No "just below" primitive: widen the bound so that it
                // admits its own version, which is then probed.
                // A pre-release must stay in the bound to be admitted.
                let widened = if comparator.is_release(&max.version) {
                    comparator.increment_patch(&max.version)
                } else {
                    Some(max.version.clone())
                };
                if let Some(widened) = widened {
                    let widened = format!("<={}", widened);
                    let mut tokens: Vec<&str> = range.split(' ').collect();
                    tokens.pop();
                    tokens.push(&widened);
                    probed = tokens.join(" ");
                }
            }
            if !comparator.satisfies(&max.version, &probed) {
                return Self::infeasible(probed, FailureKind::Max, Some(max.version.clone()));
            }
        }

        if let (Some(lowest), Some(max)) = (lowest, &self.max) {
            // The lowest admitted version is also the highest one.
            if max.op == Op::Lte && comparator.gte(&lowest, &max.version) {
                return Outcome::Resolved(lowest);
            }
        }

        Outcome::Resolved(collapse_sentinels(range))
    }

    /// Lowest versions the lower bound may admit, in ascending order.
    ///
    /// The first one satisfying the whole range is its lowest version.
    fn lowest_candidates<C: VersionComparator>(&self, comparator: &C, min: &Bound) -> Vec<String> {
        if min.op == Op::Gte {
            return vec![min.version.clone()];
        }
        if !comparator.is_release(&min.version) {
            return comparator.next_pre_release(&min.version).into_iter().collect();
        }
        let mut candidates: Vec<String> =
            comparator.increment_patch(&min.version).into_iter().collect();
        // Pre-releases are only admitted on the patch of a pre-release bound,
        // past a release lower bound only the upper one can carry it.
        let floor = self
            .max
            .as_ref()
            .filter(|max| !comparator.is_release(&max.version))
            .and_then(|max| comparator.first_pre_release(&max.version));
        if let Some(floor) = floor {
            match candidates.first() {
                Some(next) if comparator.lt(next, &floor) => candidates.push(floor),
                _ => candidates.insert(0, floor),
            }
        }
        candidates
    }
}

impl fmt::Display for Folded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self
            .exact
            .iter()
            .cloned()
            .chain(self.min.iter().map(Bound::to_string))
            .chain(self.max.iter().map(Bound::to_string));
        for (i, part) in parts.enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(&part)?;
        }
        Ok(())
    }
}

/// Whether lower bound `new` is strictly tighter than `old`.
/// Among equal versions, only a strict bound replaces an inclusive one.
fn raises<C: VersionComparator>(comparator: &C, new: &Bound, old: &Bound) -> bool {
    comparator.gt(&new.version, &old.version)
        || (new.op == Op::Gt && old.op == Op::Gte && comparator.gte(&new.version, &old.version))
}

/// Whether upper bound `new` is strictly tighter than `old`.
fn lowers<C: VersionComparator>(comparator: &C, new: &Bound, old: &Bound) -> bool {
    comparator.lt(&new.version, &old.version)
        || (new.op == Op::Lt && old.op == Op::Lte && comparator.lte(&new.version, &old.version))
}

/// Whether `<version` leaves no version at all.
fn admits_nothing_below<C: VersionComparator>(comparator: &C, version: &str) -> bool {
    if comparator.is_release(version) {
        comparator.lte(version, "0.0.0")
    } else {
        comparator.lte(version, "0.0.0-0")
    }
}

/// Intersect one conjunction of comparators into its minimal range.
pub fn resolve_range<C: VersionComparator>(comparator: &C, range: &str) -> Outcome {
    let Some(conjunction) = comparator.valid_range(range) else {
        return Outcome::Infeasible(Failure::invalid(range));
    };
    let folded = Folded::fold(comparator, &conjunction);
    let canonical = folded.to_string();
    folded.check(comparator, canonical)
}
