// SPDX-License-Identifier: MPL-2.0

//! Expansion of a range set into its normalized alternatives.

use crate::comparator::VersionComparator;
use crate::normalize::normalize;
use crate::report::Failure;
use crate::trace::Tracer;

/// Separator between the alternatives of a range set.
pub const OR: &str = "||";

/// Normalized alternatives of `range_set`, in input order.
///
/// Alternatives that do not normalize are reported to `on_invalid` and dropped.
pub fn expand<C, T, F>(
    comparator: &C,
    tracer: &T,
    range_set: &str,
    on_invalid: &mut F,
) -> Vec<String>
where
    C: VersionComparator,
    T: Tracer,
    F: FnMut(Failure),
{
    range_set
        .split(OR)
        .map(str::trim)
        .filter_map(|range| {
            let normalized = normalize(comparator, tracer, range);
            if normalized.is_none() {
                on_invalid(Failure::invalid(range));
            }
            normalized
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::NodeSemver;
    use crate::report::FailureKind;
    use crate::trace::NoopTracer;

    #[test]
    fn alternatives_in_order() {
        let mut failures = Vec::new();
        let ranges = expand(&NodeSemver, &NoopTracer, "1.x ||2.x||  * ", &mut |f| {
            failures.push(f)
        });
        assert_eq!(ranges, [">=1.0.0 <2.0.0", ">=2.0.0 <3.0.0", ">=0.0.0"]);
        assert!(failures.is_empty());
    }

    #[test]
    fn invalid_alternatives_are_reported() {
        let mut failures = Vec::new();
        let ranges = expand(&NodeSemver, &NoopTracer, "bogus || 1.2.3 || >=", &mut |f| {
            failures.push(f)
        });
        assert_eq!(ranges, ["1.2.3"]);
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].range, "bogus");
        assert_eq!(failures[0].kind, FailureKind::Valid);
        assert_eq!(failures[0].version, None);
        assert_eq!(failures[1].range, ">=");
    }

    #[test]
    fn duplicates_are_kept() {
        let ranges = expand(&NodeSemver, &NoopTracer, "1.2.3 || =1.2.3", &mut |_| {});
        assert_eq!(ranges, ["1.2.3", "1.2.3"]);
    }
}
