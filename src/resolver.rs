// SPDX-License-Identifier: MPL-2.0

//! Intersection of several range sets.
//!
//! Every range set is expanded into its alternatives,
//! then every combination picking one alternative per range set
//! is intersected on its own. The ranges of the feasible combinations
//! are deduplicated and joined back with `||`.
//!
//! ```
//! # use semver_resolve::comparator::NodeSemver;
//! # use semver_resolve::resolver::Resolver;
//! let resolver = Resolver::new(NodeSemver);
//! assert_eq!(resolver.resolve(&["^1.2.0", ">=1.5.0 || 3.x"]), ">=1.5.0 <2.0.0");
//! ```

use crate::comparator::{NodeSemver, VersionComparator};
use crate::expand::expand;
use crate::intersect::resolve_range;
use crate::report::{Failure, Outcome};
use crate::trace::{NoopTracer, Tracer};
use crate::type_aliases::FxIndexSet;

/// Separator between the alternatives of a resolved range.
pub const OR_SEPARATOR: &str = " || ";

/// Resolver of range-set intersections.
///
/// Holds the comparison primitives and the debug tracer,
/// and no state between calls.
#[derive(Debug, Clone)]
pub struct Resolver<C = NodeSemver, T = NoopTracer> {
    comparator: C,
    tracer: T,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(NodeSemver)
    }
}

impl<C: VersionComparator> Resolver<C, NoopTracer> {
    /// Resolver using the given comparator, without tracing.
    pub fn new(comparator: C) -> Self {
        Self {
            comparator,
            tracer: NoopTracer,
        }
    }
}

impl<C: VersionComparator, T: Tracer> Resolver<C, T> {
    /// Same resolver, tracing its steps to `tracer`.
    pub fn with_tracer<U: Tracer>(self, tracer: U) -> Resolver<C, U> {
        Resolver {
            comparator: self.comparator,
            tracer,
        }
    }

    /// Intersect one conjunction of comparators.
    pub fn resolve_range(&self, range: &str) -> Outcome {
        resolve_range(&self.comparator, range)
    }

    /// Intersection of all `range_sets`, ignoring failures.
    pub fn resolve<S: AsRef<str>>(&self, range_sets: &[S]) -> String {
        self.resolve_with(range_sets, |_| {})
    }

    /// Intersection of all `range_sets`.
    ///
    /// Every invalid alternative and every infeasible combination
    /// is reported to `on_failure`, then left out of the result.
    /// The result is empty when no combination is feasible.
    pub fn resolve_with<S, F>(&self, range_sets: &[S], mut on_failure: F) -> String
    where
        S: AsRef<str>,
        F: FnMut(Failure),
    {
        let inputs: Vec<&str> = range_sets.iter().map(AsRef::as_ref).collect();
        self.tracer.trace(format_args!("input: {:?}", inputs));

        let alternatives: Vec<Vec<String>> = inputs
            .iter()
            .map(|range_set| expand(&self.comparator, &self.tracer, range_set, &mut on_failure))
            .collect();

        let mut resolved: FxIndexSet<String> = FxIndexSet::default();
        for (index, combination) in Combinations::new(&alternatives).enumerate() {
            let parts: Vec<&str> = combination.into_iter().map(String::as_str).collect();
            let range = parts.join(" ");
            match self.resolve_range(&range) {
                Outcome::Resolved(result) => {
                    self.tracer.trace(format_args!(
                        "rangeSetsList[{}] = {:?}: success {:?}",
                        index, range, result
                    ));
                    resolved.insert(result);
                }
                Outcome::Infeasible(failure) => {
                    self.tracer.trace(format_args!(
                        "rangeSetsList[{}] = {:?}: failure {:?}",
                        index, range, failure
                    ));
                    on_failure(failure);
                }
            }
        }

        let output = resolved.into_iter().collect::<Vec<_>>().join(OR_SEPARATOR);
        self.tracer.trace(format_args!("output: {:?}", output));
        output
    }
}

/// Cartesian product of lists, one element of each list per item.
///
/// The first list varies slowest. An empty list, or no list at all,
/// yields nothing.
pub struct Combinations<'a, V> {
    lists: &'a [Vec<V>],
    indices: Vec<usize>,
    done: bool,
}

impl<'a, V> Combinations<'a, V> {
    /// Iterate over the product of `lists`.
    pub fn new(lists: &'a [Vec<V>]) -> Self {
        Self {
            lists,
            indices: vec![0; lists.len()],
            done: lists.is_empty() || lists.iter().any(Vec::is_empty),
        }
    }
}

impl<'a, V> Iterator for Combinations<'a, V> {
    type Item = Vec<&'a V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self
            .lists
            .iter()
            .zip(&self.indices)
            .map(|(list, &i)| &list[i])
            .collect();

        // Odometer step, rightmost list first.
        self.done = true;
        for (list, index) in self.lists.iter().zip(self.indices.iter_mut()).rev() {
            *index += 1;
            if *index < list.len() {
                self.done = false;
                break;
            }
            *index = 0;
        }
        Some(item)
    }
}
