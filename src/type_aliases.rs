// SPDX-License-Identifier: MPL-2.0

//! Publicly exported type aliases.

/// Insertion-ordered set used to deduplicate while keeping first-seen order.
pub type FxIndexSet<V> =
    indexmap::IndexSet<V, std::hash::BuildHasherDefault<rustc_hash::FxHasher>>;
