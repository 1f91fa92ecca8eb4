//! Parallel building blocks for topology construction.
//!
//! All loops run on rayon's work-stealing pool: every parallel region is a
//! fork-join barrier, so results written inside a region are visible to the
//! caller once the region returns.
//!
//! The only cross-thread communication inside a build is single-word atomic
//! fetch-and-add on an [`AtomicCounterArray`]; everything else writes to
//! disjoint per-node sub-slices obtained from [`split_by_ends`].

pub mod counters;
pub mod scan;

pub use counters::{AtomicCounterArray, AtomicNodeSlots};
pub use scan::{identity_permutation, prefix_sum, range_begins, split_by_ends};

#[cfg(test)]
mod tests;
