//! Dense renumbering of the entity types that actually occur in a graph.
//!
//! Type tags are sparse (any `u8`), but per-type arrays want contiguous
//! indices. [`CondensedTypeIDMap`] assigns `0..k` to the `k` distinct types in
//! ascending type order, so index order agrees with type order and a
//! type-sorted edge range is also index-sorted.

use core::sync::atomic::{AtomicBool, Ordering};
use std::collections::BTreeSet;

use rayon::prelude::*;

use crate::error::{Result, TopologyError};
use crate::graph::GraphSource;
use crate::types::{EntityType, Node, PropertyIndex, TypeIndex};

/// Marks a type with no index in the lookup table.
pub const INVALID_TYPE_INDEX: TypeIndex = TypeIndex::MAX;

/// Most distinct types a map can hold; [`INVALID_TYPE_INDEX`] is reserved.
pub const MAX_UNIQUE_TYPES: usize = INVALID_TYPE_INDEX as usize;

const TYPE_TABLE_LEN: usize = EntityType::MAX as usize + 1;

/// Bijection between the distinct types of a graph and `0..num_unique_types()`.
#[derive(Debug)]
pub struct CondensedTypeIDMap {
    index_of_type: Box<[TypeIndex; TYPE_TABLE_LEN]>,
    type_of_index: Vec<EntityType>,
    valid: AtomicBool,
}

impl CondensedTypeIDMap {
    /// Indexes the distinct edge types of `graph`.
    ///
    /// # Errors
    /// Returns [`TopologyError::TooManyTypes`] if there are more than
    /// [`MAX_UNIQUE_TYPES`] distinct types.
    pub fn make_from_edge_types<G>(graph: &G) -> Result<Self>
    where
        G: GraphSource + ?Sized,
    {
        let num_edges = graph.topology().num_edges();
        Self::from_types(collect_distinct(num_edges, |e| {
            graph.type_of_edge(e as PropertyIndex)
        }))
    }

    /// Indexes the distinct node types of `graph`.
    ///
    /// # Errors
    /// Same as [`make_from_edge_types`](Self::make_from_edge_types).
    pub fn make_from_node_types<G>(graph: &G) -> Result<Self>
    where
        G: GraphSource + ?Sized,
    {
        let num_nodes = graph.topology().num_nodes();
        Self::from_types(collect_distinct(num_nodes, |n| graph.type_of_node(n as Node)))
    }

    /// Indexes the given types; duplicates are ignored.
    ///
    /// # Errors
    /// Same as [`make_from_edge_types`](Self::make_from_edge_types).
    pub fn from_types<I>(types: I) -> Result<Self>
    where
        I: IntoIterator<Item = EntityType>,
    {
        let distinct: BTreeSet<EntityType> = types.into_iter().collect();
        if distinct.len() > MAX_UNIQUE_TYPES {
            return Err(TopologyError::TooManyTypes {
                found: distinct.len(),
                max: MAX_UNIQUE_TYPES,
            });
        }

        let mut index_of_type = Box::new([INVALID_TYPE_INDEX; TYPE_TABLE_LEN]);
        let type_of_index: Vec<EntityType> = distinct.into_iter().collect();
        for (index, &ty) in type_of_index.iter().enumerate() {
            index_of_type[ty as usize] = index as TypeIndex;
        }
        Ok(Self {
            index_of_type,
            type_of_index,
            valid: AtomicBool::new(true),
        })
    }

    /// Type with dense index `index`.
    ///
    /// # Panics
    /// Panics if `index >= num_unique_types()`.
    #[inline]
    pub fn get_type(&self, index: TypeIndex) -> EntityType {
        self.type_of_index[index as usize]
    }

    /// Dense index of `ty`, or `None` if `ty` does not occur.
    #[inline]
    pub fn get_index(&self, ty: EntityType) -> Option<TypeIndex> {
        let index = self.index_of_type[ty as usize];
        (index != INVALID_TYPE_INDEX).then_some(index)
    }

    /// Number of distinct types.
    #[inline]
    pub fn num_unique_types(&self) -> usize {
        self.type_of_index.len()
    }

    /// Returns `true` if `ty` occurs.
    #[inline]
    pub fn has_type(&self, ty: EntityType) -> bool {
        self.get_index(ty).is_some()
    }

    /// The distinct types, in index order.
    #[inline]
    pub fn distinct_types(&self) -> &[EntityType] {
        &self.type_of_index
    }

    /// Returns `false` once [`invalidate`](Self::invalidate) has been called.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid.load(Ordering::Acquire)
    }

    /// Marks the map stale.
    pub fn invalidate(&self) {
        self.valid.store(false, Ordering::Release);
    }
}

/// Distinct values of `type_of(i)` for `i` in `0..len`, merged from
/// per-worker sets.
fn collect_distinct<F>(len: usize, type_of: F) -> BTreeSet<EntityType>
where
    F: Fn(usize) -> EntityType + Sync,
{
    (0..len)
        .into_par_iter()
        .fold(BTreeSet::new, |mut seen, i| {
            seen.insert(type_of(i));
            seen
        })
        .reduce(BTreeSet::new, |mut a, mut b| {
            if a.len() < b.len() {
                core::mem::swap(&mut a, &mut b);
            }
            a.extend(b);
            a
        })
}
