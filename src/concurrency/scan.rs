//! Data-parallel array helpers: prefix sums, permutations and CSR slicing.

use num_traits::PrimInt;
use rayon::prelude::*;

use crate::types::Edge;

/// Below this length a prefix sum runs serially; the two-pass scan only pays
/// off once every worker gets a few thousand elements.
const PARALLEL_SCAN_MIN_LEN: usize = 1 << 14;

/// Replaces every element with the sum of itself and all preceding elements.
///
/// Large inputs use a two-pass block scan: each worker scans its block, the
/// block totals are scanned serially, then every block but the first adds its
/// carry in parallel.
pub fn prefix_sum<T>(values: &mut [T])
where
    T: PrimInt + Send + Sync,
{
    let threads = rayon::current_num_threads();
    if values.len() < PARALLEL_SCAN_MIN_LEN || threads < 2 {
        serial_prefix_sum(values);
        return;
    }

    let block = values.len().div_ceil(threads);
    let totals: Vec<T> = values
        .par_chunks_mut(block)
        .map(|chunk| {
            serial_prefix_sum(chunk);
            chunk.last().copied().unwrap_or_else(T::zero)
        })
        .collect();

    let mut carry = T::zero();
    let carries: Vec<T> = totals
        .iter()
        .map(|&total| {
            let before = carry;
            carry = carry + total;
            before
        })
        .collect();

    values
        .par_chunks_mut(block)
        .zip(carries.par_iter())
        .skip(1)
        .for_each(|(chunk, &carry)| {
            for v in chunk {
                *v = *v + carry;
            }
        });
}

fn serial_prefix_sum<T: PrimInt>(values: &mut [T]) {
    let mut acc = T::zero();
    for v in values {
        acc = acc + *v;
        *v = acc;
    }
}

/// `[0, 1, ..., len - 1]`, built in parallel.
pub fn identity_permutation(len: usize) -> Vec<u64> {
    (0..len).into_par_iter().map(|i| i as u64).collect()
}

/// Carves an edge-indexed slice into one disjoint sub-slice per node.
///
/// `ends` is a CSR end-offset array; part `n` covers
/// `[ends[n - 1], ends[n])` (with an implicit `0` before the first node).
/// The parts can then be handed to independent workers.
///
/// # Panics
/// Panics if `ends` is decreasing or its last entry exceeds `slice.len()`.
pub fn split_by_ends<'s, T>(mut slice: &'s mut [T], ends: &[Edge]) -> Vec<&'s mut [T]> {
    let mut parts = Vec::with_capacity(ends.len());
    let mut begin: Edge = 0;
    for &end in ends {
        let (head, tail) = core::mem::take(&mut slice).split_at_mut((end - begin) as usize);
        parts.push(head);
        slice = tail;
        begin = end;
    }
    parts
}

/// Start offset of every node's range, given CSR end offsets.
pub fn range_begins(adj_ends: &[Edge]) -> Vec<Edge> {
    (0..adj_ends.len())
        .into_par_iter()
        .map(|n| if n == 0 { 0 } else { adj_ends[n - 1] })
        .collect()
}
