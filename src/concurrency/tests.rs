//! Tests for the parallel building blocks.

use rayon::prelude::*;

use super::*;

#[test]
fn test_prefix_sum_small_matches_serial() {
    let mut v = vec![1u64, 0, 2, 3, 0];
    prefix_sum(&mut v);
    assert_eq!(v, vec![1, 1, 3, 6, 6]);
}

#[test]
fn test_prefix_sum_empty_is_noop() {
    let mut v: Vec<u64> = Vec::new();
    prefix_sum(&mut v);
    assert!(v.is_empty());
}

#[test]
fn test_prefix_sum_large_uses_block_scan() {
    let n = 100_003usize;
    let mut v: Vec<u64> = (0..n as u64).map(|i| i % 7).collect();
    let mut expected = v.clone();
    let mut acc = 0;
    for x in &mut expected {
        acc += *x;
        *x = acc;
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(4).build().unwrap();
    pool.install(|| prefix_sum(&mut v));
    assert_eq!(v, expected);
}

#[test]
fn test_prefix_sum_is_generic_over_integers() {
    let mut v = vec![3usize, 4, 5];
    prefix_sum(&mut v);
    assert_eq!(v, vec![3, 7, 12]);
}

#[test]
fn test_counters_count_concurrently() {
    let counters = AtomicCounterArray::zeroed(4);
    (0..10_000usize).into_par_iter().for_each(|i| counters.increment(i % 4));
    assert_eq!(counters.into_vec(), vec![2500; 4]);
}

#[test]
fn test_fetch_increment_hands_out_distinct_slots() {
    let cursors = AtomicCounterArray::from_values(vec![10]);
    let mut claimed: Vec<u64> = (0..1000)
        .into_par_iter()
        .map(|_| cursors.fetch_increment(0))
        .collect();
    claimed.sort_unstable();
    assert_eq!(claimed, (10..1010).collect::<Vec<_>>());
    assert_eq!(cursors.load(0), 1010);
}

#[test]
fn test_node_slots_round_trip() {
    let slots = AtomicNodeSlots::zeroed(3);
    slots.store(2, 7);
    slots.store(0, 5);
    assert_eq!(slots.into_vec(), vec![5, 0, 7]);
}

#[test]
fn test_split_by_ends_gives_node_ranges() {
    let mut data = vec![0, 1, 2, 3, 4];
    let parts = split_by_ends(&mut data, &[2, 2, 5]);
    assert_eq!(parts.len(), 3);
    assert_eq!(&*parts[0], &[0, 1]);
    assert!(parts[1].is_empty());
    assert_eq!(&*parts[2], &[2, 3, 4]);
}

#[test]
fn test_identity_permutation_counts_up() {
    assert_eq!(identity_permutation(4), vec![0, 1, 2, 3]);
    assert!(identity_permutation(0).is_empty());
}

#[test]
fn test_range_begins_shifts_ends() {
    assert_eq!(range_begins(&[2, 2, 5]), vec![0, 2, 2]);
    assert!(range_begins(&[]).is_empty());
}
