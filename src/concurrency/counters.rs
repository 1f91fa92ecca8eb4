//! Fixed-size arrays of atomic counters.
//!
//! These back the scatter phase of parallel CSR construction: a first pass
//! counts per-node degrees with [`AtomicCounterArray::increment`], a second
//! pass claims output slots with [`AtomicCounterArray::fetch_increment`].
//!
//! Every operation uses `Relaxed` ordering. The counters are only read back
//! after the enclosing rayon region has joined, which already provides the
//! happens-before edge between the writers and the reader.

use core::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use rayon::prelude::*;

/// A boxed slice of `AtomicU64` counters, indexed like a `Vec<u64>`.
pub struct AtomicCounterArray {
    counters: Box<[AtomicU64]>,
}

impl AtomicCounterArray {
    /// Creates `len` counters initialised to zero.
    pub fn zeroed(len: usize) -> Self {
        let counters = (0..len)
            .into_par_iter()
            .map(|_| AtomicU64::new(0))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self { counters }
    }

    /// Creates one counter per value, initialised to that value.
    pub fn from_values(values: Vec<u64>) -> Self {
        let counters = values
            .into_par_iter()
            .map(AtomicU64::new)
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self { counters }
    }

    /// Number of counters.
    #[inline]
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// Returns `true` if there are no counters.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Adds one to counter `index`.
    ///
    /// # Panics
    /// Panics if `index >= len()`.
    #[inline(always)]
    pub fn increment(&self, index: usize) {
        self.counters[index].fetch_add(1, Ordering::Relaxed);
    }

    /// Adds one to counter `index` and returns its previous value.
    ///
    /// Used as a write cursor: each call hands out a distinct slot.
    ///
    /// # Panics
    /// Panics if `index >= len()`.
    #[inline(always)]
    pub fn fetch_increment(&self, index: usize) -> u64 {
        self.counters[index].fetch_add(1, Ordering::Relaxed)
    }

    /// Stores `value` into counter `index`.
    ///
    /// # Panics
    /// Panics if `index >= len()`.
    #[inline(always)]
    pub fn store(&self, index: usize, value: u64) {
        self.counters[index].store(value, Ordering::Relaxed);
    }

    /// Current value of counter `index`.
    ///
    /// # Panics
    /// Panics if `index >= len()`.
    #[inline(always)]
    pub fn load(&self, index: usize) -> u64 {
        self.counters[index].load(Ordering::Relaxed)
    }

    /// Consumes the array and returns the plain values.
    pub fn into_vec(self) -> Vec<u64> {
        self.counters
            .into_vec()
            .into_par_iter()
            .map(AtomicU64::into_inner)
            .collect()
    }
}

/// Destination slots written out of order by a parallel scatter.
///
/// Each slot is written exactly once (the writer claimed it from an
/// [`AtomicCounterArray`]), so plain `Relaxed` stores suffice.
pub struct AtomicNodeSlots {
    slots: Box<[AtomicU32]>,
}

impl AtomicNodeSlots {
    /// Creates `len` slots initialised to zero.
    pub fn zeroed(len: usize) -> Self {
        let slots = (0..len)
            .into_par_iter()
            .map(|_| AtomicU32::new(0))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self { slots }
    }

    /// Writes `value` into slot `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    #[inline(always)]
    pub fn store(&self, index: usize, value: u32) {
        self.slots[index].store(value, Ordering::Relaxed);
    }

    /// Consumes the slots and returns the plain values.
    pub fn into_vec(self) -> Vec<u32> {
        self.slots
            .into_vec()
            .into_par_iter()
            .map(AtomicU32::into_inner)
            .collect()
    }
}
