//! ## Dual-bitmap cardinality counter
//! Exact distinct-value and single-occurrence counting over a bounded, densely
//! addressable `u32` domain.
//!
//! Every domain value is in one of three states, encoded as one bit in each of
//! two parallel bitmaps:
//!
//! | `seen_once` | `seen_multiple` | state      |
//! |-------------|-----------------|------------|
//! | 0           | 0               | never seen |
//! | 1           | 0               | seen once  |
//! | 0           | 1               | seen >= 2  |
//!
//! The two bits are mutually exclusive per value and the `seen >= 2` state is
//! absorbing: further observations of the same value change nothing. The 2-bit
//! state is split across two parallel arrays rather than packed per value,
//! trading packing density for branch-light whole-word bit access.
//!
//! Memory use is fixed at two bits per domain value regardless of how many
//! distinct values actually appear; the reference full `u32` domain costs
//! ~1 GiB across both bitmaps.

use std::fmt::{Debug, Formatter};
use std::mem::size_of;

use crate::bitmap::Bitmap;
use crate::error::CounterError;

/// Domain size of the reference configuration: the full `u32` value range.
pub const FULL_DOMAIN: u64 = 1 << 32;

/// Summary statistics computed by [`CardinalityCounter::finalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    /// Number of values observed at least once.
    pub distinct: u64,
    /// Number of values observed exactly once.
    pub unique: u64,
}

/// Exact distinct-value counter backed by two fixed-size bitmaps.
///
/// An owned instance with no process-wide state: multiple counters (for sharded
/// counting or repeated test runs) can coexist. Both bitmaps are released when
/// the counter is dropped.
pub struct CardinalityCounter {
    seen_once: Bitmap,
    seen_multiple: Bitmap,
    domain_size: u64,
}

impl CardinalityCounter {
    /// Create a counter over the domain `[0, domain_size)`.
    ///
    /// `domain_size` must be in `[1, 2^32]`. Both bitmaps are allocated
    /// zero-filled up front and never grow; allocation failure fails the whole
    /// construction with [`CounterError::Allocation`].
    pub fn with_domain(domain_size: u64) -> Result<Self, CounterError> {
        if domain_size == 0 || domain_size > FULL_DOMAIN {
            return Err(CounterError::InvalidDomain { domain_size });
        }
        Ok(Self {
            seen_once: Bitmap::zeroed(domain_size)?,
            seen_multiple: Bitmap::zeroed(domain_size)?,
            domain_size,
        })
    }

    /// Create a counter over the reference domain: all `u32` values.
    pub fn full() -> Result<Self, CounterError> {
        Self::with_domain(FULL_DOMAIN)
    }

    /// Domain size this counter was built with.
    #[inline]
    pub fn domain_size(&self) -> u64 {
        self.domain_size
    }

    /// Record one occurrence of `value`.
    ///
    /// Fails with [`CounterError::OutOfRange`] when `value` is not representable
    /// in the configured domain, leaving the counter state unchanged; the caller
    /// decides whether to skip the value or abort the stream. O(1), no side
    /// effects beyond the bit transition.
    #[inline]
    pub fn observe(&mut self, value: u32) -> Result<(), CounterError> {
        if u64::from(value) >= self.domain_size {
            return Err(CounterError::OutOfRange {
                value,
                domain_size: self.domain_size,
            });
        }

        // Fast path for repeated hot values: `seen >= 2` is absorbing.
        if self.seen_multiple.get(value) {
            return Ok(());
        }

        if self.seen_once.get(value) {
            // second occurrence: once -> multiple
            self.seen_once.clear(value);
            self.seen_multiple.set(value);
        } else {
            self.seen_once.set(value);
        }

        Ok(())
    }

    /// Compute the summary statistics from the current bitmap state.
    ///
    /// `unique` is the popcount of the seen-once bitmap and `distinct` adds the
    /// popcount of the seen-multiple bitmap. Idempotent: repeated calls without
    /// intervening [`observe`](Self::observe) calls return the same counts.
    pub fn finalize(&self) -> Counts {
        let unique = self.seen_once.count_ones();
        let multiple = self.seen_multiple.count_ones();
        Counts {
            distinct: unique + multiple,
            unique,
        }
    }

    /// Fold the observations recorded by `rhs` into `self`.
    ///
    /// This is the shard merge protocol: a value seen once in each of two
    /// shards has been seen twice globally, so per word
    /// `multiple = m1 | m2 | (o1 & o2)` and `once = (o1 | o2) & !multiple`.
    /// Summing per-shard popcounts instead would overcount `unique`.
    ///
    /// Fails with [`CounterError::DomainMismatch`] when the counters were built
    /// over different domains, leaving `self` unchanged.
    pub fn merge(&mut self, rhs: &Self) -> Result<(), CounterError> {
        if self.domain_size != rhs.domain_size {
            return Err(CounterError::DomainMismatch {
                left: self.domain_size,
                right: rhs.domain_size,
            });
        }

        let once = self.seen_once.words_mut();
        let multiple = self.seen_multiple.words_mut();
        let rhs_once = rhs.seen_once.words();
        let rhs_multiple = rhs.seen_multiple.words();

        for i in 0..once.len() {
            let o = once[i] | rhs_once[i];
            let m = multiple[i] | rhs_multiple[i] | (once[i] & rhs_once[i]);
            multiple[i] = m;
            once[i] = o & !m;
        }

        Ok(())
    }

    /// Memory size of the counter including both bitmap allocations.
    pub fn size_of(&self) -> usize {
        size_of::<Self>() + self.seen_once.size_of() + self.seen_multiple.size_of()
    }
}

impl Debug for CardinalityCounter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let counts = self.finalize();
        write!(
            f,
            "{{ domain_size: {}, distinct: {}, unique: {} }}",
            self.domain_size, counts.distinct, counts.unique
        )
    }
}
