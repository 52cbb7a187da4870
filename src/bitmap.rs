//! ## Bitmap primitive
//! Fixed-length bit array backing the counter's two per-value flag sets.
//!
//! The word buffer is sized once at construction from the configured domain and
//! never grows: one bit per domain value, packed into `u64` words. Bit access is
//! explicit word index plus mask, and population count runs a word at a time
//! through `u64::count_ones`.
//!
//! Bits are only ever set through domain-validated indices, so padding bits in
//! the last word stay zero and word-level operations need no masking.

use crate::error::CounterError;

/// Number of `u64` words needed to hold `bits` bits.
#[inline]
const fn words_for_bits(bits: u64) -> usize {
    (bits.div_ceil(64)) as usize
}

/// Fixed-length bitmap with one bit per domain value.
pub(crate) struct Bitmap {
    words: Vec<u64>,
}

impl Bitmap {
    /// Allocate a zero-filled bitmap of `bits` bits.
    ///
    /// The buffer is reserved fallibly so that an unsatisfiable allocation (the
    /// full 32-bit domain needs 512 MiB per bitmap) surfaces as
    /// [`CounterError::Allocation`] instead of aborting the process. No
    /// partially constructed bitmap is returned.
    pub(crate) fn zeroed(bits: u64) -> Result<Self, CounterError> {
        let len = words_for_bits(bits);
        let mut words = Vec::new();
        words
            .try_reserve_exact(len)
            .map_err(|_| CounterError::Allocation { bits })?;
        words.resize(len, 0);
        Ok(Self { words })
    }

    /// Return whether bit `idx` is set. Callers guarantee `idx` is in range.
    #[inline]
    pub(crate) fn get(&self, idx: u32) -> bool {
        self.words[(idx >> 6) as usize] & (1u64 << (idx & 63)) != 0
    }

    /// Set bit `idx`.
    #[inline]
    pub(crate) fn set(&mut self, idx: u32) {
        self.words[(idx >> 6) as usize] |= 1u64 << (idx & 63);
    }

    /// Clear bit `idx`.
    #[inline]
    pub(crate) fn clear(&mut self, idx: u32) {
        self.words[(idx >> 6) as usize] &= !(1u64 << (idx & 63));
    }

    /// Exact number of set bits, counted a word at a time.
    #[inline]
    pub(crate) fn count_ones(&self) -> u64 {
        self.words.iter().map(|w| u64::from(w.count_ones())).sum()
    }

    /// Backing words, one bit per domain value in little-endian bit order.
    #[inline]
    pub(crate) fn words(&self) -> &[u64] {
        &self.words
    }

    /// Mutable backing words, used by the word-wise merge routine.
    #[inline]
    pub(crate) fn words_mut(&mut self) -> &mut [u64] {
        &mut self.words
    }

    /// Memory occupied by the backing buffer.
    pub(crate) fn size_of(&self) -> usize {
        std::mem::size_of_val(self.words.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(1 => 1)]
    #[test_case(63 => 1)]
    #[test_case(64 => 1)]
    #[test_case(65 => 2)]
    #[test_case(1 << 16 => 1024)]
    fn test_words_for_bits(bits: u64) -> usize {
        words_for_bits(bits)
    }

    #[test]
    fn test_set_get_clear() {
        let mut bm = Bitmap::zeroed(128).unwrap();
        assert!(!bm.get(0));
        assert!(!bm.get(127));

        bm.set(0);
        bm.set(63);
        bm.set(64);
        bm.set(127);
        assert!(bm.get(0));
        assert!(bm.get(63));
        assert!(bm.get(64));
        assert!(bm.get(127));
        assert_eq!(bm.count_ones(), 4);

        bm.clear(63);
        assert!(!bm.get(63));
        assert!(bm.get(64));
        assert_eq!(bm.count_ones(), 3);
    }

    #[test]
    fn test_zeroed_starts_empty() {
        let bm = Bitmap::zeroed(1000).unwrap();
        assert_eq!(bm.count_ones(), 0);
        assert!(bm.words().iter().all(|&w| w == 0));
    }

    #[test]
    fn test_count_ones_across_words() {
        let mut bm = Bitmap::zeroed(256).unwrap();
        for idx in (0..256).step_by(3) {
            bm.set(idx);
        }
        assert_eq!(bm.count_ones(), 86);
    }
}
