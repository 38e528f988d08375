//! Reference random source for maze generation.
//!
//! Layout reproducibility depends on two things staying fixed: the bit stream
//! ([`SplitMix64`]) and how a bounded index is drawn from it ([`pick_index`]).
//! Any `RngCore` can drive generation; only this pairing is pinned by the
//! golden layouts.

use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// SplitMix64: a tiny, fast, fully specified 64-bit generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Current internal state (for logging and snapshots).
    pub fn state(&self) -> u64 {
        self.state
    }
}

impl RngCore for SplitMix64 {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for SplitMix64 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    /// The seed is the state. The default impl would scramble it through PCG
    /// first, which would break the published golden layouts.
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}

/// Uniform index in `0..len` via 128-bit multiply-shift.
///
/// Consumes exactly one `next_u64` per call. `len` must be non-zero.
pub fn pick_index<R: RngCore + ?Sized>(rng: &mut R, len: usize) -> usize {
    debug_assert!(len > 0, "pick_index on an empty range");
    ((u128::from(rng.next_u64()) * len as u128) >> 64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_answer_for_seed_42() {
        let mut rng = SplitMix64::seed_from_u64(42);
        assert_eq!(rng.next_u64(), 0xbdd7_3226_2feb_6e95);
        assert_eq!(rng.next_u64(), 0x28ef_e333_b266_f103);
        assert_eq!(rng.next_u64(), 0x4752_6757_130f_9f52);
    }

    #[test]
    fn from_seed_matches_seed_from_u64() {
        let a = SplitMix64::from_seed(7u64.to_le_bytes());
        let b = SplitMix64::seed_from_u64(7);
        assert_eq!(a, b);
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = SplitMix64::new(99);
        let mut b = SplitMix64::new(99);
        for _ in 0..64 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn pick_index_stays_in_range() {
        let mut rng = SplitMix64::new(1);
        for len in 1..=4 {
            for _ in 0..200 {
                assert!(pick_index(&mut rng, len) < len);
            }
        }
    }

    #[test]
    fn fill_bytes_handles_partial_chunks() {
        let mut rng = SplitMix64::new(42);
        let mut buf = [0u8; 11];
        rng.fill_bytes(&mut buf);
        let first = 0xbdd7_3226_2feb_6e95u64.to_le_bytes();
        assert_eq!(&buf[..8], &first);
    }
}
