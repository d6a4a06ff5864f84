//! PCG32 pseudo-random generator
//!
//! 64-bit state, 32-bit output (XSH-RR permutation). Used to draw the
//! Zobrist keys at startup and to break ties between equally scored moves.

use rand::{Error, RngCore, SeedableRng};

const MULTIPLIER: u64 = 6364136223846793005;

/// Permuted congruential generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pcg32 {
    state: u64,
    inc: u64,
}

impl Pcg32 {
    /// Create a generator from a raw state and stream increment.
    /// The increment is forced odd.
    pub fn new(state: u64, inc: u64) -> Self {
        Self {
            state,
            inc: inc | 1,
        }
    }

    /// Next uniformly distributed 32-bit value
    pub fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = old.wrapping_mul(MULTIPLIER).wrapping_add(self.inc);
        let xorshifted = (((old >> 18) ^ old) >> 27) as u32;
        let rot = (old >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Two 32-bit draws, high word first
    pub fn next_u64(&mut self) -> u64 {
        let hi = self.next_u32() as u64;
        let lo = self.next_u32() as u64;
        (hi << 32) | lo
    }

    /// Uniform value in `0..range` without modulo bias.
    ///
    /// Multiply-shift with rejection of the low product word below
    /// `2^32 mod range`. A zero range yields 0.
    pub fn ranged(&mut self, range: u32) -> u32 {
        if range == 0 {
            return 0;
        }
        let mut m = self.next_u32() as u64 * range as u64;
        let mut l = m as u32;
        if l < range {
            let threshold = range.wrapping_neg() % range;
            while l < threshold {
                m = self.next_u32() as u64 * range as u64;
                l = m as u32;
            }
        }
        (m >> 32) as u32
    }

    /// Seed from the operating system entropy source
    pub fn from_os_entropy() -> Self {
        <Self as SeedableRng>::from_entropy()
    }
}

impl RngCore for Pcg32 {
    fn next_u32(&mut self) -> u32 {
        Pcg32::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        Pcg32::next_u64(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = Pcg32::next_u32(self).to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Pcg32 {
    type Seed = [u8; 16];

    fn from_seed(seed: Self::Seed) -> Self {
        let mut state = [0u8; 8];
        let mut inc = [0u8; 8];
        state.copy_from_slice(&seed[..8]);
        inc.copy_from_slice(&seed[8..]);
        Pcg32::new(u64::from_le_bytes(state), u64::from_le_bytes(inc))
    }
}
