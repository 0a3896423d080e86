//! 32-bit Mersenne Twister and masked bounded integer draws.
//!
//! The generator is seeded with the classic `init_genrand` recurrence and the
//! bounded draw uses mask-and-reject, so a given seed produces the same
//! integers as any other MT19937 stack that seeds and bounds the same way.

use rand::{Error, RngCore, SeedableRng};

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

/// MT19937 state.
#[derive(Clone)]
pub struct Mt19937 {
    state: [u32; N],
    index: usize,
}

impl std::fmt::Debug for Mt19937 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mt19937").field("index", &self.index).finish()
    }
}

impl Mt19937 {
    /// Seed with `init_genrand(seed)`.
    pub fn new(seed: u32) -> Self {
        let mut state = [0u32; N];
        state[0] = seed;
        for i in 1..N {
            let prev = state[i - 1];
            state[i] = 1_812_433_253u32
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        Self { state, index: N }
    }

    fn twist(&mut self) {
        for k in 0..N {
            let y = (self.state[k] & UPPER_MASK) | (self.state[(k + 1) % N] & LOWER_MASK);
            let mag = if y & 1 == 1 { MATRIX_A } else { 0 };
            self.state[k] = self.state[(k + M) % N] ^ (y >> 1) ^ mag;
        }
        self.index = 0;
    }

    /// Next tempered 32-bit output.
    pub fn next_word(&mut self) -> u32 {
        if self.index >= N {
            self.twist();
        }
        let mut y = self.state[self.index];
        self.index += 1;

        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^= y >> 18;
        y
    }
}

impl RngCore for Mt19937 {
    fn next_u32(&mut self) -> u32 {
        self.next_word()
    }

    /// High word first.
    fn next_u64(&mut self) -> u64 {
        let hi = self.next_word() as u64;
        let lo = self.next_word() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let word = self.next_word().to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Mt19937 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    /// Uses the low 32 bits of `state` directly as the `init_genrand` seed.
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as u32)
    }
}

/// Smallest all-ones bit pattern covering `max`.
fn mask_for(max: u64) -> u64 {
    let mut mask = max;
    mask |= mask >> 1;
    mask |= mask >> 2;
    mask |= mask >> 4;
    mask |= mask >> 8;
    mask |= mask >> 16;
    mask |= mask >> 32;
    mask
}

/// Uniform integer in `[low, high)` by masked rejection sampling.
///
/// Ranges that fit in 32 bits consume one 32-bit word per attempt; wider
/// ranges consume 64-bit words. `low` must be strictly less than `high`.
pub fn bounded<R: RngCore + ?Sized>(rng: &mut R, low: i64, high: i64) -> i64 {
    debug_assert!(low < high);
    let max = (high as i128 - low as i128 - 1) as u64;
    if max == 0 {
        return low;
    }

    let mask = mask_for(max);
    let offset = if max <= u32::MAX as u64 {
        let mask = mask as u32;
        loop {
            let v = (rng.next_u32() & mask) as u64;
            if v <= max {
                break v;
            }
        }
    } else {
        loop {
            let v = rng.next_u64() & mask;
            if v <= max {
                break v;
            }
        }
    };
    (low as i128 + offset as i128) as i64
}
