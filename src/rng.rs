/// Random sources for pipe-gap placement.
///
/// `Lehmer32` is the tiny hash-counter generator the firmware ships with (no
/// tables, two multiplies per draw) and is what the host runs. `StdRandom`
/// wraps `rand`'s `StdRng` for tests.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::hal::RandomSource;

// ── Lehmer32 ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Lehmer32 {
    state: u32,
}

impl Lehmer32 {
    pub fn new(seed: u32) -> Self {
        Lehmer32 { state: seed }
    }

    fn next(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0xE120_FC15);
        let tmp = u64::from(self.state) * 0x4A39_B70D;
        let m1 = ((tmp >> 32) ^ tmp) as u32;
        let tmp = u64::from(m1) * 0x12FA_D5C9;
        ((tmp >> 32) ^ tmp) as u32
    }
}

impl RandomSource for Lehmer32 {
    fn seed(&mut self, seed: u32) {
        self.state = seed;
    }

    fn rand_range(&mut self, min: i32, max: i32) -> i32 {
        let span = (max - min).max(1) as u32;
        (self.next() % span) as i32 + min
    }
}

impl RngCore for Lehmer32 {
    fn next_u32(&mut self) -> u32 {
        self.next()
    }

    fn next_u64(&mut self) -> u64 {
        (u64::from(self.next()) << 32) | u64::from(self.next())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Lehmer32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Lehmer32::new(u32::from_le_bytes(seed))
    }
}

// ── rand adapter ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    pub fn new(seed: u64) -> Self {
        StdRandom {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        StdRandom::new(0)
    }
}

impl RandomSource for StdRandom {
    fn seed(&mut self, seed: u32) {
        self.rng = StdRng::seed_from_u64(u64::from(seed));
    }

    fn rand_range(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }
}
