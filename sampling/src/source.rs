use rand::Rng;
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
use rand_core::RngCore;

/// Deterministic ChaCha8 stream. Two sources built from the same seed
/// produce the same values.
pub struct Source {
    source: ChaCha8Rng,
}

impl Source {
    pub fn new(seed: [u8; 32]) -> Source {
        Source {
            source: ChaCha8Rng::from_seed(seed),
        }
    }

    /// Derives an independent child source and returns it with its seed.
    pub fn branch(&mut self) -> ([u8; 32], Self) {
        let seed: [u8; 32] = self.new_seed();
        (seed, Source::new(seed))
    }

    pub fn new_seed(&mut self) -> [u8; 32] {
        let mut seed: [u8; 32] = [0u8; 32];
        self.fill_bytes(&mut seed);
        seed
    }

    /// Rejection-samples a value in [0, max) from `next_u64() & mask`.
    /// mask must cover max - 1.
    #[inline(always)]
    pub fn next_u64n(&mut self, max: u64, mask: u64) -> u64 {
        debug_assert!(max > 0 && mask >= max - 1);
        let mut x: u64 = self.next_u64() & mask;
        while x >= max {
            x = self.next_u64() & mask;
        }
        x
    }

    /// Uniform value in [0, q).
    #[inline(always)]
    pub fn next_mod(&mut self, q: u64) -> u64 {
        self.random_range(0..q)
    }

    /// Fills `a` with uniform values in [0, q).
    pub fn fill_mod(&mut self, q: u64, a: &mut [u64]) {
        debug_assert!(q > 0, "q must be nonzero");
        let mask: u64 = q.checked_next_power_of_two().map_or(u64::MAX, |x| x - 1);
        a.iter_mut().for_each(|a| *a = self.next_u64n(q, mask));
    }
}

impl RngCore for Source {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        self.source.next_u32()
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.source.next_u64()
    }

    #[inline(always)]
    fn fill_bytes(&mut self, bytes: &mut [u8]) {
        self.source.fill_bytes(bytes)
    }
}
