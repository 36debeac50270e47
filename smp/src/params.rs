use math::ring::RingContext;

/// Plaintext ring parameters: `N = 2^log_n` and the prime `p`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Parameters {
    pub log_n: usize,
    pub p: u64,
}

impl Default for Parameters {
    /// `N = 4096`, `p = 70913`: 128 slots of degree 32.
    fn default() -> Self {
        Self {
            log_n: 12,
            p: 70913,
        }
    }
}

impl Parameters {
    pub fn new(log_n: usize, p: u64) -> Self {
        Self { log_n, p }
    }

    /// Cyclotomic index `m = 2N`.
    pub fn m(&self) -> usize {
        2 << self.log_n
    }

    pub fn ring_context(&self) -> Result<RingContext, math::Error> {
        RingContext::new(self.log_n, self.p)
    }
}
