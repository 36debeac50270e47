use crate::error::Error;
use crate::modulus::ReduceOnce;
use crate::modulus::barrett::BarrettPrecomp;
use crate::modulus::prime::Prime;
use primality_test::is_prime;
use prime_factorization::Factorization;

impl Prime<u64> {
    /// Returns a new instance of Prime<u64>.
    /// Fails if q is not a prime > 2 or if q has more than 61 bits.
    pub fn new(q: u64) -> Result<Self, Error> {
        if q <= 2 || u64::BITS - q.leading_zeros() > 61 || !is_prime(q) {
            return Err(Error::InvalidModulus { p: q });
        }

        let mut factors: Vec<u64> = Factorization::run(q - 1)
            .prime_factor_repr()
            .iter()
            .map(|(factor, _)| *factor)
            .collect();
        factors.dedup();

        Ok(Self {
            q,
            two_q: q << 1,
            factors,
            barrett: BarrettPrecomp::new(q),
            phi: q - 1,
        })
    }

    #[inline(always)]
    pub fn q(&self) -> u64 {
        self.q
    }

    #[inline(always)]
    pub fn add(&self, a: u64, b: u64) -> u64 {
        debug_assert!(a < self.q && b < self.q);
        (a + b).reduce_once(self.q)
    }

    #[inline(always)]
    pub fn sub(&self, a: u64, b: u64) -> u64 {
        debug_assert!(a < self.q && b < self.q);
        (a + self.q - b).reduce_once(self.q)
    }

    #[inline(always)]
    pub fn neg(&self, a: u64) -> u64 {
        debug_assert!(a < self.q);
        (self.q - a).reduce_once(self.q)
    }

    #[inline(always)]
    pub fn mul(&self, a: u64, b: u64) -> u64 {
        ((a as u128 * b as u128) % self.q as u128) as u64
    }

    /// Returns x^exponent mod q.
    pub fn pow(&self, x: u64, exponent: u64) -> u64 {
        let mut y: u64 = 1 % self.q;
        let mut x: u64 = x % self.q;
        let mut i: u64 = exponent;
        while i > 0 {
            if i & 1 == 1 {
                y = self.mul(y, x);
            }
            x = self.mul(x, x);
            i >>= 1;
        }
        y
    }

    /// Returns x^-1 mod q.
    /// User must ensure that x is not divisible by q.
    #[inline(always)]
    pub fn inv(&self, x: u64) -> u64 {
        debug_assert!(x % self.q != 0, "invalid argument x: {} = 0 mod q", x);
        self.pow(x, self.phi - 1)
    }

    /// Returns the smallest generator of (Z/qZ)*.
    pub fn primitive_root(&self) -> u64 {
        (2..self.q)
            .find(|&candidate| {
                self.factors
                    .iter()
                    .all(|&factor| self.pow(candidate, self.phi / factor) != 1)
            })
            .unwrap_or_else(|| panic!("failed to find a primitive root for q={}", self.q))
    }

    /// Returns a primitive nth_root-th root of unity mod q.
    /// Panics if nth_root is not a power of two dividing q-1.
    pub fn primitive_nth_root(&self, nth_root: u64) -> u64 {
        assert!(
            nth_root.is_power_of_two() && nth_root >= 2,
            "invalid argument: nth_root = {} is not a power of two >= 2",
            nth_root
        );
        assert!(
            self.q & (nth_root - 1) == 1,
            "invalid prime: q = {} % nth_root = {} = {} != 1",
            self.q,
            nth_root,
            self.q & (nth_root - 1)
        );

        let psi: u64 = self.pow(self.primitive_root(), self.phi / nth_root);

        debug_assert!(self.pow(psi, nth_root) == 1, "invalid nth primitive root: psi^nth_root != 1 mod q");
        debug_assert!(
            self.pow(psi, nth_root >> 1) == self.q - 1,
            "invalid nth primitive root: psi^(nth_root/2) != -1 mod q"
        );

        psi
    }

    /// Returns the multiplicative order of x mod m, for x coprime with m.
    pub fn order_mod(x: u64, m: u64) -> u64 {
        let mut y: u64 = x % m;
        let mut order: u64 = 1;
        while y != 1 % m {
            y = ((y as u128 * x as u128) % m as u128) as u64;
            order += 1;
            assert!(order <= m, "invalid arguments: x={} is not invertible mod m={}", x, m);
        }
        order
    }
}
