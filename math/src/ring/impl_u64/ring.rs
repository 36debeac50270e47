use crate::dft::ntt::Table;
use crate::error::Error;
use crate::modulus::BARRETT;
use crate::modulus::prime::Prime;
use crate::poly::Poly;
use crate::ring::{Factor, RingContext};
use itertools::izip;
use log::debug;

/// Largest supported ring degree is `2^MAX_LOG_N`.
pub const MAX_LOG_N: usize = 17;

impl RingContext {
    /// Builds the slot structure of `F_p[X]/(X^(2^log_n) + 1)`.
    ///
    /// With `p - 1 = 2^v * odd`, `X^N + 1` splits over `F_p` into
    /// `l = min(2^(v-1), N)` irreducible binomials of degree `d = N / l`.
    /// Fails if `p = 3 mod 4`, where the factors are not binomials.
    pub fn new(log_n: usize, p: u64) -> Result<Self, Error> {
        if log_n == 0 || log_n > MAX_LOG_N {
            return Err(Error::InvalidDegree { log_n });
        }

        let prime: Prime<u64> = Prime::<u64>::new(p)?;

        if p & 3 != 1 {
            return Err(Error::UnsupportedModulus { p });
        }

        let n: usize = 1 << log_n;
        let v: u32 = (p - 1).trailing_zeros();
        let l: usize = n.min(1 << (v - 1));
        let d: usize = n / l;

        debug_assert!(
            Prime::<u64>::order_mod(p, 2 * n as u64) == d as u64,
            "slot degree d={} != ord_(2N)(p)",
            d
        );

        let dft: Table<u64> = Table::<u64>::new(prime.clone(), 2 * l as u64);

        let factors: Vec<Factor> = dft
            .roots()
            .iter()
            .map(|r| Factor::binomial(d, prime.neg(*r)))
            .collect();

        debug!(
            "ring context: N={} p={} l={} d={}",
            n, p, l, d
        );

        Ok(Self {
            n,
            l,
            d,
            modulus: prime,
            factors,
            dft,
        })
    }

    /// Returns the Galois element `p^t mod 2N`, i.e. the t-th power of
    /// the Frobenius automorphism `X -> X^p`.
    pub fn galois_element(&self, t: usize) -> usize {
        let nth_root: u64 = self.nth_root() as u64;
        let mut gal_el: u64 = 1;
        let base: u64 = self.p() % nth_root;
        for _ in 0..t {
            gal_el = (gal_el * base) % nth_root;
        }
        gal_el as usize
    }

    /// Reduces every coefficient of a into [0, p).
    pub fn reduce_inplace(&self, a: &mut Poly<u64>) {
        a.0.iter_mut()
            .for_each(|a| self.modulus.barrett.reduce_assign::<BARRETT>(a));
    }

    pub fn add_inplace(&self, a: &Poly<u64>, b: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        izip!(a.0.iter(), b.0.iter_mut()).for_each(|(a, b)| *b = self.modulus.add(*a, *b));
    }

    pub fn add(&self, a: &Poly<u64>, b: &Poly<u64>, c: &mut Poly<u64>) {
        debug_assert!(c.n() == self.n(), "c.n()={} != n={}", c.n(), self.n());
        c.copy_from(b);
        self.add_inplace(a, c);
    }

    /// Returns a * b mod (X^N + 1, p) by schoolbook multiplication.
    pub fn mul(&self, a: &Poly<u64>, b: &Poly<u64>) -> Poly<u64> {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        let n: usize = self.n();
        let q: u128 = self.p() as u128;
        let mut acc: Vec<u128> = vec![0; n];
        let mut acc_neg: Vec<u128> = vec![0; n];
        a.0.iter().enumerate().filter(|(_, ai)| **ai != 0).for_each(|(i, ai)| {
            b.0.iter().enumerate().for_each(|(j, bj)| {
                let prod: u128 = (*ai as u128 * *bj as u128) % q;
                if i + j < n {
                    acc[i + j] += prod;
                } else {
                    acc_neg[i + j - n] += prod;
                }
            });
        });
        Poly(
            izip!(acc.iter(), acc_neg.iter())
                .map(|(pos, neg)| ((pos % q + q - neg % q) % q) as u64)
                .collect(),
        )
    }
}
