use crate::modulus::prime::Prime;
use std::cmp::PartialEq;

/// Dense polynomial, coefficients from low to high degree.
#[derive(Clone, Debug, Eq, Default)]
pub struct Poly<O>(pub Vec<O>);

impl<O> Poly<O>
where
    O: Default + Clone + Copy + PartialEq,
{
    pub fn new(n: usize) -> Self {
        Self(vec![O::default(); n])
    }

    /// Returns the number of stored coefficients.
    pub fn n(&self) -> usize {
        self.0.len()
    }

    /// Returns the i-th coefficient, or zero if i is past the end.
    pub fn coeff(&self, i: usize) -> O {
        self.0.get(i).copied().unwrap_or_default()
    }

    /// Returns the index of the highest nonzero coefficient.
    pub fn degree(&self) -> Option<usize> {
        self.0.iter().rposition(|c| *c != O::default())
    }

    /// Returns the index of the first nonzero coefficient at or after `bound`.
    pub fn first_nonzero_from(&self, bound: usize) -> Option<usize> {
        self.0
            .iter()
            .skip(bound)
            .position(|c| *c != O::default())
            .map(|i| i + bound)
    }

    pub fn resize(&mut self, n: usize) {
        self.0.resize(n, O::default());
    }

    pub fn set_all(&mut self, v: &O) {
        self.0.fill(*v)
    }

    pub fn zero(&mut self) {
        self.set_all(&O::default())
    }

    pub fn copy_from(&mut self, other: &Poly<O>) {
        if std::ptr::eq(self, other) {
            return;
        }
        self.resize(other.n());
        self.0.copy_from_slice(&other.0)
    }
}

impl Poly<u64> {
    /// Returns `v * X^j` with `n` coefficients.
    pub fn monomial(n: usize, j: usize, v: u64) -> Self {
        debug_assert!(j < n, "j={} >= n={}", j, n);
        let mut poly: Poly<u64> = Poly::new(n);
        poly.0[j] = v;
        poly
    }

    /// Returns `self mod divisor` over `F_q`, with `degree(divisor)`
    /// coefficients. `divisor` is given low to high and must be monic.
    pub fn rem_monic(&self, prime: &Prime<u64>, divisor: &[u64]) -> Poly<u64> {
        let d: usize = divisor.len() - 1;
        debug_assert!(divisor[d] == 1, "divisor is not monic");
        let mut rem: Vec<u64> = self.0.iter().map(|c| c % prime.q()).collect();
        for i in (d..rem.len()).rev() {
            let lead: u64 = rem[i];
            if lead == 0 {
                continue;
            }
            divisor.iter().enumerate().for_each(|(k, c)| {
                let at: usize = i - d + k;
                rem[at] = prime.sub(rem[at], prime.mul(lead, *c));
            });
        }
        rem.resize(d, 0);
        Poly(rem)
    }
}

impl<O: PartialEq> PartialEq for Poly<O> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || (self.0 == other.0)
    }
}

impl<O> From<Vec<O>> for Poly<O> {
    fn from(coeffs: Vec<O>) -> Self {
        Self(coeffs)
    }
}
