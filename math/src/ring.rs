pub mod impl_u64;

use crate::dft::ntt::Table;
use crate::modulus::prime::Prime;
use crate::poly::Poly;

/// The plaintext ring `F_p[X]/(X^N + 1)` together with its factorization
/// into `l` irreducible binomials `X^d + c_k`, `N = l * d`.
///
/// Slot `k` is the field `F_p[X]/(X^d - r_k)` with `r_k = p - c_k`. The
/// roots `r_k` are the roots of `Y^l + 1`, listed in the output order of the
/// size `l` negacyclic NTT, which is what the slot codec uses.
#[derive(Clone, Debug)]
pub struct RingContext {
    pub n: usize,
    pub l: usize,
    pub d: usize,
    pub modulus: Prime<u64>,
    pub factors: Vec<Factor>,
    pub dft: Table<u64>,
}

/// A monic factor of `X^N + 1`, coefficients from low to high degree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Factor {
    pub coeffs: Vec<u64>,
}

impl Factor {
    pub fn new(coeffs: Vec<u64>) -> Self {
        Self { coeffs }
    }

    /// Returns `X^d + c`.
    pub fn binomial(d: usize, c: u64) -> Self {
        let mut coeffs: Vec<u64> = vec![0; d + 1];
        coeffs[0] = c;
        coeffs[d] = 1;
        Self { coeffs }
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Constant coefficient `c` of `X^d + c`.
    pub fn constant(&self) -> u64 {
        self.coeffs.first().copied().unwrap_or_default()
    }

    /// True if every coefficient strictly between degree 0 and the
    /// leading degree is zero.
    pub fn is_restricted(&self) -> bool {
        self.coeffs.len() >= 2 && self.coeffs[1..self.degree()].iter().all(|c| *c == 0)
    }

    /// Root `r = -c mod p` of the slot relation `X^d = r`.
    pub fn root(&self, p: u64) -> u64 {
        (p - self.constant() % p) % p
    }
}

impl RingContext {
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of slots.
    pub fn l(&self) -> usize {
        self.l
    }

    /// Degree of each slot.
    pub fn d(&self) -> usize {
        self.d
    }

    /// Plaintext modulus.
    pub fn p(&self) -> u64 {
        self.modulus.q
    }

    /// Cyclotomic index `2N`.
    pub fn nth_root(&self) -> usize {
        self.n << 1
    }

    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }

    pub fn new_poly(&self) -> Poly<u64> {
        Poly::<u64>::new(self.n())
    }
}
