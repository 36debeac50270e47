use crate::modulus::barrett::BarrettPrecomp;

/// A prime modulus q with its Barrett precomputation and the distinct prime
/// factors of q-1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prime<O> {
    pub q: O,
    pub two_q: O,
    /// Distinct prime factors of q-1.
    pub factors: Vec<O>,
    pub barrett: BarrettPrecomp<O>,
    /// Euler totient of q, i.e. q-1.
    pub phi: O,
}
