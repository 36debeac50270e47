use crate::modulus::WordOps;
use crate::poly::Poly;
use crate::ring::RingContext;

/// Returns a lookup table for the automorphism X^{i} -> X^{i * gal_el mod nth_root}
/// on `Z[X]/(X^n + 1)`, with `nth_root = 2n`. The most significant bit of
/// each entry is set when the image coefficient is negated.
/// Method will panic if n is not a power-of-two or if gal_el is even.
pub fn automorphism_index(n: usize, gal_el: usize) -> Vec<usize> {
    assert!(n.is_power_of_two(), "invalid n={}: not a power-of-two", n);
    assert!(
        gal_el & 1 == 1,
        "invalid gal_el={}: not coprime with nth_root={}",
        gal_el,
        2 * n
    );

    let log_n: usize = if n == 1 { 0 } else { n.log2() };
    let mask: usize = n - 1;
    (0..n)
        .map(|i| {
            let gal_el_i: usize = (i * gal_el) & ((n << 1) - 1);
            let sign: usize = (gal_el_i >> log_n) & 1;
            (gal_el_i & mask) | (sign << (usize::BITS - 1))
        })
        .collect()
}

impl RingContext {
    /// b <- a(X^gal_el).
    pub fn automorphism(&self, a: &Poly<u64>, gal_el: usize, b: &mut Poly<u64>) {
        debug_assert!(
            a.n() == b.n(),
            "invalid inputs: a.n() = {} != b.n() = {}",
            a.n(),
            b.n()
        );

        let index: Vec<usize> = automorphism_index(self.n(), gal_el % self.nth_root());
        let mask: usize = usize::MAX >> 1;

        a.0.iter().zip(index.iter()).for_each(|(ai, idx)| {
            let i_out: usize = idx & mask;
            if idx >> (usize::BITS - 1) == 1 {
                b.0[i_out] = self.modulus.neg(*ai);
            } else {
                b.0[i_out] = *ai;
            }
        });
    }

    /// Applies the t-th power of the Frobenius automorphism `X -> X^p`.
    pub fn frobenius(&self, a: &Poly<u64>, t: usize) -> Poly<u64> {
        let mut b: Poly<u64> = self.new_poly();
        self.automorphism(a, self.galois_element(t), &mut b);
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn automorphism_maps_monomials() {
        let ring: RingContext = RingContext::new(3, 17).unwrap();
        let mut b: Poly<u64> = ring.new_poly();
        // X^3 -> X^15 = X^8 * X^7 = -X^7
        ring.automorphism(&Poly::monomial(8, 3, 5), 5, &mut b);
        assert_eq!(b, Poly::monomial(8, 7, 12));
        // X^2 -> X^10 = -X^2
        ring.automorphism(&Poly::monomial(8, 2, 1), 5, &mut b);
        assert_eq!(b, Poly::monomial(8, 2, 16));
    }

    #[test]
    fn automorphism_is_ring_homomorphism() {
        let ring: RingContext = RingContext::new(5, 17).unwrap();
        let a: Poly<u64> = Poly((0..32).map(|i| (3 * i + 1) % 17).collect());
        let b: Poly<u64> = Poly((0..32).map(|i| (i * i) % 17).collect());
        let gal_el: usize = ring.galois_element(1);

        let mut ab: Poly<u64> = ring.new_poly();
        ring.automorphism(&ring.mul(&a, &b), gal_el, &mut ab);

        let mut a_auto: Poly<u64> = ring.new_poly();
        let mut b_auto: Poly<u64> = ring.new_poly();
        ring.automorphism(&a, gal_el, &mut a_auto);
        ring.automorphism(&b, gal_el, &mut b_auto);

        assert_eq!(ab, ring.mul(&a_auto, &b_auto));
    }

    #[test]
    fn frobenius_has_order_d() {
        let ring: RingContext = RingContext::new(6, 97).unwrap();
        let a: Poly<u64> = Poly((0..64).map(|i| (5 * i + 2) % 97).collect());
        assert_eq!(ring.frobenius(&a, ring.d()), a);
        assert_ne!(ring.frobenius(&a, 1), a);
    }
}
