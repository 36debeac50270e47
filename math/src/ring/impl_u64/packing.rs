use crate::dft::DFT;
use crate::error::Error;
use crate::modulus::BARRETT;
use crate::poly::Poly;
use crate::ring::RingContext;

impl RingContext {
    /// CRT-packs `l` slot polynomials into one ring element `r` such that
    /// `r mod (X^d - r_k) = slots[k]`.
    ///
    /// Writing `r = sum_j X^j R_j(X^d)`, the slot values of `R_j` are the
    /// j-th coefficients of the slots, so each `R_j` is recovered with one
    /// inverse negacyclic NTT of size `l`.
    ///
    /// Slots may be shorter than `d`. Coefficients are reduced mod p.
    pub fn encode(&self, slots: &[Poly<u64>]) -> Result<Poly<u64>, Error> {
        let (l, d) = (self.l(), self.d());

        if slots.len() != l {
            return Err(Error::SlotCountMismatch {
                expected: l,
                got: slots.len(),
            });
        }

        if let Some(index) = slots.iter().find_map(|slot| slot.first_nonzero_from(d)) {
            return Err(Error::DegreeOverflow { index, bound: d });
        }

        let mut res: Poly<u64> = self.new_poly();
        let mut buf: Vec<u64> = vec![0; l];

        for j in 0..d {
            buf.iter_mut().zip(slots.iter()).for_each(|(b, slot)| {
                *b = self.modulus.barrett.reduce::<BARRETT>(&slot.coeff(j));
            });
            self.dft.backward_inplace(&mut buf);
            buf.iter()
                .enumerate()
                .for_each(|(i, b)| res.0[i * d + j] = *b);
        }

        Ok(res)
    }

    /// Inverse of [`RingContext::encode`]: reduces `poly` modulo each factor.
    /// Every returned slot has exactly `d` coefficients.
    pub fn decode(&self, poly: &Poly<u64>) -> Result<Vec<Poly<u64>>, Error> {
        let (n, l, d) = (self.n(), self.l(), self.d());

        if let Some(index) = poly.first_nonzero_from(n) {
            return Err(Error::DegreeOverflow { index, bound: n });
        }

        let mut slots: Vec<Poly<u64>> = vec![Poly::new(d); l];
        let mut buf: Vec<u64> = vec![0; l];

        for j in 0..d {
            buf.iter_mut().enumerate().for_each(|(i, b)| {
                *b = self.modulus.barrett.reduce::<BARRETT>(&poly.coeff(i * d + j));
            });
            self.dft.forward_inplace(&mut buf);
            slots
                .iter_mut()
                .zip(buf.iter())
                .for_each(|(slot, b)| slot.0[j] = *b);
        }

        Ok(slots)
    }

    /// Packs the same slot polynomial into every slot.
    pub fn encode_broadcast(&self, slot: &Poly<u64>) -> Result<Poly<u64>, Error> {
        self.encode(&vec![slot.clone(); self.l()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::Factor;

    fn sample_slots(ring: &RingContext, seed: u64) -> Vec<Poly<u64>> {
        (0..ring.l())
            .map(|k| {
                Poly(
                    (0..ring.d())
                        .map(|j| (seed + 31 * k as u64 + 7 * j as u64) * 2654435761 % ring.p())
                        .collect(),
                )
            })
            .collect()
    }

    #[test]
    fn decode_matches_rem_monic() {
        let ring: RingContext = RingContext::new(5, 17).unwrap();
        let poly: Poly<u64> = Poly((0..32).map(|i| (i * i + 3) % 17).collect());
        let slots: Vec<Poly<u64>> = ring.decode(&poly).unwrap();
        slots
            .iter()
            .zip(ring.factors().iter())
            .for_each(|(slot, factor): (&Poly<u64>, &Factor)| {
                assert_eq!(*slot, poly.rem_monic(&ring.modulus, &factor.coeffs));
            });
    }

    #[test]
    fn encode_decode_round_trip() {
        for (log_n, p) in [(5usize, 17u64), (6, 97), (2, 13), (3, 17)] {
            let ring: RingContext = RingContext::new(log_n, p).unwrap();
            let slots: Vec<Poly<u64>> = sample_slots(&ring, log_n as u64);
            let packed: Poly<u64> = ring.encode(&slots).unwrap();
            assert_eq!(packed.n(), ring.n());
            assert_eq!(ring.decode(&packed).unwrap(), slots, "log_n={} p={}", log_n, p);
        }
    }

    #[test]
    fn encode_pads_short_slots() {
        let ring: RingContext = RingContext::new(5, 17).unwrap();
        let mut slots: Vec<Poly<u64>> = vec![Poly(vec![]); ring.l()];
        slots[3] = Poly(vec![5]);
        slots[6] = Poly(vec![1, 2, 3, 4, 0, 0]);
        let decoded: Vec<Poly<u64>> = ring.decode(&ring.encode(&slots).unwrap()).unwrap();
        assert_eq!(decoded[0], Poly(vec![0; 4]));
        assert_eq!(decoded[3], Poly(vec![5, 0, 0, 0]));
        assert_eq!(decoded[6], Poly(vec![1, 2, 3, 4]));
    }

    #[test]
    fn encode_constant_is_constant_poly() {
        let ring: RingContext = RingContext::new(6, 97).unwrap();
        let packed: Poly<u64> = ring.encode_broadcast(&Poly(vec![42])).unwrap();
        assert_eq!(packed, Poly::monomial(ring.n(), 0, 42));
    }

    #[test]
    fn encode_rejects_bad_shapes() {
        let ring: RingContext = RingContext::new(5, 17).unwrap();
        let slots: Vec<Poly<u64>> = vec![Poly::new(4); 7];
        assert_eq!(
            ring.encode(&slots),
            Err(Error::SlotCountMismatch { expected: 8, got: 7 })
        );
        let mut slots: Vec<Poly<u64>> = vec![Poly::new(4); 8];
        slots[2] = Poly(vec![0, 0, 0, 0, 1]);
        assert_eq!(
            ring.encode(&slots),
            Err(Error::DegreeOverflow { index: 4, bound: 4 })
        );
        let mut poly: Poly<u64> = ring.new_poly();
        poly.0.push(3);
        assert_eq!(
            ring.decode(&poly),
            Err(Error::DegreeOverflow { index: 32, bound: 32 })
        );
    }
}
