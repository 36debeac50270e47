use crate::backend::{CiphertextAddInplace, CiphertextMulConstInplace};
use crate::error::Error;
use itertools::izip;
use log::debug;
use math::poly::Poly;
use math::ring::RingContext;

/// Auxiliary plaintexts to move coefficient `d - 1` of every slot to
/// coefficient 0 and to merge such single-coefficient ciphertexts back
/// into full slots.
///
/// `alpha` packs, in slot `k`, the element `gamma_k` with
/// `Tr(gamma_k * X^j) = [j == d - 1]`. For any ring element `r`,
/// `sum_{t<d} sigma^t(alpha * r)` holds `r_k[d - 1]` as the constant of
/// slot `k`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoeffExtractorAux {
    pub alpha: Poly<u64>,
    /// `merge_offsets[j - 1]` packs `X^j` in every slot, for `j` in `1..d`.
    pub merge_offsets: Vec<Poly<u64>>,
    /// Cyclotomic index.
    pub m: usize,
    /// Plaintext modulus.
    pub t: u64,
    pub d: usize,
}

impl CoeffExtractorAux {
    pub fn new(ctx: &RingContext) -> Result<Self, Error> {
        let (n, l, d) = (ctx.n(), ctx.l(), ctx.d());

        let gammas: Vec<Poly<u64>> = (0..l)
            .map(|k| ctx.extractor_coefficient(k, d - 1).map(Poly))
            .collect::<Result<_, _>>()?;
        let alpha: Poly<u64> = ctx.encode(&gammas)?;

        let merge_offsets: Vec<Poly<u64>> = (1..d)
            .map(|j| ctx.encode_broadcast(&Poly::monomial(d, j, 1)))
            .collect::<Result<_, _>>()?;

        debug!(
            "coefficient extractor: N={} l={} d={} offsets={}",
            n,
            l,
            d,
            merge_offsets.len()
        );

        Ok(Self {
            alpha,
            merge_offsets,
            m: ctx.nth_root(),
            t: ctx.p(),
            d,
        })
    }

    /// Returns the plaintext packing `X^j` in every slot, for `1 <= j < d`.
    pub fn merge_offset(&self, j: usize) -> Option<&Poly<u64>> {
        j.checked_sub(1).and_then(|i| self.merge_offsets.get(i))
    }
}

/// Returns `ctxts[0] + sum_{j>=1} ctxts[j] * X^j`, with `X^j` packed in
/// every slot. If ciphertext `j` holds value `v_j` as the constant of each
/// slot, the result holds `sum_j v_j X^j` in each slot.
pub fn merge_by_shifting<M>(
    module: &M,
    ctxts: &[M::Ciphertext],
    aux: &CoeffExtractorAux,
) -> Result<M::Ciphertext, Error>
where
    M: CiphertextAddInplace + CiphertextMulConstInplace,
{
    let (first, rest) = ctxts.split_first().ok_or(Error::EmptyMergeInput)?;

    if ctxts.len() > aux.d {
        return Err(Error::MergeOverflow {
            count: ctxts.len(),
            max: aux.d,
        });
    }

    let mut res: M::Ciphertext = first.clone();
    izip!(rest.iter(), aux.merge_offsets.iter()).for_each(|(ct, offset)| {
        let mut shifted: M::Ciphertext = ct.clone();
        module.ciphertext_mul_const_inplace(&mut shifted, offset);
        module.ciphertext_add_inplace(&mut res, &shifted);
    });

    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TransparentBackend;
    use sampling::source::Source;

    #[test]
    fn alpha_isolates_top_coefficient_in_each_slot() {
        let ctx: RingContext = RingContext::new(5, 17).unwrap();
        let aux: CoeffExtractorAux = CoeffExtractorAux::new(&ctx).unwrap();
        let alphas: Vec<Poly<u64>> = ctx.decode(&aux.alpha).unwrap();
        let mut source: Source = Source::new([2u8; 32]);
        (0..ctx.l()).for_each(|k| {
            let mut x: Vec<u64> = vec![0; ctx.d()];
            source.fill_mod(ctx.p(), &mut x);
            let got: u64 = ctx.slot_trace(k, &ctx.slot_mul(k, &alphas[k].0, &x));
            assert_eq!(got, x[ctx.d() - 1], "slot {}", k);
        });
    }

    #[test]
    fn linearized_identity_through_automorphisms() {
        for (log_n, p) in [(5usize, 17u64), (6, 97)] {
            let ctx: RingContext = RingContext::new(log_n, p).unwrap();
            let aux: CoeffExtractorAux = CoeffExtractorAux::new(&ctx).unwrap();
            let mut source: Source = Source::new([log_n as u8; 32]);
            let mut r: Poly<u64> = ctx.new_poly();
            source.fill_mod(p, &mut r.0);

            let projected: Poly<u64> = ctx.trace(&ctx.mul(&aux.alpha, &r));

            let want: Vec<Poly<u64>> = ctx.decode(&r).unwrap();
            let got: Vec<Poly<u64>> = ctx.decode(&projected).unwrap();
            (0..ctx.l()).for_each(|k| {
                let mut slot: Vec<u64> = vec![0; ctx.d()];
                slot[0] = want[k].0[ctx.d() - 1];
                assert_eq!(got[k].0, slot, "slot {}", k);
            });
        }
    }

    #[test]
    fn aux_metadata_and_offsets() {
        let ctx: RingContext = RingContext::new(6, 97).unwrap();
        let aux: CoeffExtractorAux = CoeffExtractorAux::new(&ctx).unwrap();
        assert_eq!((aux.m, aux.t, aux.d), (128, 97, 4));
        assert_eq!(aux.merge_offsets.len(), 3);
        assert!(aux.merge_offset(0).is_none());
        assert!(aux.merge_offset(4).is_none());
        let slots: Vec<Poly<u64>> = ctx.decode(aux.merge_offset(2).unwrap()).unwrap();
        slots.iter().for_each(|s| assert_eq!(*s, Poly::monomial(4, 2, 1)));
    }

    #[test]
    fn merge_rebuilds_slot_polynomials() {
        let ctx: RingContext = RingContext::new(5, 17).unwrap();
        let aux: CoeffExtractorAux = CoeffExtractorAux::new(&ctx).unwrap();
        let backend: TransparentBackend = TransparentBackend::new(ctx.clone());

        // ciphertext j holds (j + k) mod p as the constant of slot k
        let ctxts: Vec<Poly<u64>> = (0..ctx.d())
            .map(|j| {
                let slots: Vec<Poly<u64>> = (0..ctx.l())
                    .map(|k| Poly(vec![((j + k) % 17) as u64]))
                    .collect();
                ctx.encode(&slots).unwrap()
            })
            .collect();

        let merged: Poly<u64> = merge_by_shifting(&backend, &ctxts, &aux).unwrap();
        let slots: Vec<Poly<u64>> = ctx.decode(&merged).unwrap();
        slots.iter().enumerate().for_each(|(k, slot)| {
            let want: Vec<u64> = (0..ctx.d()).map(|j| ((j + k) % 17) as u64).collect();
            assert_eq!(slot.0, want);
        });
    }

    #[test]
    fn merge_edge_cases() {
        let ctx: RingContext = RingContext::new(5, 17).unwrap();
        let aux: CoeffExtractorAux = CoeffExtractorAux::new(&ctx).unwrap();
        let backend: TransparentBackend = TransparentBackend::new(ctx.clone());

        let ct: Poly<u64> = Poly((0..32).map(|i| (i * 3) % 17).collect());
        assert_eq!(merge_by_shifting(&backend, std::slice::from_ref(&ct), &aux), Ok(ct.clone()));
        assert_eq!(
            merge_by_shifting(&backend, &[] as &[Poly<u64>], &aux),
            Err(Error::EmptyMergeInput)
        );
        assert_eq!(
            merge_by_shifting(&backend, &vec![ct; 5], &aux),
            Err(Error::MergeOverflow { count: 5, max: 4 })
        );
    }
}
