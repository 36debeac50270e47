use crate::error::Error;
use log::debug;
use math::modulus::{BARRETT, ONCE};
use math::modulus::barrett::{Barrett, BarrettPrecomp};
use math::modulus::prime::Prime;
use math::poly::Poly;
use math::ring::{Factor, RingContext};

/// Weights used to read the inner products of one slot off a packed
/// product.
///
/// For a factor `X^d + c`, `beta_powers[i] = (-c)^i mod p` for `i < l`,
/// i.e. the powers of the slot root `r = -c`. The i-th weight multiplies
/// coefficient `(i+1) * d - 1` of the product.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GmmTable {
    beta_powers: Vec<Barrett<u64>>,
    barrett: BarrettPrecomp<u64>,
}

impl GmmTable {
    /// Builds the table of `factor`, which is the factor of slot `slot`.
    /// Fails with [`Error::InvalidFactorForm`] unless the factor is a
    /// binomial `X^d + c`.
    pub fn new(slot: usize, factor: &Factor, prime: &Prime<u64>, l: usize) -> Result<Self, Error> {
        if !factor.is_restricted() {
            return Err(Error::InvalidFactorForm { slot });
        }

        let barrett: BarrettPrecomp<u64> = prime.barrett;
        let c: u64 = barrett.reduce::<BARRETT>(&factor.constant());

        let beta_powers: Vec<Barrett<u64>> = (0..l)
            .map(|i| {
                let base: u64 = if i & 1 == 1 { prime.neg(c) } else { c };
                barrett.prepare(prime.pow(base, i as u64))
            })
            .collect();

        Ok(Self {
            beta_powers,
            barrett,
        })
    }

    /// Returns `(-c)^i mod p`, or None if `i >= l`.
    pub fn weight(&self, i: usize) -> Option<u64> {
        self.beta_powers.get(i).map(|beta| *beta.value())
    }

    pub fn len(&self) -> usize {
        self.beta_powers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beta_powers.is_empty()
    }

    pub fn barrett(&self) -> &BarrettPrecomp<u64> {
        &self.barrett
    }
}

/// Builds one table per factor, in slot order. Fails before building
/// anything if some factor is not a binomial.
pub fn build_gmm_tables(ctx: &RingContext) -> Result<Vec<GmmTable>, Error> {
    if let Some(slot) = ctx.factors().iter().position(|f| !f.is_restricted()) {
        return Err(Error::InvalidFactorForm { slot });
    }

    let tables: Vec<GmmTable> = ctx
        .factors()
        .iter()
        .enumerate()
        .map(|(slot, factor)| GmmTable::new(slot, factor, &ctx.modulus, ctx.l()))
        .collect::<Result<_, _>>()?;

    debug!(
        "gmm tables: {} tables of {} weights (p={})",
        tables.len(),
        ctx.l(),
        ctx.p()
    );

    Ok(tables)
}

/// Returns `sum_{i<l} poly[(i+1)d - 1] * table.weight(i) mod p`.
///
/// This is coefficient `d - 1` of `poly mod (X^d + c)`: coefficient
/// `(i+1)d - 1` of `poly` multiplies `X^(d-1) * (X^d)^i = X^(d-1) * r^i`.
/// Coefficients may be any u64 lift of their value mod p.
pub fn extract_inner_product(poly: &Poly<u64>, table: &GmmTable, ctx: &RingContext) -> u64 {
    let (d, p) = (ctx.d(), ctx.p());
    debug_assert!(table.len() == ctx.l());
    table
        .beta_powers
        .iter()
        .enumerate()
        .fold(0u64, |acc, (i, beta)| {
            let coeff: u64 = poly.coeff((i + 1) * d - 1);
            let prod: u64 = table.barrett.mul_external::<ONCE>(beta, &coeff);
            let sum: u64 = acc + prod;
            if sum >= p { sum - p } else { sum }
        })
}

/// Extracts one scalar per slot from a decrypted product. Either all `l`
/// scalars are returned or the call fails.
pub fn extract_inner_products(
    poly: &Poly<u64>,
    tables: &[GmmTable],
    ctx: &RingContext,
) -> Result<Vec<u64>, Error> {
    if tables.len() != ctx.l() {
        return Err(Error::SlotCountMismatch {
            expected: ctx.l(),
            got: tables.len(),
        });
    }

    if let Some(index) = poly.first_nonzero_from(ctx.n()) {
        return Err(Error::DegreeOverflow {
            index,
            bound: ctx.n(),
        });
    }

    Ok(tables
        .iter()
        .map(|table| extract_inner_product(poly, table, ctx))
        .collect())
}
