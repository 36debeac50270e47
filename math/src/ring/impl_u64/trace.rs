use crate::error::Error;
use crate::modulus::prime::Prime;
use crate::poly::Poly;
use crate::ring::RingContext;

impl RingContext {
    /// Returns `sum_{t<d} sigma^t(a)`, where sigma is the Frobenius
    /// automorphism. In every slot this is the field trace of
    /// `F_p[X]/(X^d - r_k)` down to `F_p`, so each slot of the result is a
    /// constant.
    pub fn trace(&self, a: &Poly<u64>) -> Poly<u64> {
        let mut res: Poly<u64> = a.clone();
        let mut tmp: Poly<u64> = self.new_poly();
        (1..self.d()).for_each(|t| {
            self.automorphism(a, self.galois_element(t), &mut tmp);
            self.add_inplace(&tmp, &mut res);
        });
        res
    }

    /// Reduces `X^e` in slot `k`: returns `(c, i)` with `X^e = c * X^i`, `i < d`.
    fn slot_monomial(&self, k: usize, e: usize) -> (u64, usize) {
        let root: u64 = self.factors[k].root(self.p());
        let e: usize = e % self.nth_root();
        (self.modulus.pow(root, (e / self.d()) as u64), e % self.d())
    }

    /// Returns `a * b` in slot `k`.
    pub fn slot_mul(&self, k: usize, a: &[u64], b: &[u64]) -> Vec<u64> {
        let d: usize = self.d();
        debug_assert!(a.len() <= d && b.len() <= d);
        let root: u64 = self.factors[k].root(self.p());
        let mut res: Vec<u64> = vec![0; d];
        a.iter().enumerate().for_each(|(i, ai)| {
            b.iter().enumerate().for_each(|(j, bj)| {
                let mut prod: u64 = self.modulus.mul(*ai, *bj);
                if i + j >= d {
                    prod = self.modulus.mul(prod, root);
                }
                let at: usize = (i + j) % d;
                res[at] = self.modulus.add(res[at], prod);
            });
        });
        res
    }

    /// Applies `sigma^t` inside slot `k`: `X^j -> X^(j * p^t)`.
    pub fn slot_frobenius(&self, k: usize, a: &[u64], t: usize) -> Vec<u64> {
        let gal_el: usize = self.galois_element(t);
        let mut res: Vec<u64> = vec![0; self.d()];
        a.iter().enumerate().for_each(|(j, aj)| {
            let (c, i) = self.slot_monomial(k, j * gal_el);
            res[i] = self.modulus.add(res[i], self.modulus.mul(*aj, c));
        });
        res
    }

    /// Field trace of `a` from slot `k` down to `F_p`.
    pub fn slot_trace(&self, k: usize, a: &[u64]) -> u64 {
        (0..self.d()).fold(0, |acc, t| {
            let frob: Vec<u64> = self.slot_frobenius(k, a, t);
            debug_assert!(frob.len() == self.d());
            self.modulus.add(acc, frob[0])
        })
    }

    /// Returns `gamma` in slot `k` such that `Tr(gamma * X^j) = [j == target]`
    /// for all `j < d`. Then `x -> Tr(gamma * x)` reads coefficient `target`
    /// of any slot element `x`.
    ///
    /// The system is solved against the trace form `T[j][i] = Tr(X^(i+j))`,
    /// which is invertible because the slot is a separable field extension.
    pub fn extractor_coefficient(&self, k: usize, target: usize) -> Result<Vec<u64>, Error> {
        let d: usize = self.d();
        debug_assert!(target < d, "target={} >= d={}", target, d);

        let traces: Vec<u64> = (0..d)
            .map(|i| {
                let mut x: Vec<u64> = vec![0; d];
                x[i] = 1;
                self.slot_trace(k, &x)
            })
            .collect();

        let matrix: Vec<Vec<u64>> = (0..d)
            .map(|j| {
                (0..d)
                    .map(|i| {
                        let (c, e) = self.slot_monomial(k, i + j);
                        self.modulus.mul(c, traces[e])
                    })
                    .collect()
            })
            .collect();

        let mut rhs: Vec<u64> = vec![0; d];
        rhs[target] = 1;

        solve_mod(&self.modulus, matrix, rhs)
    }
}

/// Solves `matrix * x = rhs` over `F_q` by Gauss-Jordan elimination.
pub fn solve_mod(
    prime: &Prime<u64>,
    mut matrix: Vec<Vec<u64>>,
    mut rhs: Vec<u64>,
) -> Result<Vec<u64>, Error> {
    let n: usize = rhs.len();
    debug_assert!(matrix.len() == n && matrix.iter().all(|row| row.len() == n));

    for col in 0..n {
        let pivot: usize = (col..n)
            .find(|&row| matrix[row][col] != 0)
            .ok_or(Error::SingularSystem)?;
        matrix.swap(col, pivot);
        rhs.swap(col, pivot);

        let inv: u64 = prime.inv(matrix[col][col]);
        matrix[col].iter_mut().for_each(|v| *v = prime.mul(*v, inv));
        rhs[col] = prime.mul(rhs[col], inv);

        for row in 0..n {
            if row == col || matrix[row][col] == 0 {
                continue;
            }
            let factor: u64 = matrix[row][col];
            for i in col..n {
                let sub: u64 = prime.mul(factor, matrix[col][i]);
                matrix[row][i] = prime.sub(matrix[row][i], sub);
            }
            rhs[row] = prime.sub(rhs[row], prime.mul(factor, rhs[col]));
        }
    }

    Ok(rhs)
}
