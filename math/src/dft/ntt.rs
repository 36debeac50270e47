use crate::dft::DFT;
use crate::modulus::barrett::Barrett;
use crate::modulus::prime::Prime;
use crate::modulus::ReduceOnce;
use crate::modulus::WordOps;
use crate::modulus::{BARRETT, NONE, ONCE};
use itertools::izip;

/// Negacyclic NTT of size `n = nth_root / 2`, i.e. evaluation of a
/// polynomial of degree `< n` at the `n` roots of `Y^n + 1`.
///
/// Output index `i` holds the evaluation at `psi^(2 * brv(i) + 1)`, where
/// `psi` is the primitive `nth_root`-th root of unity of the table.
#[derive(Clone, Debug)]
pub struct Table<O> {
    prime: Prime<O>,
    psi: O,
    psi_forward_rev: Vec<Barrett<u64>>,
    psi_backward_rev: Vec<Barrett<u64>>,
    q: O,
    two_q: O,
    four_q: O,
}

impl Table<u64> {
    pub fn new(prime: Prime<u64>, nth_root: u64) -> Table<u64> {
        assert!(
            nth_root.is_power_of_two() && nth_root >= 2,
            "invalid argument: nth_root = {} is not a power of two >= 2",
            nth_root
        );

        let psi: u64 = prime.primitive_nth_root(nth_root);
        let psi_inv: u64 = prime.inv(psi);

        let n: usize = (nth_root >> 1) as usize;

        let mut psi_forward_rev: Vec<Barrett<u64>> = vec![Barrett(0, 0); n];
        let mut psi_backward_rev: Vec<Barrett<u64>> = vec![Barrett(0, 0); n];

        psi_forward_rev[0] = prime.barrett.one();
        psi_backward_rev[0] = prime.barrett.one();

        let log_n: u32 = n.log2() as _;

        let mut powers_forward: u64 = 1u64;
        let mut powers_backward: u64 = 1u64;

        for i in 1..n {
            let i_rev: usize = i.reverse_bits_msb(log_n);

            powers_forward = prime.mul(powers_forward, psi);
            powers_backward = prime.mul(powers_backward, psi_inv);

            psi_forward_rev[i_rev] = prime.barrett.prepare(powers_forward);
            psi_backward_rev[i_rev] = prime.barrett.prepare(powers_backward);
        }

        let q: u64 = prime.q();

        Self {
            prime,
            psi,
            psi_forward_rev,
            psi_backward_rev,
            q,
            two_q: q << 1,
            four_q: q << 2,
        }
    }

    /// Size of the transform.
    pub fn n(&self) -> usize {
        self.psi_forward_rev.len()
    }

    /// Returns the evaluation points in output order:
    /// `roots()[i] = psi^(2 * brv(i) + 1)`.
    pub fn roots(&self) -> Vec<u64> {
        let log_n: u32 = self.n().log2() as _;
        (0..self.n())
            .map(|i| {
                self.prime
                    .pow(self.psi, 2 * i.reverse_bits_msb(log_n) as u64 + 1)
            })
            .collect()
    }
}

impl DFT<u64> for Table<u64> {
    fn forward_inplace(&self, a: &mut [u64]) {
        self.forward_inplace_core::<false>(a)
    }

    fn forward_inplace_lazy(&self, a: &mut [u64]) {
        self.forward_inplace_core::<true>(a)
    }

    fn backward_inplace(&self, a: &mut [u64]) {
        self.backward_inplace_core::<false>(a)
    }

    fn backward_inplace_lazy(&self, a: &mut [u64]) {
        self.backward_inplace_core::<true>(a)
    }
}

impl Table<u64> {
    /// Cooley-Tukey decimation in time, inputs in `[0, q)`.
    pub fn forward_inplace_core<const LAZY: bool>(&self, a: &mut [u64]) {
        let n: usize = a.len();
        assert!(
            n == self.n(),
            "invalid a.len()={} != table size {}",
            n,
            self.n()
        );
        let log_n: u32 = n.log2() as _;

        for layer in 0..log_n {
            let (m, size) = (1 << layer, 1 << (log_n - layer - 1));
            let t: usize = 2 * size;
            izip!(a.chunks_exact_mut(t), &self.psi_forward_rev[m..]).for_each(|(a, psi)| {
                let (a, b) = a.split_at_mut(size);
                izip!(a, b).for_each(|(a, b)| self.dit_inplace(a, b, *psi));
            });
        }

        if LAZY {
            a.iter_mut().for_each(|a| a.reduce_once_assign(self.two_q));
        } else {
            a.iter_mut()
                .for_each(|a| self.prime.barrett.reduce_assign::<BARRETT>(a));
        }

        debug_assert!(
            a.iter().all(|a| *a < if LAZY { self.two_q } else { self.q }),
            "forward_inplace_core::<LAZY={}> output out of range",
            LAZY
        );
    }

    #[inline(always)]
    fn dit_inplace(&self, a: &mut u64, b: &mut u64, t: Barrett<u64>) {
        debug_assert!(*a < self.four_q, "a:{} 4q:{}", a, self.four_q);
        debug_assert!(*b < self.four_q, "b:{} 4q:{}", b, self.four_q);
        a.reduce_once_assign(self.two_q);
        let bt: u64 = self.prime.barrett.mul_external::<NONE>(&t, b);
        *b = *a + self.two_q - bt;
        *a += bt;
    }

    /// Gentleman-Sande decimation in frequency, inputs in `[0, 2q)`.
    /// The last layer also multiplies by `n^-1`.
    pub fn backward_inplace_core<const LAZY: bool>(&self, a: &mut [u64]) {
        let n: usize = a.len();
        assert!(
            n == self.n(),
            "invalid a.len()={} != table size {}",
            n,
            self.n()
        );
        let log_n: u32 = n.log2() as _;

        for layer in (0..log_n).rev() {
            let (m, size) = (1 << layer, 1 << (log_n - layer - 1));
            let t: usize = 2 * size;
            if layer == 0 {
                let n_inv: Barrett<u64> = self.prime.barrett.prepare(self.prime.inv(n as u64));
                let psi: Barrett<u64> = self.prime.barrett.prepare(
                    self.prime
                        .barrett
                        .mul_external::<ONCE>(&n_inv, self.psi_backward_rev[1].value()),
                );
                let (a, b) = a.split_at_mut(size);
                izip!(a, b).for_each(|(a, b)| self.dif_last_inplace::<LAZY>(a, b, psi, n_inv));
            } else {
                izip!(a.chunks_exact_mut(t), &self.psi_backward_rev[m..]).for_each(|(a, psi)| {
                    let (a, b) = a.split_at_mut(size);
                    izip!(a, b).for_each(|(a, b)| self.dif_inplace(a, b, *psi));
                });
            }
        }

        debug_assert!(
            a.iter().all(|a| *a < self.two_q),
            "backward_inplace_core::<LAZY={}> output out of range",
            LAZY
        );
    }

    #[inline(always)]
    fn dif_inplace(&self, a: &mut u64, b: &mut u64, t: Barrett<u64>) {
        debug_assert!(*a < self.two_q, "a:{} 2q:{}", a, self.two_q);
        debug_assert!(*b < self.two_q, "b:{} 2q:{}", b, self.two_q);
        let d: u64 = self
            .prime
            .barrett
            .mul_external::<NONE>(&t, &(*a + self.two_q - *b));
        *a += *b;
        a.reduce_once_assign(self.two_q);
        *b = d;
    }

    #[inline(always)]
    fn dif_last_inplace<const LAZY: bool>(
        &self,
        a: &mut u64,
        b: &mut u64,
        psi: Barrett<u64>,
        n_inv: Barrett<u64>,
    ) {
        debug_assert!(*a < self.two_q);
        debug_assert!(*b < self.two_q);
        let diff: u64 = *a + self.two_q - *b;
        let sum: u64 = *a + *b;
        if LAZY {
            *a = self.prime.barrett.mul_external::<NONE>(&n_inv, &sum);
            *b = self.prime.barrett.mul_external::<NONE>(&psi, &diff);
        } else {
            *a = self.prime.barrett.mul_external::<ONCE>(&n_inv, &sum);
            *b = self.prime.barrett.mul_external::<ONCE>(&psi, &diff);
        }
    }
}
