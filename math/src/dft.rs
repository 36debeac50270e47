pub mod ntt;

/// In-place discrete Fourier transform over a finite field.
pub trait DFT<O> {
    /// Evaluates `a`, read as coefficients, at the transform points.
    /// Output is in bit-reversed order and fully reduced.
    fn forward_inplace(&self, a: &mut [O]);

    /// Same as [`DFT::forward_inplace`] with outputs in `[0, 2q)`.
    fn forward_inplace_lazy(&self, a: &mut [O]);

    /// Inverse of [`DFT::forward_inplace`].
    fn backward_inplace(&self, a: &mut [O]);

    /// Same as [`DFT::backward_inplace`] with outputs in `[0, 2q)`.
    fn backward_inplace_lazy(&self, a: &mut [O]);
}
