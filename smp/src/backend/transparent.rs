use crate::backend::{
    Backend, CiphertextAddInplace, CiphertextMulConstInplace, Decrypt, Encrypt, SecretKeyGen,
};
use math::poly::Poly;
use math::ring::RingContext;
use sampling::source::Source;

/// Backend whose ciphertexts are the plaintexts themselves.
///
/// Offers no security at all. It computes exactly what a correct HE scheme
/// would decrypt to and serves as the reference in tests.
#[derive(Clone, Debug)]
pub struct TransparentBackend {
    ctx: RingContext,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransparentSecretKey;

impl TransparentBackend {
    pub fn new(ctx: RingContext) -> Self {
        Self { ctx }
    }
}

impl Backend for TransparentBackend {
    type Ciphertext = Poly<u64>;
    type SecretKey = TransparentSecretKey;

    fn context(&self) -> &RingContext {
        &self.ctx
    }
}

impl SecretKeyGen for TransparentBackend {
    fn secret_key_generate(&self, _source: &mut Source) -> TransparentSecretKey {
        TransparentSecretKey
    }
}

impl Encrypt for TransparentBackend {
    fn encrypt_sk(&self, _sk: &TransparentSecretKey, pt: &Poly<u64>, _source: &mut Source) -> Poly<u64> {
        let mut ct: Poly<u64> = pt.clone();
        ct.resize(self.ctx.n());
        self.ctx.reduce_inplace(&mut ct);
        ct
    }
}

impl Decrypt for TransparentBackend {
    fn decrypt(&self, _sk: &TransparentSecretKey, ct: &Poly<u64>) -> Poly<u64> {
        ct.clone()
    }

    fn is_correct(&self, ct: &Poly<u64>) -> bool {
        ct.n() == self.ctx.n() && ct.0.iter().all(|c| *c < self.ctx.p())
    }
}

impl CiphertextAddInplace for TransparentBackend {
    fn ciphertext_add_inplace(&self, res: &mut Poly<u64>, a: &Poly<u64>) {
        self.ctx.add_inplace(a, res);
    }
}

impl CiphertextMulConstInplace for TransparentBackend {
    fn ciphertext_mul_const_inplace(&self, res: &mut Poly<u64>, pt: &Poly<u64>) {
        *res = self.ctx.mul(res, pt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operations_match_ring_arithmetic() {
        let ctx: RingContext = RingContext::new(5, 17).unwrap();
        let backend: TransparentBackend = TransparentBackend::new(ctx.clone());
        let mut source: Source = Source::new([0u8; 32]);
        let sk: TransparentSecretKey = backend.secret_key_generate(&mut source);

        let a: Poly<u64> = Poly((0..32).map(|i| i % 17).collect());
        let b: Poly<u64> = Poly::monomial(32, 1, 1);

        let mut ct: Poly<u64> = backend.encrypt_sk(&sk, &a, &mut source);
        assert!(backend.is_correct(&ct));
        backend.ciphertext_mul_const_inplace(&mut ct, &b);
        backend.ciphertext_add_inplace(&mut ct, &backend.encrypt_sk(&sk, &a, &mut source));

        let mut want: Poly<u64> = ctx.new_poly();
        ctx.add(&ctx.mul(&a, &b), &a, &mut want);
        assert_eq!(backend.decrypt(&sk, &ct), want);
    }

    #[test]
    fn detects_unreduced_ciphertext() {
        let ctx: RingContext = RingContext::new(5, 17).unwrap();
        let backend: TransparentBackend = TransparentBackend::new(ctx);
        let mut ct: Poly<u64> = Poly::new(32);
        assert!(backend.is_correct(&ct));
        ct.0[4] = 17;
        assert!(!backend.is_correct(&ct));
        assert!(!backend.is_correct(&Poly::new(16)));
    }
}
