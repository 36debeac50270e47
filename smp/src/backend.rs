//! Capabilities the client needs from a homomorphic encryption scheme.
//!
//! A backend is a module object carrying the scheme parameters. Each
//! operation is its own trait so that code can ask for exactly what it uses.

pub mod transparent;

use math::poly::Poly;
use math::ring::RingContext;
use sampling::source::Source;

pub use transparent::TransparentBackend;

pub trait Backend {
    type Ciphertext: Clone;
    type SecretKey;

    /// Plaintext ring of the scheme.
    fn context(&self) -> &RingContext;
}

pub trait SecretKeyGen: Backend {
    fn secret_key_generate(&self, source: &mut Source) -> Self::SecretKey;
}

pub trait Encrypt: Backend {
    /// Encrypts the plaintext ring element `pt` under `sk`.
    fn encrypt_sk(&self, sk: &Self::SecretKey, pt: &Poly<u64>, source: &mut Source) -> Self::Ciphertext;
}

pub trait Decrypt: Backend {
    /// Returns the decrypted ring element, reduced mod `(X^N + 1, p)`.
    fn decrypt(&self, sk: &Self::SecretKey, ct: &Self::Ciphertext) -> Poly<u64>;

    /// Returns false if `ct` can no longer be decrypted correctly.
    fn is_correct(&self, ct: &Self::Ciphertext) -> bool;
}

pub trait CiphertextAddInplace: Backend {
    /// res <- res + a.
    fn ciphertext_add_inplace(&self, res: &mut Self::Ciphertext, a: &Self::Ciphertext);
}

pub trait CiphertextMulConstInplace: Backend {
    /// res <- res * pt, with `pt` a plaintext ring element.
    fn ciphertext_mul_const_inplace(&self, res: &mut Self::Ciphertext, pt: &Poly<u64>);
}
