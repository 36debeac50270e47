//! # math
//!
//! Arithmetic over the plaintext ring `F_p[X]/(X^N + 1)` of a SIMD-packed
//! homomorphic encryption scheme.
//!
//! When `p = 1 mod 4`, the ring splits into `l` slots. Each slot is the field
//! `F_p[X]/(X^d - r_k)` with `N = l * d`. This crate provides:
//!
//! - [`modulus`]: prime moduli, Barrett precomputation for fast
//!   multiplication by fixed constants, primitive roots of unity;
//! - [`dft`]: the negacyclic NTT that evaluates and interpolates at the `l`
//!   slot roots;
//! - [`poly`]: dense coefficient vectors;
//! - [`ring`]: the [`ring::RingContext`] (slot structure, CRT packing of slot
//!   vectors, ring automorphisms, slot-local Frobenius and trace).

pub mod dft;
pub mod error;
pub mod modulus;
pub mod poly;
pub mod ring;

pub use error::Error;
