//! # smp
//!
//! Client side of a two-party secure matrix product over a SIMD-packed
//! homomorphic encryption scheme with plaintext ring `F_p[X]/(X^N + 1)`.
//!
//! The left operand is cut into `l x d` tiles ([`partition`]); each tile is
//! CRT-packed into one ring element, one matrix row per slot, and encrypted
//! through the [`backend`] traits. The server multiplies by its own packed
//! operand and returns one ciphertext per (row block, output column). Each
//! inner product sits at coefficient `d - 1` of a slot and is read directly
//! off the decrypted ring element with the per-slot weights of [`gmm`].
//!
//! [`extractor`] holds the auxiliary plaintexts that move that coefficient to
//! position 0 and merge single-coefficient ciphertexts back into full slots.
//! [`client::Client`] drives the whole exchange over a [`transport::Channel`]
//! and returns a [`report::ClientReport`].

pub mod backend;
pub mod client;
pub mod error;
pub mod extractor;
pub mod gmm;
pub mod matrix;
pub mod params;
pub mod partition;
pub mod report;
pub mod transport;

pub use error::Error;
