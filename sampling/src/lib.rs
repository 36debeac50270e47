//! Seeded, reproducible randomness for matrices, slot vectors and the
//! encryption randomness handed to HE backends.

pub mod source;

pub use source::Source;
