pub mod automorphism;
pub mod packing;
pub mod ring;
pub mod trace;
