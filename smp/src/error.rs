use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Math(#[from] math::Error),

    #[error("factor of slot {slot} is not of the form X^d + c")]
    InvalidFactorForm { slot: usize },

    #[error("slot count mismatch: expected {expected}, got {got}")]
    SlotCountMismatch { expected: usize, got: usize },

    #[error("degree overflow: nonzero coefficient at index {index} >= {bound}")]
    DegreeOverflow { index: usize, bound: usize },

    #[error("merge called with no ciphertext")]
    EmptyMergeInput,

    #[error("cannot merge {count} ciphertexts into slots of degree {max}")]
    MergeOverflow { count: usize, max: usize },

    #[error("dimension mismatch: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },

    #[error("ciphertext count mismatch: expected {expected}, got {got}")]
    CiphertextCountMismatch { expected: usize, got: usize },

    #[error("transport: {0}")]
    Transport(String),
}
