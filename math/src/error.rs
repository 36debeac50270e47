use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid modulus p={p}: must be a prime > 2 of at most 61 bits")]
    InvalidModulus { p: u64 },

    #[error("unsupported modulus p={p}: X^N+1 does not split into binomials when p = 3 mod 4")]
    UnsupportedModulus { p: u64 },

    #[error("invalid ring degree: log_n={log_n}")]
    InvalidDegree { log_n: usize },

    #[error("slot count mismatch: expected {expected}, got {got}")]
    SlotCountMismatch { expected: usize, got: usize },

    #[error("degree overflow: nonzero coefficient at index {index} >= {bound}")]
    DegreeOverflow { index: usize, bound: usize },

    #[error("singular linear system over F_p")]
    SingularSystem,
}
