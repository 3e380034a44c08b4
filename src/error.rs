use thiserror::Error;

pub type Result<T> = std::result::Result<T, BloomError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BloomError {
    #[error("Hash count must be greater than 0")]
    ZeroHashCount,

    #[error("False positive rate must be between 0 and 1, got {rate}")]
    InvalidFalsePositiveRate { rate: f64 },

    #[error("Capacity must be greater than 0")]
    ZeroCapacity,

    #[error("Cell count {cells} is not divisible by hash count {hash_count}")]
    IndivisibleCells { cells: usize, hash_count: usize },

    #[error("Key length {len} exceeds maximum of {max} bytes")]
    KeyTooLarge { len: usize, max: usize },

    #[error("Key length {len} does not match required {expected} bytes")]
    KeyLengthMismatch { len: usize, expected: usize },
}
