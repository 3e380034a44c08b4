use crate::error::{BloomError, Result};
use crate::hash::HashKind;
use derive_builder::Builder;

/// Configuration for derived filter construction.
///
/// The filter computes its own cell count and hash count from `capacity` and
/// `false_positive_rate`; the remaining fields select the hashing scheme and
/// bit layout. Defaults mirror the recommended setup: double hashing over a
/// partitioned bit array with the H3 hash.
#[derive(Clone, Debug, Builder)]
#[builder(pattern = "owned")]
pub struct FilterConfig {
    /// Number of distinct keys the filter is sized for
    #[builder(default = "1_000_000")]
    pub capacity: usize,

    /// Target false positive rate (between 0 and 1)
    #[builder(default = "0.01")]
    pub false_positive_rate: f64,

    /// Seed for deterministic hash function construction
    #[builder(default = "0")]
    pub seed: u64,

    /// Derive all digests from two hash evaluations instead of `k`
    #[builder(default = "true")]
    pub double_hashing: bool,

    /// Give each hash function an exclusive region of the bit array
    #[builder(default = "true")]
    pub partitioned: bool,

    /// Underlying hash algorithm
    #[builder(default = "HashKind::H3")]
    pub hash_kind: HashKind,
}

impl FilterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(BloomError::ZeroCapacity);
        }
        if self.false_positive_rate <= 0.0 || self.false_positive_rate >= 1.0 {
            return Err(BloomError::InvalidFalsePositiveRate {
                rate: self.false_positive_rate,
            });
        }
        Ok(())
    }
}

/// Operations common to all filter variants.
///
/// Lookups are one-sided: `false` means definitely absent, `true` means
/// possibly present. Counting and spectral variants would implement this
/// same trait.
pub trait Filter {
    /// Adds a key. Idempotent.
    fn add(&mut self, key: &[u8]) -> Result<()>;
    /// Hints the storage that `key`'s bits are about to be accessed.
    fn prefetch(&self, key: &[u8]) -> Result<()>;
    /// Tests membership; never a false negative unless `remove` was used.
    fn lookup(&self, key: &[u8]) -> Result<bool>;
    /// Adds a key and reports whether it was already possibly present,
    /// in a single pass over the key's bit positions.
    fn lookup_and_add(&mut self, key: &[u8]) -> Result<bool>;
    /// Discards every prior insertion.
    fn clear(&mut self);
}
