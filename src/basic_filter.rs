use crate::error::{BloomError, Result};
use crate::filter::{Filter, FilterConfig};
use crate::hash::Hasher;
use crate::params::{optimal_cells, optimal_hash_count};
use crate::storage::{BitStorage, BitVector};
use tracing::debug;

/// The basic Bloom filter.
///
/// Owns a [`Hasher`] and a bit array and maps each key to `k` bit positions.
/// In partitioned mode every hash function owns an exclusive contiguous
/// region of `cells / k` bits, so functions never collide with each other;
/// in shared mode all digests index the full array. Partitioned filters tend
/// to carry slightly more ones for the same load, shared filters slightly
/// fewer.
///
/// Invariant, validated once at construction: the cell count is a positive
/// multiple of the hash count.
pub struct BasicFilter<S: BitStorage = BitVector> {
    hasher: Hasher,
    bits: S,
    partitioned: bool,
}

impl BasicFilter<BitVector> {
    /// Constructs a filter sized for `config.capacity` keys at
    /// `config.false_positive_rate`.
    ///
    /// The computed cell count is rounded up to the next multiple of the
    /// hash count so the layout invariant holds; the extra cells only lower
    /// the realized false positive rate.
    pub fn new(config: FilterConfig) -> Result<Self> {
        config.validate()?;
        let cells = optimal_cells(config.false_positive_rate, config.capacity)?;
        let k = optimal_hash_count(cells, config.capacity);
        let cells = cells.next_multiple_of(k);
        let hasher = Hasher::new(k, config.seed, config.double_hashing, config.hash_kind)?;
        debug!(
            cells,
            hash_count = k,
            partitioned = config.partitioned,
            double_hashing = config.double_hashing,
            hash_kind = ?config.hash_kind,
            "constructed bloom filter"
        );
        Ok(Self {
            hasher,
            bits: BitVector::new(cells),
            partitioned: config.partitioned,
        })
    }

    /// Constructs a filter from an explicit hasher and cell count.
    ///
    /// `cells` must be a positive multiple of the hasher's digest count.
    pub fn with_hasher(hasher: Hasher, cells: usize, partitioned: bool) -> Result<Self> {
        Self::with_storage(hasher, BitVector::new(cells), partitioned)
    }
}

impl<S: BitStorage> BasicFilter<S> {
    /// Constructs a filter over caller-provided bit storage.
    pub fn with_storage(hasher: Hasher, bits: S, partitioned: bool) -> Result<Self> {
        let cells = bits.len();
        let hash_count = hasher.k();
        if cells == 0 || cells % hash_count != 0 {
            return Err(BloomError::IndivisibleCells { cells, hash_count });
        }
        Ok(Self {
            hasher,
            bits,
            partitioned,
        })
    }

    fn indices(&self, key: &[u8]) -> Result<Vec<usize>> {
        let digests = self.hasher.digests(key)?;
        Ok(bit_indices(&digests, self.bits.len(), self.partitioned))
    }

    /// Removes a key by clearing the bits at its shared (non-partitioned)
    /// positions.
    ///
    /// Unsafe in the approximate sense: cleared positions may be shared with
    /// other keys, which then become false negatives. This is the documented
    /// behavior, not a multiset-style deletion.
    pub fn remove(&mut self, key: &[u8]) -> Result<()> {
        let cells = self.bits.len() as u64;
        for digest in self.hasher.digests(key)? {
            self.bits.reset((digest % cells) as usize);
        }
        Ok(())
    }

    /// Exchanges hasher and storage with `other` in constant time.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.hasher, &mut other.hasher);
        std::mem::swap(&mut self.bits, &mut other.bits);
    }

    /// The underlying bit storage.
    pub fn storage(&self) -> &S {
        &self.bits
    }

    /// Number of hash functions (`k`).
    pub fn hash_count(&self) -> usize {
        self.hasher.k()
    }

    /// Number of cells (`m`).
    pub fn cell_count(&self) -> usize {
        self.bits.len()
    }

    /// Whether each hash function owns an exclusive bit region.
    pub fn is_partitioned(&self) -> bool {
        self.partitioned
    }
}

/// Maps a digest sequence to bit positions.
///
/// `cells` must be a positive multiple of `digests.len()`; the filter
/// validates this at construction so the per-operation path stays
/// branch-free.
fn bit_indices(digests: &[u64], cells: usize, partitioned: bool) -> Vec<usize> {
    if partitioned {
        let width = (cells / digests.len()) as u64;
        digests
            .iter()
            .enumerate()
            .map(|(i, &digest)| i * width as usize + (digest % width) as usize)
            .collect()
    } else {
        digests
            .iter()
            .map(|&digest| (digest % cells as u64) as usize)
            .collect()
    }
}

impl<S: BitStorage> Filter for BasicFilter<S> {
    fn add(&mut self, key: &[u8]) -> Result<()> {
        for index in self.indices(key)? {
            self.bits.set(index);
        }
        Ok(())
    }

    fn prefetch(&self, key: &[u8]) -> Result<()> {
        for index in self.indices(key)? {
            self.bits.prefetch(index);
        }
        Ok(())
    }

    fn lookup(&self, key: &[u8]) -> Result<bool> {
        for index in self.indices(key)? {
            if !self.bits.test(index) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn lookup_and_add(&mut self, key: &[u8]) -> Result<bool> {
        let mut was_present = true;
        for index in self.indices(key)? {
            was_present &= self.bits.set_and_fetch(index);
        }
        Ok(was_present)
    }

    fn clear(&mut self) {
        self.bits.reset_all();
    }
}

impl<S: BitStorage> std::fmt::Debug for BasicFilter<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BasicFilter {{ cells: {}, hash_count: {}, partitioned: {} }}",
            self.bits.len(),
            self.hasher.k(),
            self.partitioned
        )
    }
}
