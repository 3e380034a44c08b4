use bitvec::{bitvec, order::Lsb0, vec::BitVec};

/// Contract the filter core expects from its bit array.
///
/// The length is fixed at construction and never changes. `set_and_fetch`
/// must be atomic only where concurrent `lookup_and_add` callers are
/// expected; every other operation assumes single-writer/multi-reader use
/// under the caller's own synchronization.
pub trait BitStorage {
    /// Returns the bit at `index`.
    fn test(&self, index: usize) -> bool;
    /// Sets the bit at `index`.
    fn set(&mut self, index: usize);
    /// Clears the bit at `index`.
    fn reset(&mut self, index: usize);
    /// Sets the bit at `index` and returns its value prior to the set.
    fn set_and_fetch(&mut self, index: usize) -> bool;
    /// Clears every bit.
    fn reset_all(&mut self);
    /// Non-binding hint that `index` is about to be accessed. May be a no-op.
    fn prefetch(&self, _index: usize) {}
    /// Number of bits.
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Default in-memory bit array backed by `bitvec`.
#[derive(Clone, Debug, PartialEq)]
pub struct BitVector {
    bits: BitVec<usize, Lsb0>,
}

impl BitVector {
    pub fn new(len: usize) -> Self {
        Self {
            bits: bitvec![0; len],
        }
    }

    /// Number of set bits, for introspection and load estimation.
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }
}

impl BitStorage for BitVector {
    fn test(&self, index: usize) -> bool {
        self.bits[index]
    }

    fn set(&mut self, index: usize) {
        self.bits.set(index, true);
    }

    fn reset(&mut self, index: usize) {
        self.bits.set(index, false);
    }

    fn set_and_fetch(&mut self, index: usize) -> bool {
        let previous = self.bits[index];
        self.bits.set(index, true);
        previous
    }

    fn reset_all(&mut self) {
        self.bits.fill(false);
    }

    fn prefetch(&self, index: usize) {
        // Touch the backing word so the cache line is warm for the access
        if let Some(word) = self.bits.as_raw_slice().get(index / usize::BITS as usize) {
            std::hint::black_box(*word);
        }
    }

    fn len(&self) -> usize {
        self.bits.len()
    }
}
