//! Hash functions and hasher strategies for the Bloom filter.
//!
//! A [`HashFunction`] turns a byte key into one 64-bit digest. A [`Hasher`]
//! turns a key into an ordered sequence of `k` digests, either by evaluating
//! `k` independent functions or by combining two base digests linearly
//! (double hashing), which halves the hash work per operation at the cost of
//! slightly correlated indices.

use crate::error::{BloomError, Result};

/// Maximum key length (in bytes) the H3 universal hash accepts.
pub const MAX_KEY_LEN: usize = 36;

const MIX_MULTIPLIER: u64 = 0xc6a4_a793_5bd1_e995;
const MIX_SHIFT: u32 = 47;

/// Minimal-standard linear congruential generator used to derive hash
/// function seeds and H3 tables deterministically from a single seed.
///
/// Seed derivation is implementation-defined: the same seed always yields the
/// same filter within this crate, but digests are not portable across
/// differently-implemented ports.
struct Minstd {
    state: u64,
}

impl Minstd {
    const MODULUS: u64 = 2_147_483_647; // 2^31 - 1
    const MULTIPLIER: u64 = 16_807;

    fn new(seed: u64) -> Self {
        let state = seed % Self::MODULUS;
        Self {
            state: if state == 0 { 1 } else { state },
        }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state * Self::MULTIPLIER % Self::MODULUS;
        self.state
    }

    /// Combines three 31-bit draws so all 64 output bits carry entropy.
    fn next_u64(&mut self) -> u64 {
        (self.next() << 33) ^ (self.next() << 16) ^ self.next()
    }
}

/// H3 universal hash over keys of at most [`MAX_KEY_LEN`] bytes.
///
/// Holds one table of random words per (byte position, byte value) pair; the
/// digest is the XOR of the words selected by the key's bytes. Keys longer
/// than the table are rejected rather than truncated.
#[derive(Clone)]
pub struct H3Hash {
    table: Vec<[u64; 256]>,
}

impl H3Hash {
    pub fn new(seed: u64) -> Self {
        let mut prng = Minstd::new(seed);
        let mut table = vec![[0u64; 256]; MAX_KEY_LEN];
        for row in table.iter_mut() {
            for word in row.iter_mut() {
                *word = prng.next_u64();
            }
        }
        Self { table }
    }

    pub fn digest(&self, key: &[u8]) -> Result<u64> {
        if key.len() > MAX_KEY_LEN {
            return Err(BloomError::KeyTooLarge {
                len: key.len(),
                max: MAX_KEY_LEN,
            });
        }
        // The empty key hashes to 0 by definition
        Ok(key
            .iter()
            .zip(&self.table)
            .fold(0u64, |acc, (&byte, row)| acc ^ row[byte as usize]))
    }
}

impl std::fmt::Debug for H3Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("H3Hash").finish_non_exhaustive()
    }
}

fn load_word(chunk: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(chunk);
    u64::from_le_bytes(buf)
}

fn mix_word(mut k: u64, mut h: u64) -> u64 {
    k = k.wrapping_mul(MIX_MULTIPLIER);
    k ^= k >> MIX_SHIFT;
    k = k.wrapping_mul(MIX_MULTIPLIER);
    h ^= k;
    h.wrapping_mul(MIX_MULTIPLIER)
}

fn finalize(mut h: u64) -> u64 {
    h ^= h >> MIX_SHIFT;
    h = h.wrapping_mul(MIX_MULTIPLIER);
    h ^ (h >> MIX_SHIFT)
}

/// General 64-bit multiply-xor-multiply mixing hash; accepts any key length.
#[derive(Clone, Copy, Debug)]
pub struct MixingHash64 {
    seed: u64,
}

impl MixingHash64 {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn digest(&self, key: &[u8]) -> u64 {
        let mut h = self.seed ^ (key.len() as u64).wrapping_mul(MIX_MULTIPLIER);
        let mut chunks = key.chunks_exact(8);
        for chunk in chunks.by_ref() {
            h = mix_word(load_word(chunk), h);
        }
        let tail = chunks.remainder();
        if !tail.is_empty() {
            for (i, &byte) in tail.iter().enumerate().rev() {
                h ^= (byte as u64) << (8 * i);
            }
            h = h.wrapping_mul(MIX_MULTIPLIER);
        }
        finalize(h)
    }
}

/// Mixing hash specialized to keys of exactly one 8-byte word.
///
/// The seed-and-length state is folded at construction and there is no tail
/// pass, so it agrees with [`MixingHash64`] on 8-byte keys while doing less
/// work per call.
#[derive(Clone, Copy, Debug)]
pub struct FixedMixingHash64 {
    state: u64,
}

impl FixedMixingHash64 {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 8u64.wrapping_mul(MIX_MULTIPLIER),
        }
    }

    pub fn digest(&self, key: &[u8]) -> Result<u64> {
        if key.len() != 8 {
            return Err(BloomError::KeyLengthMismatch {
                len: key.len(),
                expected: 8,
            });
        }
        Ok(finalize(mix_word(load_word(key), self.state)))
    }
}

/// Which hash algorithm a filter's functions are built from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HashKind {
    /// Universal keyed hash, keys up to [`MAX_KEY_LEN`] bytes.
    #[default]
    H3,
    /// General mixing hash, any key length.
    Mixing64,
    /// Mixing hash for exactly-8-byte keys.
    FixedMixing64,
}

/// One seeded hash function producing a single digest per key.
#[derive(Clone, Debug)]
pub enum HashFunction {
    H3(H3Hash),
    Mixing64(MixingHash64),
    FixedMixing64(FixedMixingHash64),
}

impl HashFunction {
    pub fn digest(&self, key: &[u8]) -> Result<u64> {
        match self {
            HashFunction::H3(h) => h.digest(key),
            HashFunction::Mixing64(h) => Ok(h.digest(key)),
            HashFunction::FixedMixing64(h) => h.digest(key),
        }
    }
}

/// Produces an ordered sequence of `k` digests per key.
#[derive(Clone, Debug)]
pub enum Hasher {
    /// `k` independent functions, one digest each.
    Independent(Vec<HashFunction>),
    /// Two base functions; digest `i` is `h1(key) + i * h2(key)` (wrapping).
    Double {
        k: usize,
        h1: HashFunction,
        h2: HashFunction,
    },
}

impl Hasher {
    /// Builds a hasher with `k` digests per key.
    ///
    /// H3 functions draw their seeds from a deterministic sequence started at
    /// `seed`; the mixing variants are seeded by function index (0 and 1 for
    /// double hashing). Fails with [`BloomError::ZeroHashCount`] for `k == 0`.
    pub fn new(k: usize, seed: u64, double_hashing: bool, kind: HashKind) -> Result<Self> {
        if k == 0 {
            return Err(BloomError::ZeroHashCount);
        }
        let mut prng = Minstd::new(seed);
        if double_hashing {
            let mut build = |index: u64| match kind {
                HashKind::H3 => HashFunction::H3(H3Hash::new(prng.next())),
                HashKind::Mixing64 => HashFunction::Mixing64(MixingHash64::new(index)),
                HashKind::FixedMixing64 => {
                    HashFunction::FixedMixing64(FixedMixingHash64::new(index))
                }
            };
            let h1 = build(0);
            let h2 = build(1);
            Ok(Hasher::Double { k, h1, h2 })
        } else {
            let fns = (0..k as u64)
                .map(|index| match kind {
                    HashKind::H3 => HashFunction::H3(H3Hash::new(prng.next())),
                    HashKind::Mixing64 => HashFunction::Mixing64(MixingHash64::new(index)),
                    HashKind::FixedMixing64 => {
                        HashFunction::FixedMixing64(FixedMixingHash64::new(index))
                    }
                })
                .collect();
            Ok(Hasher::Independent(fns))
        }
    }

    /// Number of digests produced per key.
    pub fn k(&self) -> usize {
        match self {
            Hasher::Independent(fns) => fns.len(),
            Hasher::Double { k, .. } => *k,
        }
    }

    /// Computes the digest sequence for `key`.
    ///
    /// Fails before producing any digest if a hash function rejects the key,
    /// so callers never apply a partial sequence.
    pub fn digests(&self, key: &[u8]) -> Result<Vec<u64>> {
        match self {
            Hasher::Independent(fns) => fns.iter().map(|f| f.digest(key)).collect(),
            Hasher::Double { k, h1, h2 } => {
                let d1 = h1.digest(key)?;
                let d2 = h2.digest(key)?;
                Ok((0..*k as u64)
                    .map(|i| d1.wrapping_add(i.wrapping_mul(d2)))
                    .collect())
            }
        }
    }
}
