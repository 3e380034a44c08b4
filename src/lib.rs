//! Basic Bloom filter with configurable hashing and bit layout.
//!
//! A Bloom filter answers set-membership queries with one-sided error:
//! `lookup` returning `false` means the key was definitely never added,
//! `true` means it possibly was. Storage is fixed at construction and
//! independent of how many keys are inserted.
//!
//! The moving parts:
//!    * Parameter math ([`params`]) sizes the bit array and picks the hash
//!      count from a target false positive rate and an expected capacity.
//!    * A [`Hasher`] turns each key into `k` digests, either from `k`
//!      independent hash functions or from two functions combined linearly
//!      (double hashing), which roughly halves the hash work per call.
//!    * [`BasicFilter`] maps digests to bit positions, optionally giving
//!      each hash function an exclusive partition of the array.
//!
//! Hash algorithms: an H3 universal hash for keys up to 36 bytes, a general
//! 64-bit mixing hash for arbitrary keys, and a fixed-width variant for
//! exactly-8-byte keys.
//!
//! ```
//! use basic_bloom_rs::{BasicFilter, Filter, FilterConfigBuilder};
//!
//! let config = FilterConfigBuilder::default()
//!     .capacity(10_000)
//!     .false_positive_rate(0.001)
//!     .build()
//!     .unwrap();
//! let mut filter = BasicFilter::new(config).unwrap();
//!
//! filter.add(b"deadbeef").unwrap();
//! assert!(filter.lookup(b"deadbeef").unwrap());
//! assert!(!filter.lookup(b"cafebabe").unwrap());
//! ```
//!
//! Known caveats:
//!     * `remove` is approximate: cleared bit positions may be shared with
//!       other keys, which then read as absent.
//!     * The core does no locking; concurrent use is the caller's problem,
//!       except that `lookup_and_add` only needs the storage's
//!       set-and-fetch primitive to be atomic.

mod basic_filter;
mod error;
mod filter;
pub mod hash;
pub mod params;
mod storage;

pub use basic_filter::BasicFilter;
pub use error::{BloomError, Result};
pub use filter::{Filter, FilterConfig, FilterConfigBuilder, FilterConfigBuilderError};
pub use hash::{HashFunction, HashKind, Hasher, MAX_KEY_LEN};
pub use params::{optimal_cells, optimal_hash_count};
pub use storage::{BitStorage, BitVector};
