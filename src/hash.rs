//! Implementations of hash functions
//!
//! A filter maps an identifier to a slot with `hash(id) & (capacity - 1)`. The hash decides which
//! identifiers share a slot, so it must stay fixed for the lifetime of a filter. None of these are
//! cryptographic; the filter is not a security boundary.

use crate::murmur3;

/// A 32-bit hash strategy over identifier bytes
pub type HashFn = fn(&[u8]) -> u32;

/// The hash every filter uses unless built with `with_hash`: [`murmur3_32`]
pub const DEFAULT_HASH: HashFn = murmur3_32;

/// MurmurHash3 x86_32 with seed 0
pub fn murmur3_32(input: &[u8]) -> u32 {
    murmur3::murmur3_x86_32(input, 0)
}

/// DBJ2 hash function
///
/// Source: <http://www.cse.yorku.ca/~oz/hash.html>
///
/// Poorly distributed in the low bits for short inputs. Handy when a test needs collisions it can
/// predict by hand.
pub fn hash_djb2(input: &[u8]) -> u32 {
    let mut hash: u32 = 5381;
    for &byte in input {
        hash = hash.wrapping_mul(33).wrapping_add(byte as u32);
    }
    hash
}

/* -------------------- Unit Tests -------------------- */
