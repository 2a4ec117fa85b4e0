//! Murmur3 Hash Rust Implementation
//!
//! The x86 32-bit variant of MurmurHash3, as published by Austin Appleby. Output matches the reference
//! `MurmurHash3_x86_32` (and Guava's `murmur3_32`) for the same seed.

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;
const R1: u32 = 15;
const R2: u32 = 13;
const M: u32 = 5;
const N: u32 = 0xe654_6b64;

/// Final avalanche mix
fn fmix32(k: u32) -> u32 {
    let mut tmp = k;
    tmp ^= tmp >> 16;
    tmp = tmp.wrapping_mul(0x85eb_ca6b);
    tmp ^= tmp >> 13;
    tmp = tmp.wrapping_mul(0xc2b2_ae35);
    tmp ^= tmp >> 16;
    tmp
}

#[inline]
fn scramble(k: u32) -> u32 {
    k.wrapping_mul(C1).rotate_left(R1).wrapping_mul(C2)
}

/// Murmur3 x86_32 over `source` with the given seed
pub fn murmur3_x86_32(source: &[u8], seed: u32) -> u32 {
    let mut h1 = seed;

    let mut blocks = source.chunks_exact(4);
    for block in &mut blocks {
        // chunks_exact guarantees 4 bytes
        let k1 = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);
        h1 ^= scramble(k1);
        h1 = h1.rotate_left(R2).wrapping_mul(M).wrapping_add(N);
    }

    let tail = blocks.remainder();
    if !tail.is_empty() {
        let mut k1 = 0u32;
        for (i, &byte) in tail.iter().enumerate() {
            k1 ^= (byte as u32) << (8 * i);
        }
        h1 ^= scramble(k1);
    }

    // Only the low 32 bits of the length take part, as in the reference
    h1 ^= source.len() as u32;
    fmix32(h1)
}

/* -------------------- Unit Tests -------------------- */
