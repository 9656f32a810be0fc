//! Deterministic coordinate hashing.
//!
//! Every stochastic pattern derives its randomness from [`stable_hash`], so output
//! depends on the seed only and is identical on every target. All arithmetic is
//! wrapping 64-bit; coordinates are sign-extended before mixing.

const KX: u64 = 0x9E37_79B9_7F4A_7C15;
const KY: u64 = 0xC2B2_AE3D_27D4_EB4F;
const M1: u64 = 0xFF51_AFD7_ED55_8CCD;
const M2: u64 = 0xC4CE_B9FE_1A85_EC53;

const FRACTION_BITS: u32 = 24;
const FRACTION_SCALE: f64 = (1u64 << FRACTION_BITS) as f64;
const FRACTION_MASK: u64 = (1 << FRACTION_BITS) - 1;

/// Stateless avalanche hash of `(x, y, seed)`.
#[inline]
pub fn stable_hash(x: i32, y: i32, seed: u64) -> u64 {
    let mut h = seed
        ^ (x as i64 as u64).wrapping_mul(KX)
        ^ (y as i64 as u64).wrapping_mul(KY).rotate_left(31);
    h ^= h >> 33;
    h = h.wrapping_mul(M1);
    h ^= h >> 33;
    h = h.wrapping_mul(M2);
    h ^ (h >> 33)
}

/// Uniform value in `[0, 1)` from the low 24 bits of [`stable_hash`].
#[inline]
pub fn hash_float(x: i32, y: i32, seed: u64) -> f64 {
    (stable_hash(x, y, seed) & FRACTION_MASK) as f64 / FRACTION_SCALE
}

/// Two independent values in `[0, 1)` for a lattice cell, taken from disjoint
/// 24-bit channels of one hash.
#[inline]
pub fn hash_point(cell_x: i32, cell_y: i32, seed: u64) -> (f64, f64) {
    let h = stable_hash(cell_x, cell_y, seed);
    let a = (h & FRACTION_MASK) as f64 / FRACTION_SCALE;
    let b = ((h >> FRACTION_BITS) & FRACTION_MASK) as f64 / FRACTION_SCALE;
    (a, b)
}

/// Hash reduced to an index in `0..n` (returns 0 for `n == 0`).
#[inline]
pub fn hash_index(x: i32, y: i32, seed: u64, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    (stable_hash(x, y, seed) % n as u64) as usize
}
