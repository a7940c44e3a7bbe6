//! Independent verification of published race results.
//!
//! A verifier holds only the disclosed seed material and the original
//! entrant list; it recomputes the race and compares every published field.
//! A failed verification is an expected, actionable outcome, so it is
//! always reported as a value and never raised as an error.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::race::seed::{combine_seed, digest_hex};
use crate::race::segment::{simulate, SegmentEntrant, SegmentResult};
use crate::race::weighted::{score_race, RaceResult};
use crate::stats::RaceEntrantSnapshot;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    pub valid: bool,
    pub reason: Option<String>,
}

impl Verification {
    fn ok() -> Self {
        Self { valid: true, reason: None }
    }

    fn fail(reason: String) -> Self {
        Self { valid: false, reason: Some(reason) }
    }
}

/// Re-run a house race from the disclosed server seed and check every
/// published result field. Reports the first mismatch found.
pub fn verify_segment_race(
    server_seed: &str,
    published_hash: &str,
    entrants: &[SegmentEntrant],
    entry_fee: u64,
    published_results: &[SegmentResult],
) -> Verification {
    let seed_hash = digest_hex(server_seed);
    if seed_hash != published_hash {
        return Verification::fail(format!(
            "server seed hash mismatch: expected {}, computed {}",
            published_hash, seed_hash
        ));
    }

    let signatures: Vec<String> = entrants.iter().map(|e| e.signature.clone()).collect();
    let combined = combine_seed(server_seed, &signatures);
    let recomputed = simulate(&combined, entrants, entry_fee);

    if recomputed.results.len() != published_results.len() {
        return Verification::fail(format!(
            "result count mismatch: expected {}, computed {}",
            published_results.len(),
            recomputed.results.len()
        ));
    }

    for (index, (published, computed)) in
        published_results.iter().zip(recomputed.results.iter()).enumerate()
    {
        if published.creature_id != computed.creature_id {
            return Verification::fail(format!(
                "position {}: expected creature {}, computed {}",
                index + 1,
                published.creature_id,
                computed.creature_id
            ));
        }
        if published.position != computed.position {
            return Verification::fail(format!(
                "creature {}: published position {}, computed {}",
                published.creature_id, published.position, computed.position
            ));
        }
        if published.total_distance != computed.total_distance {
            return Verification::fail(format!(
                "creature {}: published distance {}, computed {}",
                published.creature_id, published.total_distance, computed.total_distance
            ));
        }
        if published.payout != computed.payout {
            return Verification::fail(format!(
                "creature {}: published payout {}, computed {}",
                published.creature_id, published.payout, computed.payout
            ));
        }
    }

    Verification::ok()
}

/// Recompute a weighted race from its frozen entrant snapshots and compare
/// against the published ranking.
pub fn verify_scored_race(
    entrants: &[RaceEntrantSnapshot],
    race_type: &str,
    seed_material: &str,
    entry_fee: u64,
    published_results: &[RaceResult],
    config: &EngineConfig,
) -> Result<Verification> {
    let recomputed = score_race(entrants, race_type, seed_material, entry_fee, config)?;

    if recomputed.results.len() != published_results.len() {
        return Ok(Verification::fail(format!(
            "result count mismatch: expected {}, computed {}",
            published_results.len(),
            recomputed.results.len()
        )));
    }

    for (index, (published, computed)) in
        published_results.iter().zip(recomputed.results.iter()).enumerate()
    {
        if published != computed {
            return Ok(Verification::fail(format!(
                "position {}: published {:?}, computed {:?}",
                index + 1,
                published,
                computed
            )));
        }
    }

    Ok(Verification::ok())
}
