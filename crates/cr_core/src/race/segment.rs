//! Segment accumulation simulator, the house-seeded race format.
//!
//! The race runs a fixed number of segments; each segment every entrant
//! covers a distance drawn from the shared keystream, widened by low
//! consistency and scaled by its speed multiplier. The full segment matrix
//! is retained so an auditor can replay the race draw by draw.
//!
//! Draw order is part of the wire contract (see `race::seed`): segments in
//! order, entrants in input order within a segment, roll before swing, one
//! `next_u64` per draw.

use serde::{Deserialize, Serialize};

use crate::race::seed::{next_unit, segment_rng};

pub const SEGMENT_COUNT: usize = 10;
/// House cut, percent of the pot, floored.
pub const HOUSE_CUT_PERCENT: u64 = 5;
/// Prize split for ranks 1-3, percent of the post-cut pot, each floored.
pub const PRIZE_SPLIT_PERCENT: [u64; 3] = [50, 30, 15];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentEntrant {
    pub creature_id: String,
    /// The entry signature contributed to the combined seed.
    pub signature: String,
    pub speed_multiplier: f64,
    /// 0.0 (erratic) to 1.0 (steady); lower values widen the swing.
    pub consistency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentResult {
    pub creature_id: String,
    /// 1-based finishing position.
    pub position: usize,
    pub total_distance: f64,
    pub payout: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRace {
    pub combined_seed: String,
    /// `segments[segment][entrant]` distance, entrants in input order.
    pub segments: Vec<Vec<f64>>,
    pub results: Vec<SegmentResult>,
    pub total_pot: u64,
    pub house_cut: u64,
}

/// Run the race from an already-combined seed.
pub fn simulate(combined_seed: &str, entrants: &[SegmentEntrant], entry_fee: u64) -> SegmentRace {
    let mut rng = segment_rng(combined_seed);

    let mut totals = vec![0.0f64; entrants.len()];
    let mut segments = Vec::with_capacity(SEGMENT_COUNT);

    for _ in 0..SEGMENT_COUNT {
        let mut row = Vec::with_capacity(entrants.len());
        for (index, entrant) in entrants.iter().enumerate() {
            let roll = next_unit(&mut rng) * 100.0;
            let swing =
                (next_unit(&mut rng) - 0.5) * (1.0 - entrant.consistency.clamp(0.0, 1.0)) * 40.0;
            let distance = (roll + swing) * entrant.speed_multiplier;
            totals[index] += distance;
            row.push(distance);
        }
        segments.push(row);
    }

    let mut order: Vec<usize> = (0..entrants.len()).collect();
    order.sort_by(|&a, &b| {
        totals[b]
            .partial_cmp(&totals[a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| entrants[a].creature_id.cmp(&entrants[b].creature_id))
    });

    let total_pot = entrants.len() as u64 * entry_fee;
    let house_cut = total_pot * HOUSE_CUT_PERCENT / 100;
    let prize_pot = total_pot - house_cut;

    let results = order
        .iter()
        .enumerate()
        .map(|(rank, &index)| SegmentResult {
            creature_id: entrants[index].creature_id.clone(),
            position: rank + 1,
            total_distance: totals[index],
            payout: PRIZE_SPLIT_PERCENT
                .get(rank)
                .map(|percent| prize_pot * percent / 100)
                .unwrap_or(0),
        })
        .collect();

    SegmentRace {
        combined_seed: combined_seed.to_string(),
        segments,
        results,
        total_pot,
        house_cut,
    }
}
