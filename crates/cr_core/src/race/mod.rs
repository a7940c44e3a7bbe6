// Race resolution: deterministic seeding, the two scoring strategies, and
// independent verification of published results.
pub mod seed;
pub mod segment;
pub mod verify;
pub mod weighted;

pub use seed::{combine_seed, digest_hex, entrant_noise, segment_rng, unit_from_u64};
pub use segment::{
    simulate, SegmentEntrant, SegmentRace, SegmentResult, HOUSE_CUT_PERCENT, PRIZE_SPLIT_PERCENT,
    SEGMENT_COUNT,
};
pub use verify::{verify_scored_race, verify_segment_race, Verification};
pub use weighted::{
    score_race, score_race_with_formula, RaceResult, ScoredRace, FOCUS_SWING_BASE,
    MIN_PAYOUT_ENTRANTS,
};
