//! # cr_core - Deterministic Creature Racing Progression Engine
//!
//! This library is the progression-and-resolution core of a seasonal
//! creature racing game: training gains with diminishing returns and stat
//! budgets, fatigue/sharpness decay, action eligibility, two race-scoring
//! strategies seeded from public chain data, position rewards, and
//! independent verification of published results.
//!
//! ## Features
//! - 100% deterministic resolution (same seed material = same result)
//! - Bit-level pinned randomness so third parties can re-verify races
//! - Pure, synchronous functions: no I/O, no shared state, no persistence
//! - JSON API for easy integration with the surrounding service

// Allow unused code for features under development
#![allow(dead_code)]
// Game engine APIs often require many parameters for snapshots, seeds, etc.
#![allow(clippy::too_many_arguments)]

pub mod api;
pub mod config;
pub mod error;
pub mod race;
pub mod reward;
pub mod stats;
pub mod traits;
pub mod training;

// Re-export the main API surface
pub use api::{
    check_eligibility_json, compute_gains_json, decay_condition_json, reward_for_position_json,
    score_race_json, simulate_segment_race_json, verify_segment_race_json,
};
pub use config::{ActivityDefinition, ConfigError, EngineConfig, RaceTypeWeights};
pub use error::{EngineError, Result};
pub use race::{
    combine_seed, score_race, simulate, verify_scored_race, verify_segment_race, RaceResult,
    ScoredRace, SegmentEntrant, SegmentRace, SegmentResult, Verification,
};
pub use reward::{
    active_boost_multiplier, reward_delta, reward_for_position, BoostToken, PositionReward,
    RewardDelta, BOOST_LIFETIME_BLOCKS,
};
pub use stats::{
    ConditionState, RaceEntrantSnapshot, StatBlock, StatKind, TRAINED_STAT_CAP,
    TRAINED_TOTAL_BUDGET,
};
pub use traits::{class_allowed, derive_base_stats, RarityClass, TraitCatalog};
pub use training::{
    check_eligibility, compute_gains, decay, DenialReason, EligibilityDecision,
    FatigueDecayFormula, SeasonStatus, SharpnessModifierFormula, TrainingGains,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sha2::{Digest, Sha256};

    fn sha256_hex(bytes: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let digest = hasher.finalize();
        let mut out = String::with_capacity(digest.len() * 2);
        for b in digest {
            out.push_str(&format!("{:02x}", b));
        }
        out
    }

    fn generate_test_field() -> serde_json::Value {
        json!([
            {
                "creature_id": "cr-01",
                "base": { "speed": 58.0, "stamina": 44.0, "accel": 51.0, "agility": 39.0, "heart": 47.0, "focus": 42.0 },
                "trained": { "speed": 12.0, "focus": 6.0 },
                "fatigue": 15.0,
                "sharpness": 70.0
            },
            {
                "creature_id": "cr-02",
                "base": { "speed": 61.0, "stamina": 40.0, "accel": 49.0, "agility": 45.0, "heart": 41.0, "focus": 35.0 },
                "trained": { "stamina": 8.0 },
                "fatigue": 40.0,
                "sharpness": 90.0
            },
            {
                "creature_id": "cr-03",
                "base": { "speed": 55.0, "stamina": 52.0, "accel": 44.0, "agility": 50.0, "heart": 55.0, "focus": 61.0 },
                "trained": { "speed": 4.0, "heart": 9.0 },
                "fatigue": 0.0,
                "sharpness": 20.0
            }
        ])
    }

    #[test]
    fn test_score_race_determinism_sha256() {
        let request = json!({
            "schema_version": 1,
            "entrants": generate_test_field(),
            "race_type": "classic",
            "seed_material": "000000000000000000000000000000000000000000000000000000block777",
            "entry_fee": 250,
            "config": {
                "race_type_weights": {
                    "classic": { "speed": 1.0, "stamina": 0.8, "accel": 0.6, "agility": 0.4, "heart": 0.5, "focus": 0.3 }
                },
                "prize_distribution": [0.50, 0.30, 0.20]
            }
        })
        .to_string();

        let result1 = score_race_json(&request).unwrap();
        let result2 = score_race_json(&request).unwrap();

        assert_eq!(result1, result2, "Same seed material should produce same result");
        assert_eq!(
            sha256_hex(result1.as_bytes()),
            sha256_hex(result2.as_bytes()),
            "Serialized results must be byte-identical"
        );
    }

    #[test]
    fn test_segment_race_determinism_sha256() {
        let request = json!({
            "schema_version": 1,
            "combined_seed": "cc42df7c6af68653e4bcba9092141414bf6e19e914cb2e3e92760e829074db3e",
            "entrants": [
                { "creature_id": "cr-a", "signature": "sig-a", "speed_multiplier": 1.1, "consistency": 0.8 },
                { "creature_id": "cr-b", "signature": "sig-b", "speed_multiplier": 1.0, "consistency": 0.5 },
                { "creature_id": "cr-c", "signature": "sig-c", "speed_multiplier": 0.9, "consistency": 0.2 }
            ],
            "entry_fee": 100
        })
        .to_string();

        let result1 = simulate_segment_race_json(&request).unwrap();
        let result2 = simulate_segment_race_json(&request).unwrap();
        assert_eq!(sha256_hex(result1.as_bytes()), sha256_hex(result2.as_bytes()));
    }

    #[test]
    fn test_full_resolution_flow() {
        // Train, decay, enter, score, reward: the whole loop on plain data.
        let mut config = EngineConfig::default();
        config.activities.insert(
            "hill-runs".to_string(),
            ActivityDefinition {
                primary: StatKind::Stamina,
                primary_gain: 9.0,
                secondary: Some(StatKind::Heart),
                secondary_gain: 4.0,
                fatigue_cost: 12.0,
            },
        );
        config.race_type_weights.insert(
            "endurance".to_string(),
            RaceTypeWeights { stamina: 1.0, heart: 0.5, ..RaceTypeWeights::default() },
        );
        config.prize_distribution = vec![0.6, 0.4];

        let mut trained = StatBlock::zeroed();
        let gains = compute_gains("hill-runs", &trained, &config).unwrap();
        trained.apply_gains(&gains.stat_changes);
        assert_eq!(trained.stamina, 9.0);

        let entrants: Vec<RaceEntrantSnapshot> = (1..=3)
            .map(|i| RaceEntrantSnapshot {
                creature_id: format!("cr-{}", i),
                base: StatBlock { stamina: 40.0 + i as f64, heart: 30.0, ..StatBlock::zeroed() },
                trained,
                fatigue: gains.fatigue_delta,
                sharpness: gains.sharpness_delta,
            })
            .collect();

        let race = score_race(&entrants, "endurance", "block-hash-000111", 50, &config).unwrap();
        assert_eq!(race.results.len(), 3);
        assert_eq!(race.total_pool, 150.0);

        let winner_delta = reward_delta(race.results[0].position, 123_456);
        assert_eq!(winner_delta.bonus_actions, 1);

        let runner_up_delta = reward_delta(race.results[1].position, 123_456);
        let boost = runner_up_delta.boost.unwrap();
        assert_eq!(boost.expires_at_height, 123_456 + BOOST_LIFETIME_BLOCKS);

        let verification = verify_scored_race(
            &entrants,
            "endurance",
            "block-hash-000111",
            50,
            &race.results,
            &config,
        )
        .unwrap();
        assert!(verification.valid);
    }
}
