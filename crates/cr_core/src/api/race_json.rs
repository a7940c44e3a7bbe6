//! Race JSON API: scoring, house-race simulation, verification, rewards.
//!
//! Verification failures come back as `{ "valid": false, ... }` responses;
//! they are expected outcomes, not errors.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::ensure_schema;
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::race::segment::{simulate, SegmentEntrant, SegmentResult};
use crate::race::verify::verify_segment_race;
use crate::race::weighted::{score_race_with_formula, RaceResult};
use crate::reward::{reward_delta, BoostToken};
use crate::stats::RaceEntrantSnapshot;
use crate::training::condition::SharpnessModifierFormula;
use crate::SCHEMA_VERSION;

#[derive(Debug, Deserialize)]
pub struct ScoreRaceRequest {
    pub schema_version: u8,
    pub entrants: Vec<RaceEntrantSnapshot>,
    pub race_type: String,
    pub seed_material: String,
    pub entry_fee: u64,
    pub config: EngineConfig,
    #[serde(default)]
    pub sharpness_formula: SharpnessModifierFormula,
}

#[derive(Debug, Serialize)]
pub struct ScoreRaceResponse {
    pub schema_version: u8,
    pub results: Vec<RaceResult>,
    pub total_pool: f64,
}

pub fn score_race_json(request: &str) -> Result<String> {
    let request: ScoreRaceRequest = serde_json::from_str(request)?;
    ensure_schema(request.schema_version)?;
    request.config.validate().map_err(|e| EngineError::InvalidRequest(e.to_string()))?;

    info!(
        race_type = %request.race_type,
        entrants = request.entrants.len(),
        "scoring race"
    );
    let race = score_race_with_formula(
        &request.entrants,
        &request.race_type,
        &request.seed_material,
        request.entry_fee,
        &request.config,
        request.sharpness_formula,
    )?;

    let response = ScoreRaceResponse {
        schema_version: SCHEMA_VERSION,
        results: race.results,
        total_pool: race.total_pool,
    };
    Ok(serde_json::to_string(&response)?)
}

#[derive(Debug, Deserialize)]
pub struct SimulateSegmentRaceRequest {
    pub schema_version: u8,
    pub combined_seed: String,
    pub entrants: Vec<SegmentEntrant>,
    pub entry_fee: u64,
}

#[derive(Debug, Serialize)]
pub struct SimulateSegmentRaceResponse {
    pub schema_version: u8,
    pub combined_seed: String,
    pub segments: Vec<Vec<f64>>,
    pub results: Vec<SegmentResult>,
    pub total_pot: u64,
    pub house_cut: u64,
}

pub fn simulate_segment_race_json(request: &str) -> Result<String> {
    let request: SimulateSegmentRaceRequest = serde_json::from_str(request)?;
    ensure_schema(request.schema_version)?;

    info!(entrants = request.entrants.len(), "simulating segment race");
    let race = simulate(&request.combined_seed, &request.entrants, request.entry_fee);

    let response = SimulateSegmentRaceResponse {
        schema_version: SCHEMA_VERSION,
        combined_seed: race.combined_seed,
        segments: race.segments,
        results: race.results,
        total_pot: race.total_pot,
        house_cut: race.house_cut,
    };
    Ok(serde_json::to_string(&response)?)
}

#[derive(Debug, Deserialize)]
pub struct VerifySegmentRaceRequest {
    pub schema_version: u8,
    pub server_seed: String,
    pub published_hash: String,
    pub entrants: Vec<SegmentEntrant>,
    pub entry_fee: u64,
    pub published_results: Vec<SegmentResult>,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub schema_version: u8,
    pub valid: bool,
    pub reason: Option<String>,
}

pub fn verify_segment_race_json(request: &str) -> Result<String> {
    let request: VerifySegmentRaceRequest = serde_json::from_str(request)?;
    ensure_schema(request.schema_version)?;

    let verification = verify_segment_race(
        &request.server_seed,
        &request.published_hash,
        &request.entrants,
        request.entry_fee,
        &request.published_results,
    );
    debug!(valid = verification.valid, "segment race verified");

    let response = VerifyResponse {
        schema_version: SCHEMA_VERSION,
        valid: verification.valid,
        reason: verification.reason,
    };
    Ok(serde_json::to_string(&response)?)
}

#[derive(Debug, Deserialize)]
pub struct RewardRequest {
    pub schema_version: u8,
    pub position: usize,
    pub awarded_at_height: u64,
}

#[derive(Debug, Serialize)]
pub struct RewardResponse {
    pub schema_version: u8,
    pub bonus_actions: u32,
    pub boost_multiplier: f64,
    pub boost: Option<BoostToken>,
}

/// Look up the reward delta for a finishing position. Applying it
/// atomically and idempotently per (race, creature) is the caller's job.
pub fn reward_for_position_json(request: &str) -> Result<String> {
    let request: RewardRequest = serde_json::from_str(request)?;
    ensure_schema(request.schema_version)?;

    let delta = reward_delta(request.position, request.awarded_at_height);
    let response = RewardResponse {
        schema_version: SCHEMA_VERSION,
        bonus_actions: delta.bonus_actions,
        boost_multiplier: delta.boost.map(|b| b.multiplier).unwrap_or(0.0),
        boost: delta.boost,
    };
    Ok(serde_json::to_string(&response)?)
}
