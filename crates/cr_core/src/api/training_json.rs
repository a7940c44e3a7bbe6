//! Training JSON API: gain preview, condition decay, eligibility checks.
//!
//! Every request and response carries `schema_version`. Eligibility denials
//! are successful responses; only malformed requests and unknown config
//! keys surface as errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::ensure_schema;
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::stats::StatBlock;
use crate::training::condition::{decay_with_formula, FatigueDecayFormula};
use crate::training::eligibility::{check_eligibility, DenialReason, SeasonStatus};
use crate::training::progression::compute_gains;
use crate::SCHEMA_VERSION;

#[derive(Debug, Deserialize)]
pub struct GainsRequest {
    pub schema_version: u8,
    pub activity_id: String,
    pub current_trained: StatBlock,
    pub config: EngineConfig,
}

#[derive(Debug, Serialize)]
pub struct GainsResponse {
    pub schema_version: u8,
    pub stat_changes: StatBlock,
    pub fatigue_delta: f64,
    pub sharpness_delta: f64,
}

pub fn compute_gains_json(request: &str) -> Result<String> {
    let request: GainsRequest = serde_json::from_str(request)?;
    ensure_schema(request.schema_version)?;
    request.config.validate().map_err(|e| EngineError::InvalidRequest(e.to_string()))?;

    debug!(activity_id = %request.activity_id, "computing training gains");
    let gains = compute_gains(&request.activity_id, &request.current_trained, &request.config)?;

    let response = GainsResponse {
        schema_version: SCHEMA_VERSION,
        stat_changes: gains.stat_changes,
        fatigue_delta: gains.fatigue_delta,
        sharpness_delta: gains.sharpness_delta,
    };
    Ok(serde_json::to_string(&response)?)
}

#[derive(Debug, Deserialize)]
pub struct DecayRequest {
    pub schema_version: u8,
    pub fatigue: f64,
    pub sharpness: f64,
    pub last_action_at: Option<DateTime<Utc>>,
    pub now: DateTime<Utc>,
    #[serde(default)]
    pub fatigue_formula: FatigueDecayFormula,
}

#[derive(Debug, Serialize)]
pub struct DecayResponse {
    pub schema_version: u8,
    pub fatigue: f64,
    pub sharpness: f64,
}

pub fn decay_condition_json(request: &str) -> Result<String> {
    let request: DecayRequest = serde_json::from_str(request)?;
    ensure_schema(request.schema_version)?;

    let decayed = decay_with_formula(
        request.fatigue,
        request.sharpness,
        request.last_action_at,
        request.now,
        request.fatigue_formula,
    );

    let response = DecayResponse {
        schema_version: SCHEMA_VERSION,
        fatigue: decayed.fatigue,
        sharpness: decayed.sharpness,
    };
    Ok(serde_json::to_string(&response)?)
}

#[derive(Debug, Deserialize)]
pub struct EligibilityRequest {
    pub schema_version: u8,
    pub season_status: SeasonStatus,
    pub bonus_actions: u32,
    pub regular_actions_today: u32,
    pub last_regular_action_at: Option<DateTime<Utc>>,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct EligibilityResponse {
    pub schema_version: u8,
    pub allowed: bool,
    pub used_bonus: bool,
    pub reason: Option<DenialReason>,
    pub message: Option<String>,
}

pub fn check_eligibility_json(request: &str) -> Result<String> {
    let request: EligibilityRequest = serde_json::from_str(request)?;
    ensure_schema(request.schema_version)?;

    let decision = check_eligibility(
        request.season_status,
        request.bonus_actions,
        request.regular_actions_today,
        request.last_regular_action_at,
        request.now,
    );
    debug!(allowed = decision.allowed, used_bonus = decision.used_bonus, "eligibility checked");

    let response = EligibilityResponse {
        schema_version: SCHEMA_VERSION,
        allowed: decision.allowed,
        used_bonus: decision.used_bonus,
        reason: decision.reason,
        message: decision.message,
    };
    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn gains_request(schema_version: u8, activity_id: &str) -> String {
        json!({
            "schema_version": schema_version,
            "activity_id": activity_id,
            "current_trained": {},
            "config": {
                "activities": {
                    "sprints": {
                        "primary": "speed",
                        "primary_gain": 10.0,
                        "secondary": "stamina",
                        "secondary_gain": 5.0,
                        "fatigue_cost": 8.0
                    }
                }
            }
        })
        .to_string()
    }

    #[test]
    fn test_compute_gains_json_roundtrip() {
        let response = compute_gains_json(&gains_request(1, "sprints")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert_eq!(parsed["schema_version"], 1);
        assert_eq!(parsed["stat_changes"]["speed"], 10.0);
        assert_eq!(parsed["stat_changes"]["stamina"], 5.0);
        assert_eq!(parsed["fatigue_delta"], 8.0);
        assert_eq!(parsed["sharpness_delta"], 20.0);
    }

    #[test]
    fn test_unknown_activity_is_an_error() {
        let result = compute_gains_json(&gains_request(1, "swimming"));
        assert!(matches!(result, Err(EngineError::UnknownActivity(_))));
    }

    #[test]
    fn test_wrong_schema_version_rejected() {
        let result = compute_gains_json(&gains_request(9, "sprints"));
        assert!(matches!(result, Err(EngineError::UnsupportedSchemaVersion { found: 9, .. })));
    }

    #[test]
    fn test_decay_json_roundtrip() {
        let request = json!({
            "schema_version": 1,
            "fatigue": 50.0,
            "sharpness": 80.0,
            "last_action_at": "2024-03-01T12:00:00Z",
            "now": "2024-03-02T12:00:00Z"
        })
        .to_string();
        let response = decay_condition_json(&request).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert_eq!(parsed["fatigue"], 47.0);
        assert_eq!(parsed["sharpness"], 80.0);
    }

    #[test]
    fn test_eligibility_denial_is_a_successful_response() {
        let request = json!({
            "schema_version": 1,
            "season_status": "ended",
            "bonus_actions": 0,
            "regular_actions_today": 0,
            "last_regular_action_at": null,
            "now": "2024-03-02T12:00:00Z"
        })
        .to_string();
        let response = check_eligibility_json(&request).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert_eq!(parsed["allowed"], false);
        assert_eq!(parsed["reason"]["code"], "season_not_active");
        assert_eq!(parsed["message"], "season not active");
    }
}
