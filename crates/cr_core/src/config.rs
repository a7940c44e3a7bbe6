//! Engine configuration: activities, race-type weight vectors and the prize
//! distribution.
//!
//! The caller supplies configuration whole, per invocation; the engine never
//! caches or mutates it. Parsing happens once via [`EngineConfig::from_json`]
//! and validation is eager, so malformed tunables fail loudly at load time
//! instead of surfacing as silent scoring drift mid-season.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stats::StatKind;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Activity '{activity}' has a negative gain: {value}")]
    NegativeGain { activity: String, value: f64 },

    #[error("Activity '{activity}' has fatigue cost {value} outside 0..=100")]
    FatigueCostOutOfRange { activity: String, value: f64 },

    #[error("Race type '{race_type}' has a negative weight for {stat}: {value}")]
    NegativeWeight { race_type: String, stat: &'static str, value: f64 },

    #[error("Prize distribution entry {index} is {value}, expected 0.0..=1.0")]
    PrizeShareOutOfRange { index: usize, value: f64 },

    #[error("Prize distribution sums to {sum}, expected at most 1.0")]
    PrizeDistributionOverflows { sum: f64 },
}

/// One training activity: which stats it moves and what it costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDefinition {
    pub primary: StatKind,
    pub primary_gain: f64,
    #[serde(default)]
    pub secondary: Option<StatKind>,
    #[serde(default)]
    pub secondary_gain: f64,
    pub fatigue_cost: f64,
}

/// Stat weights for one race type, consumed only by the aggregate scorer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RaceTypeWeights {
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub stamina: f64,
    #[serde(default)]
    pub accel: f64,
    #[serde(default)]
    pub agility: f64,
    #[serde(default)]
    pub heart: f64,
    #[serde(default)]
    pub focus: f64,
}

impl RaceTypeWeights {
    pub fn weight(&self, kind: StatKind) -> f64 {
        match kind {
            StatKind::Speed => self.speed,
            StatKind::Stamina => self.stamina,
            StatKind::Accel => self.accel,
            StatKind::Agility => self.agility,
            StatKind::Heart => self.heart,
            StatKind::Focus => self.focus,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub activities: HashMap<String, ActivityDefinition>,
    #[serde(default)]
    pub race_type_weights: HashMap<String, RaceTypeWeights>,
    /// Prize share per rank index, e.g. `[0.50, 0.30, 0.20]`.
    #[serde(default)]
    pub prize_distribution: Vec<f64>,
}

impl EngineConfig {
    /// Parse and validate in one step.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (id, activity) in &self.activities {
            if activity.primary_gain < 0.0 {
                return Err(ConfigError::NegativeGain {
                    activity: id.clone(),
                    value: activity.primary_gain,
                });
            }
            if activity.secondary_gain < 0.0 {
                return Err(ConfigError::NegativeGain {
                    activity: id.clone(),
                    value: activity.secondary_gain,
                });
            }
            if !(0.0..=100.0).contains(&activity.fatigue_cost) {
                return Err(ConfigError::FatigueCostOutOfRange {
                    activity: id.clone(),
                    value: activity.fatigue_cost,
                });
            }
        }

        for (race_type, weights) in &self.race_type_weights {
            for kind in StatKind::ALL {
                let value = weights.weight(kind);
                if value < 0.0 {
                    return Err(ConfigError::NegativeWeight {
                        race_type: race_type.clone(),
                        stat: kind.name(),
                        value,
                    });
                }
            }
        }

        let mut sum = 0.0;
        for (index, share) in self.prize_distribution.iter().enumerate() {
            if !(0.0..=1.0).contains(share) {
                return Err(ConfigError::PrizeShareOutOfRange { index, value: *share });
            }
            sum += share;
        }
        if sum > 1.0 + 1e-9 {
            return Err(ConfigError::PrizeDistributionOverflows { sum });
        }

        Ok(())
    }

    pub fn activity(&self, activity_id: &str) -> Option<&ActivityDefinition> {
        self.activities.get(activity_id)
    }

    pub fn weights(&self, race_type: &str) -> Option<&RaceTypeWeights> {
        self.race_type_weights.get(race_type)
    }
}
