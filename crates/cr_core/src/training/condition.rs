//! Time decay for the fatigue/sharpness condition pair.
//!
//! Fatigue bleeds off continuously; sharpness holds for a one-day grace
//! window and then fades. Both values are clamped to [0, 100] and rounded to
//! two decimals on the way out.
//!
//! NOTE: player-facing documentation for the original game describes fatigue
//! decay as rate-scaled (slower below 30, faster above 60) and a sharpness
//! race modifier of x0.80-x1.05, while the shipped formulas use a flat rate
//! and x0.90-x1.00. Which one is authoritative is an open product question,
//! so both are kept as named, independently selectable variants; the shipped
//! formulas are the defaults.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stats::{clamp01_100, round2, ConditionState};

/// Flat-rate fatigue decay per 24 elapsed hours.
pub const FATIGUE_DECAY_PER_DAY: f64 = 3.0;
/// Sharpness holds steady for this long after the last action.
pub const SHARPNESS_GRACE_HOURS: f64 = 24.0;
/// Sharpness decay per 24 hours beyond the grace window.
pub const SHARPNESS_DECAY_PER_DAY: f64 = 10.0;

/// Which fatigue-decay curve to apply. See the module note on the
/// documentation/implementation discrepancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FatigueDecayFormula {
    /// Flat 3 points per day (the shipped behavior).
    #[default]
    FlatRate,
    /// The documented behavior: half rate below fatigue 30, one-and-a-half
    /// rate above 60. The rate band is chosen from the pre-decay value.
    RateScaled,
}

impl FatigueDecayFormula {
    fn rate_per_day(&self, fatigue: f64) -> f64 {
        match self {
            FatigueDecayFormula::FlatRate => FATIGUE_DECAY_PER_DAY,
            FatigueDecayFormula::RateScaled => {
                if fatigue < 30.0 {
                    FATIGUE_DECAY_PER_DAY * 0.5
                } else if fatigue > 60.0 {
                    FATIGUE_DECAY_PER_DAY * 1.5
                } else {
                    FATIGUE_DECAY_PER_DAY
                }
            }
        }
    }
}

/// Which sharpness race-modifier range to apply. Consumed by the weighted
/// aggregate scorer; kept here with its sibling discrepancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SharpnessModifierFormula {
    /// x0.90 at sharpness 0 up to x1.00 at 100 (the shipped behavior).
    #[default]
    Standard,
    /// The documented range: x0.80 at sharpness 0 up to x1.05 at 100.
    Documented,
}

impl SharpnessModifierFormula {
    pub fn modifier(&self, sharpness: f64) -> f64 {
        let sharpness = clamp01_100(sharpness);
        match self {
            SharpnessModifierFormula::Standard => 0.90 + sharpness / 1000.0,
            SharpnessModifierFormula::Documented => 0.80 + sharpness / 400.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayedCondition {
    pub fatigue: f64,
    pub sharpness: f64,
}

/// Decay with the default (shipped) fatigue formula.
pub fn decay(
    fatigue: f64,
    sharpness: f64,
    last_action_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> DecayedCondition {
    decay_with_formula(fatigue, sharpness, last_action_at, now, FatigueDecayFormula::FlatRate)
}

pub fn decay_with_formula(
    fatigue: f64,
    sharpness: f64,
    last_action_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    formula: FatigueDecayFormula,
) -> DecayedCondition {
    let fatigue = clamp01_100(fatigue);
    let sharpness = clamp01_100(sharpness);

    let last = match last_action_at {
        Some(ts) => ts,
        // Never acted: nothing to decay from.
        None => return DecayedCondition { fatigue, sharpness },
    };

    let elapsed_hours = ((now - last).num_milliseconds() as f64 / 3_600_000.0).max(0.0);

    let fatigue_loss = formula.rate_per_day(fatigue) * elapsed_hours / 24.0;
    let decayed_fatigue = (fatigue - fatigue_loss).max(0.0);

    let decayed_sharpness = if elapsed_hours <= SHARPNESS_GRACE_HOURS {
        sharpness
    } else {
        let beyond = elapsed_hours - SHARPNESS_GRACE_HOURS;
        (sharpness - SHARPNESS_DECAY_PER_DAY * beyond / 24.0).max(0.0)
    };

    DecayedCondition {
        fatigue: clamp01_100(round2(decayed_fatigue)),
        sharpness: clamp01_100(round2(decayed_sharpness)),
    }
}

impl ConditionState {
    /// Convenience: decay this state as of `now` with the default formula.
    pub fn decayed(&self, now: DateTime<Utc>) -> DecayedCondition {
        decay(self.fatigue, self.sharpness, self.last_action_at, now)
    }
}
