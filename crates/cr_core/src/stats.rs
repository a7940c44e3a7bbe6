//! Stat blocks and the trained-stat budget invariants.
//!
//! A creature carries two stat flavors: *base* (derived once from its token
//! traits, never decays, may exceed the training cap) and *trained* (earned
//! through training, bounded per stat and in total, reset each season).
//! Effective stats (base + trained) exist only at race-scoring time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-stat ceiling for trained values.
pub const TRAINED_STAT_CAP: f64 = 80.0;
/// Ceiling for the sum of all six trained stats.
pub const TRAINED_TOTAL_BUDGET: f64 = 300.0;

/// The six creature stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Speed,
    Stamina,
    Accel,
    Agility,
    Heart,
    Focus,
}

impl StatKind {
    /// Canonical ordering, used everywhere iteration order matters.
    pub const ALL: [StatKind; 6] = [
        StatKind::Speed,
        StatKind::Stamina,
        StatKind::Accel,
        StatKind::Agility,
        StatKind::Heart,
        StatKind::Focus,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StatKind::Speed => "speed",
            StatKind::Stamina => "stamina",
            StatKind::Accel => "accel",
            StatKind::Agility => "agility",
            StatKind::Heart => "heart",
            StatKind::Focus => "focus",
        }
    }
}

/// A named block of six stat values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatBlock {
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

impl StatBlock {
    pub fn zeroed() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: StatKind) -> f64 {
        match kind {
            StatKind::Speed => self.speed,
            StatKind::Stamina => self.stamina,
            StatKind::Accel => self.accel,
            StatKind::Agility => self.agility,
            StatKind::Heart => self.heart,
            StatKind::Focus => self.focus,
        }
    }

    pub fn set(&mut self, kind: StatKind, value: f64) {
        match kind {
            StatKind::Speed => self.speed = value,
            StatKind::Stamina => self.stamina = value,
            StatKind::Accel => self.accel = value,
            StatKind::Agility => self.agility = value,
            StatKind::Heart => self.heart = value,
            StatKind::Focus => self.focus = value,
        }
    }

    pub fn add(&mut self, kind: StatKind, delta: f64) {
        self.set(kind, self.get(kind) + delta);
    }

    pub fn total(&self) -> f64 {
        StatKind::ALL.iter().map(|k| self.get(*k)).sum()
    }

    /// Component-wise sum; `base.plus(&trained)` yields effective stats.
    pub fn plus(&self, other: &StatBlock) -> StatBlock {
        let mut out = *self;
        for kind in StatKind::ALL {
            out.add(kind, other.get(kind));
        }
        out
    }

    /// Clamp a block of raw gains against the trained-stat invariants.
    ///
    /// Per stat: a gain may not push the value past [`TRAINED_STAT_CAP`];
    /// in total: gains are scaled by `max(0, budget_left) / gains_total`
    /// when they would push the sum past [`TRAINED_TOTAL_BUDGET`]. When no
    /// budget remains every gain collapses to zero.
    pub fn clamp_gains(&self, raw_gains: &StatBlock) -> StatBlock {
        let mut gains = StatBlock::zeroed();
        for kind in StatKind::ALL {
            let current = self.get(kind);
            let mut gain = raw_gains.get(kind).max(0.0);
            if current + gain > TRAINED_STAT_CAP {
                gain = (TRAINED_STAT_CAP - current).max(0.0);
            }
            gains.set(kind, gain);
        }

        let current_total = self.total();
        let gains_total = gains.total();
        if gains_total > 0.0 && current_total + gains_total > TRAINED_TOTAL_BUDGET {
            let scale = (TRAINED_TOTAL_BUDGET - current_total).max(0.0) / gains_total;
            for kind in StatKind::ALL {
                gains.set(kind, gains.get(kind) * scale);
            }
        }
        gains
    }

    /// Apply already-clamped gains, re-clamping for safety.
    pub fn apply_gains(&mut self, raw_gains: &StatBlock) {
        let gains = self.clamp_gains(raw_gains);
        for kind in StatKind::ALL {
            self.add(kind, gains.get(kind));
        }
    }
}

/// Round to two decimal places for storage stability.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn clamp01_100(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Fatigue/sharpness pair plus the timestamp of the last qualifying action.
///
/// Both values live in [0, 100]; constructors and mutators clamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConditionState {
    pub fatigue: f64,
    pub sharpness: f64,
    pub last_action_at: Option<DateTime<Utc>>,
}

impl ConditionState {
    pub fn new(fatigue: f64, sharpness: f64, last_action_at: Option<DateTime<Utc>>) -> Self {
        Self {
            fatigue: clamp01_100(fatigue),
            sharpness: clamp01_100(sharpness),
            last_action_at,
        }
    }

    pub fn fresh() -> Self {
        Self { fatigue: 0.0, sharpness: 0.0, last_action_at: None }
    }
}

impl Default for ConditionState {
    fn default() -> Self {
        Self::fresh()
    }
}

/// Frozen view of one entrant, captured at race-entry time.
///
/// Callers must snapshot before resolving a race: training that lands after
/// entry must not retroactively change a race already entered, and the
/// engine never re-reads live state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceEntrantSnapshot {
    pub creature_id: String,
    pub base: StatBlock,
    pub trained: StatBlock,
    pub fatigue: f64,
    pub sharpness: f64,
}

impl RaceEntrantSnapshot {
    /// Effective stats, base + trained. Only meaningful at race time.
    pub fn effective(&self) -> StatBlock {
        self.base.plus(&self.trained)
    }
}
