// Training systems: gain calculation, condition decay, action eligibility.
pub mod condition;
pub mod eligibility;
pub mod progression;

pub use condition::{
    decay, decay_with_formula, DecayedCondition, FatigueDecayFormula, SharpnessModifierFormula,
    FATIGUE_DECAY_PER_DAY, SHARPNESS_DECAY_PER_DAY, SHARPNESS_GRACE_HOURS,
};
pub use eligibility::{
    check_eligibility, DenialReason, EligibilityDecision, SeasonStatus, ACTION_COOLDOWN_HOURS,
    DAILY_ACTION_CAP,
};
pub use progression::{compute_gains, TrainingGains, SHARPNESS_GAIN_PER_SESSION};
