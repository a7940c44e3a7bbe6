//! Daily action gate: season status, the two-a-day cap, the six-hour
//! cooldown, and the bonus-action bypass.
//!
//! Denials are structured results, not errors: callers render the reason
//! code or message directly and decide which counter/timestamp to touch
//! based on `used_bonus`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Non-bonus actions allowed per creature per day.
pub const DAILY_ACTION_CAP: u32 = 2;
/// Minimum gap between non-bonus actions.
pub const ACTION_COOLDOWN_HOURS: i64 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonStatus {
    Upcoming,
    Active,
    Ended,
}

/// Machine-checkable denial reason; the message accessor is for humans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum DenialReason {
    SeasonNotActive,
    NoActionsRemaining,
    CooldownActive { remaining_minutes: i64 },
}

impl DenialReason {
    pub fn message(&self) -> String {
        match self {
            DenialReason::SeasonNotActive => "season not active".to_string(),
            DenialReason::NoActionsRemaining => "no actions remaining today".to_string(),
            DenialReason::CooldownActive { remaining_minutes } => {
                format!("cooldown active, {} minutes remaining", remaining_minutes)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityDecision {
    pub allowed: bool,
    /// True when the allowance came from the bonus-action counter; the
    /// caller must decrement that counter instead of the daily count.
    pub used_bonus: bool,
    pub reason: Option<DenialReason>,
    pub message: Option<String>,
}

impl EligibilityDecision {
    fn allow(used_bonus: bool) -> Self {
        Self { allowed: true, used_bonus, reason: None, message: None }
    }

    fn deny(reason: DenialReason) -> Self {
        let message = reason.message();
        Self { allowed: false, used_bonus: false, reason: Some(reason), message: Some(message) }
    }
}

/// Decide whether a creature may take a training/race action right now.
///
/// A positive bonus-action counter bypasses both the daily cap and the
/// cooldown. The engine never mutates the counter; `used_bonus` tells the
/// caller which branch was taken.
pub fn check_eligibility(
    season_status: SeasonStatus,
    bonus_actions: u32,
    regular_actions_today: u32,
    last_regular_action_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> EligibilityDecision {
    if season_status != SeasonStatus::Active {
        return EligibilityDecision::deny(DenialReason::SeasonNotActive);
    }

    if bonus_actions > 0 {
        return EligibilityDecision::allow(true);
    }

    if regular_actions_today >= DAILY_ACTION_CAP {
        return EligibilityDecision::deny(DenialReason::NoActionsRemaining);
    }

    if let Some(last) = last_regular_action_at {
        let cooldown_ends = last + Duration::hours(ACTION_COOLDOWN_HOURS);
        if now < cooldown_ends {
            let remaining = cooldown_ends - now;
            // Round up so "1 second left" never reads as zero minutes.
            let remaining_minutes = (remaining.num_seconds() + 59) / 60;
            return EligibilityDecision::deny(DenialReason::CooldownActive { remaining_minutes });
        }
    }

    EligibilityDecision::allow(false)
}
