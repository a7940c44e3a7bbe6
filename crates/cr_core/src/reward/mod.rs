//! Position-based rewards: bonus actions and block-height-expiring boosts.
//!
//! The engine only decides *what* a finish earns. Applying a
//! [`RewardDelta`] (incrementing the bonus-action counter, inserting the
//! boost token row) must be done atomically and idempotently per
//! (race id, creature id) by the persistence layer; the engine does not and
//! cannot enforce that, and calling it twice for the same pair will happily
//! mint twice.

use serde::{Deserialize, Serialize};

/// Boost lifetime in chain blocks, roughly three days.
pub const BOOST_LIFETIME_BLOCKS: u64 = 2160;

/// A discrete, stackable training/race boost. Tokens are independent rows:
/// each expires on its own schedule and is individually spendable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoostToken {
    pub multiplier: f64,
    pub awarded_at_height: u64,
    pub expires_at_height: u64,
}

impl BoostToken {
    pub fn new(multiplier: f64, awarded_at_height: u64) -> Self {
        Self {
            multiplier,
            awarded_at_height,
            expires_at_height: awarded_at_height + BOOST_LIFETIME_BLOCKS,
        }
    }

    /// A token is inert before its award height and at/after its expiry
    /// height, consumed or not.
    pub fn is_live(&self, height: u64) -> bool {
        height >= self.awarded_at_height && height < self.expires_at_height
    }
}

/// What a finishing position earns, before any height is attached.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionReward {
    pub bonus_actions: u32,
    pub boost_multiplier: f64,
}

/// The intended mutation for one (race, creature) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardDelta {
    pub bonus_actions: u32,
    pub boost: Option<BoostToken>,
}

/// The reward table. Positions are 1-based; position 0 earns nothing.
pub fn reward_for_position(position: usize) -> PositionReward {
    match position {
        0 => PositionReward::default(),
        1 => PositionReward { bonus_actions: 1, boost_multiplier: 0.0 },
        2 => PositionReward { bonus_actions: 0, boost_multiplier: 0.50 },
        3 => PositionReward { bonus_actions: 0, boost_multiplier: 0.25 },
        _ => PositionReward { bonus_actions: 0, boost_multiplier: 0.10 },
    }
}

/// Turn a finishing position into the delta the caller should persist,
/// minting the boost token at the given chain height.
pub fn reward_delta(position: usize, awarded_at_height: u64) -> RewardDelta {
    let reward = reward_for_position(position);
    let boost = if reward.boost_multiplier > 0.0 {
        Some(BoostToken::new(reward.boost_multiplier, awarded_at_height))
    } else {
        None
    };
    RewardDelta { bonus_actions: reward.bonus_actions, boost }
}

/// Sum of the multipliers of every token live at `height`. Boosts stack.
pub fn active_boost_multiplier(tokens: &[BoostToken], height: u64) -> f64 {
    tokens.iter().filter(|t| t.is_live(height)).map(|t| t.multiplier).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reward_table() {
        assert_eq!(
            reward_for_position(1),
            PositionReward { bonus_actions: 1, boost_multiplier: 0.0 }
        );
        assert_eq!(
            reward_for_position(2),
            PositionReward { bonus_actions: 0, boost_multiplier: 0.50 }
        );
        assert_eq!(
            reward_for_position(3),
            PositionReward { bonus_actions: 0, boost_multiplier: 0.25 }
        );
        assert_eq!(
            reward_for_position(4),
            PositionReward { bonus_actions: 0, boost_multiplier: 0.10 }
        );
        // Every finisher from fourth place down earns the same trickle.
        assert_eq!(reward_for_position(17), reward_for_position(4));
    }

    #[test]
    fn test_position_zero_earns_nothing() {
        assert_eq!(reward_for_position(0), PositionReward::default());
        let delta = reward_delta(0, 1000);
        assert_eq!(delta.bonus_actions, 0);
        assert!(delta.boost.is_none());
    }

    #[test]
    fn test_winner_delta_has_no_boost() {
        let delta = reward_delta(1, 5000);
        assert_eq!(delta.bonus_actions, 1);
        assert!(delta.boost.is_none());
    }

    #[test]
    fn test_boost_expiry_height() {
        let delta = reward_delta(2, 5000);
        let boost = delta.boost.unwrap();
        assert_eq!(boost.multiplier, 0.50);
        assert_eq!(boost.awarded_at_height, 5000);
        assert_eq!(boost.expires_at_height, 7160);

        assert!(boost.is_live(5000));
        assert!(boost.is_live(7159));
        assert!(!boost.is_live(7160), "a boost is inert at its expiry height");
        assert!(!boost.is_live(4999));
    }

    #[test]
    fn test_boosts_stack_independently() {
        let tokens = vec![
            BoostToken::new(0.50, 1000), // expires 3160
            BoostToken::new(0.25, 2000), // expires 4160
            BoostToken::new(0.10, 4000), // expires 6160
        ];
        assert_eq!(active_boost_multiplier(&tokens, 2500), 0.75);
        assert_eq!(active_boost_multiplier(&tokens, 4100), 0.35);
        assert_eq!(active_boost_multiplier(&tokens, 6200), 0.0);
        assert_eq!(active_boost_multiplier(&tokens, 500), 0.0);
    }
}
