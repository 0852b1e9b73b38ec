//! Experience curves for skills and for the player.
//!
//! Both curves are geometric and floored to whole experience points:
//! - skills need `floor(100 × 1.2^(level−1))` to complete `level`
//! - the player needs `floor(100 × 1.15^(level−1))` to complete `level`

/// Experience needed to complete the first level of either curve.
pub const BASE_EXP: u32 = 100;

/// Growth factor of the per-skill curve.
pub const SKILL_GROWTH: f64 = 1.2;

/// Growth factor of the player curve.
pub const PLAYER_GROWTH: f64 = 1.15;

fn threshold(growth: f64, level: u32) -> f64 {
    let exponent = level.max(1) - 1;
    (f64::from(BASE_EXP) * growth.powf(f64::from(exponent))).floor()
}

/// Returns the experience a skill at `level` needs to reach the next level.
///
/// Level 0 is treated as level 1. The value saturates at `u32::MAX` from
/// level 98 on, so the curve is only strictly increasing below that.
pub fn exp_required_for_skill_level(level: u32) -> u32 {
    threshold(SKILL_GROWTH, level) as u32
}

/// Returns the experience the player needs to complete `level`.
///
/// Computed in `u64`, matching the running total it is spent from.
pub fn player_level_threshold(level: u32) -> u64 {
    threshold(PLAYER_GROWTH, level) as u64
}

/// Derives the player level from the accumulated experience total.
pub fn player_level_from_total_exp(total_exp: u64) -> u32 {
    PlayerProgress::from_total_exp(total_exp).level
}

/// Where the player stands on the player curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerProgress {
    /// Current player level.
    pub level: u32,
    /// Experience carried into the current level.
    pub current_exp: u64,
    /// Experience needed to complete the current level.
    pub next_level_exp: u64,
}

impl PlayerProgress {
    /// Spends `total_exp` greedily through the player curve.
    pub fn from_total_exp(total_exp: u64) -> Self {
        let mut level = 1;
        let mut remaining = total_exp;
        let mut required = player_level_threshold(level);

        while remaining >= required {
            remaining -= required;
            level += 1;
            required = player_level_threshold(level);
        }

        Self {
            level,
            current_exp: remaining,
            next_level_exp: required,
        }
    }

    /// Fraction of the current level completed, in percent (0-100).
    pub fn percent(&self) -> u32 {
        if self.next_level_exp == 0 {
            return 0;
        }
        ((self.current_exp * 100) / self.next_level_exp).min(100) as u32
    }
}
