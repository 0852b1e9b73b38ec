use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::achievement;
use crate::leveling::{exp_required_for_skill_level, player_level_from_total_exp};
use crate::skill::{newly_eligible, SkillMap};
use crate::state::ProgressionState;

/// How far the post-update unlock sweep runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnlockSweep {
    /// One pass over the locked skills per call.
    SinglePass,
    /// Repeat passes until one unlocks nothing.
    #[default]
    FixedPoint,
}

impl UnlockSweep {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnlockSweep::SinglePass => "single-pass",
            UnlockSweep::FixedPoint => "fixed-point",
        }
    }

    /// Parses the config spelling of a sweep mode.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "single-pass" | "single" => Some(UnlockSweep::SinglePass),
            "fixed-point" | "fixed" => Some(UnlockSweep::FixedPoint),
            _ => None,
        }
    }
}

/// Why an `apply_experience` call was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    UnknownSkill,
    LockedSkill,
    ZeroAmount,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            InvalidReason::UnknownSkill => "skill does not exist",
            InvalidReason::LockedSkill => "skill is locked",
            InvalidReason::ZeroAmount => "experience amount must be positive",
        };
        f.write_str(text)
    }
}

/// Errors returned by the progression engine.
///
/// The input state is never modified when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressionError {
    #[error("Invalid operation on '{skill_id}': {reason}")]
    InvalidOperation {
        skill_id: String,
        reason: InvalidReason,
    },
}

impl ProgressionError {
    fn invalid(skill_id: &str, reason: InvalidReason) -> Self {
        ProgressionError::InvalidOperation {
            skill_id: skill_id.to_string(),
            reason,
        }
    }
}

/// Result of a successful transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// The state after the transition
    pub state: ProgressionState,
    /// Achievements unlocked by this call, in catalog order
    pub unlocked_achievements: Vec<String>,
    /// Skills unlocked by this call
    pub unlocked_skills: Vec<String>,
    /// Levels the target skill gained
    pub levels_gained: u32,
    /// Amount added to `total_exp`
    pub exp_gained: u64,
}

/// Applies experience to skills and derives everything that follows.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressionEngine {
    sweep: UnlockSweep,
}

impl ProgressionEngine {
    pub fn new(sweep: UnlockSweep) -> Self {
        Self { sweep }
    }

    pub fn sweep(&self) -> UnlockSweep {
        self.sweep
    }

    /// Awards `amount` experience to `skill_id` and returns the new state.
    ///
    /// Levels cascade with carry-over. `total_exp` grows by the new threshold
    /// of every level reached, not by `amount`, so experience parked in an
    /// unfinished level does not count yet.
    pub fn apply_experience(
        &self,
        state: &ProgressionState,
        skill_id: &str,
        amount: u32,
    ) -> Result<ApplyOutcome, ProgressionError> {
        let target = state
            .skills
            .get(skill_id)
            .ok_or_else(|| ProgressionError::invalid(skill_id, InvalidReason::UnknownSkill))?;
        if !target.unlocked {
            return Err(ProgressionError::invalid(skill_id, InvalidReason::LockedSkill));
        }
        if amount == 0 {
            return Err(ProgressionError::invalid(skill_id, InvalidReason::ZeroAmount));
        }

        let mut next = state.clone();
        let mut exp_gained: u64 = 0;
        let mut levels_gained = 0;

        if let Some(node) = next.skills.get_mut(skill_id) {
            let mut remaining = amount;
            while remaining > 0 {
                let needed = node.exp_to_next_level();
                if remaining >= needed {
                    remaining -= needed;
                    node.current_exp = 0;
                    node.level += 1;
                    node.max_exp = exp_required_for_skill_level(node.level);
                    exp_gained += u64::from(node.max_exp);
                    levels_gained += 1;
                } else {
                    node.current_exp += remaining;
                    remaining = 0;
                }
            }
        }

        let unlocked_skills = self.sweep_unlocks(&mut next.skills);

        next.total_exp += exp_gained;
        next.player_level = player_level_from_total_exp(next.total_exp);

        let unlocked_achievements =
            achievement::evaluate(&next.skills, next.player_level, &next.achievements);
        for id in &unlocked_achievements {
            if let Some(achievement) = next.achievements.get_mut(id) {
                achievement.unlocked = true;
            }
            next.unlocked_achievements.push(id.clone());
        }

        debug!(
            skill = skill_id,
            amount,
            levels_gained,
            exp_gained,
            player_level = next.player_level,
            unlocked_skills = unlocked_skills.len(),
            unlocked_achievements = unlocked_achievements.len(),
            "applied experience"
        );

        Ok(ApplyOutcome {
            state: next,
            unlocked_achievements,
            unlocked_skills,
            levels_gained,
            exp_gained,
        })
    }

    /// Unlocks every eligible locked skill.
    ///
    /// Each pass decides eligibility against the skills as they were when
    /// the pass started. A fixed-point sweep stops after a pass that unlocks
    /// nothing, which takes at most one pass per skill.
    fn sweep_unlocks(&self, skills: &mut SkillMap) -> Vec<String> {
        let max_passes = match self.sweep {
            UnlockSweep::SinglePass => 1,
            UnlockSweep::FixedPoint => skills.len().max(1),
        };

        let mut unlocked = Vec::new();
        for _ in 0..max_passes {
            let eligible = newly_eligible(skills);
            if eligible.is_empty() {
                break;
            }
            for id in eligible {
                if let Some(node) = skills.get_mut(&id) {
                    node.unlocked = true;
                }
                unlocked.push(id);
            }
        }
        unlocked
    }
}

/// Applies experience with the default engine.
pub fn apply_experience(
    state: &ProgressionState,
    skill_id: &str,
    amount: u32,
) -> Result<ApplyOutcome, ProgressionError> {
    ProgressionEngine::default().apply_experience(state, skill_id, amount)
}
