use std::collections::BTreeSet;

use crate::skill::{Category, SkillMap};

/// The rule that unlocks an achievement.
///
/// Conditions only look at skills and the player level. They never read
/// other achievements, so evaluation order cannot change the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlockCondition {
    /// Every listed skill is at `level` or above. A missing skill fails.
    AllSkillsAtLeast { skills: Vec<String>, level: u32 },
    /// Each listed skill meets its own minimum. A missing skill counts as level 0.
    SkillsAtLeast { requirements: Vec<(String, u32)> },
    /// At least one skill is at `level` or above.
    AnySkillAtLeast { level: u32 },
    /// At least `categories` distinct categories hold a skill at `level` or above.
    DistinctCategoriesAtLeast { categories: usize, level: u32 },
    /// The player has reached `level`.
    PlayerLevelAtLeast { level: u32 },
}

impl UnlockCondition {
    pub fn all_skills_at_least(skills: &[&str], level: u32) -> Self {
        UnlockCondition::AllSkillsAtLeast {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            level,
        }
    }

    pub fn skills_at_least(requirements: &[(&str, u32)]) -> Self {
        UnlockCondition::SkillsAtLeast {
            requirements: requirements
                .iter()
                .map(|(id, level)| (id.to_string(), *level))
                .collect(),
        }
    }

    /// Evaluates the condition against the given skills and player level.
    pub fn is_met(&self, skills: &SkillMap, player_level: u32) -> bool {
        match self {
            UnlockCondition::AllSkillsAtLeast { skills: ids, level } => ids.iter().all(|id| {
                skills
                    .get(id)
                    .map(|skill| skill.level >= *level)
                    .unwrap_or(false)
            }),
            UnlockCondition::SkillsAtLeast { requirements } => {
                requirements.iter().all(|(id, level)| {
                    skills.get(id).map(|skill| skill.level).unwrap_or(0) >= *level
                })
            }
            UnlockCondition::AnySkillAtLeast { level } => {
                skills.values().any(|skill| skill.level >= *level)
            }
            UnlockCondition::DistinctCategoriesAtLeast { categories, level } => {
                let reached: BTreeSet<Category> = skills
                    .values()
                    .filter(|skill| skill.level >= *level)
                    .map(|skill| skill.category)
                    .collect();
                reached.len() >= *categories
            }
            UnlockCondition::PlayerLevelAtLeast { level } => player_level >= *level,
        }
    }
}
