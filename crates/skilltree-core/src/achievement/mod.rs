mod condition;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::skill::SkillMap;

pub use condition::UnlockCondition;

/// Achievements keyed by id, in catalog order.
pub type AchievementMap = IndexMap<String, Achievement>;

/// How rare an achievement is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }
}

/// A one-time milestone.
///
/// The condition is part of the catalog and is never persisted; only the
/// `unlocked` flag survives a save/load cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub rarity: Rarity,
    /// Flips to true at most once
    pub unlocked: bool,
    pub condition: UnlockCondition,
}

impl Achievement {
    /// Creates a locked achievement.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
        rarity: Rarity,
        condition: UnlockCondition,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            icon: icon.into(),
            rarity,
            unlocked: false,
            condition,
        }
    }
}

/// Returns the ids of locked achievements whose condition now holds.
///
/// Ids come back in map order. Nothing is mutated; the caller marks the
/// achievements and records the order.
pub fn evaluate(skills: &SkillMap, player_level: u32, achievements: &AchievementMap) -> Vec<String> {
    achievements
        .values()
        .filter(|achievement| !achievement.unlocked)
        .filter(|achievement| achievement.condition.is_met(skills, player_level))
        .map(|achievement| achievement.id.clone())
        .collect()
}
