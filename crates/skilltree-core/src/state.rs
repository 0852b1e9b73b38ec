use crate::achievement::{Achievement, AchievementMap};
use crate::leveling::PlayerProgress;
use crate::skill::{Category, SkillMap, SkillNode};

/// Everything one player has earned.
///
/// The state is plain data. [`crate::engine::ProgressionEngine`] produces a
/// new state per transition and the caller decides when to persist it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressionState {
    /// Skills in catalog order
    pub skills: SkillMap,
    /// Achievements in catalog order
    pub achievements: AchievementMap,
    /// Sum of the thresholds completed across all skills
    pub total_exp: u64,
    /// Cached player level derived from `total_exp`
    pub player_level: u32,
    /// Achievement ids in the order they were unlocked
    pub unlocked_achievements: Vec<String>,
}

impl ProgressionState {
    /// Builds a state from catalog entries with no progress recorded.
    pub fn new(skills: Vec<SkillNode>, achievements: Vec<Achievement>) -> Self {
        Self {
            skills: skills.into_iter().map(|s| (s.id.clone(), s)).collect(),
            achievements: achievements.into_iter().map(|a| (a.id.clone(), a)).collect(),
            total_exp: 0,
            player_level: 1,
            unlocked_achievements: Vec::new(),
        }
    }

    pub fn skill(&self, id: &str) -> Option<&SkillNode> {
        self.skills.get(id)
    }

    pub fn achievement(&self, id: &str) -> Option<&Achievement> {
        self.achievements.get(id)
    }

    /// A state with no skills or no achievements cannot be played and
    /// should be reset.
    pub fn is_valid(&self) -> bool {
        !self.skills.is_empty() && !self.achievements.is_empty()
    }

    /// Player level plus progress inside the current level.
    pub fn player_progress(&self) -> PlayerProgress {
        PlayerProgress::from_total_exp(self.total_exp)
    }

    /// Groups skills by category in [`Category::ALL`] order, skipping
    /// categories with no skills.
    pub fn skills_by_category(&self) -> Vec<(Category, Vec<&SkillNode>)> {
        Category::ALL
            .iter()
            .filter_map(|category| {
                let skills: Vec<&SkillNode> = self
                    .skills
                    .values()
                    .filter(|skill| skill.category == *category)
                    .collect();
                (!skills.is_empty()).then_some((*category, skills))
            })
            .collect()
    }

    /// Returns (unlocked, total) for a category.
    pub fn category_progress(&self, category: Category) -> (usize, usize) {
        self.skills
            .values()
            .filter(|skill| skill.category == category)
            .fold((0, 0), |(unlocked, total), skill| {
                (unlocked + usize::from(skill.unlocked), total + 1)
            })
    }

    /// Returns (unlocked, total) over all achievements.
    pub fn achievement_progress(&self) -> (usize, usize) {
        let unlocked = self.achievements.values().filter(|a| a.unlocked).count();
        (unlocked, self.achievements.len())
    }
}
