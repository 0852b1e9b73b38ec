use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Skills keyed by id, in catalog order.
pub type SkillMap = IndexMap<String, SkillNode>;

/// Minimum level a prerequisite must reach before its dependents unlock.
pub const PREREQUISITE_LEVEL: u32 = 2;

/// Grouping used for display and for category-based achievements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Backend,
    Middleware,
    Frontend,
    Devops,
    Tools,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 5] = [
        Category::Backend,
        Category::Middleware,
        Category::Frontend,
        Category::Devops,
        Category::Tools,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Backend => "backend",
            Category::Middleware => "middleware",
            Category::Frontend => "frontend",
            Category::Devops => "devops",
            Category::Tools => "tools",
        }
    }

    /// Returns a human-readable name for the category.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Backend => "Backend",
            Category::Middleware => "Middleware",
            Category::Frontend => "Frontend",
            Category::Devops => "DevOps",
            Category::Tools => "Tools",
        }
    }
}

/// One learnable skill.
///
/// Only `level`, `current_exp`, `max_exp` and `unlocked` change after the
/// catalog creates a node; everything else is display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillNode {
    /// Stable identifier, also the key in [`SkillMap`]
    pub id: String,
    pub name: String,
    pub category: Category,
    /// Current level, starting at 1
    pub level: u32,
    /// Experience collected towards the next level
    pub current_exp: u32,
    /// Experience needed to complete the current level
    pub max_exp: u32,
    pub icon: String,
    pub color: String,
    pub description: String,
    /// Skills that must be unlocked and at level 2 first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisites: Option<Vec<String>>,
    /// Once set, never cleared
    pub unlocked: bool,
}

impl SkillNode {
    /// Returns the declared prerequisite ids, empty when none were declared.
    pub fn prerequisite_ids(&self) -> &[String] {
        self.prerequisites.as_deref().unwrap_or(&[])
    }

    /// Returns true for skills that start unlocked and have no prerequisites.
    pub fn is_root(&self) -> bool {
        self.prerequisite_ids().is_empty()
    }

    /// Experience still missing to reach the next level.
    pub fn exp_to_next_level(&self) -> u32 {
        self.max_exp.saturating_sub(self.current_exp)
    }

    /// Progress through the current level, in percent (0-100).
    pub fn progress_percent(&self) -> u32 {
        if self.max_exp == 0 {
            return 0;
        }
        let percent = u64::from(self.current_exp) * 100 / u64::from(self.max_exp);
        percent.min(100) as u32
    }
}

/// Checks whether `node` may be unlocked given the current skill map.
///
/// Already unlocked nodes are always eligible. Otherwise every declared
/// prerequisite must exist, be unlocked, and have reached
/// [`PREREQUISITE_LEVEL`]. Nodes without prerequisites are never derived
/// as eligible; the catalog unlocks them up front.
pub fn is_eligible_to_unlock(node: &SkillNode, skills: &SkillMap) -> bool {
    if node.unlocked {
        return true;
    }

    let prerequisites = node.prerequisite_ids();
    if prerequisites.is_empty() {
        return false;
    }

    prerequisites.iter().all(|id| {
        skills
            .get(id)
            .map(|prereq| prereq.unlocked && prereq.level >= PREREQUISITE_LEVEL)
            .unwrap_or(false)
    })
}

/// Returns the ids of locked nodes that are eligible against `skills`.
pub fn newly_eligible(skills: &SkillMap) -> Vec<String> {
    skills
        .values()
        .filter(|node| !node.unlocked && is_eligible_to_unlock(node, skills))
        .map(|node| node.id.clone())
        .collect()
}
