//! Static skill and achievement definitions.
//!
//! The catalog is the only source of achievement conditions. Persisted
//! state stores achievements by id and gets its conditions back from here.

use crate::achievement::{Achievement, Rarity, UnlockCondition};
use crate::leveling::exp_required_for_skill_level;
use crate::skill::{Category, SkillNode};
use crate::state::ProgressionState;

/// Supplies the immutable definitions a fresh state is built from.
pub trait Catalog {
    /// Skills in display order, at their starting level and unlock state.
    fn skills(&self) -> Vec<SkillNode>;

    /// Achievements in evaluation order, all locked.
    fn achievements(&self) -> Vec<Achievement>;

    /// Builds a state with no progress.
    fn initial_state(&self) -> ProgressionState {
        ProgressionState::new(self.skills(), self.achievements())
    }
}

struct SkillDef {
    id: &'static str,
    name: &'static str,
    category: Category,
    icon: &'static str,
    color: &'static str,
    description: &'static str,
    prerequisites: &'static [&'static str],
}

const SKILLS: &[SkillDef] = &[
    // Backend
    SkillDef {
        id: "java",
        name: "Java",
        category: Category::Backend,
        icon: "☕",
        color: "#f89820",
        description: "Core language for enterprise backends",
        prerequisites: &[],
    },
    SkillDef {
        id: "spring-cloud",
        name: "Spring Cloud",
        category: Category::Backend,
        icon: "🌥️",
        color: "#6db33f",
        description: "Microservice architecture toolkit",
        prerequisites: &["java"],
    },
    SkillDef {
        id: "spring-boot",
        name: "Spring Boot",
        category: Category::Backend,
        icon: "🍃",
        color: "#6db33f",
        description: "Rapid application framework",
        prerequisites: &["java"],
    },
    SkillDef {
        id: "mybatis-plus",
        name: "MyBatis-Plus",
        category: Category::Backend,
        icon: "🗄️",
        color: "#ba8e00",
        description: "Enhanced persistence layer",
        prerequisites: &["java", "spring-boot"],
    },
    SkillDef {
        id: "juc",
        name: "JUC",
        category: Category::Backend,
        icon: "⚡",
        color: "#ff6b6b",
        description: "Java concurrency utilities",
        prerequisites: &["java"],
    },
    SkillDef {
        id: "jvm",
        name: "JVM",
        category: Category::Backend,
        icon: "🔧",
        color: "#f39c12",
        description: "Virtual machine internals and tuning",
        prerequisites: &["java"],
    },
    SkillDef {
        id: "golang",
        name: "Golang",
        category: Category::Backend,
        icon: "🐹",
        color: "#00add8",
        description: "High-performance concurrent language",
        prerequisites: &[],
    },
    // Middleware
    SkillDef {
        id: "mysql",
        name: "MySQL",
        category: Category::Middleware,
        icon: "🐬",
        color: "#4479a1",
        description: "Relational database",
        prerequisites: &[],
    },
    SkillDef {
        id: "redis",
        name: "Redis",
        category: Category::Middleware,
        icon: "💾",
        color: "#dc382d",
        description: "In-memory data store",
        prerequisites: &[],
    },
    SkillDef {
        id: "kafka",
        name: "Kafka",
        category: Category::Middleware,
        icon: "📨",
        color: "#231f20",
        description: "Distributed message queue",
        prerequisites: &[],
    },
    // DevOps
    SkillDef {
        id: "docker",
        name: "Docker",
        category: Category::Devops,
        icon: "🐳",
        color: "#2496ed",
        description: "Container packaging and deployment",
        prerequisites: &[],
    },
    SkillDef {
        id: "k8s",
        name: "Kubernetes",
        category: Category::Devops,
        icon: "☸️",
        color: "#326ce5",
        description: "Container orchestration",
        prerequisites: &["docker"],
    },
    // Tools
    SkillDef {
        id: "linux",
        name: "Linux",
        category: Category::Tools,
        icon: "🐧",
        color: "#fcc624",
        description: "Server operating system",
        prerequisites: &[],
    },
    SkillDef {
        id: "git",
        name: "Git",
        category: Category::Tools,
        icon: "📚",
        color: "#f05032",
        description: "Version control",
        prerequisites: &[],
    },
];

impl SkillDef {
    fn to_node(&self) -> SkillNode {
        let prerequisites: Option<Vec<String>> = if self.prerequisites.is_empty() {
            None
        } else {
            Some(self.prerequisites.iter().map(|s| s.to_string()).collect())
        };

        SkillNode {
            id: self.id.to_string(),
            name: self.name.to_string(),
            category: self.category,
            level: 1,
            current_exp: 0,
            max_exp: exp_required_for_skill_level(1),
            icon: self.icon.to_string(),
            color: self.color.to_string(),
            description: self.description.to_string(),
            // Roots start unlocked; everything else waits on its prerequisites.
            unlocked: prerequisites.is_none(),
            prerequisites,
        }
    }
}

/// The built-in catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCatalog;

impl Catalog for DefaultCatalog {
    fn skills(&self) -> Vec<SkillNode> {
        SKILLS.iter().map(SkillDef::to_node).collect()
    }

    fn achievements(&self) -> Vec<Achievement> {
        vec![
            Achievement::new(
                "backend-master",
                "Backend Master",
                "Every backend skill at level 5",
                "🏆",
                Rarity::Epic,
                UnlockCondition::all_skills_at_least(
                    &["java", "spring-cloud", "spring-boot", "mybatis-plus", "juc", "jvm"],
                    5,
                ),
            ),
            Achievement::new(
                "middleware-ninja",
                "Middleware Ninja",
                "Every middleware skill at level 5",
                "🥷",
                Rarity::Rare,
                UnlockCondition::all_skills_at_least(&["mysql", "redis", "kafka"], 5),
            ),
            Achievement::new(
                "container-wizard",
                "Container Wizard",
                "Docker at level 5 and Kubernetes at level 3",
                "🧙",
                Rarity::Rare,
                UnlockCondition::skills_at_least(&[("docker", 5), ("k8s", 3)]),
            ),
            Achievement::new(
                "first-boost",
                "First Breakthrough",
                "Raise any skill to level 2",
                "🌟",
                Rarity::Common,
                UnlockCondition::AnySkillAtLeast { level: 2 },
            ),
            Achievement::new(
                "full-stack",
                "Full-Stack Developer",
                "Level 5 skills in four categories",
                "💎",
                Rarity::Legendary,
                UnlockCondition::DistinctCategoriesAtLeast { categories: 4, level: 5 },
            ),
            Achievement::new(
                "level-5",
                "Getting Serious",
                "Reach player level 5",
                "⭐",
                Rarity::Common,
                UnlockCondition::PlayerLevelAtLeast { level: 5 },
            ),
            Achievement::new(
                "legendary-dev",
                "Legendary Developer",
                "Own a level 10 skill",
                "👑",
                Rarity::Legendary,
                UnlockCondition::AnySkillAtLeast { level: 10 },
            ),
            Achievement::new(
                "polyglot",
                "Polyglot",
                "Java and Golang both at level 5",
                "🗣️",
                Rarity::Rare,
                UnlockCondition::skills_at_least(&[("java", 5), ("golang", 5)]),
            ),
        ]
    }
}
