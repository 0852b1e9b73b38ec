pub mod achievement;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod leveling;
pub mod notify;
pub mod persistence;
pub mod session;
pub mod skill;
pub mod state;
pub mod storage;

pub use achievement::{Achievement, AchievementMap, Rarity, UnlockCondition};
pub use catalog::{Catalog, DefaultCatalog};
pub use config::{Config, ConfigError, ProgressionConfig, StorageConfig};
pub use engine::{
    apply_experience, ApplyOutcome, InvalidReason, ProgressionEngine, ProgressionError,
    UnlockSweep,
};
pub use leveling::{
    exp_required_for_skill_level, player_level_from_total_exp, player_level_threshold,
    PlayerProgress,
};
pub use notify::{AchievementQueue, NotificationSink};
pub use persistence::PersistenceError;
pub use session::{Session, SessionError};
pub use skill::{is_eligible_to_unlock, Category, SkillMap, SkillNode};
pub use state::ProgressionState;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
