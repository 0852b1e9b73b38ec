//! JSON encoding of [`ProgressionState`].
//!
//! Layout:
//! ```text
//! {
//!   "skills":       { "<id>": { id, name, category, level, currentExp, maxExp, ... }, ... },
//!   "achievements": { "<id>": { id, name, description, icon, rarity, unlocked }, ... },
//!   "totalExp": 0,
//!   "playerLevel": 1,
//!   "unlockedAchievements": [],
//!   "savedAt": "2024-01-01T00:00:00Z"
//! }
//! ```
//!
//! Achievement conditions are not stored. Loading rebuilds achievements from
//! the catalog and copies only the `unlocked` flag across.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

use crate::achievement::{Achievement, Rarity};
use crate::catalog::Catalog;
use crate::leveling::player_level_from_total_exp;
use crate::skill::SkillNode;
use crate::state::ProgressionState;

/// Errors from encoding or decoding persisted state.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Corrupt persisted state: {0}")]
    CorruptPersistedState(String),

    #[error("Failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Stored form of an achievement: metadata and the unlocked flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AchievementRecord {
    id: String,
    name: String,
    description: String,
    icon: String,
    rarity: Rarity,
    unlocked: bool,
}

impl From<&Achievement> for AchievementRecord {
    fn from(achievement: &Achievement) -> Self {
        Self {
            id: achievement.id.clone(),
            name: achievement.name.clone(),
            description: achievement.description.clone(),
            icon: achievement.icon.clone(),
            rarity: achievement.rarity,
            unlocked: achievement.unlocked,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StateDocument {
    #[serde(default)]
    skills: IndexMap<String, SkillNode>,
    #[serde(default)]
    achievements: IndexMap<String, AchievementRecord>,
    #[serde(default)]
    total_exp: u64,
    #[serde(default)]
    player_level: u32,
    #[serde(default)]
    unlocked_achievements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_at: Option<DateTime<Utc>>,
}

/// Encodes the state as JSON.
pub fn serialize(state: &ProgressionState) -> Result<String, PersistenceError> {
    serialize_at(state, None)
}

/// Encodes the state as JSON, stamping the time it was saved.
pub fn serialize_at(
    state: &ProgressionState,
    saved_at: Option<DateTime<Utc>>,
) -> Result<String, PersistenceError> {
    let document = StateDocument {
        skills: state.skills.clone(),
        achievements: state
            .achievements
            .iter()
            .map(|(id, achievement)| (id.clone(), AchievementRecord::from(achievement)))
            .collect(),
        total_exp: state.total_exp,
        player_level: state.player_level,
        unlocked_achievements: state.unlocked_achievements.clone(),
        saved_at,
    };

    Ok(serde_json::to_string_pretty(&document)?)
}

/// Decodes persisted state, rebinding achievement conditions from `catalog`.
///
/// Unparseable text or an empty skill map is reported as
/// [`PersistenceError::CorruptPersistedState`]. The unlock log and the
/// achievement flags are reconciled to their union.
pub fn deserialize(text: &str, catalog: &impl Catalog) -> Result<ProgressionState, PersistenceError> {
    let document: StateDocument = serde_json::from_str(text)
        .map_err(|e| PersistenceError::CorruptPersistedState(e.to_string()))?;

    if document.skills.is_empty() {
        return Err(PersistenceError::CorruptPersistedState(
            "no skills in persisted state".to_string(),
        ));
    }

    let mut skills = IndexMap::with_capacity(document.skills.len());
    for (key, mut node) in document.skills {
        if node.id != key {
            debug!(key = %key, id = %node.id, "skill record id differs from its key");
            node.id = key.clone();
        }
        skills.insert(key, node);
    }
    for node in catalog.skills() {
        if !skills.contains_key(&node.id) {
            debug!(skill = %node.id, "adding catalog skill missing from persisted state");
            skills.insert(node.id.clone(), node);
        }
    }

    let mut achievements = IndexMap::new();
    for mut achievement in catalog.achievements() {
        if let Some(record) = document.achievements.get(&achievement.id) {
            achievement.unlocked = record.unlocked;
        }
        achievements.insert(achievement.id.clone(), achievement);
    }
    for id in document.achievements.keys() {
        if !achievements.contains_key(id) {
            warn!(achievement = %id, "dropping achievement unknown to the catalog");
        }
    }

    let mut seen = HashSet::new();
    let mut unlocked_achievements: Vec<String> = document
        .unlocked_achievements
        .into_iter()
        .filter(|id| achievements.contains_key(id) && seen.insert(id.clone()))
        .collect();

    // The log and the flags must name the same set: logged ids are flagged,
    // flagged ids missing from the log are appended in catalog order.
    for id in &unlocked_achievements {
        if let Some(achievement) = achievements.get_mut(id) {
            if !achievement.unlocked {
                debug!(achievement = %id, "flagging logged achievement as unlocked");
                achievement.unlocked = true;
            }
        }
    }
    for achievement in achievements.values() {
        if achievement.unlocked && seen.insert(achievement.id.clone()) {
            debug!(achievement = %achievement.id, "appending flagged achievement to the unlock log");
            unlocked_achievements.push(achievement.id.clone());
        }
    }

    Ok(ProgressionState {
        skills,
        achievements,
        total_exp: document.total_exp,
        player_level: player_level_from_total_exp(document.total_exp),
        unlocked_achievements,
    })
}

/// Loads persisted state, falling back to a fresh catalog state.
///
/// Never fails: missing text yields a fresh state, corrupt text is logged
/// and discarded.
pub fn load_or_init(text: Option<&str>, catalog: &impl Catalog) -> ProgressionState {
    let Some(text) = text else {
        debug!("no persisted state, starting fresh");
        return catalog.initial_state();
    };

    match deserialize(text, catalog) {
        Ok(state) => state,
        Err(e) => {
            warn!(error = %e, "discarding persisted state");
            catalog.initial_state()
        }
    }
}
