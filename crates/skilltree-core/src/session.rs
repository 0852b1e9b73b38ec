use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::engine::{ApplyOutcome, ProgressionEngine, ProgressionError};
use crate::notify::NotificationSink;
use crate::persistence::{self, PersistenceError};
use crate::state::ProgressionState;
use crate::storage::{KeyValueStore, StorageError};

/// Owns one player's progression and keeps the store in sync with it.
///
/// State is read from the store once, when the session opens. Every
/// successful transition is written back straight away.
pub struct Session<S: KeyValueStore, C: Catalog> {
    store: S,
    catalog: C,
    engine: ProgressionEngine,
    state_key: String,
    exp_per_action: u32,
    state: ProgressionState,
}

impl<S: KeyValueStore, C: Catalog> Session<S, C> {
    /// Opens a session, loading saved progress or starting fresh.
    pub fn open(store: S, catalog: C, config: &Config) -> Self {
        let state_key = config.storage.state_key.clone();

        let saved = match store.get(&state_key) {
            Ok(saved) => saved,
            Err(e) => {
                warn!(error = %e, key = %state_key, "failed to read saved state");
                None
            }
        };
        let state = persistence::load_or_init(saved.as_deref(), &catalog);

        Self {
            store,
            catalog,
            engine: ProgressionEngine::new(config.progression.unlock_sweep),
            state_key,
            exp_per_action: config.progression.exp_per_action,
            state,
        }
    }

    pub fn state(&self) -> &ProgressionState {
        &self.state
    }

    pub fn engine(&self) -> &ProgressionEngine {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Experience one [`Session::train`] call awards.
    pub fn exp_per_action(&self) -> u32 {
        self.exp_per_action
    }

    /// Awards the configured per-action experience to a skill.
    pub fn train(
        &mut self,
        skill_id: &str,
        sink: &mut impl NotificationSink,
    ) -> Result<ApplyOutcome, SessionError> {
        self.apply_experience(skill_id, self.exp_per_action, sink)
    }

    /// Applies experience, saves the result, then reports new achievements.
    ///
    /// A refused transition leaves the state and the store untouched. A
    /// failed save is logged; the in-memory state still advances.
    pub fn apply_experience(
        &mut self,
        skill_id: &str,
        amount: u32,
        sink: &mut impl NotificationSink,
    ) -> Result<ApplyOutcome, SessionError> {
        let outcome = self.engine.apply_experience(&self.state, skill_id, amount)?;
        self.state = outcome.state.clone();

        if let Err(e) = self.save() {
            warn!(error = %e, "failed to save progression state");
        }

        for id in &outcome.unlocked_achievements {
            if let Some(achievement) = self.state.achievement(id) {
                info!(
                    achievement = %achievement.id,
                    rarity = achievement.rarity.as_str(),
                    "achievement unlocked"
                );
                sink.notify(achievement);
            }
        }

        Ok(outcome)
    }

    /// Writes the current state to the store.
    pub fn save(&self) -> Result<(), SessionError> {
        let text = persistence::serialize_at(&self.state, Some(Utc::now()))?;
        self.store.set(&self.state_key, &text)?;
        debug!(key = %self.state_key, bytes = text.len(), "saved progression state");
        Ok(())
    }

    /// Discards all progress and saves a fresh catalog state.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.state = self.catalog.initial_state();
        self.save()
    }
}

/// Errors that can occur in Session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Progression error: {0}")]
    Progression(#[from] ProgressionError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
