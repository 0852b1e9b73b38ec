//! Default values for SkillTree configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

use crate::engine::UnlockSweep;

// ============================================================================
// Storage Defaults
// ============================================================================

/// Default data directory.
pub const DEFAULT_DATA_DIR: &str = ".skilltree";

/// Default key the progression state is stored under.
pub const DEFAULT_STATE_KEY: &str = "skillTreeState";

/// File extension used for stored values.
pub const DEFAULT_STATE_EXTENSION: &str = "json";

// ============================================================================
// Progression Defaults
// ============================================================================

/// Experience awarded by one training action.
pub const DEFAULT_EXP_PER_ACTION: u32 = 20;

/// Default unlock sweep mode.
pub const DEFAULT_UNLOCK_SWEEP: UnlockSweep = UnlockSweep::FixedPoint;

// ============================================================================
// Config Discovery
// ============================================================================

/// Project-local config file name.
pub const LOCAL_CONFIG_FILE: &str = "skilltree.toml";

/// Directory under the user config dir.
pub const USER_CONFIG_DIR: &str = "skilltree";

/// File name under the user config dir.
pub const USER_CONFIG_FILE: &str = "config.toml";
