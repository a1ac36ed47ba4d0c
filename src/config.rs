//! Engine configuration.

use crate::core::constants::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Timer cadence and run settings for the engine.
///
/// Every field is optional in the JSON form; missing ones fall back to
/// [`EngineConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Period of the hero/monster attack tick
    pub combat_tick_ms: u64,

    /// Period of the skill cooldown tick
    pub cooldown_tick_ms: u64,

    /// Period of the boss countdown tick
    pub boss_tick_ms: u64,

    /// Period between autosaves
    pub autosave_interval_ms: u64,

    /// Delay between a kill and the next spawn
    pub respawn_delay_ms: u64,

    /// Save directory (None = ~/.hero-idle/)
    pub save_dir: Option<PathBuf>,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Stop after this many seconds of game time (None = run until killed)
    pub run_seconds: Option<u64>,

    /// Run the clock as fast as possible instead of in real time
    pub fast_forward: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            combat_tick_ms: COMBAT_TICK_MS,
            cooldown_tick_ms: COOLDOWN_TICK_MS,
            boss_tick_ms: BOSS_TICK_MS,
            autosave_interval_ms: AUTOSAVE_INTERVAL_SECONDS * 1000,
            respawn_delay_ms: RESPAWN_DELAY_MS,
            save_dir: None,
            seed: None,
            run_seconds: None,
            fast_forward: false,
        }
    }
}

impl EngineConfig {
    /// Seeded, fast-forwarded run of `seconds` game seconds.
    pub fn simulation(seconds: u64, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            run_seconds: Some(seconds),
            fast_forward: true,
            ..Default::default()
        }
    }

    /// Same cadence as the default, saving into `dir`.
    pub fn with_save_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            save_dir: Some(dir.into()),
            ..Default::default()
        }
    }

    /// Load a JSON config file, returning defaults if missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// All timer periods are non-zero.
    pub fn is_valid(&self) -> bool {
        [
            self.combat_tick_ms,
            self.cooldown_tick_ms,
            self.boss_tick_ms,
            self.autosave_interval_ms,
        ]
        .iter()
        .all(|&period| period > 0)
    }
}
