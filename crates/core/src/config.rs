//! Session configuration
//!
//! A [`GameConfig`] is handed to [`GameState::new`](crate::GameState::new) and
//! copied into the session; nothing reads live settings once a game runs.

use std::fmt;

use crate::types::{
    BACK_TO_BACK_MULTIPLIER, COMBO_MULTIPLIER, DEFAULT_ARR_MS, DEFAULT_DAS_MS,
    DEFAULT_DROP_ARR_MS, HARD_DROP_MULTIPLIER, LOCK_DELAY_MS, LOCK_RESET_LIMIT, MAX_LEVEL,
    MAX_PREVIEW_COUNT, NORMAL_CLEAR_SCORES, PREVIEW_COUNT, SOFT_DROP_MULTIPLIER, T_SPIN_SCORES,
};

/// Point values and multipliers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreTable {
    /// Indexed by lines cleared minus one
    pub normal_clear: [u32; 4],
    /// Indexed by lines cleared; Mini T-Spins use it too
    pub t_spin: [u32; 4],
    pub back_to_back: f64,
    pub soft_drop: u32,
    pub hard_drop: u32,
    pub combo: u32,
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            normal_clear: NORMAL_CLEAR_SCORES,
            t_spin: T_SPIN_SCORES,
            back_to_back: BACK_TO_BACK_MULTIPLIER,
            soft_drop: SOFT_DROP_MULTIPLIER,
            hard_drop: HARD_DROP_MULTIPLIER,
            combo: COMBO_MULTIPLIER,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Seed for the bag randomizer
    pub seed: u32,
    pub das_ms: u32,
    pub arr_ms: u32,
    pub drop_arr_ms: u32,
    pub lock_delay_ms: u32,
    pub max_lock_resets: u8,
    pub max_level: u32,
    pub preview_count: usize,
    pub scores: ScoreTable,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            das_ms: DEFAULT_DAS_MS,
            arr_ms: DEFAULT_ARR_MS,
            drop_arr_ms: DEFAULT_DROP_ARR_MS,
            lock_delay_ms: LOCK_DELAY_MS,
            max_lock_resets: LOCK_RESET_LIMIT,
            max_level: MAX_LEVEL,
            preview_count: PREVIEW_COUNT,
            scores: ScoreTable::default(),
        }
    }
}

impl GameConfig {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Defaults overridden by `TETRIS_*` environment variables
    ///
    /// Unset or unparsable values keep their default.
    pub fn from_env() -> Self {
        use std::env;

        fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
            env::var(key).ok().and_then(|s| s.trim().parse().ok())
        }

        let defaults = Self::default();
        Self {
            seed: parsed("TETRIS_SEED").unwrap_or(defaults.seed),
            das_ms: parsed("TETRIS_DAS_MS").unwrap_or(defaults.das_ms),
            arr_ms: parsed("TETRIS_ARR_MS").unwrap_or(defaults.arr_ms),
            drop_arr_ms: parsed("TETRIS_DROP_ARR_MS").unwrap_or(defaults.drop_arr_ms),
            preview_count: parsed("TETRIS_PREVIEW").unwrap_or(defaults.preview_count),
            ..defaults
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.preview_count == 0 || self.preview_count > MAX_PREVIEW_COUNT {
            return Err(ConfigError::PreviewCount(self.preview_count));
        }
        if self.max_level == 0 {
            return Err(ConfigError::MaxLevel);
        }
        if self.lock_delay_ms == 0 {
            return Err(ConfigError::LockDelay);
        }
        if !(self.scores.back_to_back >= 0.0) {
            return Err(ConfigError::BackToBackMultiplier);
        }
        Ok(())
    }
}

/// Rejected configuration values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    PreviewCount(usize),
    MaxLevel,
    LockDelay,
    BackToBackMultiplier,
}

impl ConfigError {
    pub fn code(self) -> &'static str {
        match self {
            ConfigError::PreviewCount(_) => "invalid_preview",
            ConfigError::MaxLevel | ConfigError::LockDelay => "invalid_timing",
            ConfigError::BackToBackMultiplier => "invalid_scores",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ConfigError::PreviewCount(_) => "preview count must be between 1 and 7",
            ConfigError::MaxLevel => "max level must be at least 1",
            ConfigError::LockDelay => "lock delay must be positive",
            ConfigError::BackToBackMultiplier => "back-to-back multiplier must be a non-negative number",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::PreviewCount(n) => write!(f, "{}: {} (got {})", self.code(), self.message(), n),
            _ => write!(f, "{}: {}", self.code(), self.message()),
        }
    }
}

impl std::error::Error for ConfigError {}
