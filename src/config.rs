//! Practice configuration (pure Rust, with an environment overlay for the CLIs).

use std::env;
use std::time::Duration;

/// Persistence key for the set of beaten puzzles.
pub const DEFAULT_PROGRESS_KEY: &str = "checkmatePracticeBeaten";

/// Beaten-puzzle progress is kept for one year after the last save.
pub const PROGRESS_EXPIRY: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// Time the practice engine may think per move.
pub const DEFAULT_ENGINE_MOVE_TIME: Duration = Duration::from_millis(500);

/// Retry budget for rejection sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerLimits {
    /// Candidate draws allowed for a single piece before giving up.
    pub max_attempts_per_piece: u64,
}

impl Default for SamplerLimits {
    fn default() -> Self {
        Self {
            max_attempts_per_piece: 1_000_000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PracticeConfig {
    pub engine_move_time: Duration,
    pub progress_key: String,
    pub progress_expiry: Duration,
    pub limits: SamplerLimits,
    /// Fixed RNG seed; `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            engine_move_time: DEFAULT_ENGINE_MOVE_TIME,
            progress_key: DEFAULT_PROGRESS_KEY.to_string(),
            progress_expiry: PROGRESS_EXPIRY,
            limits: SamplerLimits::default(),
            seed: None,
        }
    }
}

impl PracticeConfig {
    /// Defaults overlaid with `CHECKMATE_PRACTICE_SEED`, `CHECKMATE_PRACTICE_MAX_ATTEMPTS` and
    /// `CHECKMATE_PRACTICE_MOVE_TIME_MS`. Unset or unparseable variables keep the default.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Some(seed) = env::var("CHECKMATE_PRACTICE_SEED")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            cfg.seed = Some(seed);
        }

        if let Some(max) = env::var("CHECKMATE_PRACTICE_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            cfg.limits.max_attempts_per_piece = max;
        }

        if let Some(ms) = env::var("CHECKMATE_PRACTICE_MOVE_TIME_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            cfg.engine_move_time = Duration::from_millis(ms);
        }

        cfg
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_limits(mut self, limits: SamplerLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_engine_move_time(mut self, t: Duration) -> Self {
        self.engine_move_time = t;
        self
    }

    pub fn with_progress_key(mut self, key: impl Into<String>) -> Self {
        self.progress_key = key.into();
        self
    }
}
