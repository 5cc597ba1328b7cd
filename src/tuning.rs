//! Data-driven game balance
//!
//! Defaults reproduce the classic balance. A JSON document can override any
//! subset of fields; missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::difficulty::{Difficulty, DifficultyProfile};
use crate::error::GameError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// One profile per tier
    pub difficulties: Vec<DifficultyProfile>,
    /// Number of enemies on the track
    pub enemy_count: usize,
    /// Enemy base speed range in pixels/second (max exclusive), before the tier multiplier
    pub enemy_min_speed: u32,
    pub enemy_max_speed: u32,
    /// Horizontal half-width of the hit band
    pub hit_tolerance: f32,
    /// Countdown period in milliseconds
    pub countdown_period_ms: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            difficulties: Difficulty::ALL.iter().map(Difficulty::profile).collect(),
            enemy_count: ENEMY_COUNT,
            enemy_min_speed: ENEMY_MIN_SPEED,
            enemy_max_speed: ENEMY_MAX_SPEED,
            hit_tolerance: HIT_TOLERANCE,
            countdown_period_ms: COUNTDOWN_PERIOD_MS,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!(
            "Loaded tuning: {} enemies, speed {}..{}",
            tuning.enemy_count,
            tuning.enemy_min_speed,
            tuning.enemy_max_speed
        );
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        for tier in Difficulty::ALL {
            self.profile(tier)?.validate()?;
        }
        if self.enemy_count == 0 {
            return Err(GameError::InvalidTuning("enemy_count must be > 0".into()));
        }
        if self.enemy_min_speed >= self.enemy_max_speed {
            return Err(GameError::InvalidTuning(format!(
                "enemy speed range {}..{} is empty",
                self.enemy_min_speed, self.enemy_max_speed
            )));
        }
        if !(self.hit_tolerance >= 0.0 && self.hit_tolerance.is_finite()) {
            return Err(GameError::InvalidTuning("hit_tolerance must be >= 0".into()));
        }
        if self.countdown_period_ms == 0 {
            return Err(GameError::InvalidTuning(
                "countdown_period_ms must be > 0".into(),
            ));
        }
        Ok(())
    }

    /// Profile for a tier
    pub fn profile(&self, tier: Difficulty) -> Result<DifficultyProfile, GameError> {
        self.difficulties
            .iter()
            .find(|p| p.name == tier)
            .copied()
            .ok_or_else(|| GameError::InvalidDifficulty(tier.as_str().to_string()))
    }

    /// Profile for a tier name
    pub fn lookup(&self, selector: &str) -> Result<DifficultyProfile, GameError> {
        self.profile(selector.parse()?)
    }
}
