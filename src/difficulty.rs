//! Difficulty tiers and their balance profiles
//!
//! Each tier trades lives against time and enemy speed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Difficulty tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Built-in balance for this tier
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            // Slower bugs, fewer lives, more time
            Difficulty::Easy => DifficultyProfile::new(*self, 3, 5, 0.6),
            Difficulty::Medium => DifficultyProfile::new(*self, 6, 4, 1.0),
            Difficulty::Hard => DifficultyProfile::new(*self, 10, 3, 1.4),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" | "med" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(GameError::InvalidDifficulty(s.to_string())),
        }
    }
}

/// Lives, duration and enemy speed scaling for one tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub name: Difficulty,
    pub lives: u32,
    pub duration_minutes: u32,
    pub enemy_speed_multiplier: f32,
}

impl DifficultyProfile {
    pub const fn new(
        name: Difficulty,
        lives: u32,
        duration_minutes: u32,
        enemy_speed_multiplier: f32,
    ) -> Self {
        Self {
            name,
            lives,
            duration_minutes,
            enemy_speed_multiplier,
        }
    }

    /// Check the profile can drive a session
    pub fn validate(&self) -> Result<(), GameError> {
        if self.lives == 0 {
            return Err(GameError::InvalidTuning(format!("{}: lives must be > 0", self.name)));
        }
        if self.duration_minutes == 0 {
            return Err(GameError::InvalidTuning(format!(
                "{}: duration must be > 0",
                self.name
            )));
        }
        if !(self.enemy_speed_multiplier > 0.0 && self.enemy_speed_multiplier.is_finite()) {
            return Err(GameError::InvalidTuning(format!(
                "{}: speed multiplier must be positive",
                self.name
            )));
        }
        Ok(())
    }
}

/// Look up the built-in profile for a tier name
pub fn lookup(selector: &str) -> Result<DifficultyProfile, GameError> {
    let tier: Difficulty = selector.parse()?;
    Ok(tier.profile())
}
