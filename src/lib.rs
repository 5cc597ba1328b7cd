//! Bug Crossing - A lane-crossing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, countdown, session state)
//! - `game`: Phase controller and session lifecycle API
//! - `render`: Renderer and sprite lookup collaborators
//! - `observer`: HUD notifications (score, lives, time, prompts)
//! - `difficulty` / `tuning`: Data-driven game balance

pub mod difficulty;
pub mod error;
pub mod game;
pub mod observer;
pub mod render;
pub mod sim;
pub mod tuning;

pub use difficulty::{Difficulty, DifficultyProfile};
pub use error::{GameError, Selection};
pub use game::{EndReason, Game, GameSummary};
pub use observer::{NullObserver, SessionObserver};
pub use render::{Canvas, SpriteResolver};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Rows enemies and collectibles can occupy (top to bottom)
    pub const LANES: [f32; 3] = [60.0, 140.0, 220.0];

    /// Enemy track: enemies enter at the left bound and wrap past the right bound
    pub const ENEMY_TRACK_LEFT: f32 = -150.0;
    pub const ENEMY_TRACK_RIGHT: f32 = 600.0;

    /// Collectible spawn grid
    pub const COLLECTIBLE_COLUMNS: [f32; 5] = [0.0, 100.0, 200.0, 300.0, 400.0];
    pub const COLLECTIBLE_ROWS: [f32; 3] = LANES;

    /// Player spawn point (bottom row, middle column)
    pub const PLAYER_SPAWN_X: f32 = 200.0;
    pub const PLAYER_SPAWN_Y: f32 = 380.0;

    /// One keypress moves the player one cell
    pub const COLUMN_STEP: f32 = 100.0;
    pub const ROW_STEP: f32 = 80.0;

    /// Player grid limits
    pub const PLAYER_MIN_X: f32 = 0.0;
    pub const PLAYER_MAX_X: f32 = 400.0;
    pub const PLAYER_TOP_ROW: f32 = 60.0;
    pub const PLAYER_BOTTOM_ROW: f32 = 380.0;
    /// Down moves are refused from this row (never reached on the 80px grid)
    pub const PLAYER_DOWN_LIMIT: f32 = 400.0;

    /// Horizontal half-width of the hit band
    pub const HIT_TOLERANCE: f32 = 30.0;

    /// Lives restored between sessions
    pub const DEFAULT_LIVES: u32 = 3;
    /// Speed multiplier restored between sessions
    pub const DEFAULT_SPEED_MULTIPLIER: f32 = 1.0;

    /// Enemy roster size
    pub const ENEMY_COUNT: usize = 5;
    /// Enemy speed range in pixels/second, max exclusive
    pub const ENEMY_MIN_SPEED: u32 = 150;
    pub const ENEMY_MAX_SPEED: u32 = 600;

    /// Countdown period (one second per tick)
    pub const COUNTDOWN_PERIOD_MS: u32 = 1000;
    /// Maximum countdown periods fired per clock advance (drops the backlog after a long stall)
    pub const MAX_CATCHUP_TICKS: u32 = 60;
}
