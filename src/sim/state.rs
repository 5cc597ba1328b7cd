//! Game state and core simulation types
//!
//! Everything a session mutates lives in `GameState`. Entities are created once
//! and reset in place; nothing is allocated or dropped mid-session.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::difficulty::{Difficulty, DifficultyProfile};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player to pick an avatar
    SelectingAvatar,
    /// Avatar chosen, waiting for a difficulty
    SelectingDifficulty,
    /// Both selections made, waiting for start
    ReadyToStart,
    /// Active gameplay
    Playing,
    /// Session ended (time up, out of lives or stopped)
    GameOver,
}

/// One grid step requested by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Map a DOM arrow key code
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            37 => Some(Direction::Left),
            38 => Some(Direction::Up),
            39 => Some(Direction::Right),
            40 => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            _ => None,
        }
    }
}

/// Selectable player characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Avatar {
    #[default]
    Boy,
    CatGirl,
    HornGirl,
    PinkGirl,
    Princess,
}

impl Avatar {
    pub const ALL: [Avatar; 5] = [
        Avatar::Boy,
        Avatar::CatGirl,
        Avatar::HornGirl,
        Avatar::PinkGirl,
        Avatar::Princess,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn sprite(&self) -> &'static str {
        match self {
            Avatar::Boy => "images/char-boy.png",
            Avatar::CatGirl => "images/char-cat-girl.png",
            Avatar::HornGirl => "images/char-horn-girl.png",
            Avatar::PinkGirl => "images/char-pink-girl.png",
            Avatar::Princess => "images/char-princess-girl.png",
        }
    }
}

/// Enemy sprite variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemySprite {
    Bug,
}

impl EnemySprite {
    pub const ALL: [EnemySprite; 1] = [EnemySprite::Bug];

    pub fn sprite(&self) -> &'static str {
        match self {
            EnemySprite::Bug => "images/enemy-bug.png",
        }
    }
}

/// Uniform pick from a non-empty constant table
fn pick<T: Copy>(rng: &mut Pcg32, items: &[T]) -> T {
    items[rng.random_range(0..items.len())]
}

/// Speed parameters applied whenever an enemy (re)enters the track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyParams {
    pub min_speed: u32,
    pub max_speed: u32,
    pub speed_multiplier: f32,
}

impl Default for EnemyParams {
    fn default() -> Self {
        Self {
            min_speed: ENEMY_MIN_SPEED,
            max_speed: ENEMY_MAX_SPEED,
            speed_multiplier: DEFAULT_SPEED_MULTIPLIER,
        }
    }
}

/// A bug crossing the track left to right
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    /// Pixels per second, already scaled by the difficulty multiplier
    pub speed: f32,
    pub sprite: EnemySprite,
}

impl Enemy {
    pub fn spawn(rng: &mut Pcg32, params: &EnemyParams) -> Self {
        let mut enemy = Self {
            pos: Vec2::new(ENEMY_TRACK_LEFT, LANES[0]),
            speed: 0.0,
            sprite: EnemySprite::Bug,
        };
        enemy.reset(rng, params);
        enemy
    }

    /// Back to the left edge on a random lane with a fresh speed and sprite
    pub fn reset(&mut self, rng: &mut Pcg32, params: &EnemyParams) {
        self.pos = Vec2::new(ENEMY_TRACK_LEFT, pick(rng, &LANES));
        let base = rng.random_range(params.min_speed..params.max_speed) as f32;
        self.speed = base * params.speed_multiplier;
        self.sprite = pick(rng, &EnemySprite::ALL);
    }

    /// Move along the track; returns true if the enemy wrapped
    pub fn advance(&mut self, dt: f32, rng: &mut Pcg32, params: &EnemyParams) -> bool {
        self.pos.x += self.speed * dt;
        if self.pos.x > ENEMY_TRACK_RIGHT {
            self.reset(rng, params);
            true
        } else {
            false
        }
    }
}

/// Collectible types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollectibleKind {
    /// Tier 1: 5 points
    #[default]
    GreenGem,
    /// Tier 2: 10 points
    BlueGem,
    /// Tier 3: 15 points
    OrangeGem,
    /// Extra life, no points
    Heart,
    /// Extra life and 20 points
    Star,
}

impl CollectibleKind {
    pub const ALL: [CollectibleKind; 5] = [
        CollectibleKind::GreenGem,
        CollectibleKind::BlueGem,
        CollectibleKind::OrangeGem,
        CollectibleKind::Heart,
        CollectibleKind::Star,
    ];

    /// Kinds that only award points
    pub const POINT_TIERS: [CollectibleKind; 3] = [
        CollectibleKind::GreenGem,
        CollectibleKind::BlueGem,
        CollectibleKind::OrangeGem,
    ];

    pub fn points(&self) -> u64 {
        match self {
            CollectibleKind::GreenGem => 5,
            CollectibleKind::BlueGem => 10,
            CollectibleKind::OrangeGem => 15,
            CollectibleKind::Heart => 0,
            CollectibleKind::Star => 20,
        }
    }

    pub fn extra_lives(&self) -> u32 {
        match self {
            CollectibleKind::Heart | CollectibleKind::Star => 1,
            _ => 0,
        }
    }

    pub fn sprite(&self) -> &'static str {
        match self {
            CollectibleKind::GreenGem => "images/gem-green.png",
            CollectibleKind::BlueGem => "images/gem-blue.png",
            CollectibleKind::OrangeGem => "images/gem-orange.png",
            CollectibleKind::Heart => "images/Heart.png",
            CollectibleKind::Star => "images/Star.png",
        }
    }
}

/// The single live collectible
///
/// The point value is derived from the kind, so a respawn changes both at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub pos: Vec2,
    pub kind: CollectibleKind,
}

impl Collectible {
    pub fn spawn(rng: &mut Pcg32) -> Self {
        let mut collectible = Self {
            pos: Vec2::ZERO,
            kind: CollectibleKind::default(),
        };
        collectible.relocate(rng);
        collectible
    }

    pub fn point_value(&self) -> u64 {
        self.kind.points()
    }

    /// Move to a random cell of the spawn grid
    pub fn relocate(&mut self, rng: &mut Pcg32) {
        self.pos = Vec2::new(
            pick(rng, &COLLECTIBLE_COLUMNS),
            pick(rng, &COLLECTIBLE_ROWS),
        );
    }

    /// Draw a new kind from `kinds`
    pub fn reclassify(&mut self, rng: &mut Pcg32, kinds: &[CollectibleKind]) {
        self.kind = pick(rng, kinds);
    }

    /// Pickup respawn: new kind and new cell
    pub fn respawn(&mut self, rng: &mut Pcg32) {
        self.reclassify(rng, &CollectibleKind::ALL);
        self.relocate(rng);
    }
}

/// Outcome of consuming the player's buffered input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerMove {
    /// Nothing buffered, or the move was refused at an edge
    Idle,
    Moved,
    /// Stepped off the top row; player is back at spawn
    ReachedGoal,
    /// Stepped off the bottom row; player is back at spawn
    OutOfBounds,
}

/// The player's avatar on the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Single-slot input buffer; a newer press overwrites an unconsumed one
    pub pending: Option<Direction>,
    pub avatar: Avatar,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Self::spawn_point(),
            pending: None,
            avatar: Avatar::default(),
        }
    }
}

impl Player {
    pub fn spawn_point() -> Vec2 {
        Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y)
    }

    pub fn reset(&mut self) {
        self.pos = Self::spawn_point();
    }

    pub fn handle_input(&mut self, direction: Direction) {
        self.pending = Some(direction);
    }

    /// Consume at most one buffered step and enforce the grid bounds
    pub fn update(&mut self) -> PlayerMove {
        let Some(direction) = self.pending.take() else {
            return PlayerMove::Idle;
        };

        let moved = match direction {
            Direction::Left if self.pos.x > PLAYER_MIN_X => {
                self.pos.x -= COLUMN_STEP;
                true
            }
            Direction::Right if self.pos.x != PLAYER_MAX_X => {
                self.pos.x += COLUMN_STEP;
                true
            }
            Direction::Up => {
                self.pos.y -= ROW_STEP;
                true
            }
            Direction::Down if self.pos.y != PLAYER_DOWN_LIMIT => {
                self.pos.y += ROW_STEP;
                true
            }
            _ => false,
        };

        if self.pos.y < PLAYER_TOP_ROW {
            self.reset();
            PlayerMove::ReachedGoal
        } else if self.pos.y > PLAYER_BOTTOM_ROW {
            self.reset();
            PlayerMove::OutOfBounds
        } else if moved {
            PlayerMove::Moved
        } else {
            PlayerMove::Idle
        }
    }
}

/// Scoreboard and selections for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub lives: u32,
    pub score: u64,
    pub remaining_minutes: u32,
    pub remaining_seconds: u32,
    pub is_running: bool,
    pub avatar: Option<Avatar>,
    pub difficulty: Option<Difficulty>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            lives: DEFAULT_LIVES,
            score: 0,
            remaining_minutes: 0,
            remaining_seconds: 0,
            is_running: false,
            avatar: None,
            difficulty: None,
        }
    }
}

impl SessionState {
    pub fn time_remaining_secs(&self) -> u32 {
        self.remaining_minutes
            .saturating_mul(60)
            .saturating_add(self.remaining_seconds)
    }

    pub fn is_time_up(&self) -> bool {
        self.time_remaining_secs() == 0
    }

    /// Load lives and clock from the selected profile
    pub fn apply_profile(&mut self, profile: &DifficultyProfile) {
        self.lives = profile.lives;
        self.remaining_minutes = profile.duration_minutes;
        self.remaining_seconds = 0;
    }
}

/// Something the HUD or host should hear about
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ScoreChanged(u64),
    LivesChanged(u32),
    TimeChanged { minutes: u32, seconds: u32 },
    PlayerHit,
    CollectiblePicked(CollectibleKind),
    ReachedGoal,
    /// Lives hit zero during a frame
    LivesExhausted,
    /// Countdown reached 0:00
    TimeExpired,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub session: SessionState,
    pub player: Player,
    /// Fixed roster, created at session start
    pub enemies: Vec<Enemy>,
    pub collectible: Collectible,
    pub enemy_params: EnemyParams,
    /// Frames simulated this session
    pub frame_ticks: u64,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let collectible = Collectible::spawn(&mut rng);
        Self {
            seed,
            rng,
            phase: GamePhase::SelectingAvatar,
            session: SessionState::default(),
            player: Player::default(),
            enemies: Vec::new(),
            collectible,
            enemy_params: EnemyParams::default(),
            frame_ticks: 0,
        }
    }

    /// Build the roster and place the first collectible for a new session
    pub fn populate(&mut self, enemy_count: usize, params: EnemyParams) {
        self.enemy_params = params;
        self.enemies.clear();
        for _ in 0..enemy_count {
            let enemy = Enemy::spawn(&mut self.rng, &self.enemy_params);
            self.enemies.push(enemy);
        }
        // Opening collectible is always a plain gem
        self.collectible
            .reclassify(&mut self.rng, &CollectibleKind::POINT_TIERS);
        self.collectible.relocate(&mut self.rng);
        self.player.reset();
        self.player.pending = None;
        self.frame_ticks = 0;
    }
}
