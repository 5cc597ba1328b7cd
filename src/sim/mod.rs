//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (roster order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{enemies_hitting, lane_overlap};
pub use state::{
    Avatar, Collectible, CollectibleKind, Direction, Enemy, EnemyParams, EnemySprite, GameEvent,
    GamePhase, GameState, Player, PlayerMove, SessionState,
};
pub use tick::{countdown_tick, tick};
pub use timer::{CancelToken, Interval};
