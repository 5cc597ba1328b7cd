//! HUD notifications
//!
//! The controller reports every change to score, lives, clock and phase here;
//! how (or whether) they are displayed is up to the implementor.

use crate::game::GameSummary;
use crate::sim::{CollectibleKind, GamePhase};

pub trait SessionObserver {
    fn on_score_changed(&mut self, _score: u64) {}
    fn on_lives_changed(&mut self, _lives: u32) {}
    fn on_time_changed(&mut self, _minutes: u32, _seconds: u32) {}
    fn on_phase_changed(&mut self, _phase: GamePhase) {}
    /// A user-facing prompt, e.g. a missing selection
    fn on_prompt(&mut self, _message: &str) {}
    fn on_game_over(&mut self, _summary: &GameSummary) {}
    fn on_player_hit(&mut self) {}
    fn on_collectible_picked(&mut self, _kind: CollectibleKind) {}
    /// Player stepped off the top row and was sent back to spawn
    fn on_reached_goal(&mut self) {}
}

/// Observer that ignores everything (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl SessionObserver for NullObserver {}
