//! Phase controller and session lifecycle
//!
//! `Game` owns the simulation state and walks it through
//! `SelectingAvatar → SelectingDifficulty → ReadyToStart → Playing → GameOver`.
//! The host drives two independent callbacks on one thread: `frame(dt)` every
//! animation frame and `advance_clock(dt)` for the countdown. Lives running out
//! is detected only on the frame path; time running out only on the clock path.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_LIVES, DEFAULT_SPEED_MULTIPLIER};
use crate::difficulty::{Difficulty, DifficultyProfile};
use crate::error::{GameError, Selection};
use crate::observer::{NullObserver, SessionObserver};
use crate::render::{Canvas, SpriteResolver, render_frame};
use crate::sim::{
    Avatar, CancelToken, CollectibleKind, Direction, EnemyParams, GameEvent, GamePhase, GameState,
    Interval, SessionState, countdown_tick, tick,
};
use crate::tuning::Tuning;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    TimeUp,
    OutOfLives,
    Stopped,
}

/// Final numbers of a finished session, kept for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub score: u64,
    /// Lives left at the moment the session ended
    pub lives: u32,
    pub difficulty: Option<Difficulty>,
    pub reason: EndReason,
    pub frames: u64,
}

pub struct Game<O: SessionObserver = NullObserver> {
    state: GameState,
    tuning: Tuning,
    observer: O,
    countdown: Option<Interval>,
    events: Vec<GameEvent>,
    summary: Option<GameSummary>,
}

impl Game<NullObserver> {
    /// Headless game with the default balance
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default(), NullObserver)
    }
}

impl<O: SessionObserver> Game<O> {
    /// Game with a custom balance; the tuning is validated up front
    pub fn with_observer(seed: u64, tuning: Tuning, observer: O) -> Result<Self, GameError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning, observer))
    }

    fn build(seed: u64, tuning: Tuning, observer: O) -> Self {
        Self {
            state: GameState::new(seed),
            tuning,
            observer,
            countdown: None,
            events: Vec::new(),
            summary: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn session(&self) -> &SessionState {
        &self.state.session
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Summary of the most recently finished session
    pub fn summary(&self) -> Option<&GameSummary> {
        self.summary.as_ref()
    }

    /// Cancellation token of the running countdown
    pub fn countdown_token(&self) -> Option<CancelToken> {
        self.countdown.as_ref().map(|i| i.token().clone())
    }

    pub fn select_avatar(&mut self, index: usize) -> Result<Avatar, GameError> {
        self.ensure_selectable()?;
        let avatar = Avatar::from_index(index).ok_or(GameError::InvalidAvatar(index))?;

        self.state.session.avatar = Some(avatar);
        self.state.player.avatar = avatar;
        log::info!("Avatar selected: {:?}", avatar);

        let next = if self.state.session.difficulty.is_some() {
            GamePhase::ReadyToStart
        } else {
            GamePhase::SelectingDifficulty
        };
        self.set_phase(next);
        Ok(avatar)
    }

    pub fn select_difficulty(&mut self, tier: &str) -> Result<DifficultyProfile, GameError> {
        let tier: Difficulty = tier.parse()?;
        self.select_tier(tier)
    }

    pub fn select_tier(&mut self, tier: Difficulty) -> Result<DifficultyProfile, GameError> {
        self.ensure_selectable()?;
        let profile = self.tuning.profile(tier)?;

        self.state.session.difficulty = Some(tier);
        self.state.session.apply_profile(&profile);
        self.state.enemy_params.speed_multiplier = profile.enemy_speed_multiplier;
        log::info!(
            "Difficulty selected: {} ({} lives, {} min, x{})",
            tier,
            profile.lives,
            profile.duration_minutes,
            profile.enemy_speed_multiplier
        );

        if self.state.session.avatar.is_some() {
            self.set_phase(GamePhase::ReadyToStart);
        }
        Ok(profile)
    }

    /// Begin play. Fails with a prompt if a selection is missing.
    pub fn start(&mut self) -> Result<(), GameError> {
        match self.state.phase {
            GamePhase::Playing => return Err(GameError::SessionActive),
            GamePhase::GameOver => self.new_session(),
            _ => {}
        }

        let session = &self.state.session;
        let (avatar, tier) = match (session.avatar, session.difficulty) {
            (Some(avatar), Some(tier)) => (avatar, tier),
            (None, _) => return Err(self.reject_start(Selection::Avatar)),
            (Some(_), None) => return Err(self.reject_start(Selection::Difficulty)),
        };
        let profile = self.tuning.profile(tier)?;

        self.state.session.apply_profile(&profile);
        self.state.player.avatar = avatar;
        self.state.populate(
            self.tuning.enemy_count,
            EnemyParams {
                min_speed: self.tuning.enemy_min_speed,
                max_speed: self.tuning.enemy_max_speed,
                speed_multiplier: profile.enemy_speed_multiplier,
            },
        );
        self.state.session.is_running = true;
        self.countdown = Some(Interval::every(
            self.tuning.countdown_period_ms,
            CancelToken::new(),
        ));
        self.events.clear();

        log::info!(
            "Session started: {:?} on {} (seed {})",
            avatar,
            tier,
            self.state.seed
        );
        self.set_phase(GamePhase::Playing);

        let session = &self.state.session;
        self.observer.on_lives_changed(session.lives);
        self.observer.on_score_changed(session.score);
        self.observer
            .on_time_changed(session.remaining_minutes, session.remaining_seconds);
        Ok(())
    }

    /// End the running session early
    pub fn stop(&mut self) {
        if self.state.phase == GamePhase::Playing {
            self.finish(EndReason::Stopped);
        } else {
            log::debug!("stop() ignored in {:?}", self.state.phase);
        }
    }

    /// Clear selections and score and return to avatar selection
    pub fn new_session(&mut self) {
        if self.state.phase == GamePhase::Playing {
            self.finish(EndReason::Stopped);
        }
        self.state.session = SessionState::default();
        self.state.player.reset();
        self.state.player.pending = None;
        self.state.player.avatar = Avatar::default();
        self.set_phase(GamePhase::SelectingAvatar);
        self.observer.on_score_changed(0);
    }

    /// Buffer a move for the next frame; ignored unless playing
    pub fn handle_input(&mut self, direction: Direction) {
        if self.state.phase != GamePhase::Playing {
            log::debug!("Input {:?} ignored in {:?}", direction, self.state.phase);
            return;
        }
        self.state.player.handle_input(direction);
    }

    pub fn handle_key_code(&mut self, code: u32) {
        if let Some(direction) = Direction::from_key_code(code) {
            self.handle_input(direction);
        }
    }

    /// Animation-frame callback
    pub fn frame(&mut self, dt: f32) {
        tick(&mut self.state, dt, self.tuning.hit_tolerance, &mut self.events);
        if self.dispatch_events() {
            self.finish(EndReason::OutOfLives);
        }
    }

    /// Clock callback: fires the countdown for every period that came due
    pub fn advance_clock(&mut self, dt: f32) {
        let due = match self.countdown.as_mut() {
            Some(interval) => interval.advance(dt),
            None => 0,
        };
        for _ in 0..due {
            if !self.on_countdown_tick() {
                break;
            }
        }
    }

    /// Frame then clock, for hosts with a single callback
    pub fn update(&mut self, dt: f32) {
        self.frame(dt);
        self.advance_clock(dt);
    }

    /// One countdown period elapsed. Returns false once the session is over.
    pub fn on_countdown_tick(&mut self) -> bool {
        if self.state.phase != GamePhase::Playing || !self.state.session.is_running {
            return false;
        }
        let expired = countdown_tick(&mut self.state.session, &mut self.events);
        self.dispatch_events();
        if expired {
            self.finish(EndReason::TimeUp);
            return false;
        }
        true
    }

    /// Draw the current frame; nothing is drawn outside active play
    pub fn render<R, C>(&self, resources: &R, canvas: &mut C) -> usize
    where
        R: SpriteResolver,
        C: Canvas<R::Handle>,
    {
        if self.state.phase != GamePhase::Playing {
            return 0;
        }
        render_frame(&self.state, resources, canvas)
    }

    fn ensure_selectable(&mut self) -> Result<(), GameError> {
        match self.state.phase {
            GamePhase::Playing => {
                log::warn!("Selection rejected: session in progress");
                Err(GameError::SessionActive)
            }
            GamePhase::GameOver => {
                self.new_session();
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn reject_start(&mut self, missing: Selection) -> GameError {
        log::warn!("Start rejected: no {} selected", missing);
        self.observer.on_prompt(missing.prompt());
        GameError::IncompleteSelection { missing }
    }

    /// Forward queued events to the observer. Returns true if lives ran out.
    fn dispatch_events(&mut self) -> bool {
        let mut exhausted = false;
        let mut events = std::mem::take(&mut self.events);
        for event in events.drain(..) {
            match event {
                GameEvent::ScoreChanged(score) => self.observer.on_score_changed(score),
                GameEvent::LivesChanged(lives) => self.observer.on_lives_changed(lives),
                GameEvent::TimeChanged { minutes, seconds } => {
                    self.observer.on_time_changed(minutes, seconds)
                }
                GameEvent::PlayerHit => self.observer.on_player_hit(),
                GameEvent::CollectiblePicked(kind) => self.observer.on_collectible_picked(kind),
                GameEvent::ReachedGoal => self.observer.on_reached_goal(),
                GameEvent::LivesExhausted => exhausted = true,
                GameEvent::TimeExpired => {}
            }
        }
        self.events = events;
        exhausted
    }

    /// Transition to `GameOver`; no-op unless playing
    fn finish(&mut self, reason: EndReason) {
        if self.state.phase != GamePhase::Playing {
            return;
        }

        let session = &mut self.state.session;
        let summary = GameSummary {
            score: session.score,
            lives: session.lives,
            difficulty: session.difficulty,
            reason,
            frames: self.state.frame_ticks,
        };

        session.is_running = false;
        if let Some(interval) = self.countdown.take() {
            interval.token().cancel();
        }

        // Transient fields go back to defaults; score stays for display
        session.lives = DEFAULT_LIVES;
        self.state.enemy_params.speed_multiplier = DEFAULT_SPEED_MULTIPLIER;
        self.state.collectible.kind = CollectibleKind::default();
        self.state.player.pending = None;

        log::info!(
            "Game over ({:?}): score {}, {} lives left",
            reason,
            summary.score,
            summary.lives
        );
        self.set_phase(GamePhase::GameOver);
        self.observer.on_game_over(&summary);
        self.summary = Some(summary);
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.state.phase == phase {
            return;
        }
        log::info!("Phase: {:?} -> {:?}", self.state.phase, phase);
        self.state.phase = phase;
        self.observer.on_phase_changed(phase);
    }
}
