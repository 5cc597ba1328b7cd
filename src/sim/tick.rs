//! Frame and countdown ticks
//!
//! `tick` advances one animation frame: entities move, then overlaps are
//! resolved against the session. `countdown_tick` advances the clock by one
//! second. Neither changes the phase; they report what happened through
//! `GameEvent`s and the controller decides the transition.

use glam::Vec2;

use super::collision::{enemies_hitting, lane_overlap};
use super::state::{GameEvent, GamePhase, GameState, PlayerMove, SessionState};

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, dt: f32, hit_tolerance: f32, events: &mut Vec<GameEvent>) {
    // Frozen outside active play
    if state.phase != GamePhase::Playing || !state.session.is_running {
        return;
    }

    state.frame_ticks += 1;
    let dt = dt.max(0.0);

    // Positions first
    for enemy in &mut state.enemies {
        enemy.advance(dt, &mut state.rng, &state.enemy_params);
    }

    match state.player.update() {
        PlayerMove::ReachedGoal => {
            log::debug!("Player reached the far side");
            events.push(GameEvent::ReachedGoal);
        }
        PlayerMove::OutOfBounds => log::debug!("Player stepped off the grid, back to spawn"),
        PlayerMove::Moved | PlayerMove::Idle => {}
    }

    if resolve_enemy_hits(state, hit_tolerance, events) {
        return;
    }
    resolve_pickup(state, hit_tolerance, events);
}

/// Every enemy overlapping the player costs a life. Returns true when lives ran out.
fn resolve_enemy_hits(
    state: &mut GameState,
    hit_tolerance: f32,
    events: &mut Vec<GameEvent>,
) -> bool {
    let positions: Vec<Vec2> = state.enemies.iter().map(|e| e.pos).collect();
    let hits = enemies_hitting(state.player.pos, &positions, hit_tolerance);
    if hits.is_empty() {
        return false;
    }

    for index in hits {
        if state.session.lives == 0 {
            break;
        }
        state.session.lives -= 1;
        log::debug!(
            "Enemy {} hit player at ({}, {}), {} lives left",
            index,
            state.player.pos.x,
            state.player.pos.y,
            state.session.lives
        );
        events.push(GameEvent::PlayerHit);
        events.push(GameEvent::LivesChanged(state.session.lives));
    }

    if state.session.lives == 0 {
        events.push(GameEvent::LivesExhausted);
        return true;
    }
    state.player.reset();
    false
}

fn resolve_pickup(state: &mut GameState, hit_tolerance: f32, events: &mut Vec<GameEvent>) {
    if !lane_overlap(state.player.pos, state.collectible.pos, hit_tolerance) {
        return;
    }

    let kind = state.collectible.kind;
    log::debug!(
        "Picked up {:?} at ({}, {})",
        kind,
        state.collectible.pos.x,
        state.collectible.pos.y
    );

    let extra_lives = kind.extra_lives();
    if extra_lives > 0 {
        state.session.lives += extra_lives;
        events.push(GameEvent::LivesChanged(state.session.lives));
    }
    let points = kind.points();
    if points > 0 {
        state.session.score += points;
        events.push(GameEvent::ScoreChanged(state.session.score));
    }
    events.push(GameEvent::CollectiblePicked(kind));

    state.collectible.respawn(&mut state.rng);
    state.player.reset();
}

/// Advance the clock by one second. Returns true when it reaches 0:00.
pub fn countdown_tick(session: &mut SessionState, events: &mut Vec<GameEvent>) -> bool {
    if !session.is_running || session.is_time_up() {
        return false;
    }

    if session.remaining_seconds == 0 {
        session.remaining_minutes -= 1;
        session.remaining_seconds = 59;
    } else {
        session.remaining_seconds -= 1;
    }
    events.push(GameEvent::TimeChanged {
        minutes: session.remaining_minutes,
        seconds: session.remaining_seconds,
    });

    if session.is_time_up() {
        events.push(GameEvent::TimeExpired);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{CollectibleKind, Direction, EnemyParams, Player};
    use proptest::prelude::*;

    fn playing_state(seed: u64, lives: u32) -> GameState {
        let mut state = GameState::new(seed);
        state.populate(ENEMY_COUNT, EnemyParams::default());
        state.phase = GamePhase::Playing;
        state.session.lives = lives;
        state.session.remaining_minutes = 5;
        state.session.is_running = true;
        // Park everything away from the player
        for enemy in &mut state.enemies {
            enemy.pos = Vec2::new(ENEMY_TRACK_LEFT, LANES[0]);
            enemy.speed = 0.0;
        }
        state.collectible.pos = Vec2::new(0.0, LANES[2]);
        state
    }

    #[test]
    fn test_enemy_collision_costs_one_life_and_resets_player() {
        let mut state = playing_state(1, 3);
        state.enemies[0].pos = Vec2::new(195.0, 380.0);

        let mut events = Vec::new();
        tick(&mut state, 0.0, HIT_TOLERANCE, &mut events);

        assert_eq!(state.session.lives, 2);
        assert_eq!(state.player.pos, Vec2::new(200.0, 380.0));
        assert!(events.contains(&GameEvent::LivesChanged(2)));
        assert!(!events.contains(&GameEvent::LivesExhausted));
    }

    #[test]
    fn test_simultaneous_hits_each_cost_a_life() {
        let mut state = playing_state(2, 5);
        state.player.pos = Vec2::new(100.0, 140.0);
        state.enemies[0].pos = Vec2::new(90.0, 140.0);
        state.enemies[1].pos = Vec2::new(120.0, 140.0);
        state.enemies[2].pos = Vec2::new(100.0, 220.0);

        let mut events = Vec::new();
        tick(&mut state, 0.0, HIT_TOLERANCE, &mut events);
        assert_eq!(state.session.lives, 3);
        assert_eq!(state.player.pos, Player::spawn_point());
    }

    #[test]
    fn test_hits_never_underflow_lives() {
        let mut state = playing_state(3, 2);
        state.player.pos = Vec2::new(100.0, 140.0);
        for enemy in &mut state.enemies {
            enemy.pos = Vec2::new(100.0, 140.0);
        }

        let mut events = Vec::new();
        tick(&mut state, 0.0, HIT_TOLERANCE, &mut events);
        assert_eq!(state.session.lives, 0);
        let exhausted = events
            .iter()
            .filter(|e| **e == GameEvent::LivesExhausted)
            .count();
        assert_eq!(exhausted, 1);
    }

    #[test]
    fn test_tier_two_pickup() {
        let mut state = playing_state(4, 3);
        state.player.pos = Vec2::new(300.0, 140.0);
        state.collectible.pos = Vec2::new(300.0, 140.0);
        state.collectible.kind = CollectibleKind::BlueGem;

        let mut events = Vec::new();
        tick(&mut state, 0.0, HIT_TOLERANCE, &mut events);

        assert_eq!(state.session.score, 10);
        assert_eq!(state.session.lives, 3);
        assert_eq!(state.player.pos, Player::spawn_point());
        assert!(COLLECTIBLE_COLUMNS.contains(&state.collectible.pos.x));
        assert!(COLLECTIBLE_ROWS.contains(&state.collectible.pos.y));
        assert!(!lane_overlap(state.player.pos, state.collectible.pos, HIT_TOLERANCE));
        assert!(events.contains(&GameEvent::CollectiblePicked(CollectibleKind::BlueGem)));
    }

    #[test]
    fn test_heart_and_star_pickups() {
        let mut state = playing_state(5, 3);
        state.player.pos = Vec2::new(0.0, 60.0);
        state.collectible.pos = Vec2::new(0.0, 60.0);
        state.collectible.kind = CollectibleKind::Heart;
        let mut events = Vec::new();
        tick(&mut state, 0.0, HIT_TOLERANCE, &mut events);
        assert_eq!((state.session.lives, state.session.score), (4, 0));

        state.player.pos = Vec2::new(0.0, 60.0);
        state.collectible.pos = Vec2::new(0.0, 60.0);
        state.collectible.kind = CollectibleKind::Star;
        tick(&mut state, 0.0, HIT_TOLERANCE, &mut events);
        assert_eq!((state.session.lives, state.session.score), (5, 20));
    }

    #[test]
    fn test_player_walks_into_collectible() {
        let mut state = playing_state(6, 3);
        state.player.pos = Vec2::new(200.0, 140.0);
        state.collectible.pos = Vec2::new(200.0, 60.0);
        state.collectible.kind = CollectibleKind::GreenGem;
        state.player.handle_input(Direction::Up);

        let mut events = Vec::new();
        tick(&mut state, 1.0 / 60.0, HIT_TOLERANCE, &mut events);
        assert_eq!(state.session.score, 5);
        assert_eq!(state.player.pos, Player::spawn_point());
    }

    #[test]
    fn test_stepping_off_top_row_reports_goal() {
        let mut state = playing_state(8, 3);
        state.player.pos = Vec2::new(300.0, PLAYER_TOP_ROW);
        state.player.handle_input(Direction::Up);

        let mut events = Vec::new();
        tick(&mut state, 0.0, HIT_TOLERANCE, &mut events);
        assert_eq!(events, vec![GameEvent::ReachedGoal]);
        assert_eq!(state.player.pos, Player::spawn_point());
        assert_eq!((state.session.lives, state.session.score), (3, 0));

        // Stepping off the bottom is not a goal
        state.player.handle_input(Direction::Down);
        events.clear();
        tick(&mut state, 0.0, HIT_TOLERANCE, &mut events);
        assert!(events.is_empty());
        assert_eq!(state.player.pos, Player::spawn_point());
    }

    #[test]
    fn test_frozen_outside_playing() {
        let mut state = playing_state(7, 3);
        state.phase = GamePhase::GameOver;
        let before = state.enemies.clone();
        state.enemies[0].speed = 300.0;
        let mut events = Vec::new();
        tick(&mut state, 1.0, HIT_TOLERANCE, &mut events);
        assert_eq!(state.enemies[1..], before[1..]);
        assert_eq!(state.enemies[0].pos, before[0].pos);
        assert_eq!(state.frame_ticks, 0);
    }

    #[test]
    fn test_countdown_rolls_minutes() {
        let mut session = SessionState {
            remaining_minutes: 1,
            remaining_seconds: 0,
            is_running: true,
            ..Default::default()
        };
        let mut events = Vec::new();
        assert!(!countdown_tick(&mut session, &mut events));
        assert_eq!((session.remaining_minutes, session.remaining_seconds), (0, 59));

        for _ in 0..58 {
            assert!(!countdown_tick(&mut session, &mut events));
        }
        assert!(countdown_tick(&mut session, &mut events));
        assert!(session.is_time_up());
        // Further ticks do nothing
        assert!(!countdown_tick(&mut session, &mut events));
        assert_eq!(
            events.iter().filter(|e| **e == GameEvent::TimeExpired).count(),
            1
        );
    }

    #[test]
    fn test_countdown_gated_on_running_flag() {
        let mut session = SessionState {
            remaining_minutes: 2,
            ..Default::default()
        };
        let mut events = Vec::new();
        assert!(!countdown_tick(&mut session, &mut events));
        assert_eq!(session.remaining_minutes, 2);
        assert!(events.is_empty());
    }

    fn direction() -> impl Strategy<Value = Option<Direction>> {
        prop_oneof![
            Just(None),
            Just(Some(Direction::Left)),
            Just(Some(Direction::Right)),
            Just(Some(Direction::Up)),
            Just(Some(Direction::Down)),
        ]
    }

    proptest! {
        #[test]
        fn prop_entities_stay_in_bounds(
            seed in any::<u64>(),
            frames in proptest::collection::vec((0.0f32..0.1, direction()), 1..400),
        ) {
            let mut state = GameState::new(seed);
            let params = EnemyParams {
                speed_multiplier: 1.4,
                ..Default::default()
            };
            state.populate(ENEMY_COUNT, params);
            state.phase = GamePhase::Playing;
            state.session.lives = 1000;
            state.session.remaining_minutes = 5;
            state.session.is_running = true;

            let mut events = Vec::new();
            for (dt, input) in frames {
                if let Some(direction) = input {
                    state.player.handle_input(direction);
                }
                tick(&mut state, dt, HIT_TOLERANCE, &mut events);

                prop_assert_eq!(state.enemies.len(), ENEMY_COUNT);
                for enemy in &state.enemies {
                    prop_assert!(enemy.speed >= 0.0);
                    prop_assert!(LANES.contains(&enemy.pos.y));
                    prop_assert!(
                        enemy.pos.x >= ENEMY_TRACK_LEFT && enemy.pos.x <= ENEMY_TRACK_RIGHT
                    );
                }

                let c = &state.collectible;
                prop_assert!(CollectibleKind::ALL.contains(&c.kind));
                prop_assert_eq!(c.point_value(), c.kind.points());

                let p = state.player.pos;
                prop_assert!(p.x >= PLAYER_MIN_X && p.x <= PLAYER_MAX_X);
                prop_assert!(p.y >= PLAYER_TOP_ROW && p.y <= PLAYER_BOTTOM_ROW);
            }
        }

        #[test]
        fn prop_lives_never_underflow(seed in any::<u64>(), lives in 1u32..4) {
            let mut state = playing_state(seed, lives);
            let mut events = Vec::new();
            for _ in 0..10 {
                if state.session.lives == 0 {
                    break;
                }
                state.player.pos = Vec2::new(200.0, 140.0);
                for enemy in &mut state.enemies {
                    enemy.pos = Vec2::new(200.0, 140.0);
                }
                tick(&mut state, 0.0, HIT_TOLERANCE, &mut events);
            }
            prop_assert_eq!(state.session.lives, 0);
            prop_assert_eq!(
                events.iter().filter(|e| **e == GameEvent::LivesExhausted).count(),
                1
            );
        }
    }
}
