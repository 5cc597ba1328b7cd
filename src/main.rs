//! Bug Crossing headless driver
//!
//! Plays one session at a fixed 60 Hz with a random-input bot and logs what
//! happens. Usage: `bug-crossing [easy|medium|hard] [seed]`.
//! Set `BUG_CROSSING_TUNING` to a JSON file to override the balance.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use bug_crossing::sim::{Direction, GamePhase};
    use bug_crossing::{
        Canvas, Game, GameError, GameSummary, SessionObserver, SpriteResolver, Tuning,
    };

    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Bot presses a key about every 12 frames
    const INPUT_CHANCE: f64 = 1.0 / 12.0;

    /// Accepts any sprite under `images/`
    struct ImageDir;

    impl SpriteResolver for ImageDir {
        type Handle = &'static str;

        fn resolve(&self, sprite: &str) -> Result<&'static str, GameError> {
            match sprite.strip_prefix("images/") {
                Some(_) => Ok("image"),
                None => Err(GameError::ResourceMissing(sprite.to_string())),
            }
        }
    }

    #[derive(Default)]
    struct CountingCanvas {
        draws: u64,
    }

    impl Canvas<&'static str> for CountingCanvas {
        fn draw(&mut self, _handle: &&'static str, x: f32, y: f32) {
            log::trace!("draw at ({}, {})", x, y);
            self.draws += 1;
        }
    }

    struct LogHud;

    impl SessionObserver for LogHud {
        fn on_score_changed(&mut self, score: u64) {
            log::info!("Points: {}", score);
        }
        fn on_lives_changed(&mut self, lives: u32) {
            log::info!("Lives: {}", lives);
        }
        fn on_time_changed(&mut self, minutes: u32, seconds: u32) {
            if seconds == 0 || (minutes == 0 && seconds <= 10) {
                log::info!("Timer: {}:{:02}", minutes, seconds);
            }
        }
        fn on_phase_changed(&mut self, phase: GamePhase) {
            log::debug!("HUD phase: {:?}", phase);
        }
        fn on_prompt(&mut self, message: &str) {
            log::warn!("{}", message);
        }
        fn on_game_over(&mut self, summary: &GameSummary) {
            log::info!("Game over: {} points ({:?})", summary.score, summary.reason);
        }
    }

    fn load_tuning() -> Result<Tuning, Box<dyn std::error::Error>> {
        match std::env::var("BUG_CROSSING_TUNING") {
            Ok(path) => Ok(Tuning::from_json(&std::fs::read_to_string(path)?)?),
            Err(_) => Ok(Tuning::default()),
        }
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let mut args = std::env::args().skip(1);
        let tier = args.next().unwrap_or_else(|| "medium".to_string());
        let seed = match args.next() {
            Some(s) => s.parse::<u64>()?,
            None => 1,
        };

        let tuning = load_tuning()?;
        let mut game = Game::with_observer(seed, tuning, LogHud)?;
        let mut bot = Pcg32::seed_from_u64(seed ^ 0x5eed);

        game.select_avatar(bot.random_range(0..5))?;
        let profile = game.select_difficulty(&tier)?;
        game.start()?;

        let directions = [
            Direction::Up,
            Direction::Up,
            Direction::Left,
            Direction::Right,
            Direction::Down,
        ];
        let max_frames = (profile.duration_minutes as u64 * 60 + 1) * 60;
        let mut canvas = CountingCanvas::default();

        for _ in 0..max_frames {
            if game.phase() != GamePhase::Playing {
                break;
            }
            if bot.random_bool(INPUT_CHANCE) {
                game.handle_input(directions[bot.random_range(0..directions.len())]);
            }
            game.frame(FRAME_DT);
            game.render(&ImageDir, &mut canvas);
            game.advance_clock(FRAME_DT);
        }

        if let Some(summary) = game.summary() {
            println!(
                "{} | score {} | lives left {} | {:?} after {} frames ({} draws)",
                tier, summary.score, summary.lives, summary.reason, summary.frames, canvas.draws
            );
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bug Crossing (headless) starting...");
    if let Err(e) = headless::run() {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
