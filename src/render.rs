//! Drawing collaborators
//!
//! The core never touches pixels. Each frame it resolves a sprite id to a
//! host handle and asks the canvas to draw it at an entity position.

use crate::error::GameError;
use crate::sim::GameState;

/// Sprite lookup (image cache, texture atlas, ...)
pub trait SpriteResolver {
    type Handle;

    fn resolve(&self, sprite: &str) -> Result<Self::Handle, GameError>;
}

/// Draw target
pub trait Canvas<H> {
    fn draw(&mut self, handle: &H, x: f32, y: f32);
}

/// Draw the collectible, every enemy, then the player.
///
/// A sprite that fails to resolve is logged and skipped; the rest of the frame
/// still draws. Returns the number of draws issued.
pub fn render_frame<R, C>(state: &GameState, resources: &R, canvas: &mut C) -> usize
where
    R: SpriteResolver,
    C: Canvas<R::Handle>,
{
    let collectible = &state.collectible;
    let sprites = std::iter::once((collectible.kind.sprite(), collectible.pos))
        .chain(state.enemies.iter().map(|e| (e.sprite.sprite(), e.pos)))
        .chain(std::iter::once((state.player.avatar.sprite(), state.player.pos)));

    let mut drawn = 0;
    for (sprite, pos) in sprites {
        match resources.resolve(sprite) {
            Ok(handle) => {
                canvas.draw(&handle, pos.x, pos.y);
                drawn += 1;
            }
            Err(e) => log::warn!("Skipping draw: {}", e),
        }
    }
    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::ENEMY_COUNT;
    use crate::sim::EnemyParams;

    struct Atlas {
        missing: &'static str,
    }

    impl SpriteResolver for Atlas {
        type Handle = String;

        fn resolve(&self, sprite: &str) -> Result<String, GameError> {
            if sprite == self.missing {
                Err(GameError::ResourceMissing(sprite.to_string()))
            } else {
                Ok(sprite.to_string())
            }
        }
    }

    #[derive(Default)]
    struct Recorder {
        draws: Vec<(String, f32, f32)>,
    }

    impl Canvas<String> for Recorder {
        fn draw(&mut self, handle: &String, x: f32, y: f32) {
            self.draws.push((handle.clone(), x, y));
        }
    }

    #[test]
    fn test_draws_every_entity() {
        let mut state = GameState::new(3);
        state.populate(ENEMY_COUNT, EnemyParams::default());
        let mut canvas = Recorder::default();

        let drawn = render_frame(&state, &Atlas { missing: "" }, &mut canvas);
        assert_eq!(drawn, ENEMY_COUNT + 2);
        let last = canvas.draws.last().unwrap();
        assert_eq!(last, &("images/char-boy.png".to_string(), 200.0, 380.0));
    }

    #[test]
    fn test_missing_sprite_is_skipped() {
        let mut state = GameState::new(3);
        state.populate(ENEMY_COUNT, EnemyParams::default());
        let mut canvas = Recorder::default();

        let drawn = render_frame(
            &state,
            &Atlas {
                missing: "images/enemy-bug.png",
            },
            &mut canvas,
        );
        assert_eq!(drawn, 2);
        assert!(canvas.draws.iter().all(|(s, _, _)| s != "images/enemy-bug.png"));
    }
}
