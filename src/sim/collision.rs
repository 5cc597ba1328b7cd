//! Collision detection for lane-based entities
//!
//! Rows are discrete, so two entities can only touch when they share a lane.
//! Within a lane a horizontal band around the player stands in for a hitbox.

use glam::Vec2;

/// True if `target` shares the player's lane and sits inside the
/// `player.x ± tolerance` band (inclusive)
#[inline]
pub fn lane_overlap(player: Vec2, target: Vec2, tolerance: f32) -> bool {
    target.y == player.y && target.x >= player.x - tolerance && target.x <= player.x + tolerance
}

/// Indices of every enemy overlapping the player this frame, in roster order
pub fn enemies_hitting(player: Vec2, enemies: &[Vec2], tolerance: f32) -> Vec<usize> {
    enemies
        .iter()
        .enumerate()
        .filter(|(_, pos)| lane_overlap(player, **pos, tolerance))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::HIT_TOLERANCE;

    #[test]
    fn test_hit_inside_band() {
        let player = Vec2::new(200.0, 380.0);
        assert!(lane_overlap(player, Vec2::new(195.0, 380.0), HIT_TOLERANCE));
    }

    #[test]
    fn test_band_edges_are_inclusive() {
        let player = Vec2::new(200.0, 140.0);
        assert!(lane_overlap(player, Vec2::new(170.0, 140.0), HIT_TOLERANCE));
        assert!(lane_overlap(player, Vec2::new(230.0, 140.0), HIT_TOLERANCE));
        assert!(!lane_overlap(player, Vec2::new(169.9, 140.0), HIT_TOLERANCE));
        assert!(!lane_overlap(player, Vec2::new(230.1, 140.0), HIT_TOLERANCE));
    }

    #[test]
    fn test_different_lane_never_hits() {
        let player = Vec2::new(200.0, 140.0);
        assert!(!lane_overlap(player, Vec2::new(200.0, 220.0), HIT_TOLERANCE));
    }

    #[test]
    fn test_enemies_hitting_reports_all_overlaps() {
        let player = Vec2::new(100.0, 60.0);
        let enemies = [
            Vec2::new(90.0, 60.0),
            Vec2::new(100.0, 140.0),
            Vec2::new(125.0, 60.0),
            Vec2::new(400.0, 60.0),
        ];
        assert_eq!(enemies_hitting(player, &enemies, HIT_TOLERANCE), vec![0, 2]);
    }
}
